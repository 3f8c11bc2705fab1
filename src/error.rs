//! Error types for asset processing and bundle lookup.

use std::path::PathBuf;
use thiserror::Error;

use crate::template::TemplateError;

/// Errors raised while resolving or running a processor.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProcessorError {
    #[error("processor `{0}` not found")]
    Unknown(String),

    #[error("processor `{name}` failed: {message}")]
    Execution { name: String, message: String },
}

impl ProcessorError {
    pub fn execution(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Execution {
            name: name.into(),
            message: message.into(),
        }
    }
}

/// Errors surfaced by assets, bundles and the bundle registry.
#[derive(Debug, Error)]
pub enum CompressorError {
    /// A processor in a pipeline could not be resolved or failed to run.
    ///
    /// `target` names what was being processed (e.g. `bundle 'site'`),
    /// `position` is the zero-based index of the processor in its pipeline.
    #[error("failed to process {target}: step {position} (`{processor}`)")]
    AssetProcessing {
        target: String,
        position: usize,
        processor: String,
        #[source]
        source: ProcessorError,
    },

    #[error("asset source `{}` not found or unreadable", path.display())]
    AssetSourceNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("bundle `{0}` not found")]
    UnknownBundle(String),

    #[error(transparent)]
    Template(#[from] TemplateError),
}

pub type Result<T, E = CompressorError> = std::result::Result<T, E>;
