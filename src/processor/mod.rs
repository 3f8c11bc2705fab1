//! Named text processors and pipelines.
//!
//! A processor is a pure `&str -> String` transformation identified by the
//! name it was registered under. Assets and bundles reference processors by
//! name; [`ProcessorRegistry::apply`] runs such a list in order, feeding each
//! step's output into the next.
//!
//! Built-in processors:
//!
//! | Name     | Transformation                              |
//! |----------|---------------------------------------------|
//! | `cssmin` | CSS minification (lightningcss)             |
//! | `jsmin`  | JavaScript minification (oxc)               |
//! | `less`   | LESS → CSS via the external `lessc` command |
//!
//! Minifiers leave content untouched in debug mode so the served output stays
//! readable while developing.

mod command;
pub mod minify;

use crate::debug;
use crate::error::{CompressorError, ProcessorError};
use rustc_hash::FxHashMap;

/// Signature of a processor registered from code.
pub type ProcessorFn = fn(&str) -> Result<String, ProcessorError>;

/// A text transformation.
#[derive(Debug, Clone)]
pub enum Processor {
    CssMin,
    JsMin,
    Less,
    /// External command; content on stdin, result on stdout.
    Command(Vec<String>),
    Custom(ProcessorFn),
}

impl Processor {
    /// Run the transformation. `name` is only used for error reporting.
    pub fn process(
        &self,
        name: &str,
        content: &str,
        debug: bool,
    ) -> Result<String, ProcessorError> {
        match self {
            Self::CssMin if debug => Ok(content.to_owned()),
            Self::CssMin => {
                minify::minify_css(content).map_err(|e| ProcessorError::execution(name, e))
            }
            Self::JsMin if debug => Ok(content.to_owned()),
            Self::JsMin => {
                minify::minify_js(content).map_err(|e| ProcessorError::execution(name, e))
            }
            Self::Less => command::compile_less(name, content),
            Self::Command(argv) => command::run_command(name, argv, content),
            Self::Custom(f) => f(content),
        }
    }
}

/// A processor failure together with its place in a pipeline.
#[derive(Debug)]
pub struct PipelineError {
    pub position: usize,
    pub processor: String,
    pub source: ProcessorError,
}

impl PipelineError {
    /// Attach what was being processed (e.g. `asset 'base.css'`).
    pub fn into_error(self, target: impl Into<String>) -> CompressorError {
        CompressorError::AssetProcessing {
            target: target.into(),
            position: self.position,
            processor: self.processor,
            source: self.source,
        }
    }
}

/// Name → processor mapping.
#[derive(Debug, Clone, Default)]
pub struct ProcessorRegistry {
    processors: FxHashMap<String, Processor>,
}

impl ProcessorRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in processors.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("cssmin", Processor::CssMin);
        registry.register("jsmin", Processor::JsMin);
        registry.register("less", Processor::Less);
        registry
    }

    /// Add or replace a processor.
    pub fn register(&mut self, name: impl Into<String>, processor: Processor) {
        self.processors.insert(name.into(), processor);
    }

    /// Add or replace a function processor.
    pub fn register_fn(&mut self, name: impl Into<String>, f: ProcessorFn) {
        self.register(name, Processor::Custom(f));
    }

    pub fn resolve(&self, name: &str) -> Result<&Processor, ProcessorError> {
        self.processors
            .get(name)
            .ok_or_else(|| ProcessorError::Unknown(name.to_owned()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.processors.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.processors.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Run `names` over `input` in order.
    pub fn apply<S: AsRef<str>>(
        &self,
        names: &[S],
        input: String,
        debug: bool,
    ) -> Result<String, PipelineError> {
        names
            .iter()
            .enumerate()
            .try_fold(input, |content, (position, name)| {
                let name = name.as_ref();
                let fail = |source| PipelineError {
                    position,
                    processor: name.to_owned(),
                    source,
                };
                let processor = self.resolve(name).map_err(fail)?;
                debug!("processor"; "running `{}` on {} bytes", name, content.len());
                processor.process(name, &content, debug).map_err(fail)
            })
    }
}
