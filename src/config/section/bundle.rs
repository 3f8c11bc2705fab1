//! `[[bundle]]` and `[processors.<name>]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [processors.uglify]
//! command = ["uglifyjs", "-"]
//!
//! [[bundle]]
//! name = "site"
//! kind = "css"                # css | js | plain
//! processors = ["cssmin"]
//! assets = [
//!   { file = "css/base.css" },
//!   { file = "css/theme.less", processors = ["less"] },
//!   { content = "body{margin:0}" },
//! ]
//! ```
//!
//! Optional per-bundle overrides: `inline_template`, `linked_template`,
//! `mimetype`, `extension`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::asset::AssetSource;
use crate::bundle::Bundle;

/// External command processor: content on stdin, result on stdout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessorConfig {
    /// Program followed by its arguments.
    pub command: Vec<String>,
}

/// Preset a bundle starts from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BundleKind {
    Css,
    Js,
    #[default]
    Plain,
}

impl BundleKind {
    pub fn bundle(self, name: &str) -> Bundle {
        match self {
            Self::Css => Bundle::css(name),
            Self::Js => Bundle::js(name),
            Self::Plain => Bundle::new(name),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleConfig {
    pub name: String,

    #[serde(default)]
    pub kind: BundleKind,

    /// Applied to the concatenated content.
    #[serde(default)]
    pub processors: Vec<String>,

    #[serde(default)]
    pub assets: Vec<AssetConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_template: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_template: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mimetype: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
}

/// One asset entry: exactly one of `file` or `content`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetConfig {
    /// Path relative to `static_root`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,

    /// Inline literal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Display name used in per-asset URLs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default)]
    pub processors: Vec<String>,
}

impl AssetConfig {
    /// The declared source, `None` unless exactly one of `file`/`content` is set.
    pub fn source(&self) -> Option<AssetSource> {
        match (&self.file, &self.content) {
            (Some(file), None) => Some(AssetSource::File(file.clone())),
            (None, Some(content)) => Some(AssetSource::Inline(content.clone())),
            _ => None,
        }
    }
}
