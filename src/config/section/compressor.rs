//! `[compressor]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [compressor]
//! static_root = "static"        # Relative to the config file
//! debug = false                 # Re-read file assets on every access
//! url_prefix = "/_compressor"   # Mount point of the delivery routes
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::context::DEFAULT_URL_PREFIX;

/// Environment settings shared by every bundle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressorSectionConfig {
    /// Directory file assets are resolved against.
    pub static_root: PathBuf,

    /// Debug mode: file assets are live and minifiers pass content through.
    pub debug: bool,

    /// Prefix of every generated URL.
    pub url_prefix: String,
}

impl Default for CompressorSectionConfig {
    fn default() -> Self {
        Self {
            static_root: PathBuf::from("static"),
            debug: false,
            url_prefix: DEFAULT_URL_PREFIX.to_owned(),
        }
    }
}
