//! Host environment and the per-call processing context.

use std::path::{Path, PathBuf};

use crate::processor::ProcessorRegistry;

/// Default mount point of the delivery routes.
pub const DEFAULT_URL_PREFIX: &str = "/_compressor";

/// Settings supplied by the hosting application.
#[derive(Debug, Clone)]
pub struct Environment {
    /// Root that file-backed assets are resolved against.
    pub static_root: PathBuf,
    /// Development mode: file assets are re-read on every access.
    pub debug: bool,
    /// Prefix of delivery URLs, without trailing slash.
    pub url_prefix: String,
}

impl Environment {
    pub fn new(static_root: impl Into<PathBuf>) -> Self {
        Self {
            static_root: static_root.into(),
            debug: false,
            url_prefix: DEFAULT_URL_PREFIX.to_owned(),
        }
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_url_prefix(mut self, prefix: impl AsRef<str>) -> Self {
        self.url_prefix = normalize_prefix(prefix.as_ref());
        self
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new("static")
    }
}

/// `"_compressor/"` → `"/_compressor"`, `"/"` → `""`.
pub fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

/// Everything an asset or bundle needs to compute its content.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    pub processors: &'a ProcessorRegistry,
    pub static_root: &'a Path,
    pub debug: bool,
    pub url_prefix: &'a str,
}

impl<'a> Context<'a> {
    pub fn new(env: &'a Environment, processors: &'a ProcessorRegistry) -> Self {
        Self {
            processors,
            static_root: &env.static_root,
            debug: env.debug,
            url_prefix: &env.url_prefix,
        }
    }
}
