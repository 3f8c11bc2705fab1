//! Single assets: a content source plus a processor pipeline.
//!
//! Inline assets are computed once and cached. File assets are read from
//! `<static_root>/<filename>`; in debug mode they are re-read and reprocessed
//! on every access so edits show up on the next request, otherwise the first
//! result is kept for the lifetime of the asset.

mod source;

pub use source::AssetSource;

use crate::cache::{CachePolicy, ContentCell};
use crate::context::Context;
use crate::debug;
use crate::error::Result;

/// One source of raw content and the processors applied to it.
#[derive(Debug, Clone)]
pub struct Asset {
    name: Option<String>,
    source: AssetSource,
    processors: Vec<String>,
    cache: ContentCell<String>,
}

impl Asset {
    /// Asset with literal content.
    pub fn new(content: impl Into<String>) -> Self {
        Self::from_source(AssetSource::Inline(content.into()))
    }

    /// Asset read from `filename`, relative to the static root.
    pub fn file(filename: impl Into<std::path::PathBuf>) -> Self {
        Self::from_source(AssetSource::File(filename.into()))
    }

    pub fn from_source(source: AssetSource) -> Self {
        Self {
            name: None,
            source,
            processors: Vec::new(),
            cache: ContentCell::new(),
        }
    }

    /// Set the processor pipeline.
    pub fn with_processors<I, S>(mut self, processors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.processors = processors.into_iter().map(Into::into).collect();
        self
    }

    /// Set a display name (used in per-asset URLs and error messages).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Display name: the explicit name, or the filename of a file asset.
    pub fn name(&self) -> Option<String> {
        self.name.clone().or_else(|| match &self.source {
            AssetSource::File(path) => Some(path.to_string_lossy().into_owned()),
            AssetSource::Inline(_) => None,
        })
    }

    pub fn source(&self) -> &AssetSource {
        &self.source
    }

    pub fn processors(&self) -> &[String] {
        &self.processors
    }

    /// Whether this asset recomputes on every access under `cx`.
    pub fn is_live(&self, cx: &Context<'_>) -> bool {
        cx.debug && self.source.is_file()
    }

    /// Source content before any processor runs.
    pub fn raw_content(&self, cx: &Context<'_>) -> Result<String> {
        self.source.load(cx.static_root)
    }

    /// Processed content, cached unless the asset is live.
    pub fn content(&self, cx: &Context<'_>) -> Result<String> {
        let policy = CachePolicy::from_live(self.is_live(cx));
        self.cache.get_or_try_compute(policy, || {
            let raw = self.raw_content(cx)?;
            let content = cx
                .processors
                .apply(&self.processors, raw, cx.debug)
                .map_err(|e| e.into_error(self.label()))?;
            debug!("asset"; "computed {} ({} bytes)", self.label(), content.len());
            Ok(content)
        })
    }

    fn label(&self) -> String {
        match self.name() {
            Some(name) => format!("asset '{name}'"),
            None => "inline asset".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Environment;
    use crate::error::{CompressorError, ProcessorError};
    use crate::processor::ProcessorRegistry;
    use std::fs;
    use tempfile::TempDir;

    const CSS: &str = "
        html {
            background-color: red;
        }
    ";

    fn foobar(content: &str) -> Result<String, ProcessorError> {
        Ok(format!("FOOBAR{content}"))
    }

    fn registry() -> ProcessorRegistry {
        let mut registry = ProcessorRegistry::with_defaults();
        registry.register_fn("test", foobar);
        registry
    }

    #[test]
    fn test_raw_and_processed_content() {
        let env = Environment::default();
        let processors = registry();
        let cx = Context::new(&env, &processors);

        let asset = Asset::new(CSS).with_processors(["cssmin"]);
        assert_eq!(asset.raw_content(&cx).unwrap(), CSS);
        assert_eq!(asset.content(&cx).unwrap(), "html{background-color:red}");
    }

    #[test]
    fn test_content_without_processors() {
        let env = Environment::default();
        let processors = registry();
        let cx = Context::new(&env, &processors);

        assert_eq!(Asset::new("a{}").content(&cx).unwrap(), "a{}");
    }

    #[test]
    fn test_minify_example() {
        let env = Environment::default();
        let processors = registry();
        let cx = Context::new(&env, &processors);

        let asset = Asset::new("a { color : red }").with_processors(["cssmin"]);
        assert_eq!(asset.content(&cx).unwrap(), "a{color:red}");
    }

    #[test]
    fn test_unknown_processor_is_wrapped() {
        let env = Environment::default();
        let processors = registry();
        let cx = Context::new(&env, &processors);

        let asset = Asset::new("x").with_name("x.css").with_processors(["test", "nope"]);
        let err = asset.content(&cx).unwrap_err();
        match err {
            CompressorError::AssetProcessing {
                target,
                position,
                processor,
                source,
            } => {
                assert_eq!(target, "asset 'x.css'");
                assert_eq!(position, 1);
                assert_eq!(processor, "nope");
                assert_eq!(source, ProcessorError::Unknown("nope".into()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_file_asset() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("style.css"), CSS).unwrap();

        let env = Environment::new(dir.path());
        let processors = registry();
        let cx = Context::new(&env, &processors);

        let asset = Asset::file("style.css").with_processors(["cssmin"]);
        assert_eq!(asset.name().as_deref(), Some("style.css"));
        assert_eq!(asset.raw_content(&cx).unwrap(), CSS);
        assert_eq!(asset.content(&cx).unwrap(), "html{background-color:red}");
    }

    #[test]
    fn test_file_asset_cached_in_production() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.js");
        fs::write(&path, "one;").unwrap();

        let env = Environment::new(dir.path());
        let processors = registry();
        let cx = Context::new(&env, &processors);

        let asset = Asset::file("app.js");
        assert!(!asset.is_live(&cx));
        assert_eq!(asset.content(&cx).unwrap(), "one;");

        fs::write(&path, "two;").unwrap();
        assert_eq!(asset.content(&cx).unwrap(), "one;");
    }

    #[test]
    fn test_file_asset_reloaded_in_debug() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.js");
        fs::write(&path, "one;").unwrap();

        let env = Environment::new(dir.path()).with_debug(true);
        let processors = registry();
        let cx = Context::new(&env, &processors);

        let asset = Asset::file("app.js").with_processors(["test"]);
        assert!(asset.is_live(&cx));
        assert_eq!(asset.content(&cx).unwrap(), "FOOBARone;");

        fs::write(&path, "two;").unwrap();
        assert_eq!(asset.content(&cx).unwrap(), "FOOBARtwo;");
    }

    #[test]
    fn test_inline_asset_not_live_in_debug() {
        let env = Environment::default().with_debug(true);
        let processors = registry();
        let cx = Context::new(&env, &processors);

        assert!(!Asset::new("x").is_live(&cx));
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let env = Environment::new(dir.path());
        let processors = registry();
        let cx = Context::new(&env, &processors);

        let err = Asset::file("missing.css").content(&cx).unwrap_err();
        match err {
            CompressorError::AssetSourceNotFound { path, .. } => {
                assert_eq!(path, dir.path().join("missing.css"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
