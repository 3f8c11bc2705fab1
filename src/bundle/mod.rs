//! Bundles: named, ordered concatenations of assets.
//!
//! A bundle's content is the concatenation of its assets' contents (in
//! declared order, no separator) run through the bundle's own processor
//! pipeline. Content and its hash are computed together and cached; if any
//! asset is live (file asset in debug mode) the bundle recomputes on every
//! access as well.

mod render;
pub mod version;

use crate::asset::Asset;
use crate::cache::{CachePolicy, ContentCell};
use crate::context::Context;
use crate::debug;
use crate::error::Result;
use crate::template::{Inline, Linked, Template, TemplateError};
use std::sync::LazyLock;

/// Templates and delivery defaults of a bundle kind.
struct Preset {
    inline: Template<Inline>,
    linked: Template<Linked>,
    mimetype: &'static str,
    extension: &'static str,
}

impl Preset {
    /// Templates are literals; a parse failure is a bug in this file.
    fn builtin(
        inline: &'static str,
        linked: &'static str,
        mimetype: &'static str,
        extension: &'static str,
    ) -> Self {
        Self {
            inline: Template::parse(inline).unwrap(),
            linked: Template::parse(linked).unwrap(),
            mimetype,
            extension,
        }
    }
}

static PLAIN: LazyLock<Preset> = LazyLock::new(|| {
    Preset::builtin(
        "{content}",
        "<link ref='external' href='{url}' type='{mimetype}'>",
        "text/plain",
        "txt",
    )
});

static CSS: LazyLock<Preset> = LazyLock::new(|| {
    Preset::builtin(
        r#"<style type="{mimetype}">{content}</style>"#,
        r#"<link type="{mimetype}" rel="stylesheet" href="{url}">"#,
        "text/css",
        "css",
    )
});

static JS: LazyLock<Preset> = LazyLock::new(|| {
    Preset::builtin(
        r#"<script type="{mimetype}">{content}</script>"#,
        r#"<script type="{mimetype}" src="{url}"></script>"#,
        "text/javascript",
        "js",
    )
});

/// Computed bundle content with the hash of exactly that content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleOutput {
    pub content: String,
    pub hash: String,
}

impl BundleOutput {
    fn new(content: String) -> Self {
        let hash = version::content_hash(&content);
        Self { content, hash }
    }
}

#[derive(Debug, Clone)]
pub struct Bundle {
    name: String,
    assets: Vec<Asset>,
    processors: Vec<String>,
    inline_template: Template<Inline>,
    linked_template: Template<Linked>,
    mimetype: String,
    extension: String,
    cache: ContentCell<BundleOutput>,
}

impl Bundle {
    /// Plain-text bundle.
    pub fn new(name: impl Into<String>) -> Self {
        Self::preset(name.into(), &PLAIN)
    }

    /// Stylesheet bundle: `<style>` / `<link rel="stylesheet">`.
    pub fn css(name: impl Into<String>) -> Self {
        Self::preset(name.into(), &CSS)
    }

    /// Script bundle: `<script>` / `<script src>`.
    pub fn js(name: impl Into<String>) -> Self {
        Self::preset(name.into(), &JS)
    }

    fn preset(name: String, preset: &Preset) -> Self {
        Self {
            name,
            assets: Vec::new(),
            processors: Vec::new(),
            inline_template: preset.inline.clone(),
            linked_template: preset.linked.clone(),
            mimetype: preset.mimetype.to_owned(),
            extension: preset.extension.to_owned(),
            cache: ContentCell::new(),
        }
    }

    pub fn with_asset(mut self, asset: Asset) -> Self {
        self.assets.push(asset);
        self
    }

    pub fn with_assets(mut self, assets: impl IntoIterator<Item = Asset>) -> Self {
        self.assets.extend(assets);
        self
    }

    /// Set the bundle-level pipeline, applied after concatenation.
    pub fn with_processors<I, S>(mut self, processors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.processors = processors.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the inline template (`{content}`, `{mimetype}`).
    pub fn with_inline_template(mut self, template: &str) -> Result<Self, TemplateError> {
        self.inline_template = Template::parse(template)?;
        Ok(self)
    }

    /// Replace the linked template (`{url}`, `{mimetype}`).
    pub fn with_linked_template(mut self, template: &str) -> Result<Self, TemplateError> {
        self.linked_template = Template::parse(template)?;
        Ok(self)
    }

    pub fn with_mimetype(mut self, mimetype: impl Into<String>) -> Self {
        self.mimetype = mimetype.into();
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    pub fn asset(&self, index: usize) -> Option<&Asset> {
        self.assets.get(index)
    }

    pub fn processors(&self) -> &[String] {
        &self.processors
    }

    pub fn mimetype(&self) -> &str {
        &self.mimetype
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn inline_template(&self) -> &Template<Inline> {
        &self.inline_template
    }

    pub fn linked_template(&self) -> &Template<Linked> {
        &self.linked_template
    }

    /// Whether any asset recomputes on every access under `cx`.
    pub fn is_live(&self, cx: &Context<'_>) -> bool {
        self.assets.iter().any(|asset| asset.is_live(cx))
    }

    /// Content and hash, computed together.
    pub fn output(&self, cx: &Context<'_>) -> Result<BundleOutput> {
        let policy = CachePolicy::from_live(self.is_live(cx));
        self.cache.get_or_try_compute(policy, || {
            let raw = self.raw_content(cx)?;
            let content = self.process(cx, raw)?;
            let output = BundleOutput::new(content);
            debug!(
                "bundle";
                "computed '{}' ({} bytes, v{})",
                self.name,
                output.content.len(),
                output.hash
            );
            Ok(output)
        })
    }

    /// Processed bundle content.
    pub fn content(&self, cx: &Context<'_>) -> Result<String> {
        self.output(cx).map(|output| output.content)
    }

    /// Short hash of the current content.
    pub fn hash(&self, cx: &Context<'_>) -> Result<String> {
        self.output(cx).map(|output| output.hash)
    }

    /// Concatenated asset contents, before the bundle pipeline.
    pub fn raw_content(&self, cx: &Context<'_>) -> Result<String> {
        self.assets.iter().try_fold(String::new(), |mut acc, asset| {
            acc.push_str(&asset.content(cx)?);
            Ok(acc)
        })
    }

    /// Each asset's content run through the bundle pipeline on its own.
    pub fn contents(&self, cx: &Context<'_>) -> Result<Vec<String>> {
        self.assets
            .iter()
            .map(|asset| self.process(cx, asset.content(cx)?))
            .collect()
    }

    /// Delivery URL of the whole bundle.
    pub fn url(&self, cx: &Context<'_>) -> Result<String> {
        let hash = self.hash(cx)?;
        Ok(version::bundle_url(cx.url_prefix, &self.name, &hash, &self.extension))
    }

    /// Delivery URL of a single asset.
    pub fn asset_url(&self, cx: &Context<'_>, index: usize) -> Option<String> {
        let asset = self.assets.get(index)?;
        Some(version::asset_url(
            cx.url_prefix,
            &self.name,
            index,
            asset.name().as_deref(),
        ))
    }

    fn process(&self, cx: &Context<'_>, input: String) -> Result<String> {
        cx.processors
            .apply(&self.processors, input, cx.debug)
            .map_err(|e| e.into_error(format!("bundle '{}'", self.name)))
    }
}
