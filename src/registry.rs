//! The bundle registry and its host-facing entry points.
//!
//! A [`Compressor`] is built once at startup: the host supplies an
//! [`Environment`], registers processors and bundles, then shares the
//! compressor read-only (e.g. behind an `Arc`) with the template layer and
//! the delivery server.

use rustc_hash::FxHashMap;

use crate::bundle::Bundle;
use crate::context::{Context, Environment};
use crate::debug;
use crate::error::{CompressorError, ProcessorError, Result};
use crate::processor::{Processor, ProcessorFn, ProcessorRegistry};

#[derive(Debug, Clone)]
pub struct Compressor {
    env: Environment,
    processors: ProcessorRegistry,
    bundles: FxHashMap<String, Bundle>,
}

impl Compressor {
    /// Compressor with the built-in processors and no bundles.
    pub fn new(env: Environment) -> Self {
        Self {
            env,
            processors: ProcessorRegistry::with_defaults(),
            bundles: FxHashMap::default(),
        }
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn context(&self) -> Context<'_> {
        Context::new(&self.env, &self.processors)
    }

    // ------------------------------------------------------------------------
    // Processors
    // ------------------------------------------------------------------------

    /// Add or replace a processor.
    pub fn register_processor(&mut self, name: impl Into<String>, processor: Processor) {
        self.processors.register(name, processor);
    }

    /// Add or replace a function processor.
    pub fn register_processor_fn(&mut self, name: impl Into<String>, f: ProcessorFn) {
        self.processors.register_fn(name, f);
    }

    pub fn get_processor(&self, name: &str) -> Result<&Processor, ProcessorError> {
        self.processors.resolve(name)
    }

    pub fn processors(&self) -> &ProcessorRegistry {
        &self.processors
    }

    // ------------------------------------------------------------------------
    // Bundles
    // ------------------------------------------------------------------------

    /// Register a bundle, replacing any bundle with the same name.
    pub fn register_bundle(&mut self, bundle: Bundle) {
        debug!("bundle"; "registered '{}' ({} assets)", bundle.name(), bundle.assets().len());
        self.bundles.insert(bundle.name().to_owned(), bundle);
    }

    pub fn get_bundle(&self, name: &str) -> Result<&Bundle> {
        self.bundles
            .get(name)
            .ok_or_else(|| CompressorError::UnknownBundle(name.to_owned()))
    }

    /// Registered bundles, sorted by name.
    pub fn bundles(&self) -> Vec<&Bundle> {
        let mut bundles: Vec<_> = self.bundles.values().collect();
        bundles.sort_unstable_by(|a, b| a.name().cmp(b.name()));
        bundles
    }

    // ------------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------------

    /// Template helper: markup for `bundle_name`, inline or linked.
    pub fn render(&self, bundle_name: &str, inline: bool) -> Result<String> {
        self.get_bundle(bundle_name)?.render(&self.context(), inline)
    }

    /// Template helper: one tag per asset of `bundle_name`.
    pub fn render_assets(&self, bundle_name: &str, inline: bool) -> Result<String> {
        self.get_bundle(bundle_name)?
            .render_assets(&self.context(), inline)
    }
}
