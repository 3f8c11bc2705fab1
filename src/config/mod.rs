//! Configuration management for `compressor.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── bundle     # [[bundle]], [processors.<name>]
//! │   ├── compressor # [compressor]
//! │   └── serve      # [serve]
//! ├── error          # ConfigError, ConfigDiagnostics
//! └── mod.rs         # CompressorConfig (this file)
//! ```
//!
//! Loading turns the file into a ready [`Compressor`]: command processors are
//! registered first, then every bundle is validated and registered. All
//! problems found are reported together.

mod error;
pub mod section;

pub use error::{ConfigDiagnostic, ConfigDiagnostics, ConfigError};
pub use section::{
    AssetConfig, BundleConfig, BundleKind, CompressorSectionConfig, ProcessorConfig, ServeConfig,
};

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::asset::Asset;
use crate::cli::{Cli, Commands};
use crate::context::Environment;
use crate::processor::Processor;
use crate::registry::Compressor;
use crate::{debug, log};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing compressor.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompressorConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Directory relative paths resolve against - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Environment settings
    #[serde(default)]
    pub compressor: CompressorSectionConfig,

    /// Delivery server settings
    #[serde(default)]
    pub serve: ServeConfig,

    /// External command processors, by name
    #[serde(default)]
    pub processors: BTreeMap<String, ProcessorConfig>,

    /// Bundle declarations, in registration order
    #[serde(default)]
    pub bundle: Vec<BundleConfig>,
}

impl CompressorConfig {
    /// Load configuration from a file; relative paths resolve against its directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config_path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .map_err(|err| ConfigError::Io(path.to_path_buf(), err))?
                .join(path)
        };

        let mut config = Self::from_path(&config_path)?;
        config.root = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        config.config_path = config_path;
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Read and parse a file, warning about unknown fields.
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring: {}", display_path, fields.join(", "));
    }

    /// Apply CLI overrides (`--debug`, `serve --interface/--port`).
    pub fn apply_command_options(&mut self, cli: &Cli) {
        if let Some(debug) = cli.debug {
            self.compressor.debug = debug;
        }
        if let Commands::Serve { interface, port } = &cli.command {
            if let Some(interface) = interface {
                self.serve.interface = *interface;
            }
            if let Some(port) = port {
                self.serve.port = *port;
            }
        }
    }

    /// Static root, resolved against the config directory.
    pub fn static_root(&self) -> PathBuf {
        self.root.join(&self.compressor.static_root)
    }

    pub fn environment(&self) -> Environment {
        Environment::new(self.static_root())
            .with_debug(self.compressor.debug)
            .with_url_prefix(&self.compressor.url_prefix)
    }

    /// Build a compressor with every declared processor and bundle.
    pub fn build_compressor(&self) -> Result<Compressor, ConfigError> {
        let mut compressor = Compressor::new(self.environment());
        let mut diag = ConfigDiagnostics::new();

        for (name, processor) in &self.processors {
            if processor
                .command
                .first()
                .is_none_or(|program| program.trim().is_empty())
            {
                diag.error_with_hint(
                    format!("processors.{name}.command"),
                    "command must name a program",
                    r#"e.g. command = ["uglifyjs", "-"]"#,
                );
                continue;
            }
            compressor.register_processor(
                name.clone(),
                Processor::Command(processor.command.clone()),
            );
        }

        let mut seen = FxHashSet::default();
        for (index, config) in self.bundle.iter().enumerate() {
            let field = format!("bundle[{index}]");

            if config.name.trim().is_empty() {
                diag.error(format!("{field}.name"), "bundle name must not be empty");
            } else if !seen.insert(config.name.as_str()) {
                diag.error(
                    format!("{field}.name"),
                    format!("duplicate bundle name `{}`", config.name),
                );
            }

            check_processors(
                &compressor,
                &config.processors,
                &format!("{field}.processors"),
                &mut diag,
            );

            let mut bundle = config.kind.bundle(&config.name);
            if let Some(mimetype) = &config.mimetype {
                bundle = bundle.with_mimetype(mimetype.clone());
            }
            if let Some(extension) = &config.extension {
                bundle = bundle.with_extension(extension.clone());
            }
            if let Some(template) = &config.inline_template {
                match bundle.clone().with_inline_template(template) {
                    Ok(b) => bundle = b,
                    Err(err) => diag.error(format!("{field}.inline_template"), err.to_string()),
                }
            }
            if let Some(template) = &config.linked_template {
                match bundle.clone().with_linked_template(template) {
                    Ok(b) => bundle = b,
                    Err(err) => diag.error(format!("{field}.linked_template"), err.to_string()),
                }
            }

            let mut assets = Vec::with_capacity(config.assets.len());
            for (i, asset) in config.assets.iter().enumerate() {
                let asset_field = format!("{field}.assets[{i}]");
                check_processors(
                    &compressor,
                    &asset.processors,
                    &format!("{asset_field}.processors"),
                    &mut diag,
                );

                let Some(source) = asset.source() else {
                    diag.error_with_hint(
                        asset_field,
                        "asset must set exactly one of `file` or `content`",
                        r#"e.g. { file = "css/base.css" } or { content = "a{}" }"#,
                    );
                    continue;
                };
                let mut built =
                    Asset::from_source(source).with_processors(asset.processors.iter().cloned());
                if let Some(name) = &asset.name {
                    built = built.with_name(name.clone());
                }
                assets.push(built);
            }

            compressor.register_bundle(
                bundle
                    .with_assets(assets)
                    .with_processors(config.processors.iter().cloned()),
            );
        }

        diag.into_result()?;
        debug!("config"; "loaded {} bundles", compressor.bundles().len());
        Ok(compressor)
    }
}

fn check_processors(
    compressor: &Compressor,
    names: &[String],
    field: &str,
    diag: &mut ConfigDiagnostics,
) {
    for name in names {
        if !compressor.processors().contains(name) {
            diag.error_with_hint(
                field,
                format!("unknown processor `{name}`"),
                format!(
                    "declare it under [processors.{name}] or use one of: {}",
                    compressor.processors().names().join(", ")
                ),
            );
        }
    }
}

impl Compressor {
    /// Compressor described by a loaded configuration.
    pub fn from_config(config: &CompressorConfig) -> Result<Self, ConfigError> {
        config.build_compressor()
    }
}

/// Parse a config snippet, failing on unknown fields.
#[cfg(test)]
pub fn test_parse_config(content: &str) -> CompressorConfig {
    let (parsed, ignored) = CompressorConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
