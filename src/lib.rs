//! In-memory asset bundler.
//!
//! Raw assets (CSS, JavaScript, anything textual) run through named processor
//! pipelines, are concatenated into bundles and cached in memory. A bundle is
//! rendered either inline into a page or as a link to a content-addressed URL
//! served by [`serve`].
//!
//! ```ignore
//! use compressor::{Asset, Bundle, Compressor, Environment};
//!
//! let mut compressor = Compressor::new(Environment::new("static").with_debug(false));
//! compressor.register_bundle(
//!     Bundle::css("site")
//!         .with_assets([Asset::file("css/base.css"), Asset::new("body{margin:0}")])
//!         .with_processors(["cssmin"]),
//! );
//!
//! let tag = compressor.render("site", false)?;
//! // <link type="text/css" rel="stylesheet" href="/_compressor/bundle/site_v1a2b3c4d.css">
//! ```

pub mod logger;

pub mod asset;
pub mod bundle;
pub mod cache;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod processor;
pub mod registry;
pub mod serve;
pub mod template;
pub mod utils;

pub use asset::{Asset, AssetSource};
pub use bundle::{Bundle, BundleOutput};
pub use config::{CompressorConfig, ConfigError};
pub use context::{Context, Environment};
pub use error::{CompressorError, ProcessorError};
pub use processor::{Processor, ProcessorFn, ProcessorRegistry};
pub use registry::Compressor;
pub use template::{Template, TemplateError};
