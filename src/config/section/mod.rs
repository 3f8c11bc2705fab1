//! Configuration section definitions.
//!
//! Each module corresponds to a section in `compressor.toml`:
//!
//! | Module       | TOML Section         | Purpose                               |
//! |--------------|----------------------|---------------------------------------|
//! | `compressor` | `[compressor]`       | Static root, debug flag, URL prefix   |
//! | `serve`      | `[serve]`            | Delivery server                       |
//! | `bundle`     | `[[bundle]]`         | Bundles and their assets              |
//! | `bundle`     | `[processors.<name>]`| External command processors           |

mod bundle;
mod compressor;
mod serve;

pub use bundle::{AssetConfig, BundleConfig, BundleKind, ProcessorConfig};
pub use compressor::CompressorSectionConfig;
pub use serve::ServeConfig;
