//! Command-line interface module.

mod args;
mod list;
mod render;
mod serve;

pub use args::{Cli, Commands};
pub use list::list_bundles;
pub use render::render_bundle;
pub use serve::serve_bundles;
