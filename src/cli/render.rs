//! `render` command: print one bundle's markup to stdout.

use anyhow::Result;

use crate::registry::Compressor;

pub fn render_bundle(
    compressor: &Compressor,
    name: &str,
    linked: bool,
    assets: bool,
) -> Result<()> {
    let markup = if assets {
        compressor.render_assets(name, !linked)?
    } else {
        compressor.render(name, !linked)?
    };
    println!("{markup}");
    Ok(())
}
