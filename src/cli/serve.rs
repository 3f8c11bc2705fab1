//! `serve` command: host the delivery routes until Ctrl+C.

use std::sync::Arc;

use anyhow::Result;

use crate::config::CompressorConfig;
use crate::registry::Compressor;
use crate::{log, serve};

pub fn serve_bundles(config: &CompressorConfig, compressor: Compressor) -> Result<()> {
    let mode = if compressor.env().debug { "debug" } else { "production" };
    log!(
        "serve";
        "{} bundles from {} ({mode} mode)",
        compressor.bundles().len(),
        compressor.env().static_root.display()
    );

    let bound = serve::bind_server(
        Arc::new(compressor),
        config.serve.interface,
        config.serve.port,
    )?;
    bound.run()
}
