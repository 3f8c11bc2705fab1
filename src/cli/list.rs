//! `list` command: one line per bundle with its current hash and URL.

use anyhow::Result;
use owo_colors::OwoColorize;

use crate::log;
use crate::registry::Compressor;

pub fn list_bundles(compressor: &Compressor) -> Result<()> {
    let cx = compressor.context();
    let bundles = compressor.bundles();
    if bundles.is_empty() {
        log!("bundle"; "no bundles configured");
        return Ok(());
    }

    let width = bundles.iter().map(|b| b.name().len()).max().unwrap_or(0);
    let mut failed = 0;
    for bundle in bundles {
        match bundle.output(&cx) {
            Ok(output) => {
                let url = bundle.url(&cx)?;
                println!(
                    "{:<width$}  {}  {} {}",
                    bundle.name(),
                    output.hash.dimmed(),
                    url,
                    format!(
                        "({} assets, {} bytes)",
                        bundle.assets().len(),
                        output.content.len()
                    )
                    .dimmed()
                );
            }
            Err(err) => {
                failed += 1;
                println!("{:<width$}  {}", bundle.name(), "failed".red());
                log!("error"; "{:#}", anyhow::Error::new(err));
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{failed} bundle(s) failed to build");
    }
    Ok(())
}
