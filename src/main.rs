//! compressor - serve in-memory CSS/JS bundles.

use anyhow::Result;
use clap::{ColorChoice, Parser};
use compressor::cli::{self, Cli, Commands};
use compressor::{Compressor, CompressorConfig, logger, serve};

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    serve::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let mut config = CompressorConfig::load(&cli.config)?;
    config.apply_command_options(&cli);
    let compressor = Compressor::from_config(&config)?;

    match &cli.command {
        Commands::Serve { .. } => cli::serve_bundles(&config, compressor),
        Commands::Render {
            bundle,
            linked,
            assets,
        } => cli::render_bundle(&compressor, bundle, *linked, *assets),
        Commands::List => cli::list_bundles(&compressor),
    }
}
