//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::net::IpAddr;
use std::path::PathBuf;

/// In-memory CSS/JS bundler CLI
#[derive(Parser, Debug, Clone)]
#[command(version, disable_version_flag = true, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: compressor.toml)
    #[arg(
        short = 'C',
        long,
        global = true,
        default_value = "compressor.toml",
        value_hint = clap::ValueHint::FilePath
    )]
    pub config: PathBuf,

    /// Debug mode: re-read file assets on every access, skip minification
    #[arg(
        short,
        long,
        global = true,
        action = clap::ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true",
        require_equals = false
    )]
    pub debug: Option<bool>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Serve bundles from their content-addressed URLs
    #[command(visible_alias = "s")]
    Serve {
        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<IpAddr>,

        /// Port number to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the markup for one bundle
    #[command(visible_alias = "r")]
    Render {
        /// Bundle name
        bundle: String,

        /// Link to the delivery URL instead of inlining the content
        #[arg(short, long)]
        linked: bool,

        /// One tag per asset instead of the concatenated bundle
        #[arg(short, long)]
        assets: bool,
    },

    /// List registered bundles with their current hash and URL
    #[command(visible_alias = "l")]
    List,
}
