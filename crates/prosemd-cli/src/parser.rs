//! Top-level argument parsing.

use clap::Parser;
use std::path::PathBuf;

use crate::commands::Commands;

/// Release installed when no tag is given.
pub const DEFAULT_TAG: &str = "v0.1.0";

/// Download, verify and launch the prosemd-lsp language server.
#[derive(Parser, Debug)]
#[command(name = "prosemd-launch")]
#[command(about = "Download, verify and launch the prosemd-lsp language server")]
#[command(version)]
pub struct Cli {
    /// Directory that holds downloaded servers
    #[arg(long = "storage-root", env = "PROSEMD_DATA_DIR", global = true)]
    pub storage_root: Option<PathBuf>,

    /// Release tag to install
    #[arg(long, env = "PROSEMD_TAG", default_value = DEFAULT_TAG, global = true)]
    pub tag: String,

    /// Override the release download base URL
    #[arg(long = "release-url", env = "PROSEMD_RELEASE_URL", global = true)]
    pub release_url: Option<String>,

    /// Also append acquisition log lines to this file
    #[arg(long = "log-file", global = true)]
    pub log_file: Option<PathBuf>,

    /// Hide the download progress bar
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}
