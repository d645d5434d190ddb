use clap::Subcommand;

/// Subcommands of `prosemd-launch`.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Install the server if needed and print its path
    Ensure,

    /// Show where the server is installed and where it is downloaded from
    Paths {
        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Install the server if needed, then run it over stdio
    Run {
        /// Arguments passed to the server instead of `--stdio`
        #[arg(last = true)]
        args: Vec<String>,
    },
}
