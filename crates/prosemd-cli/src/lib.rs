//! `prosemd-launch`: install the prosemd-lsp server and run it.
//!
//! `main.rs` is the composition root. Everything it needs lives here so the
//! parser and handlers can be tested without spawning the binary.

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod progress;

pub use bootstrap::{CliContext, bootstrap};
pub use commands::Commands;
pub use error::{EXIT_CANCELLED, exit_code};
pub use parser::Cli;
pub use progress::CliProgress;

use prosemd_runtime::CancellationToken;

/// Run the parsed command and return the process exit code.
pub async fn dispatch(cli: Cli, cancel: &CancellationToken) -> anyhow::Result<i32> {
    let ctx = bootstrap(&cli)?;

    match cli.command {
        Commands::Ensure => handlers::ensure::execute(&ctx, cancel).await,
        Commands::Paths { json } => handlers::paths::execute(&ctx, json),
        Commands::Run { args } => handlers::run::execute(&ctx, &args, cancel).await,
    }
}
