//! CLI entry point - the composition root.

use clap::Parser;
use prosemd_cli::{Cli, dispatch, exit_code};
use prosemd_runtime::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Before parsing, so `.env` values feed the clap env fallbacks and RUST_LOG
    dotenvy::dotenv().ok();

    // stdout belongs to the language server under `run`
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::debug!("Interrupt received, cancelling");
            on_interrupt.cancel();
        }
    });

    let code = match dispatch(cli, &cancel).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            exit_code(&e)
        }
    };
    std::process::exit(code);
}
