//! `ensure`: install the server if needed and print its path.

use anyhow::Result;
use prosemd_runtime::{Acquisition, CancellationToken};
use std::path::PathBuf;

use crate::bootstrap::CliContext;
use crate::error::EXIT_CANCELLED;

pub async fn execute(ctx: &CliContext, cancel: &CancellationToken) -> Result<i32> {
    match acquire(ctx, cancel).await? {
        Some(path) => {
            println!("{}", path.display());
            Ok(0)
        }
        None => {
            eprintln!("Server download cancelled");
            Ok(EXIT_CANCELLED)
        }
    }
}

/// Run the acquisition with a terminal progress bar.
///
/// Returns `None` when the download was cancelled.
pub async fn acquire(ctx: &CliContext, cancel: &CancellationToken) -> Result<Option<PathBuf>> {
    let progress = ctx.progress();
    let result = ctx
        .acquirer
        .ensure(&ctx.storage_root, &ctx.tag, &progress, cancel)
        .await;

    match &result {
        Ok(Acquisition::Cached(_)) => progress.clear(),
        Ok(Acquisition::Downloaded(_)) => progress.finish("Download complete"),
        Ok(Acquisition::Cancelled) => progress.abandon("Cancelled"),
        Err(_) => progress.abandon("Download failed"),
    }

    Ok(result?.into_path())
}
