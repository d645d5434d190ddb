//! Composition root: turn parsed arguments into a ready acquirer.

use anyhow::{Context, Result};
use prosemd_core::{AcquireConfig, Logger, VersionTag, default_storage_root};
use prosemd_runtime::{DefaultServerAcquirer, FanoutLogger, LineLogger, ServerAcquirer, TracingLogger};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::parser::Cli;
use crate::progress::CliProgress;

/// Everything a handler needs.
pub struct CliContext {
    pub acquirer: DefaultServerAcquirer,
    pub storage_root: PathBuf,
    pub tag: VersionTag,
    pub quiet: bool,
}

impl CliContext {
    /// A progress reporter honouring `--quiet`.
    pub fn progress(&self) -> CliProgress {
        if self.quiet {
            CliProgress::hidden()
        } else {
            CliProgress::new()
        }
    }
}

/// Resolve configuration from the command line and environment.
pub fn bootstrap(cli: &Cli) -> Result<CliContext> {
    let storage_root = match &cli.storage_root {
        Some(root) => root.clone(),
        None => default_storage_root()?,
    };
    let tag = VersionTag::new(cli.tag.as_str())?;

    let mut config = AcquireConfig::new();
    if let Some(url) = &cli.release_url {
        config = config.with_release_base_url(url.as_str());
    }

    let logger = build_logger(cli.log_file.as_deref())?;
    let acquirer = ServerAcquirer::with_defaults(config, logger)?;

    Ok(CliContext {
        acquirer,
        storage_root,
        tag,
        quiet: cli.quiet,
    })
}

fn build_logger(log_file: Option<&Path>) -> Result<Arc<dyn Logger>> {
    let Some(path) = log_file else {
        return Ok(Arc::new(TracingLogger));
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    Ok(Arc::new(
        FanoutLogger::new()
            .with(Arc::new(TracingLogger))
            .with(Arc::new(LineLogger::new(file))),
    ))
}
