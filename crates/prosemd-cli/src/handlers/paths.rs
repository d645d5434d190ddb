//! `paths`: show the install location and download URL.
//!
//! Never touches the network. The server directory is created so the printed
//! destination is exactly what `ensure` would use.

use anyhow::Result;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use crate::bootstrap::CliContext;

/// Resolved acquisition locations for one tag.
#[derive(Debug, Serialize)]
pub struct ResolvedPaths {
    pub tag: String,
    pub os: &'static str,
    pub storage_root: PathBuf,
    pub destination: PathBuf,
    /// `None` when no build is published for this platform.
    pub url: Option<String>,
}

impl ResolvedPaths {
    pub fn resolve(ctx: &CliContext) -> Result<Self> {
        let destination = ctx.acquirer.destination(&ctx.storage_root, &ctx.tag)?;
        let url = ctx.acquirer.url(&ctx.tag).ok();

        Ok(Self {
            tag: ctx.tag.to_string(),
            os: std::env::consts::OS,
            storage_root: ctx.storage_root.clone(),
            destination,
            url,
        })
    }
}

impl fmt::Display for ResolvedPaths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "tag          = {}", self.tag)?;
        writeln!(f, "os           = {}", self.os)?;
        writeln!(f, "storage_root = {}", self.storage_root.display())?;
        writeln!(f, "destination  = {}", self.destination.display())?;
        match &self.url {
            Some(url) => write!(f, "url          = {url}"),
            None => write!(f, "url          = (unsupported platform)"),
        }
    }
}

pub fn execute(ctx: &CliContext, json: bool) -> Result<i32> {
    let paths = ResolvedPaths::resolve(ctx)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&paths)?);
    } else {
        println!("{paths}");
    }
    Ok(0)
}
