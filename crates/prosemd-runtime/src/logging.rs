//! Logger adapters.

use chrono::Local;
use prosemd_core::Logger;
use std::io::Write;
use std::sync::{Arc, Mutex};

/// Forwards to `tracing` under the `prosemd` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn info(&self, message: &str) {
        tracing::info!(target: "prosemd", "{message}");
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: "prosemd", "{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "prosemd", "{message}");
    }
}

/// Writes `LABEL [timestamp]: message` lines to any writer.
///
/// Write failures are swallowed; logging must never fail an acquisition.
pub struct LineLogger<W> {
    out: Mutex<W>,
}

impl<W: Write + Send> LineLogger<W> {
    pub const fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write(&self, label: &str, message: &str) {
        let now = Local::now().format("%Y-%m-%d %H:%M:%S");
        let mut out = self
            .out
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let _ = writeln!(out, "{label} [{now}]: {message}");
        let _ = out.flush();
    }
}

impl<W: Write + Send> Logger for LineLogger<W> {
    fn info(&self, message: &str) {
        self.write("INFO", message);
    }

    fn warn(&self, message: &str) {
        self.write("WARN", message);
    }

    fn error(&self, message: &str) {
        self.write("ERROR", message);
    }
}

/// Sends every message to each inner logger in turn.
#[derive(Clone, Default)]
pub struct FanoutLogger {
    loggers: Vec<Arc<dyn Logger>>,
}

impl FanoutLogger {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, logger: Arc<dyn Logger>) -> Self {
        self.loggers.push(logger);
        self
    }
}

impl Logger for FanoutLogger {
    fn info(&self, message: &str) {
        self.loggers.iter().for_each(|l| l.info(message));
    }

    fn warn(&self, message: &str) {
        self.loggers.iter().for_each(|l| l.warn(message));
    }

    fn error(&self, message: &str) {
        self.loggers.iter().for_each(|l| l.error(message));
    }
}
