//! Progress reporting port.
//!
//! The sink receives incremental fractions so that a host UI which
//! accumulates increments (a notification progress bar, say) can forward
//! them unchanged.

/// One progress update.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressEvent {
    /// Human-readable status, e.g. `"42%"`.
    pub message: String,
    /// Fraction of the whole transfer completed since the previous event.
    pub increment: f64,
}

impl ProgressEvent {
    pub fn new(message: impl Into<String>, increment: f64) -> Self {
        Self {
            message: message.into(),
            increment,
        }
    }
}

/// Receives progress updates during a download.
pub trait ProgressSink: Send + Sync {
    fn report(&self, event: &ProgressEvent);
}

/// A progress sink that ignores all updates.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgress;

impl ProgressSink for NoopProgress {
    fn report(&self, _event: &ProgressEvent) {}
}

impl<F> ProgressSink for F
where
    F: Fn(&ProgressEvent) + Send + Sync,
{
    fn report(&self, event: &ProgressEvent) {
        self(event);
    }
}
