//! Download progress accounting.
//!
//! Converts a running byte count into a bounded series of [`ProgressEvent`]s
//! whose increments never sum past 1.0 and never go negative.

use prosemd_core::ProgressEvent;
use std::time::{Duration, Instant};

/// Fixed-point resolution for reported fractions.
///
/// A power of two, so every increment is exactly representable as `f64` and
/// any running sum of increments equals the reported fraction exactly.
const RESOLUTION: u64 = 1 << 20;

/// Minimum spacing of indeterminate updates, which have no percent boundary.
const INDETERMINATE_INTERVAL: Duration = Duration::from_millis(100);

/// Tracks what has been reported for one download attempt.
pub struct ProgressTracker {
    total: Option<u64>,
    reported_units: u64,
    reported_percent: u64,
    last_indeterminate: Option<Instant>,
}

impl ProgressTracker {
    pub fn new(total: Option<u64>) -> Self {
        Self {
            total,
            reported_units: 0,
            reported_percent: 0,
            last_indeterminate: None,
        }
    }

    /// Fraction of the transfer reported so far.
    #[allow(clippy::cast_precision_loss)]
    pub fn reported_fraction(&self) -> f64 {
        self.reported_units as f64 / RESOLUTION as f64
    }

    /// Record that `downloaded` bytes have arrived in total.
    ///
    /// With a known total, an event is produced only when the whole-percent
    /// value rises, so an attempt yields at most 101 events.
    pub fn advance(&mut self, downloaded: u64) -> Option<ProgressEvent> {
        match self.total {
            Some(total) => self.advance_known(downloaded, total),
            None => self
                .indeterminate_due(Instant::now())
                .then(|| ProgressEvent::new(format_bytes(downloaded), 0.0)),
        }
    }

    /// Close out the attempt after the last byte was written.
    pub fn finish(&mut self, downloaded: u64) -> Option<ProgressEvent> {
        match self.total {
            Some(_) if self.reported_units < RESOLUTION => Some(self.report_units(RESOLUTION, 100)),
            Some(_) => None,
            None => Some(ProgressEvent::new(
                format!("{} (complete)", format_bytes(downloaded)),
                0.0,
            )),
        }
    }

    fn indeterminate_due(&mut self, now: Instant) -> bool {
        match self.last_indeterminate {
            Some(last) if now.duration_since(last) < INDETERMINATE_INTERVAL => false,
            _ => {
                self.last_indeterminate = Some(now);
                true
            }
        }
    }

    fn advance_known(&mut self, downloaded: u64, total: u64) -> Option<ProgressEvent> {
        let units = units_for(downloaded, total);
        let percent = units * 100 / RESOLUTION;
        if percent <= self.reported_percent || units <= self.reported_units {
            return None;
        }
        Some(self.report_units(units, percent))
    }

    #[allow(clippy::cast_precision_loss)]
    fn report_units(&mut self, units: u64, percent: u64) -> ProgressEvent {
        let delta = units - self.reported_units;
        self.reported_units = units;
        self.reported_percent = percent;
        ProgressEvent::new(format!("{percent}%"), delta as f64 / RESOLUTION as f64)
    }
}

fn units_for(downloaded: u64, total: u64) -> u64 {
    if total == 0 {
        return RESOLUTION;
    }
    let scaled = u128::from(downloaded) * u128::from(RESOLUTION) / u128::from(total);
    u64::try_from(scaled).map_or(RESOLUTION, |units| units.min(RESOLUTION))
}

#[allow(clippy::cast_precision_loss)]
fn format_bytes(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    const MIB: f64 = KIB * 1024.0;
    let value = bytes as f64;
    if value >= MIB {
        format!("{:.1} MiB", value / MIB)
    } else {
        format!("{:.0} KiB", value / KIB)
    }
}
