//! Terminal progress reporting with indicatif.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use prosemd_core::{ProgressEvent, ProgressSink};
use std::sync::Mutex;

/// Bar resolution; incoming fractions are scaled to this many steps.
const BAR_STEPS: u64 = 1000;

struct State {
    bar: Option<ProgressBar>,
    determinate: bool,
    fraction: f64,
}

/// Shows a spinner until the first fractional update, then a bar.
pub struct CliProgress {
    state: Mutex<State>,
    hidden: bool,
}

impl CliProgress {
    pub const fn new() -> Self {
        Self::with_visibility(false)
    }

    /// A reporter that tracks progress without drawing anything.
    pub const fn hidden() -> Self {
        Self::with_visibility(true)
    }

    const fn with_visibility(hidden: bool) -> Self {
        Self {
            state: Mutex::new(State {
                bar: None,
                determinate: false,
                fraction: 0.0,
            }),
            hidden,
        }
    }

    fn create_download_bar(&self) -> ProgressBar {
        let pb = self.attach(ProgressBar::new(BAR_STEPS));
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {msg}")
        {
            pb.set_style(style.progress_chars("█▓░"));
        }
        pb
    }

    fn create_spinner(&self) -> ProgressBar {
        let pb = self.attach(ProgressBar::new_spinner());
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}") {
            pb.set_style(style);
        }
        pb
    }

    fn attach(&self, pb: ProgressBar) -> ProgressBar {
        if self.hidden {
            pb.set_draw_target(ProgressDrawTarget::hidden());
        }
        pb
    }

    /// Accumulated fraction of the download reported so far.
    pub fn fraction(&self) -> f64 {
        self.state.lock().map_or(0.0, |state| state.fraction)
    }

    /// Bar position in steps out of 1000, if a bar is showing.
    pub fn position(&self) -> Option<u64> {
        let state = self.state.lock().ok()?;
        state
            .bar
            .as_ref()
            .filter(|_| state.determinate)
            .map(ProgressBar::position)
    }

    /// Complete the bar and leave `message` on screen.
    pub fn finish(&self, message: &str) {
        if let Some(pb) = self.take() {
            pb.finish_with_message(message.to_string());
        }
    }

    /// Stop the bar where it is and leave `message` on screen.
    pub fn abandon(&self, message: &str) {
        if let Some(pb) = self.take() {
            pb.abandon_with_message(message.to_string());
        }
    }

    /// Remove the bar without leaving anything behind.
    pub fn clear(&self) {
        if let Some(pb) = self.take() {
            pb.finish_and_clear();
        }
    }

    fn take(&self) -> Option<ProgressBar> {
        self.state.lock().ok()?.bar.take()
    }
}

impl Default for CliProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for CliProgress {
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn report(&self, event: &ProgressEvent) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };

        if event.increment > 0.0 && !state.determinate {
            if let Some(spinner) = state.bar.take() {
                spinner.finish_and_clear();
            }
            state.bar = Some(self.create_download_bar());
            state.determinate = true;
        }
        if state.bar.is_none() {
            let spinner = self.create_spinner();
            spinner.enable_steady_tick(std::time::Duration::from_millis(120));
            state.bar = Some(spinner);
        }

        state.fraction = (state.fraction + event.increment.max(0.0)).min(1.0);
        let position = (state.fraction * BAR_STEPS as f64).round() as u64;
        let determinate = state.determinate;

        if let Some(pb) = state.bar.as_ref() {
            pb.set_message(event.message.clone());
            if determinate {
                pb.set_position(position.min(BAR_STEPS));
            } else {
                pb.tick();
            }
        }
    }
}
