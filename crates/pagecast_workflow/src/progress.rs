//! Cosmetic progress indicator shown while a publish is in flight.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tokio::sync::watch;

/// Label matching the current progress value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum ProgressStage {
    /// Below 30%
    #[strum(serialize = "Preparing...")]
    Preparing,
    /// Below 60%
    #[strum(serialize = "Uploading media...")]
    UploadingMedia,
    /// Below 90%
    #[strum(serialize = "Publishing...")]
    Publishing,
    /// Waiting at the cap
    #[strum(serialize = "Finalizing...")]
    Finalizing,
    /// Response received
    #[strum(serialize = "Done!")]
    Done,
}

impl ProgressStage {
    /// Label for a percentage.
    pub fn for_value(value: f64) -> Self {
        match value {
            v if v >= 100.0 => Self::Done,
            v if v < 30.0 => Self::Preparing,
            v if v < 60.0 => Self::UploadingMedia,
            v if v < 90.0 => Self::Publishing,
            _ => Self::Finalizing,
        }
    }
}

/// Tick interval and ceiling of the simulated progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressConfig {
    /// Delay between ticks
    pub tick: Duration,
    /// Highest percentage shown before the response arrives
    pub cap: u8,
}

impl ProgressConfig {
    /// Tick interval actually used, never shorter than one millisecond.
    pub fn period(&self) -> Duration {
        self.tick.max(MIN_TICK)
    }
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(500),
            cap: 90,
        }
    }
}

const MAX_STEP: f64 = 20.0;
const MIN_TICK: Duration = Duration::from_millis(1);

/// Highest cap accepted; 100 is reserved for a received response.
pub const MAX_PROGRESS_CAP: u8 = 99;

/// Randomly advancing percentage, unrelated to actual transfer progress.
///
/// The value never decreases, stays at or below the cap while ticking, and
/// jumps to 100 on [`finish`](Self::finish).
///
/// # Examples
///
/// ```
/// use pagecast_workflow::{ProgressStage, SimulatedProgress};
///
/// let mut progress = SimulatedProgress::with_seed(90, 7);
/// for _ in 0..50 {
///     progress.tick();
/// }
/// assert!(progress.value() <= 90.0);
///
/// progress.finish();
/// assert_eq!(progress.value(), 100.0);
/// assert_eq!(progress.stage(), ProgressStage::Done);
/// ```
#[derive(Debug)]
pub struct SimulatedProgress {
    value: f64,
    cap: f64,
    rng: StdRng,
    tx: watch::Sender<f64>,
}

impl SimulatedProgress {
    /// Progress capped at `cap` percent, at most [`MAX_PROGRESS_CAP`].
    pub fn new(cap: u8) -> Self {
        Self::from_rng(cap, StdRng::from_entropy())
    }

    /// Deterministic progress for tests and demos.
    pub fn with_seed(cap: u8, seed: u64) -> Self {
        Self::from_rng(cap, StdRng::seed_from_u64(seed))
    }

    fn from_rng(cap: u8, rng: StdRng) -> Self {
        let (tx, _) = watch::channel(0.0);
        Self {
            value: 0.0,
            cap: f64::from(cap.min(MAX_PROGRESS_CAP)),
            rng,
            tx,
        }
    }

    /// Advance by a random step below 20 points, up to the cap.
    pub fn tick(&mut self) -> f64 {
        if self.value < self.cap {
            let step = self.rng.gen_range(0.0..MAX_STEP);
            self.value = (self.value + step).min(self.cap);
            self.tx.send_replace(self.value);
        }
        self.value
    }

    /// Snap to 100.
    pub fn finish(&mut self) {
        self.value = 100.0;
        self.tx.send_replace(self.value);
    }

    /// Back to zero for the next submission.
    pub fn reset(&mut self) {
        self.value = 0.0;
        self.tx.send_replace(self.value);
    }

    /// Current percentage.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Label for the current percentage.
    pub fn stage(&self) -> ProgressStage {
        ProgressStage::for_value(self.value)
    }

    /// Receiver of the percentage, for progress bars.
    pub fn watch(&self) -> watch::Receiver<f64> {
        self.tx.subscribe()
    }
}
