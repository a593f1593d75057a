//! Progress signal payload

use std::fmt;

/// Elapsed fraction of a timed animation
///
/// The driver only produces values in `[0, 1]`, but eased progress may leave
/// that range (back and elastic curves overshoot), so construction never
/// clamps.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Progress {
    percent: f64,
}

impl Progress {
    /// Progress at the very start of an animation
    pub const START: Progress = Progress { percent: 0.0 };

    /// Terminal progress, always the last value a driver emits
    pub const COMPLETE: Progress = Progress { percent: 1.0 };

    pub const fn new(percent: f64) -> Self {
        Self { percent }
    }

    pub const fn percent(self) -> f64 {
        self.percent
    }

    pub fn is_complete(self) -> bool {
        self.percent >= 1.0
    }
}

impl From<f64> for Progress {
    fn from(percent: f64) -> Self {
        Self::new(percent)
    }
}

impl From<Progress> for f64 {
    fn from(progress: Progress) -> Self {
        progress.percent
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.percent * 100.0)
    }
}
