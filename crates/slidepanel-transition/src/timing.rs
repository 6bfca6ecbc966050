//! Animation durations
//!
//! Durations are milliseconds. Anything below 1ms (or not a number) means
//! "instant": transitions toward that state snap instead of animating.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::state::PanelState;

/// Which configured duration drives the closing animation.
///
/// Closing has always been animated with the *open* duration; the close
/// duration only decides whether closing snaps. `Close` uses the close
/// duration for the animation as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloseTiming {
    #[default]
    Open,
    Close,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationOptions {
    /// Opening duration in milliseconds
    pub open: f64,
    /// Closing duration in milliseconds
    pub close: f64,
    pub close_timing: CloseTiming,
}

impl AnimationOptions {
    pub fn instant() -> Self {
        Self {
            open: 0.0,
            close: 0.0,
            ..Self::default()
        }
    }

    /// Configured duration for transitions toward `target`
    pub fn configured(&self, target: PanelState) -> f64 {
        match target {
            PanelState::Opened => self.open,
            PanelState::Closed => self.close,
        }
    }

    /// Whether transitions toward `target` snap
    pub fn is_instant(&self, target: PanelState) -> bool {
        let millis = self.configured(target);
        millis.is_nan() || millis < 1.0
    }

    /// Length of the animation run when moving toward `target`
    pub fn animation_duration(&self, target: PanelState) -> Duration {
        let millis = match (target, self.close_timing) {
            (PanelState::Opened, _) | (PanelState::Closed, CloseTiming::Open) => self.open,
            (PanelState::Closed, CloseTiming::Close) => self.close,
        };

        if millis.is_nan() || millis <= 0.0 {
            return Duration::ZERO;
        }

        // Saturates for values past what a Duration can hold
        Duration::try_from_secs_f64(millis / 1000.0).unwrap_or(Duration::MAX)
    }
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            open: 200.0,
            close: 100.0,
            close_timing: CloseTiming::Open,
        }
    }
}
