//! Progress value object for the wizard's progress bar.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of the current step within a fixed number of steps.
///
/// Always in `(0, 1]`: the first step already counts as one step shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    position: usize,
    total: usize,
}

impl Progress {
    /// Creates progress for the step at 0-based `index` out of `total` steps.
    ///
    /// `index` is clamped to the last step.
    pub fn at_index(index: usize, total: usize) -> Self {
        let total = total.max(1);
        Self {
            position: (index + 1).min(total),
            total,
        }
    }

    /// Progress once every step is done.
    pub fn complete(total: usize) -> Self {
        let total = total.max(1);
        Self {
            position: total,
            total,
        }
    }

    /// 1-based position of the current step.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn as_fraction(&self) -> f64 {
        self.position as f64 / self.total as f64
    }

    /// Rounded percentage for display.
    pub fn percent(&self) -> u8 {
        ((self.position * 100 + self.total / 2) / self.total) as u8
    }

    pub fn is_complete(&self) -> bool {
        self.position == self.total
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step {} of {} ({}%)", self.position, self.total, self.percent())
    }
}
