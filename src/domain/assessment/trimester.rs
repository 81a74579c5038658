//! Trimester grouping for the pregnancy week sub-view.
//!
//! The week picker first asks for a trimester, pre-selects a week in the
//! middle of it, then lets the user refine within that trimester's weeks.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

use super::validators::is_valid_week;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trimester {
    First,
    Second,
    Third,
}

impl Trimester {
    pub const ALL: [Trimester; 3] = [Trimester::First, Trimester::Second, Trimester::Third];

    /// Maps a pregnancy week onto its trimester; `None` for out-of-range weeks.
    pub fn from_week(week: i32) -> Option<Self> {
        if !is_valid_week(week) {
            return None;
        }
        Some(match week {
            1..=12 => Trimester::First,
            13..=27 => Trimester::Second,
            _ => Trimester::Third,
        })
    }

    /// Parses the 1-based trimester number used by the week picker.
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Trimester::First),
            2 => Some(Trimester::Second),
            3 => Some(Trimester::Third),
            _ => None,
        }
    }

    pub fn number(&self) -> u8 {
        match self {
            Trimester::First => 1,
            Trimester::Second => 2,
            Trimester::Third => 3,
        }
    }

    /// Weeks selectable once this trimester is chosen.
    pub fn weeks(&self) -> RangeInclusive<i32> {
        match self {
            Trimester::First => 1..=12,
            Trimester::Second => 13..=27,
            Trimester::Third => 28..=42,
        }
    }

    /// Week pre-selected when the trimester is picked.
    pub fn default_week(&self) -> i32 {
        match self {
            Trimester::First => 6,
            Trimester::Second => 20,
            Trimester::Third => 34,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Trimester::First => "First Trimester (Weeks 1-12)",
            Trimester::Second => "Second Trimester (Weeks 13-27)",
            Trimester::Third => "Third Trimester (Weeks 28-40+)",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Trimester::First => "Early development stage",
            Trimester::Second => "Baby growth & movement",
            Trimester::Third => "Final preparation for birth",
        }
    }
}

impl fmt::Display for Trimester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
