//! Trend direction shared by the trend-state machines.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    /// `1` for an uptrend, `-1` for a downtrend.
    pub fn sign(self) -> i8 {
        match self {
            Trend::Up => 1,
            Trend::Down => -1,
        }
    }

    pub fn is_up(self) -> bool {
        matches!(self, Trend::Up)
    }
}
