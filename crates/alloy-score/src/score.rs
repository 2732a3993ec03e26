//! Binary score values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Pass/fail score with a fixed maximum of one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Score {
    /// 0 or 1.
    pub score: u8,

    /// Always 1.
    pub max_score: u8,
}

impl Score {
    /// Maximum attainable score.
    pub const MAX: u8 = 1;

    /// Full marks.
    pub fn pass() -> Self {
        Self {
            score: Self::MAX,
            max_score: Self::MAX,
        }
    }

    /// Zero.
    pub fn fail() -> Self {
        Self {
            score: 0,
            max_score: Self::MAX,
        }
    }

    pub fn from_passed(passed: bool) -> Self {
        if passed {
            Self::pass()
        } else {
            Self::fail()
        }
    }

    /// Whether this score is full marks.
    pub fn passed(&self) -> bool {
        self.score == self.max_score
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.score, self.max_score)
    }
}
