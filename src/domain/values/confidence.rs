use serde::{Deserialize, Serialize};
use std::fmt;

/// Setups scoring above this are considered valid.
pub const VALIDITY_THRESHOLD: f64 = 60.0;

/// Confidence score on a 0–100 scale.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Confidence(f64);

impl Confidence {
    /// `100 × earned / possible`, or zero when nothing was possible.
    pub fn from_points(earned: u32, possible: u32) -> Self {
        if possible == 0 {
            return Confidence(0.0);
        }
        let ratio = earned.min(possible) as f64 / possible as f64;
        Confidence(ratio * 100.0)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn is_valid(&self) -> bool {
        self.0 > VALIDITY_THRESHOLD
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.0)
    }
}

impl Default for Confidence {
    fn default() -> Self {
        Confidence(0.0)
    }
}
