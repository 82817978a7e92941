use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Directional classification shared by trend, sentiment, momentum and setups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bias {
    Bullish,
    Bearish,
    Neutral,
}

impl Bias {
    pub const ALL: [Bias; 3] = [Bias::Bullish, Bias::Bearish, Bias::Neutral];

    pub fn as_str(&self) -> &'static str {
        match self {
            Bias::Bullish => "bullish",
            Bias::Bearish => "bearish",
            Bias::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Bias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Bias {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bullish" => Ok(Bias::Bullish),
            "bearish" => Ok(Bias::Bearish),
            "neutral" => Ok(Bias::Neutral),
            _ => Err(format!("Unknown bias: {s}")),
        }
    }
}
