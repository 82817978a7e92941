use serde::{Deserialize, Serialize};

/// Band an oscillator reading falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OscillatorZone {
    Overbought,
    Oversold,
    Bullish,
    Bearish,
    Neutral,
}

impl OscillatorZone {
    pub fn rsi(value: f64) -> Self {
        Self::classify(value, 70.0, 30.0, 55.0, 45.0)
    }

    pub fn stochastic_rsi(value: f64) -> Self {
        Self::classify(value, 80.0, 20.0, 60.0, 40.0)
    }

    /// Oversold readings count as bullish pressure (mean reversion up).
    pub fn leans_bullish(&self) -> bool {
        matches!(self, OscillatorZone::Bullish | OscillatorZone::Oversold)
    }

    pub fn leans_bearish(&self) -> bool {
        matches!(self, OscillatorZone::Bearish | OscillatorZone::Overbought)
    }

    fn classify(value: f64, overbought: f64, oversold: f64, bullish: f64, bearish: f64) -> Self {
        if value > overbought {
            OscillatorZone::Overbought
        } else if value < oversold {
            OscillatorZone::Oversold
        } else if value > bullish {
            OscillatorZone::Bullish
        } else if value < bearish {
            OscillatorZone::Bearish
        } else {
            OscillatorZone::Neutral
        }
    }
}
