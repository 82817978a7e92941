use serde::{Deserialize, Serialize};

/// One period of price and pre-computed indicator values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub close_price: f64,
    pub ema10: f64,
    pub ema20: f64,
    pub ema50: f64,
    pub rsi: f64,
    pub stochastic_rsi: f64,
    /// %D line of the stochastic RSI, when the provider computes it.
    #[serde(default)]
    pub stochastic_rsi_signal: Option<f64>,
    #[serde(default)]
    pub volume: f64,
    #[serde(default)]
    pub volume_sma: f64,
}

impl IndicatorSnapshot {
    /// Volume relative to its moving average; zero when the average is unknown.
    pub fn volume_ratio(&self) -> f64 {
        if self.volume_sma > 0.0 {
            self.volume / self.volume_sma
        } else {
            0.0
        }
    }
}

/// Chronological indicator rows, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndicatorSeries(Vec<IndicatorSnapshot>);

impl IndicatorSeries {
    pub fn new(rows: Vec<IndicatorSnapshot>) -> Self {
        Self(rows)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn rows(&self) -> &[IndicatorSnapshot] {
        &self.0
    }

    pub fn latest(&self) -> Option<&IndicatorSnapshot> {
        self.0.last()
    }

    pub fn previous(&self) -> Option<&IndicatorSnapshot> {
        self.back(1)
    }

    /// Row `offset` periods before the latest one.
    pub fn back(&self, offset: usize) -> Option<&IndicatorSnapshot> {
        self.0.len().checked_sub(offset + 1).and_then(|i| self.0.get(i))
    }

    pub fn current_price(&self) -> Option<f64> {
        self.latest().map(|s| s.close_price)
    }
}

impl From<Vec<IndicatorSnapshot>> for IndicatorSeries {
    fn from(rows: Vec<IndicatorSnapshot>) -> Self {
        Self(rows)
    }
}
