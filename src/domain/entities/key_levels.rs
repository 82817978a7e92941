use serde::{Deserialize, Serialize};

/// Options-derived price levels around the current price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyLevels {
    /// Descending, nearest below price first.
    pub support: Vec<f64>,
    /// Ascending, nearest above price first.
    pub resistance: Vec<f64>,
    pub max_pain: Option<f64>,
    /// Ascending.
    pub high_gamma_strikes: Vec<f64>,
    pub current_price: f64,
    pub success: bool,
}

impl KeyLevels {
    pub fn unavailable(current_price: f64) -> Self {
        Self {
            support: Vec::new(),
            resistance: Vec::new(),
            max_pain: None,
            high_gamma_strikes: Vec::new(),
            current_price,
            success: false,
        }
    }

    pub fn nearest_support(&self) -> Option<f64> {
        self.support.first().copied()
    }

    pub fn nearest_resistance(&self) -> Option<f64> {
        self.resistance.first().copied()
    }
}
