use serde::{Deserialize, Serialize};

use crate::domain::values::bias::Bias;

/// Categorical summary of trend, sentiment and momentum plus the raw
/// readings it was derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketContext {
    pub trend: Bias,
    pub sentiment: Bias,
    pub momentum: Bias,
    pub put_call_ratio: f64,
    pub volume_weighted_iv: f64,
    /// `None` when the data provider has no gamma exposure estimate.
    pub gamma_exposure: Option<f64>,
    pub rsi: f64,
    pub stochastic_rsi: f64,
    pub ema10: f64,
    pub ema20: f64,
    pub ema50: f64,
    pub success: bool,
}

impl MarketContext {
    /// Placeholder returned when there is no price history to summarize.
    pub fn unavailable() -> Self {
        Self {
            trend: Bias::Neutral,
            sentiment: Bias::Neutral,
            momentum: Bias::Neutral,
            put_call_ratio: 0.0,
            volume_weighted_iv: 0.0,
            gamma_exposure: None,
            rsi: 0.0,
            stochastic_rsi: 0.0,
            ema10: 0.0,
            ema20: 0.0,
            ema50: 0.0,
            success: false,
        }
    }

    /// Gamma exposure with the missing case treated as flat.
    pub fn gex_or_zero(&self) -> f64 {
        self.gamma_exposure.unwrap_or(0.0)
    }
}
