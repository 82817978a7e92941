use serde::{Deserialize, Serialize};

use super::indicator::IndicatorSeries;
use super::options::OptionsSurface;

/// Everything the pipeline needs for one symbol, fetched once per cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub symbol: String,
    pub indicators: IndicatorSeries,
    #[serde(default)]
    pub options: OptionsSurface,
    #[serde(default)]
    pub gamma_exposure: Option<f64>,
}

impl MarketSnapshot {
    pub fn current_price(&self) -> Option<f64> {
        self.indicators.current_price()
    }
}
