use serde::{Deserialize, Serialize};

use crate::domain::entities::scan_record::ScanRecord;
use crate::domain::values::bias::Bias;
use crate::domain::values::confidence::VALIDITY_THRESHOLD;

/// Post-hoc scan filters. Every bound is inclusive.
///
/// Keys missing from a config file fall back to their defaults individually.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanFilters {
    pub trend: Vec<Bias>,
    pub pcr_min: f64,
    pub pcr_max: f64,
    pub rsi_min: f64,
    pub rsi_max: f64,
    pub stoch_rsi_min: f64,
    pub stoch_rsi_max: f64,
    pub min_confidence: f64,
}

impl Default for ScanFilters {
    fn default() -> Self {
        Self {
            trend: Bias::ALL.to_vec(),
            pcr_min: 0.0,
            pcr_max: 2.0,
            rsi_min: 0.0,
            rsi_max: 100.0,
            stoch_rsi_min: 0.0,
            stoch_rsi_max: 100.0,
            min_confidence: VALIDITY_THRESHOLD,
        }
    }
}

impl ScanFilters {
    pub fn passes(&self, record: &ScanRecord) -> bool {
        let ctx = &record.market_context;
        self.trend.contains(&ctx.trend)
            && (self.pcr_min..=self.pcr_max).contains(&ctx.pcr)
            && (self.rsi_min..=self.rsi_max).contains(&ctx.rsi)
            && (self.stoch_rsi_min..=self.stoch_rsi_max).contains(&ctx.stoch_rsi)
            && record.confidence >= self.min_confidence
    }
}
