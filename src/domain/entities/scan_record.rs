//! Persisted per-symbol scan record.
//!
//! The field names and nesting are the JSON schema consumed by existing
//! result readers; keep them stable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::analysis::Analysis;
use crate::domain::values::bias::Bias;
use crate::domain::values::setup_label::SetupLabel;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextSummary {
    pub trend: Bias,
    pub sentiment: Bias,
    pub momentum: Bias,
    pub pcr: f64,
    pub rsi: f64,
    pub stoch_rsi: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSummary {
    pub support: Vec<f64>,
    pub resistance: Vec<f64>,
    pub max_pain: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRecord {
    pub symbol: String,
    pub timestamp: DateTime<Utc>,
    pub setup: SetupLabel,
    pub confidence: f64,
    pub reasons: Vec<String>,
    pub entry_signal: bool,
    pub entry_strength: u32,
    pub entry_reasons: Vec<String>,
    pub exit_signal: bool,
    pub exit_strength: u32,
    pub exit_reasons: Vec<String>,
    pub position_size: f64,
    pub stop_loss: f64,
    pub risk_reward: f64,
    pub target_price: f64,
    pub current_price: f64,
    pub market_context: ContextSummary,
    pub key_levels: LevelSummary,
}

impl ScanRecord {
    pub fn from_analysis(analysis: &Analysis, timestamp: DateTime<Utc>) -> Self {
        let Analysis {
            symbol,
            context,
            levels,
            setup,
            confirmation,
            risk,
        } = analysis;

        Self {
            symbol: symbol.clone(),
            timestamp,
            setup: setup.setup,
            confidence: setup.confidence.value(),
            reasons: setup.reasons.clone(),
            entry_signal: confirmation.entry.signal,
            entry_strength: confirmation.entry.strength,
            entry_reasons: confirmation.entry.reasons.clone(),
            exit_signal: confirmation.exit.signal,
            exit_strength: confirmation.exit.strength,
            exit_reasons: confirmation.exit.reasons.clone(),
            position_size: risk.position_size.recommended,
            stop_loss: risk.stop_loss.technical,
            risk_reward: risk.risk_reward.ratio,
            target_price: risk.risk_reward.target_price,
            current_price: levels.current_price,
            market_context: ContextSummary {
                trend: context.trend,
                sentiment: context.sentiment,
                momentum: context.momentum,
                pcr: context.put_call_ratio,
                rsi: context.rsi,
                stoch_rsi: context.stochastic_rsi,
            },
            key_levels: LevelSummary {
                support: levels.support.clone(),
                resistance: levels.resistance.clone(),
                max_pain: levels.max_pain,
            },
        }
    }

    pub fn bias(&self) -> Bias {
        self.setup.base
    }
}
