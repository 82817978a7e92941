use serde::Serialize;

use super::confirmation::ConfirmationResult;
use super::key_levels::KeyLevels;
use super::market_context::MarketContext;
use super::risk::RiskRecommendation;
use super::setup::SetupResult;

/// Full typed output of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub symbol: String,
    pub context: MarketContext,
    pub levels: KeyLevels,
    pub setup: SetupResult,
    pub confirmation: ConfirmationResult,
    pub risk: RiskRecommendation,
}
