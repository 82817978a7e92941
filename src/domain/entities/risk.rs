use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionSizeFactors {
    pub iv: f64,
    pub gex: f64,
    pub confidence: f64,
    pub base_size: f64,
    pub gex_factor: f64,
    pub confidence_factor: f64,
}

/// Position sizes as fractions of account equity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionSize {
    pub recommended: f64,
    pub conservative: f64,
    pub aggressive: f64,
    pub factors: PositionSizeFactors,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopLossFactors {
    pub current_price: f64,
    pub iv: f64,
    pub support: Option<f64>,
    pub resistance: Option<f64>,
    pub ema10: f64,
    pub ema20: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopLoss {
    /// Level-derived stop price.
    pub technical: f64,
    /// Volatility-tier stop price.
    pub percentage: f64,
    /// The volatility tier as a fraction of price.
    pub percentage_value: f64,
    pub factors: StopLossFactors,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReward {
    /// Zero whenever risk is not positive.
    pub ratio: f64,
    pub reward: f64,
    pub risk: f64,
    pub target_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskRecommendation {
    pub position_size: PositionSize,
    pub stop_loss: StopLoss,
    pub risk_reward: RiskReward,
}
