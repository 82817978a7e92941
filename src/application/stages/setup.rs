//! Trade setup scorer.
//!
//! Each candidate direction is scored by a fixed checklist of weighted
//! criteria. Points are integers; a candidate's confidence is the share of
//! points it earned out of the points it could have earned.
//!
//! Criteria whose input is missing (no support, no resistance, no max pain,
//! no gamma exposure estimate) are left out of both sides of that share. A
//! sparse snapshot therefore scores against a smaller denominator, which
//! tends to raise confidence. Tests pin this down so a change is deliberate.

use crate::domain::entities::key_levels::KeyLevels;
use crate::domain::entities::market_context::MarketContext;
use crate::domain::entities::setup::{CandidateBreakdown, CandidateSetup, SetupResult};
use crate::domain::values::bias::Bias;
use crate::domain::values::confidence::Confidence;
use crate::domain::values::setup_label::SetupLabel;

const TREND_POINTS: u32 = 3;
const SENTIMENT_POINTS: u32 = 2;
const VOLATILITY_POINTS: u32 = 2;
const RSI_POINTS: u32 = 2;
const STOCH_POINTS: u32 = 2;
const LEVEL_POINTS: u32 = 3;
const GEX_POINTS: u32 = 2;

/// A checklist that scores one candidate direction.
pub trait SetupRules: Send + Sync {
    fn bias(&self) -> Bias;

    fn evaluate(&self, context: &MarketContext, levels: &KeyLevels) -> CandidateSetup;
}

/// Points earned and possible for one candidate, with a reason per hit.
struct Scorecard {
    bias: Bias,
    earned: u32,
    possible: u32,
    reasons: Vec<String>,
}

impl Scorecard {
    fn new(bias: Bias) -> Self {
        Self {
            bias,
            earned: 0,
            possible: 0,
            reasons: Vec::new(),
        }
    }

    /// A criterion that always counts toward the possible points.
    fn criterion(&mut self, weight: u32, hit: Option<(u32, String)>) {
        self.possible += weight;
        if let Some((points, reason)) = hit {
            self.earned += points.min(weight);
            self.reasons.push(reason);
        }
    }

    /// A criterion that only counts when its input is present.
    fn optional<T>(
        &mut self,
        weight: u32,
        input: Option<T>,
        judge: impl FnOnce(T) -> Option<(u32, String)>,
    ) {
        if let Some(value) = input {
            self.criterion(weight, judge(value));
        }
    }

    fn finish(self) -> CandidateSetup {
        let confidence = Confidence::from_points(self.earned, self.possible);
        CandidateSetup {
            bias: self.bias,
            valid: confidence.is_valid(),
            confidence,
            points_earned: self.earned,
            points_possible: self.possible,
            reasons: self.reasons,
        }
    }
}

pub struct BullishRules;

impl SetupRules for BullishRules {
    fn bias(&self) -> Bias {
        Bias::Bullish
    }

    fn evaluate(&self, context: &MarketContext, levels: &KeyLevels) -> CandidateSetup {
        let mut card = Scorecard::new(self.bias());
        let pcr = context.put_call_ratio;
        let rsi = context.rsi;
        let stoch = context.stochastic_rsi;
        let price = levels.current_price;

        card.criterion(
            TREND_POINTS,
            match context.trend {
                Bias::Bullish => Some((3, "Strong bullish trend (EMA alignment)".to_string())),
                Bias::Neutral => Some((1, "Neutral trend".to_string())),
                Bias::Bearish => None,
            },
        );

        card.criterion(
            SENTIMENT_POINTS,
            if pcr < 0.8 {
                Some((2, format!("Bullish sentiment (PCR: {pcr:.2})")))
            } else if pcr < 1.0 {
                Some((1, format!("Neutral sentiment (PCR: {pcr:.2})")))
            } else {
                None
            },
        );

        card.criterion(
            RSI_POINTS,
            if (55.0..=80.0).contains(&rsi) {
                Some((2, format!("Bullish momentum (RSI: {rsi:.2})")))
            } else if (45.0..55.0).contains(&rsi) {
                Some((1, format!("Neutral momentum (RSI: {rsi:.2})")))
            } else {
                None
            },
        );

        card.criterion(
            STOCH_POINTS,
            if stoch > 60.0 {
                Some((2, format!("Bullish Stochastic RSI: {stoch:.2}")))
            } else if stoch > 40.0 {
                Some((1, format!("Neutral Stochastic RSI: {stoch:.2}")))
            } else {
                None
            },
        );

        card.optional(LEVEL_POINTS, levels.nearest_support(), |support| {
            if price <= support * 1.02 {
                Some((3, format!("Price near support ({support:.2})")))
            } else if price <= support * 1.05 {
                Some((1, format!("Price approaching support ({support:.2})")))
            } else {
                None
            }
        });

        card.optional(GEX_POINTS, context.gamma_exposure, |gex| {
            (gex > 500.0).then(|| (2, "Positive GEX indicating bullish stability".to_string()))
        });

        card.finish()
    }
}

pub struct BearishRules;

impl SetupRules for BearishRules {
    fn bias(&self) -> Bias {
        Bias::Bearish
    }

    fn evaluate(&self, context: &MarketContext, levels: &KeyLevels) -> CandidateSetup {
        let mut card = Scorecard::new(self.bias());
        let pcr = context.put_call_ratio;
        let rsi = context.rsi;
        let stoch = context.stochastic_rsi;
        let price = levels.current_price;

        card.criterion(
            TREND_POINTS,
            match context.trend {
                Bias::Bearish => Some((3, "Strong bearish trend (EMA alignment)".to_string())),
                Bias::Neutral => Some((1, "Neutral trend".to_string())),
                Bias::Bullish => None,
            },
        );

        card.criterion(
            SENTIMENT_POINTS,
            if pcr > 1.2 {
                Some((2, format!("Bearish sentiment (PCR: {pcr:.2})")))
            } else if pcr > 1.0 {
                Some((1, format!("Neutral sentiment (PCR: {pcr:.2})")))
            } else {
                None
            },
        );

        card.criterion(
            RSI_POINTS,
            if (20.0..=45.0).contains(&rsi) {
                Some((2, format!("Bearish momentum (RSI: {rsi:.2})")))
            } else if rsi > 45.0 && rsi <= 55.0 {
                Some((1, format!("Neutral momentum (RSI: {rsi:.2})")))
            } else {
                None
            },
        );

        card.criterion(
            STOCH_POINTS,
            if stoch < 40.0 {
                Some((2, format!("Bearish Stochastic RSI: {stoch:.2}")))
            } else if stoch < 60.0 {
                Some((1, format!("Neutral Stochastic RSI: {stoch:.2}")))
            } else {
                None
            },
        );

        card.optional(LEVEL_POINTS, levels.nearest_resistance(), |resistance| {
            if price >= resistance * 0.98 {
                Some((3, format!("Price near resistance ({resistance:.2})")))
            } else if price >= resistance * 0.95 {
                Some((1, format!("Price approaching resistance ({resistance:.2})")))
            } else {
                None
            }
        });

        card.optional(GEX_POINTS, context.gamma_exposure, |gex| {
            (gex < -500.0).then(|| (2, "Negative GEX indicating bearish pressure".to_string()))
        });

        card.finish()
    }
}

pub struct NeutralRules;

impl SetupRules for NeutralRules {
    fn bias(&self) -> Bias {
        Bias::Neutral
    }

    fn evaluate(&self, context: &MarketContext, levels: &KeyLevels) -> CandidateSetup {
        let mut card = Scorecard::new(self.bias());
        let pcr = context.put_call_ratio;
        let iv = context.volume_weighted_iv;
        let rsi = context.rsi;
        let stoch = context.stochastic_rsi;
        let price = levels.current_price;

        card.criterion(
            TREND_POINTS,
            (context.trend == Bias::Neutral).then(|| (3, "Neutral trend (flat EMAs)".to_string())),
        );

        card.criterion(
            SENTIMENT_POINTS,
            (0.8..=1.2)
                .contains(&pcr)
                .then(|| (2, format!("Neutral sentiment (PCR: {pcr:.2})"))),
        );

        card.criterion(
            VOLATILITY_POINTS,
            if iv < 0.4 {
                Some((2, format!("Low implied volatility ({iv:.2})")))
            } else if iv < 0.5 {
                Some((1, format!("Moderate implied volatility ({iv:.2})")))
            } else {
                None
            },
        );

        card.criterion(
            RSI_POINTS,
            (45.0..=65.0)
                .contains(&rsi)
                .then(|| (2, format!("Neutral momentum (RSI: {rsi:.2})"))),
        );

        card.criterion(
            STOCH_POINTS,
            (25.0..=75.0)
                .contains(&stoch)
                .then(|| (2, format!("Neutral Stochastic RSI: {stoch:.2}"))),
        );

        let max_pain = levels.max_pain.filter(|&mp| mp > 0.0);
        card.optional(LEVEL_POINTS, max_pain, |mp| {
            let distance = (price - mp).abs() / mp;
            if distance < 0.02 {
                Some((3, format!("Price near Max Pain ({mp:.2})")))
            } else if distance < 0.05 {
                Some((1, format!("Price approaching Max Pain ({mp:.2})")))
            } else {
                None
            }
        });

        card.optional(GEX_POINTS, context.gamma_exposure, |gex| {
            (gex.abs() < 200.0).then(|| (2, "GEX near zero indicating potential breakout".to_string()))
        });

        card.finish()
    }
}

/// Score all three candidates and pick the winner.
///
/// Candidates rank by validity first and confidence second; the sort is
/// stable so ties keep bullish, bearish, neutral order. A winner that is not
/// valid keeps its confidence but is labelled weak.
pub fn determine_setup(context: &MarketContext, levels: &KeyLevels) -> SetupResult {
    let all_setups = CandidateBreakdown {
        bullish: BullishRules.evaluate(context, levels),
        bearish: BearishRules.evaluate(context, levels),
        neutral: NeutralRules.evaluate(context, levels),
    };

    let mut ranked: Vec<&CandidateSetup> = all_setups.iter().collect();
    ranked.sort_by(|a, b| {
        b.valid
            .cmp(&a.valid)
            .then_with(|| b.confidence.value().total_cmp(&a.confidence.value()))
    });
    let winner = ranked[0];

    let setup = if winner.valid {
        SetupLabel::strong(winner.bias)
    } else {
        SetupLabel::weak(winner.bias)
    };
    let confidence = winner.confidence;
    let reasons = winner.reasons.clone();

    SetupResult {
        setup,
        confidence,
        reasons,
        all_setups,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(trend: Bias, pcr: f64, rsi: f64, stoch: f64, gex: Option<f64>) -> MarketContext {
        MarketContext {
            trend,
            sentiment: Bias::Neutral,
            momentum: Bias::Neutral,
            put_call_ratio: pcr,
            volume_weighted_iv: 0.25,
            gamma_exposure: gex,
            rsi,
            stochastic_rsi: stoch,
            ema10: 110.0,
            ema20: 105.0,
            ema50: 100.0,
            success: true,
        }
    }

    fn levels(price: f64, support: Vec<f64>, resistance: Vec<f64>, max_pain: Option<f64>) -> KeyLevels {
        KeyLevels {
            support,
            resistance,
            max_pain,
            high_gamma_strikes: vec![],
            current_price: price,
            success: true,
        }
    }

    #[test]
    fn test_scorecard_skips_missing_inputs() {
        let mut card = Scorecard::new(Bias::Bullish);
        card.criterion(3, Some((3, "a".into())));
        card.optional(3, None::<f64>, |_| Some((3, "never".into())));
        let candidate = card.finish();
        assert_eq!(candidate.points_possible, 3);
        assert_eq!(candidate.confidence.value(), 100.0);
        assert_eq!(candidate.reasons, vec!["a".to_string()]);
    }

    #[test]
    fn test_full_bullish_scores_one_hundred() {
        let ctx = context(Bias::Bullish, 0.6, 65.0, 70.0, Some(600.0));
        let lv = levels(96.0, vec![95.0], vec![], Some(100.0));
        let candidate = BullishRules.evaluate(&ctx, &lv);
        assert_eq!(candidate.points_earned, 14);
        assert_eq!(candidate.points_possible, 14);
        assert!(candidate.valid);
    }

    #[test]
    fn test_bearish_partial_points() {
        // neutral trend 1/3, PCR 1.1 -> 1/2, RSI 50 -> 1/2, stoch 50 -> 1/2,
        // price 96 vs resistance 100 -> 1/3, no GEX
        let ctx = context(Bias::Neutral, 1.1, 50.0, 50.0, None);
        let lv = levels(96.0, vec![], vec![100.0], None);
        let candidate = BearishRules.evaluate(&ctx, &lv);
        assert_eq!(candidate.points_earned, 5);
        assert_eq!(candidate.points_possible, 12);
        assert_eq!(candidate.reasons.len(), 5);
        assert!(!candidate.valid);
    }

    #[test]
    fn test_neutral_rules_use_max_pain_distance() {
        let ctx = context(Bias::Neutral, 1.0, 50.0, 50.0, Some(0.0));
        let near = NeutralRules.evaluate(&ctx, &levels(100.0, vec![], vec![], Some(101.0)));
        assert_eq!(near.points_earned, 16);
        assert_eq!(near.points_possible, 16);

        let far = NeutralRules.evaluate(&ctx, &levels(100.0, vec![], vec![], Some(104.0)));
        assert_eq!(far.points_earned, 14);
    }

    #[test]
    fn test_bullish_wins_exact_ties() {
        // bullish: trend 1 + PCR 2 + RSI 2 = 5/11, bearish: trend 1 + stoch 2 + GEX 2 = 5/11,
        // neutral: trend 3 of 13
        let ctx = MarketContext {
            volume_weighted_iv: 0.6,
            ..context(Bias::Neutral, 0.5, 70.0, 20.0, Some(-600.0))
        };
        let result = determine_setup(&ctx, &KeyLevels::unavailable(100.0));
        assert_eq!(result.all_setups.bullish.points_earned, 5);
        assert_eq!(result.all_setups.bearish.points_earned, 5);
        assert_eq!(
            result.all_setups.bullish.confidence,
            result.all_setups.bearish.confidence
        );
        assert_eq!(result.setup, SetupLabel::weak(Bias::Bullish));
    }
}
