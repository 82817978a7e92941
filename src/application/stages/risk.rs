//! Position sizing, stops and risk/reward for a scored setup.

use crate::domain::entities::key_levels::KeyLevels;
use crate::domain::entities::market_context::MarketContext;
use crate::domain::entities::risk::{
    PositionSize, PositionSizeFactors, RiskRecommendation, RiskReward, StopLoss, StopLossFactors,
};
use crate::domain::entities::setup::SetupResult;
use crate::domain::values::bias::Bias;

/// Upper IV bounds of the volatility tiers; anything above the last is the top tier.
const IV_TIERS: [f64; 3] = [0.3, 0.45, 0.6];
const BASE_SIZE: [f64; 4] = [0.02, 0.015, 0.01, 0.005];
const STOP_PERCENT: [f64; 4] = [0.02, 0.03, 0.05, 0.07];

const DIRECTIONAL_TARGET: f64 = 0.05;
const NEUTRAL_TARGET: f64 = 0.02;

pub fn recommend(
    setup: &SetupResult,
    context: &MarketContext,
    levels: &KeyLevels,
) -> RiskRecommendation {
    let bias = setup.bias();
    let stop_loss = stop_loss(bias, context, levels);
    let risk_reward = risk_reward(bias, levels, stop_loss.technical);

    RiskRecommendation {
        position_size: position_size(context, setup.confidence.value()),
        stop_loss,
        risk_reward,
    }
}

fn volatility_tier(iv: f64) -> usize {
    IV_TIERS.iter().take_while(|&&bound| iv >= bound).count()
}

pub fn position_size(context: &MarketContext, confidence: f64) -> PositionSize {
    let iv = context.volume_weighted_iv;
    let gex = context.gex_or_zero();

    let base_size = BASE_SIZE[volatility_tier(iv)];
    let gex_factor = if gex.abs() > 1000.0 {
        0.7
    } else if gex.abs() > 500.0 {
        0.8
    } else {
        1.0
    };
    let confidence_factor = (confidence / 100.0).min(1.0);

    let recommended = base_size * gex_factor * confidence_factor;
    PositionSize {
        recommended,
        conservative: recommended * 0.7,
        aggressive: recommended * 1.3,
        factors: PositionSizeFactors {
            iv,
            gex,
            confidence,
            base_size,
            gex_factor,
            confidence_factor,
        },
    }
}

pub fn stop_loss(bias: Bias, context: &MarketContext, levels: &KeyLevels) -> StopLoss {
    let price = levels.current_price;
    let iv = context.volume_weighted_iv;
    let factors = StopLossFactors {
        current_price: price.max(0.0),
        iv,
        support: levels.nearest_support(),
        resistance: levels.nearest_resistance(),
        ema10: context.ema10,
        ema20: context.ema20,
    };
    if price <= 0.0 {
        return StopLoss {
            technical: 0.0,
            percentage: 0.0,
            percentage_value: 0.0,
            factors,
        };
    }

    let pct = STOP_PERCENT[volatility_tier(iv)];
    let ema20 = context.ema20;
    let technical = match bias {
        Bias::Bullish => match levels.nearest_support() {
            Some(support) => support * 0.99,
            None if ema20 > 0.0 => ema20 * 0.99,
            None => price * (1.0 - pct),
        },
        Bias::Bearish => match levels.nearest_resistance() {
            Some(resistance) => resistance * 1.01,
            None if ema20 > 0.0 => ema20 * 1.01,
            None => price * (1.0 + pct),
        },
        Bias::Neutral => price * (1.0 - pct),
    };
    let percentage = match bias {
        Bias::Bullish => price * (1.0 - pct),
        Bias::Bearish | Bias::Neutral => price * (1.0 + pct),
    };

    StopLoss {
        technical,
        percentage,
        percentage_value: pct,
        factors,
    }
}

pub fn risk_reward(bias: Bias, levels: &KeyLevels, technical_stop: f64) -> RiskReward {
    let price = levels.current_price;
    if price <= 0.0 {
        return RiskReward {
            ratio: 0.0,
            reward: 0.0,
            risk: 0.0,
            target_price: 0.0,
        };
    }

    let (risk, reward) = match bias {
        Bias::Bullish => (
            price - technical_stop,
            levels
                .nearest_resistance()
                .map_or(price * DIRECTIONAL_TARGET, |r| r - price),
        ),
        Bias::Bearish => (
            technical_stop - price,
            levels
                .nearest_support()
                .map_or(price * DIRECTIONAL_TARGET, |s| price - s),
        ),
        Bias::Neutral => ((price - technical_stop).abs(), price * NEUTRAL_TARGET),
    };
    let ratio = if risk > 0.0 { reward / risk } else { 0.0 };
    let target_price = match bias {
        Bias::Bullish => price + reward,
        Bias::Bearish | Bias::Neutral => price - reward,
    };

    RiskReward {
        ratio,
        reward,
        risk,
        target_price,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(iv: f64, gex: Option<f64>, ema20: f64) -> MarketContext {
        let mut ctx = MarketContext::unavailable();
        ctx.volume_weighted_iv = iv;
        ctx.gamma_exposure = gex;
        ctx.ema20 = ema20;
        ctx.success = true;
        ctx
    }

    fn levels(price: f64, support: Vec<f64>, resistance: Vec<f64>) -> KeyLevels {
        KeyLevels {
            support,
            resistance,
            max_pain: None,
            high_gamma_strikes: Vec::new(),
            current_price: price,
            success: true,
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_volatility_tiers() {
        assert_eq!(volatility_tier(0.0), 0);
        assert_eq!(volatility_tier(0.29), 0);
        assert_eq!(volatility_tier(0.3), 1);
        assert_eq!(volatility_tier(0.5), 2);
        assert_eq!(volatility_tier(0.6), 3);
        assert_eq!(volatility_tier(2.0), 3);
    }

    #[test]
    fn test_position_size_factors() {
        let size = position_size(&context(0.4, Some(-800.0), 0.0), 80.0);
        assert!(close(size.factors.base_size, 0.015));
        assert!(close(size.factors.gex_factor, 0.8));
        assert!(close(size.factors.confidence_factor, 0.8));
        assert!(close(size.recommended, 0.015 * 0.8 * 0.8));
        assert!(close(size.conservative, size.recommended * 0.7));
        assert!(close(size.aggressive, size.recommended * 1.3));

        let extreme = position_size(&context(0.7, Some(1500.0), 0.0), 100.0);
        assert!(close(extreme.recommended, 0.005 * 0.7));
    }

    #[test]
    fn test_missing_gex_sizes_as_flat() {
        let size = position_size(&context(0.2, None, 0.0), 100.0);
        assert!(close(size.factors.gex_factor, 1.0));
        assert!(close(size.recommended, 0.02));
    }

    #[test]
    fn test_bullish_stop_prefers_support() {
        let ctx = context(0.2, None, 98.0);
        let stop = stop_loss(Bias::Bullish, &ctx, &levels(100.0, vec![95.0], vec![]));
        assert!(close(stop.technical, 95.0 * 0.99));
        assert!(close(stop.percentage, 98.0));

        let stop = stop_loss(Bias::Bullish, &ctx, &levels(100.0, vec![], vec![]));
        assert!(close(stop.technical, 98.0 * 0.99));

        let no_ema = context(0.2, None, 0.0);
        let stop = stop_loss(Bias::Bullish, &no_ema, &levels(100.0, vec![], vec![]));
        assert!(close(stop.technical, 98.0));
    }

    #[test]
    fn test_bearish_and_neutral_stops() {
        let ctx = context(0.5, None, 0.0);
        let stop = stop_loss(Bias::Bearish, &ctx, &levels(100.0, vec![], vec![110.0]));
        assert!(close(stop.technical, 111.1));
        assert!(close(stop.percentage, 105.0));

        let stop = stop_loss(Bias::Neutral, &ctx, &levels(100.0, vec![], vec![110.0]));
        assert!(close(stop.technical, 95.0));
        assert!(close(stop.percentage, 105.0));
    }

    #[test]
    fn test_bullish_risk_reward() {
        let lv = levels(100.0, vec![95.0], vec![110.0]);
        let rr = risk_reward(Bias::Bullish, &lv, 94.0);
        assert!(close(rr.risk, 6.0));
        assert!(close(rr.reward, 10.0));
        assert!(close(rr.ratio, 10.0 / 6.0));
        assert!(close(rr.target_price, 110.0));
    }

    #[test]
    fn test_default_targets() {
        let lv = levels(200.0, vec![], vec![]);
        let bear = risk_reward(Bias::Bearish, &lv, 204.0);
        assert!(close(bear.reward, 10.0));
        assert!(close(bear.target_price, 190.0));

        let neutral = risk_reward(Bias::Neutral, &lv, 196.0);
        assert!(close(neutral.risk, 4.0));
        assert!(close(neutral.reward, 4.0));
        assert!(close(neutral.ratio, 1.0));
        assert!(close(neutral.target_price, 196.0));
    }

    #[test]
    fn test_non_positive_risk_gives_zero_ratio() {
        // stop above price on a bullish setup
        let lv = levels(100.0, vec![], vec![110.0]);
        let rr = risk_reward(Bias::Bullish, &lv, 101.0);
        assert!(rr.risk < 0.0);
        assert_eq!(rr.ratio, 0.0);

        let rr = risk_reward(Bias::Bullish, &lv, 100.0);
        assert_eq!(rr.ratio, 0.0);
        assert!(rr.ratio.is_finite());
    }

    #[test]
    fn test_zero_price_zeroes_everything() {
        let ctx = context(0.2, None, 98.0);
        let lv = levels(0.0, vec![95.0], vec![110.0]);
        let stop = stop_loss(Bias::Bullish, &ctx, &lv);
        assert_eq!(stop.technical, 0.0);
        assert_eq!(stop.percentage, 0.0);
        let rr = risk_reward(Bias::Bullish, &lv, stop.technical);
        assert_eq!(rr.ratio, 0.0);
        assert_eq!(rr.target_price, 0.0);
    }
}
