//! Market context summarizer.
//!
//! Reduces an indicator series and the nearest option chain to trend,
//! sentiment and momentum labels plus the raw readings behind them.

use tracing::debug;

use crate::domain::entities::indicator::IndicatorSeries;
use crate::domain::entities::market_context::MarketContext;
use crate::domain::entities::options::OptionsSurface;
use crate::domain::values::bias::Bias;
use crate::domain::values::zone::OscillatorZone;

/// EMAs closer than this fraction of EMA20 count as converged.
const EMA_CONVERGENCE: f64 = 0.01;
/// Price move over the fallback window that still counts as flat.
const PRICE_CHANGE_THRESHOLD: f64 = 0.02;
/// Rows back from the latest for the fallback price change.
const PRICE_CHANGE_LOOKBACK: usize = 4;

pub fn summarize(
    series: &IndicatorSeries,
    options: &OptionsSurface,
    gamma_exposure: Option<f64>,
) -> MarketContext {
    let Some(latest) = series.latest() else {
        return MarketContext::unavailable();
    };

    let (put_call_ratio, volume_weighted_iv, gamma_exposure) = match options.nearest_chain() {
        Some(chain) => (
            chain.put_call_ratio(),
            chain.volume_weighted_iv(),
            gamma_exposure,
        ),
        None => {
            debug!("No option chain available, PCR, IV and GEX read as zero");
            (0.0, 0.0, Some(0.0))
        }
    };

    MarketContext {
        trend: determine_trend(series),
        sentiment: determine_sentiment(put_call_ratio, volume_weighted_iv),
        momentum: determine_momentum(latest.rsi, latest.stochastic_rsi),
        put_call_ratio,
        volume_weighted_iv,
        gamma_exposure,
        rsi: latest.rsi,
        stochastic_rsi: latest.stochastic_rsi,
        ema10: latest.ema10,
        ema20: latest.ema20,
        ema50: latest.ema50,
        success: true,
    }
}

/// EMA stacking first, then convergence, then recent price change.
pub fn determine_trend(series: &IndicatorSeries) -> Bias {
    let Some(latest) = series.latest() else {
        return Bias::Neutral;
    };
    let (fast, mid, slow) = (latest.ema10, latest.ema20, latest.ema50);

    if fast > mid && mid > slow {
        return Bias::Bullish;
    }
    if fast < mid && mid < slow {
        return Bias::Bearish;
    }

    if mid != 0.0 {
        let spread = fast.max(mid).max(slow) - fast.min(mid).min(slow);
        if spread / mid.abs() < EMA_CONVERGENCE {
            return Bias::Neutral;
        }
    }

    let Some(base) = series.back(PRICE_CHANGE_LOOKBACK) else {
        return Bias::Neutral;
    };
    if base.close_price <= 0.0 {
        return Bias::Neutral;
    }
    let change = (latest.close_price - base.close_price) / base.close_price;
    if change > PRICE_CHANGE_THRESHOLD {
        Bias::Bullish
    } else if change < -PRICE_CHANGE_THRESHOLD {
        Bias::Bearish
    } else {
        Bias::Neutral
    }
}

/// PCR bands widen as implied volatility rises.
pub fn determine_sentiment(put_call_ratio: f64, volume_weighted_iv: f64) -> Bias {
    let (bullish_below, bearish_above) = if volume_weighted_iv < 0.3 {
        (0.7, 1.3)
    } else if volume_weighted_iv < 0.5 {
        (0.8, 1.2)
    } else {
        (0.5, 1.5)
    };

    if put_call_ratio < bullish_below {
        Bias::Bullish
    } else if put_call_ratio > bearish_above {
        Bias::Bearish
    } else {
        Bias::Neutral
    }
}

pub fn determine_momentum(rsi: f64, stochastic_rsi: f64) -> Bias {
    let rsi_zone = OscillatorZone::rsi(rsi);
    let stoch_zone = OscillatorZone::stochastic_rsi(stochastic_rsi);

    if rsi_zone.leans_bullish() && stoch_zone.leans_bullish() {
        Bias::Bullish
    } else if rsi_zone.leans_bearish() && stoch_zone.leans_bearish() {
        Bias::Bearish
    } else {
        Bias::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::indicator::IndicatorSnapshot;

    fn row(close: f64, ema10: f64, ema20: f64, ema50: f64) -> IndicatorSnapshot {
        IndicatorSnapshot {
            close_price: close,
            ema10,
            ema20,
            ema50,
            rsi: 50.0,
            stochastic_rsi: 50.0,
            stochastic_rsi_signal: None,
            volume: 1_000.0,
            volume_sma: 1_000.0,
        }
    }

    #[test]
    fn test_stacked_emas() {
        let up = IndicatorSeries::new(vec![row(100.0, 110.0, 105.0, 100.0)]);
        assert_eq!(determine_trend(&up), Bias::Bullish);
        let down = IndicatorSeries::new(vec![row(100.0, 100.0, 105.0, 110.0)]);
        assert_eq!(determine_trend(&down), Bias::Bearish);
    }

    #[test]
    fn test_converged_emas_are_neutral() {
        // ema20 is the extreme but the spread is under 1%
        let series = IndicatorSeries::new(vec![row(100.0, 100.2, 100.5, 100.1)]);
        assert_eq!(determine_trend(&series), Bias::Neutral);
    }

    #[test]
    fn test_price_change_fallback() {
        // ema20 on top with a 5% spread forces the fallback
        let mut rows = vec![row(100.0, 100.0, 105.0, 101.0); 4];
        rows.push(row(103.0, 100.0, 105.0, 101.0));
        assert_eq!(determine_trend(&IndicatorSeries::new(rows.clone())), Bias::Bullish);

        rows[4] = row(97.0, 100.0, 105.0, 101.0);
        assert_eq!(determine_trend(&IndicatorSeries::new(rows.clone())), Bias::Bearish);

        rows[4] = row(101.0, 100.0, 105.0, 101.0);
        assert_eq!(determine_trend(&IndicatorSeries::new(rows)), Bias::Neutral);
    }

    #[test]
    fn test_fallback_without_enough_rows_is_neutral() {
        let series = IndicatorSeries::new(vec![row(150.0, 100.0, 105.0, 101.0); 3]);
        assert_eq!(determine_trend(&series), Bias::Neutral);
    }

    #[test]
    fn test_sentiment_tiers() {
        assert_eq!(determine_sentiment(0.65, 0.2), Bias::Bullish);
        assert_eq!(determine_sentiment(0.75, 0.2), Bias::Neutral);
        assert_eq!(determine_sentiment(0.75, 0.4), Bias::Bullish);
        assert_eq!(determine_sentiment(1.25, 0.4), Bias::Bearish);
        assert_eq!(determine_sentiment(1.25, 0.2), Bias::Neutral);
        assert_eq!(determine_sentiment(1.4, 0.6), Bias::Neutral);
        assert_eq!(determine_sentiment(1.6, 0.6), Bias::Bearish);
        // degraded mode: no chain means PCR 0, which reads bullish
        assert_eq!(determine_sentiment(0.0, 0.0), Bias::Bullish);
    }

    #[test]
    fn test_momentum_combination() {
        assert_eq!(determine_momentum(60.0, 65.0), Bias::Bullish);
        assert_eq!(determine_momentum(25.0, 10.0), Bias::Bullish);
        assert_eq!(determine_momentum(40.0, 30.0), Bias::Bearish);
        assert_eq!(determine_momentum(75.0, 85.0), Bias::Bearish);
        assert_eq!(determine_momentum(60.0, 30.0), Bias::Neutral);
        assert_eq!(determine_momentum(50.0, 50.0), Bias::Neutral);
    }

    #[test]
    fn test_empty_series_is_unavailable() {
        let ctx = summarize(&IndicatorSeries::default(), &OptionsSurface::default(), None);
        assert!(!ctx.success);
    }
}
