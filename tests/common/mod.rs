//! Shared test helpers.
#![allow(dead_code)]

use chrono::{Days, NaiveDate};
use hybridscan::config::ScannerConfig;
use hybridscan::domain::entities::indicator::{IndicatorSeries, IndicatorSnapshot};
use hybridscan::domain::entities::key_levels::KeyLevels;
use hybridscan::domain::entities::market_context::MarketContext;
use hybridscan::domain::entities::options::{OptionContract, OptionsChain, OptionsSurface};
use hybridscan::domain::entities::snapshot::MarketSnapshot;
use hybridscan::domain::values::bias::Bias;
use hybridscan::infrastructure::market_data::memory::StaticSource;
use hybridscan::HybridScan;
use std::sync::Arc;
use tempfile::TempDir;

/// In-memory database, static data and a throwaway output directory.
pub fn setup(snapshots: Vec<MarketSnapshot>) -> (HybridScan, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let config = ScannerConfig {
        output_dir: dir.path().join("results"),
        symbols_file: dir.path().join("no_tickers.txt"),
        ..ScannerConfig::default()
    };
    let hs = HybridScan::with_providers(":memory:", Arc::new(StaticSource::new(snapshots)), config)
        .unwrap();
    (hs, dir)
}

pub fn row(close: f64, emas: (f64, f64, f64), rsi: f64, stoch: f64) -> IndicatorSnapshot {
    IndicatorSnapshot {
        close_price: close,
        ema10: emas.0,
        ema20: emas.1,
        ema50: emas.2,
        rsi,
        stochastic_rsi: stoch,
        stochastic_rsi_signal: None,
        volume: 1_000_000.0,
        volume_sma: 1_000_000.0,
    }
}

/// `count` copies of `last`, the final row being exactly `last`.
pub fn flat_series(count: usize, last: IndicatorSnapshot) -> IndicatorSeries {
    IndicatorSeries::new(vec![last; count])
}

pub fn contract(strike: f64, open_interest: f64, volume: f64, iv: f64) -> OptionContract {
    OptionContract {
        strike,
        open_interest,
        volume,
        implied_volatility: iv,
        gamma: None,
    }
}

pub fn expiration(days_out: u64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15)
        .unwrap()
        .checked_add_days(Days::new(days_out))
        .unwrap()
}

pub fn chain(days_out: u64, calls: Vec<OptionContract>, puts: Vec<OptionContract>) -> OptionsChain {
    OptionsChain {
        expiration: expiration(days_out),
        calls,
        puts,
    }
}

/// Stacked EMAs, PCR 0.6, RSI 65, stochastic RSI 70, price just above
/// support at 95 and GEX 600: every bullish criterion hits.
pub fn bullish_snapshot(symbol: &str) -> MarketSnapshot {
    let options = chain(
        7,
        vec![
            contract(105.0, 900.0, 60.0, 0.25),
            contract(110.0, 700.0, 40.0, 0.25),
        ],
        vec![contract(95.0, 1_200.0, 60.0, 0.3)],
    );
    MarketSnapshot {
        symbol: symbol.to_string(),
        indicators: flat_series(30, row(96.0, (110.0, 105.0, 100.0), 65.0, 70.0)),
        options: OptionsSurface::new(vec![options]),
        gamma_exposure: Some(600.0),
    }
}

/// Mirror of [`bullish_snapshot`]: price just under resistance at 110,
/// PCR 1.5, RSI 35, stochastic RSI 30, GEX -600.
pub fn bearish_snapshot(symbol: &str) -> MarketSnapshot {
    let options = chain(
        7,
        vec![contract(110.0, 1_200.0, 100.0, 0.25)],
        vec![
            contract(100.0, 900.0, 90.0, 0.3),
            contract(95.0, 500.0, 60.0, 0.3),
        ],
    );
    MarketSnapshot {
        symbol: symbol.to_string(),
        indicators: flat_series(30, row(109.0, (100.0, 105.0, 110.0), 35.0, 30.0)),
        options: OptionsSurface::new(vec![options]),
        gamma_exposure: Some(-600.0),
    }
}

/// Valid price history but no option chains.
pub fn no_options_snapshot(symbol: &str) -> MarketSnapshot {
    MarketSnapshot {
        options: OptionsSurface::default(),
        ..bullish_snapshot(symbol)
    }
}

/// Option chains but no price history.
pub fn no_history_snapshot(symbol: &str) -> MarketSnapshot {
    MarketSnapshot {
        indicators: IndicatorSeries::default(),
        ..bullish_snapshot(symbol)
    }
}

pub fn context(trend: Bias, pcr: f64, iv: f64, rsi: f64, stoch: f64, gex: Option<f64>) -> MarketContext {
    MarketContext {
        trend,
        sentiment: Bias::Neutral,
        momentum: Bias::Neutral,
        put_call_ratio: pcr,
        volume_weighted_iv: iv,
        gamma_exposure: gex,
        rsi,
        stochastic_rsi: stoch,
        ema10: 0.0,
        ema20: 0.0,
        ema50: 0.0,
        success: true,
    }
}

pub fn levels(price: f64, support: Vec<f64>, resistance: Vec<f64>, max_pain: Option<f64>) -> KeyLevels {
    KeyLevels {
        support,
        resistance,
        max_pain,
        high_gamma_strikes: Vec::new(),
        current_price: price,
        success: true,
    }
}
