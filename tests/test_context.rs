mod common;

use common::*;
use hybridscan::application::stages::context::{determine_trend, summarize};
use hybridscan::domain::entities::indicator::IndicatorSeries;
use hybridscan::domain::entities::options::OptionsSurface;
use hybridscan::domain::values::bias::Bias;

#[test]
fn test_strict_ema_ordering_sets_trend() {
    for (fast, mid, slow) in [(110.0, 105.0, 100.0), (50.5, 50.2, 49.9), (3.0, 2.0, 1.0)] {
        let up = flat_series(10, row(100.0, (fast, mid, slow), 50.0, 50.0));
        assert_eq!(determine_trend(&up), Bias::Bullish, "{fast} > {mid} > {slow}");

        let down = flat_series(10, row(100.0, (slow, mid, fast), 50.0, 50.0));
        assert_eq!(determine_trend(&down), Bias::Bearish, "{slow} < {mid} < {fast}");
    }
}

#[test]
fn test_summary_reads_nearest_chain() {
    let near = chain(
        3,
        vec![contract(100.0, 10.0, 100.0, 0.2), contract(105.0, 10.0, 300.0, 0.4)],
        vec![contract(95.0, 10.0, 200.0, 0.3)],
    );
    let far = chain(30, vec![contract(100.0, 10.0, 1.0, 0.9)], vec![contract(95.0, 10.0, 900.0, 0.9)]);
    // out of expiration order on purpose
    let surface = OptionsSurface::new(vec![far, near]);
    let series = flat_series(10, row(101.0, (101.0, 100.0, 99.0), 60.0, 65.0));

    let ctx = summarize(&series, &surface, Some(120.0));
    assert!(ctx.success);
    assert!((ctx.put_call_ratio - 0.5).abs() < 1e-9);
    assert!((ctx.volume_weighted_iv - 0.35).abs() < 1e-9);
    assert_eq!(ctx.trend, Bias::Bullish);
    assert_eq!(ctx.sentiment, Bias::Bullish);
    assert_eq!(ctx.momentum, Bias::Bullish);
    assert_eq!(ctx.gamma_exposure, Some(120.0));
    assert_eq!(ctx.rsi, 60.0);
    assert_eq!(ctx.ema20, 100.0);
}

#[test]
fn test_zero_call_volume_degrades_to_zero() {
    let surface = OptionsSurface::new(vec![chain(
        3,
        vec![contract(100.0, 10.0, 0.0, 0.5)],
        vec![contract(95.0, 10.0, 50.0, 0.5)],
    )]);
    let ctx = summarize(&flat_series(5, row(100.0, (1.0, 2.0, 3.0), 50.0, 50.0)), &surface, None);
    assert_eq!(ctx.put_call_ratio, 0.0);
    assert_eq!(ctx.volume_weighted_iv, 0.0);
}

#[test]
fn test_no_history_is_unavailable() {
    let ctx = summarize(&IndicatorSeries::default(), &bullish_snapshot("X").options, Some(1.0));
    assert!(!ctx.success);
    assert_eq!(ctx.trend, Bias::Neutral);
    assert_eq!(ctx.gamma_exposure, None);
}

#[test]
fn test_missing_chain_zeroes_gex() {
    let series = flat_series(10, row(101.0, (101.0, 100.0, 99.0), 60.0, 65.0));
    let ctx = summarize(&series, &OptionsSurface::default(), Some(600.0));
    assert!(ctx.success);
    assert_eq!(ctx.put_call_ratio, 0.0);
    assert_eq!(ctx.volume_weighted_iv, 0.0);
    assert_eq!(ctx.gamma_exposure, Some(0.0));
}
