mod common;

use common::*;
use hybridscan::application::pipeline::analyze_snapshot;
use hybridscan::domain::entities::confirmation::INSUFFICIENT_DATA;
use hybridscan::domain::entities::indicator::IndicatorSeries;
use hybridscan::domain::values::bias::Bias;

#[test]
fn test_four_rows_is_insufficient() {
    let mut snapshot = bullish_snapshot("AAPL");
    let last = snapshot.indicators.latest().cloned().unwrap();
    snapshot.indicators = flat_series(4, last);

    let analysis = analyze_snapshot(&snapshot);
    for signal in [&analysis.confirmation.entry, &analysis.confirmation.exit] {
        assert!(!signal.signal);
        assert_eq!(signal.strength, 0);
        assert_eq!(signal.reasons, vec![INSUFFICIENT_DATA.to_string()]);
    }
}

#[test]
fn test_bullish_entry_fires_on_hook_with_volume() {
    let mut snapshot = bullish_snapshot("AAPL");
    let mut rows = snapshot.indicators.rows().to_vec();
    let n = rows.len();
    rows[n - 2].stochastic_rsi = 50.0;
    rows[n - 1].volume = rows[n - 1].volume_sma * 2.0;
    snapshot.indicators = IndicatorSeries::new(rows);

    let analysis = analyze_snapshot(&snapshot);
    assert_eq!(analysis.setup.bias(), Bias::Bullish);
    let entry = &analysis.confirmation.entry;
    // hook 30 + volume 20 + support 25
    assert_eq!(entry.strength, 75);
    assert!(entry.signal);
    assert_eq!(
        entry.reasons,
        vec![
            "Stochastic RSI hooking up from below 60".to_string(),
            "Volume spike (2.00x average)".to_string(),
            "Price near support level (95.00)".to_string(),
        ]
    );
}

#[test]
fn test_flat_history_has_no_exit() {
    let analysis = analyze_snapshot(&bullish_snapshot("AAPL"));
    let exit = &analysis.confirmation.exit;
    assert!(!exit.signal);
    assert_eq!(exit.strength, 0);
    assert!(exit.reasons.is_empty());
}

#[test]
fn test_bearish_entry_near_resistance() {
    let analysis = analyze_snapshot(&bearish_snapshot("TSLA"));
    let entry = &analysis.confirmation.entry;
    // only the resistance check hits; price sits above both fast EMAs
    assert_eq!(entry.strength, 25);
    assert!(!entry.signal);
    assert_eq!(entry.reasons, vec!["Price near resistance level (110.00)".to_string()]);
}
