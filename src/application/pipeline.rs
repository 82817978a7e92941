use crate::application::stages::{confirmation, context, levels, risk, setup};
use crate::domain::entities::analysis::Analysis;
use crate::domain::entities::snapshot::MarketSnapshot;

/// Runs every stage over one snapshot.
///
/// Degraded inputs still produce a full analysis; callers decide whether an
/// unavailable context or level map is worth reporting.
pub fn analyze_snapshot(snapshot: &MarketSnapshot) -> Analysis {
    let current_price = snapshot.current_price().unwrap_or(0.0);

    let context = context::summarize(
        &snapshot.indicators,
        &snapshot.options,
        snapshot.gamma_exposure,
    );
    let levels = levels::map_levels(&snapshot.options, current_price);
    let setup = setup::determine_setup(&context, &levels);
    let confirmation = confirmation::confirm(&setup, &snapshot.indicators, &context, &levels);
    let risk = risk::recommend(&setup, &context, &levels);

    Analysis {
        symbol: snapshot.symbol.clone(),
        context,
        levels,
        setup,
        confirmation,
        risk,
    }
}
