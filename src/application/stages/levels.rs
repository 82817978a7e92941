//! Key level mapper.
//!
//! Derives max pain, support/resistance and gamma magnets from the option
//! chains of the nearest expirations.

use std::cmp::Ordering;

use crate::domain::entities::key_levels::KeyLevels;
use crate::domain::entities::options::{OptionContract, OptionsChain, OptionsSurface};

/// How many expirations are considered at all.
pub const EXPIRATIONS_USED: usize = 3;
/// How many of the highest open-interest contracts per side become level candidates.
const TOP_OPEN_INTEREST: usize = 5;

pub fn map_levels(surface: &OptionsSurface, current_price: f64) -> KeyLevels {
    let chains = surface.nearest(EXPIRATIONS_USED);
    let Some(nearest) = chains.first() else {
        return KeyLevels::unavailable(current_price);
    };

    let (support, resistance) = support_resistance(nearest, current_price);

    KeyLevels {
        support,
        resistance,
        max_pain: Some(max_pain(nearest).unwrap_or(current_price)),
        high_gamma_strikes: high_gamma_strikes(&chains),
        current_price,
        success: true,
    }
}

/// Strike minimizing the total intrinsic value owed to option holders.
///
/// Candidates are evaluated in ascending strike order and the first minimum
/// wins, so the result does not depend on how the chain is ordered.
pub fn max_pain(chain: &OptionsChain) -> Option<f64> {
    let strikes = sorted_unique(chain.calls.iter().chain(&chain.puts).map(|c| c.strike));

    let mut best: Option<(f64, f64)> = None;
    for strike in strikes {
        let call_pain: f64 = chain
            .calls
            .iter()
            .map(|c| c.open_interest * (strike - c.strike).max(0.0))
            .sum();
        let put_pain: f64 = chain
            .puts
            .iter()
            .map(|p| p.open_interest * (p.strike - strike).max(0.0))
            .sum();
        let total = call_pain + put_pain;

        match best {
            Some((_, lowest)) if total >= lowest => {}
            _ => best = Some((strike, total)),
        }
    }
    best.map(|(strike, _)| strike)
}

/// Heavy call open interest above price caps it; heavy put open interest below
/// price floors it. High-gamma strikes on the matching side join in.
pub fn support_resistance(chain: &OptionsChain, current_price: f64) -> (Vec<f64>, Vec<f64>) {
    let mut resistance: Vec<f64> = top_open_interest(&chain.calls)
        .into_iter()
        .map(|c| c.strike)
        .filter(|&s| s > current_price)
        .collect();
    let mut support: Vec<f64> = top_open_interest(&chain.puts)
        .into_iter()
        .map(|p| p.strike)
        .filter(|&s| s < current_price)
        .collect();

    resistance.extend(
        chain
            .calls
            .iter()
            .filter(|c| c.is_high_gamma() && c.strike > current_price)
            .map(|c| c.strike),
    );
    support.extend(
        chain
            .puts
            .iter()
            .filter(|p| p.is_high_gamma() && p.strike < current_price)
            .map(|p| p.strike),
    );

    let resistance = sorted_unique(resistance);
    let mut support = sorted_unique(support);
    support.reverse();
    (support, resistance)
}

pub fn high_gamma_strikes(chains: &[&OptionsChain]) -> Vec<f64> {
    sorted_unique(
        chains
            .iter()
            .flat_map(|chain| chain.calls.iter().chain(&chain.puts))
            .filter(|c| c.is_high_gamma())
            .map(|c| c.strike),
    )
}

fn top_open_interest(contracts: &[OptionContract]) -> Vec<&OptionContract> {
    let mut ranked: Vec<&OptionContract> = contracts.iter().collect();
    ranked.sort_by(|a, b| {
        b.open_interest
            .partial_cmp(&a.open_interest)
            .unwrap_or(Ordering::Equal)
    });
    ranked.truncate(TOP_OPEN_INTEREST);
    ranked
}

fn sorted_unique(values: impl IntoIterator<Item = f64>) -> Vec<f64> {
    let mut out: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
    out.sort_by(f64::total_cmp);
    out.dedup();
    out
}
