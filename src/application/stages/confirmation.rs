//! Entry and exit confirmation.
//!
//! Both checks add up fixed points per satisfied condition and fire once the
//! total clears [`SIGNAL_THRESHOLD`].

use crate::domain::entities::confirmation::{ConfirmationResult, TriggerSignal};
use crate::domain::entities::indicator::{IndicatorSeries, IndicatorSnapshot};
use crate::domain::entities::key_levels::KeyLevels;
use crate::domain::entities::market_context::MarketContext;
use crate::domain::entities::setup::SetupResult;
use crate::domain::values::bias::Bias;

/// Rows of history needed before any signal is evaluated.
pub const MIN_HISTORY: usize = 5;
/// Strength must be strictly above this for a signal.
pub const SIGNAL_THRESHOLD: u32 = 50;

const VOLUME_SPIKE: f64 = 1.5;
const ENTRY_LEVEL_DISTANCE: f64 = 0.02;
const EXIT_LEVEL_DISTANCE: f64 = 0.01;
const MAX_PAIN_DISTANCE: f64 = 0.01;

#[derive(Default)]
struct Trigger {
    strength: u32,
    reasons: Vec<String>,
}

impl Trigger {
    fn hit(&mut self, points: u32, reason: impl Into<String>) {
        self.strength += points;
        self.reasons.push(reason.into());
    }

    fn finish(self) -> TriggerSignal {
        TriggerSignal {
            signal: self.strength > SIGNAL_THRESHOLD,
            strength: self.strength,
            reasons: self.reasons,
        }
    }
}

pub fn confirm(
    setup: &SetupResult,
    series: &IndicatorSeries,
    context: &MarketContext,
    levels: &KeyLevels,
) -> ConfirmationResult {
    ConfirmationResult {
        entry: entry_signal(setup.bias(), series, context, levels),
        exit: exit_signal(setup.bias(), series, levels),
    }
}

pub fn entry_signal(
    bias: Bias,
    series: &IndicatorSeries,
    context: &MarketContext,
    levels: &KeyLevels,
) -> TriggerSignal {
    let Some((latest, prev)) = last_two(series) else {
        return TriggerSignal::insufficient_data();
    };

    let mut trigger = Trigger::default();
    match bias {
        Bias::Bullish => {
            if hooks_up(latest, prev) {
                trigger.hit(30, "Stochastic RSI hooking up from below 60");
            }
            volume_spike(&mut trigger, latest);
            if let Some(support) = levels.nearest_support() {
                if within(latest.close_price, support, ENTRY_LEVEL_DISTANCE) {
                    trigger.hit(25, format!("Price near support level ({support:.2})"));
                }
            }
            if latest.close_price > latest.ema10 && latest.close_price > latest.ema20 {
                trigger.hit(15, "Price above key EMAs");
            }
            if latest.rsi > prev.rsi && latest.rsi > 50.0 {
                trigger.hit(10, format!("RSI showing upward momentum ({:.2})", latest.rsi));
            }
        }
        Bias::Bearish => {
            if hooks_down(latest, prev) {
                trigger.hit(30, "Stochastic RSI hooking down from above 40");
            }
            volume_spike(&mut trigger, latest);
            if let Some(resistance) = levels.nearest_resistance() {
                if within(latest.close_price, resistance, ENTRY_LEVEL_DISTANCE) {
                    trigger.hit(25, format!("Price near resistance level ({resistance:.2})"));
                }
            }
            if latest.close_price < latest.ema10 && latest.close_price < latest.ema20 {
                trigger.hit(15, "Price below key EMAs");
            }
            if latest.rsi < prev.rsi && latest.rsi < 50.0 {
                trigger.hit(10, format!("RSI showing downward momentum ({:.2})", latest.rsi));
            }
        }
        Bias::Neutral => {
            if let Some(max_pain) = levels.max_pain.filter(|&mp| mp > 0.0) {
                if within(latest.close_price, max_pain, MAX_PAIN_DISTANCE) {
                    trigger.hit(40, format!("Price stalling at Max Pain ({max_pain:.2})"));
                }
            }
            let iv = context.volume_weighted_iv;
            if iv < 0.3 {
                trigger.hit(20, format!("Low implied volatility ({iv:.2})"));
            }
            if (45.0..=55.0).contains(&latest.rsi) {
                trigger.hit(20, format!("RSI in neutral zone ({:.2})", latest.rsi));
            }
            if (40.0..=60.0).contains(&latest.stochastic_rsi) {
                trigger.hit(
                    20,
                    format!("Stochastic RSI in neutral zone ({:.2})", latest.stochastic_rsi),
                );
            }
        }
    }
    trigger.finish()
}

pub fn exit_signal(bias: Bias, series: &IndicatorSeries, levels: &KeyLevels) -> TriggerSignal {
    let Some((latest, prev)) = last_two(series) else {
        return TriggerSignal::insufficient_data();
    };

    let mut trigger = Trigger::default();
    match bias {
        Bias::Bullish => {
            if latest.rsi > 80.0 {
                trigger.hit(30, format!("RSI overbought ({:.2})", latest.rsi));
            }
            if prev.stochastic_rsi > latest.stochastic_rsi && prev.stochastic_rsi > 80.0 {
                trigger.hit(25, "Stochastic RSI reversing from overbought");
            }
            if let Some(resistance) = levels.nearest_resistance() {
                if within(latest.close_price, resistance, EXIT_LEVEL_DISTANCE) {
                    trigger.hit(25, format!("Price reaching resistance ({resistance:.2})"));
                }
            }
            if latest.close_price < latest.ema10 && prev.close_price > prev.ema10 {
                trigger.hit(20, "Price breaking below 10 EMA");
            }
        }
        Bias::Bearish => {
            if latest.rsi < 20.0 {
                trigger.hit(30, format!("RSI oversold ({:.2})", latest.rsi));
            }
            if prev.stochastic_rsi < latest.stochastic_rsi && prev.stochastic_rsi < 20.0 {
                trigger.hit(25, "Stochastic RSI reversing from oversold");
            }
            if let Some(support) = levels.nearest_support() {
                if within(latest.close_price, support, EXIT_LEVEL_DISTANCE) {
                    trigger.hit(25, format!("Price reaching support ({support:.2})"));
                }
            }
            if latest.close_price > latest.ema10 && prev.close_price < prev.ema10 {
                trigger.hit(20, "Price breaking above 10 EMA");
            }
        }
        Bias::Neutral => {}
    }
    trigger.finish()
}

fn last_two(series: &IndicatorSeries) -> Option<(&IndicatorSnapshot, &IndicatorSnapshot)> {
    if series.len() < MIN_HISTORY {
        return None;
    }
    Some((series.latest()?, series.previous()?))
}

fn volume_spike(trigger: &mut Trigger, latest: &IndicatorSnapshot) {
    let ratio = latest.volume_ratio();
    if ratio > VOLUME_SPIKE {
        trigger.hit(20, format!("Volume spike ({ratio:.2}x average)"));
    }
}

/// %K turning up from below 60; %D must agree when both rows carry it.
fn hooks_up(latest: &IndicatorSnapshot, prev: &IndicatorSnapshot) -> bool {
    let signal_agrees = match (latest.stochastic_rsi_signal, prev.stochastic_rsi_signal) {
        (Some(now), Some(before)) => now > before,
        _ => true,
    };
    prev.stochastic_rsi < 60.0 && latest.stochastic_rsi > prev.stochastic_rsi && signal_agrees
}

fn hooks_down(latest: &IndicatorSnapshot, prev: &IndicatorSnapshot) -> bool {
    let signal_agrees = match (latest.stochastic_rsi_signal, prev.stochastic_rsi_signal) {
        (Some(now), Some(before)) => now < before,
        _ => true,
    };
    prev.stochastic_rsi > 40.0 && latest.stochastic_rsi < prev.stochastic_rsi && signal_agrees
}

fn within(price: f64, level: f64, fraction: f64) -> bool {
    level > 0.0 && (price - level).abs() / level < fraction
}
