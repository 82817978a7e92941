use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Strikes with gamma above this act as price magnets.
pub const HIGH_GAMMA_THRESHOLD: f64 = 0.05;

/// A single call or put line of an options chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionContract {
    pub strike: f64,
    #[serde(default)]
    pub open_interest: f64,
    #[serde(default)]
    pub volume: f64,
    #[serde(default)]
    pub implied_volatility: f64,
    #[serde(default)]
    pub gamma: Option<f64>,
}

impl OptionContract {
    pub fn is_high_gamma(&self) -> bool {
        self.gamma.is_some_and(|g| g > HIGH_GAMMA_THRESHOLD)
    }
}

/// Calls and puts for one expiration date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionsChain {
    pub expiration: NaiveDate,
    #[serde(default)]
    pub calls: Vec<OptionContract>,
    #[serde(default)]
    pub puts: Vec<OptionContract>,
}

impl OptionsChain {
    /// Put volume over call volume; zero when no calls traded.
    pub fn put_call_ratio(&self) -> f64 {
        let call_volume: f64 = self.calls.iter().map(|c| c.volume).sum();
        if call_volume <= 0.0 {
            return 0.0;
        }
        let put_volume: f64 = self.puts.iter().map(|p| p.volume).sum();
        put_volume / call_volume
    }

    /// Call implied volatility weighted by call volume; zero when no calls traded.
    pub fn volume_weighted_iv(&self) -> f64 {
        let call_volume: f64 = self.calls.iter().map(|c| c.volume).sum();
        if call_volume <= 0.0 {
            return 0.0;
        }
        let weighted: f64 = self
            .calls
            .iter()
            .map(|c| c.implied_volatility * c.volume)
            .sum();
        weighted / call_volume
    }
}

/// Option chains keyed by expiration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionsSurface(Vec<OptionsChain>);

impl OptionsSurface {
    pub fn new(chains: Vec<OptionsChain>) -> Self {
        Self(chains)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Up to `count` chains, nearest expiration first.
    pub fn nearest(&self, count: usize) -> Vec<&OptionsChain> {
        let mut chains: Vec<&OptionsChain> = self.0.iter().collect();
        chains.sort_by_key(|c| c.expiration);
        chains.truncate(count);
        chains
    }

    pub fn nearest_chain(&self) -> Option<&OptionsChain> {
        self.0.iter().min_by_key(|c| c.expiration)
    }
}

impl From<Vec<OptionsChain>> for OptionsSurface {
    fn from(chains: Vec<OptionsChain>) -> Self {
        Self(chains)
    }
}
