use serde::{Deserialize, Serialize};

use crate::domain::values::bias::Bias;
use crate::domain::values::confidence::Confidence;
use crate::domain::values::setup_label::SetupLabel;

/// Score of one candidate rule set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateSetup {
    pub bias: Bias,
    pub valid: bool,
    pub confidence: Confidence,
    pub points_earned: u32,
    pub points_possible: u32,
    pub reasons: Vec<String>,
}

/// Per-candidate breakdown, always in bullish / bearish / neutral order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateBreakdown {
    pub bullish: CandidateSetup,
    pub bearish: CandidateSetup,
    pub neutral: CandidateSetup,
}

impl CandidateBreakdown {
    pub fn iter(&self) -> impl Iterator<Item = &CandidateSetup> {
        [&self.bullish, &self.bearish, &self.neutral].into_iter()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetupResult {
    pub setup: SetupLabel,
    /// Confidence of the winning candidate, unchanged when it is weak.
    pub confidence: Confidence,
    pub reasons: Vec<String>,
    pub all_setups: CandidateBreakdown,
}

impl SetupResult {
    pub fn bias(&self) -> Bias {
        self.setup.base
    }
}
