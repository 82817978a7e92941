use serde::{Deserialize, Serialize};

pub const INSUFFICIENT_DATA: &str = "Insufficient data";

/// Outcome of an entry or exit check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerSignal {
    pub signal: bool,
    /// Additive score; not normalized and may exceed 100.
    pub strength: u32,
    pub reasons: Vec<String>,
}

impl TriggerSignal {
    pub fn insufficient_data() -> Self {
        Self {
            signal: false,
            strength: 0,
            reasons: vec![INSUFFICIENT_DATA.to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmationResult {
    pub entry: TriggerSignal,
    pub exit: TriggerSignal,
}
