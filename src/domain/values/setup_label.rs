use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::bias::Bias;

const WEAK_PREFIX: &str = "weak_";

/// Winning setup classification.
///
/// Downstream stages dispatch on `base`; the `weak_` spelling only exists
/// in the serialized form (`"weak_bullish"`, `"bearish"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct SetupLabel {
    pub base: Bias,
    pub is_weak: bool,
}

impl SetupLabel {
    pub fn strong(base: Bias) -> Self {
        Self {
            base,
            is_weak: false,
        }
    }

    pub fn weak(base: Bias) -> Self {
        Self {
            base,
            is_weak: true,
        }
    }
}

impl fmt::Display for SetupLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_weak {
            write!(f, "{WEAK_PREFIX}{}", self.base)
        } else {
            write!(f, "{}", self.base)
        }
    }
}

impl FromStr for SetupLabel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        match lower.strip_prefix(WEAK_PREFIX) {
            Some(rest) => Ok(SetupLabel::weak(rest.parse()?)),
            None => Ok(SetupLabel::strong(lower.parse()?)),
        }
    }
}

impl From<SetupLabel> for String {
    fn from(label: SetupLabel) -> Self {
        label.to_string()
    }
}

impl TryFrom<String> for SetupLabel {
    type Error = String;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_parse() {
        assert_eq!(SetupLabel::weak(Bias::Neutral).to_string(), "weak_neutral");
        assert_eq!(SetupLabel::strong(Bias::Bearish).to_string(), "bearish");
        assert_eq!(
            "weak_bullish".parse::<SetupLabel>().unwrap(),
            SetupLabel::weak(Bias::Bullish)
        );
        assert!("weak_sideways".parse::<SetupLabel>().is_err());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let json = serde_json::to_string(&SetupLabel::weak(Bias::Bearish)).unwrap();
        assert_eq!(json, "\"weak_bearish\"");
        let back: SetupLabel = serde_json::from_str(&json).unwrap();
        assert!(back.is_weak);
        assert_eq!(back.base, Bias::Bearish);
    }
}
