//! Asset and strategy types.

use std::fmt;
use std::str::FromStr;

/// One investable position.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Asset {
    /// Display label. Never interpreted by the engine.
    pub name: String,
    /// Amount currently held (>= 0).
    pub current_value: f64,
    /// Desired share of the total, in [0, 1].
    pub target_fraction: f64,
}

impl Asset {
    pub fn new(name: impl Into<String>, current_value: f64, target_fraction: f64) -> Self {
        Self {
            name: name.into(),
            current_value,
            target_fraction,
        }
    }
}

/// Which rebalancer a plan is computed with.
///
/// Parses case-insensitively from `"unconstrained"` (alias `"free"`) or
/// `"constrained"` (alias `"no-sell"`), and displays as the full name.
///
/// ```
/// use flowsplit::Strategy;
///
/// assert_eq!("No-Sell".parse::<Strategy>(), Ok(Strategy::Constrained));
/// assert_eq!(Strategy::Unconstrained.to_string(), "unconstrained");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Strategy {
    /// Land exactly on target, selling over-allocated assets if needed.
    Unconstrained,
    /// Only trade in the direction of the delta.
    #[default]
    Constrained,
}

impl Strategy {
    pub const ALL: [Strategy; 2] = [Strategy::Unconstrained, Strategy::Constrained];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Unconstrained => "unconstrained",
            Strategy::Constrained => "constrained",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unrecognized strategy name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown strategy '{0}' (expected 'unconstrained' or 'constrained')")]
pub struct ParseStrategyError(pub String);

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "unconstrained" | "free" => Ok(Strategy::Unconstrained),
            "constrained" | "no-sell" => Ok(Strategy::Constrained),
            _ => Err(ParseStrategyError(s.to_string())),
        }
    }
}
