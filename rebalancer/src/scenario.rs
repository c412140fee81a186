//! Scenario file (scenario.json) loading and validation.
//!
//! A scenario is everything one rebalance needs: the holdings, their target
//! allocation, and the amount coming in or going out. Validation here covers
//! the preconditions the engine does not check itself.

use std::path::Path;

use chrono::{DateTime, Utc};
use flowsplit::{Asset, RebalancePlan, Strategy, precise_sum};
use log::{debug, warn};
use rustc_hash::FxHashSet;
use serde::Deserialize;

use crate::error::{Error, Result};

/// Default allowed distance of the target sum from 1.
pub const DEFAULT_TARGET_TOLERANCE: f64 = 1e-6;

/// A rebalance scenario.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub as_of: Option<DateTime<Utc>>,
    /// Amount to distribute: positive deposits, negative withdraws.
    pub delta: f64,
    pub assets: Vec<Asset>,
}

impl Scenario {
    /// Load and validate a scenario file.
    pub fn load(path: &Path, tolerance: f64) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::ScenarioRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&contents, tolerance)
    }

    /// Parse from a JSON string (useful for testing).
    pub fn from_json(json: &str, tolerance: f64) -> Result<Self> {
        let scenario: Scenario = serde_json::from_str(json)?;
        scenario.validate(tolerance)?;
        Ok(scenario)
    }

    /// Build from already-constructed assets.
    pub fn new(assets: Vec<Asset>, delta: f64, tolerance: f64) -> Result<Self> {
        let scenario = Scenario {
            label: None,
            as_of: None,
            delta,
            assets,
        };
        scenario.validate(tolerance)?;
        Ok(scenario)
    }

    /// Check every precondition the engine relies on.
    fn validate(&self, tolerance: f64) -> Result<()> {
        if self.assets.len() < 2 {
            return Err(Error::Scenario(format!(
                "need at least two assets, got {}",
                self.assets.len()
            )));
        }

        let mut seen = FxHashSet::default();
        for a in &self.assets {
            if a.name.trim().is_empty() {
                return Err(Error::Scenario("empty asset name".into()));
            }
            if !seen.insert(a.name.as_str()) {
                return Err(Error::Scenario(format!("duplicate asset: {}", a.name)));
            }
        }

        for a in &self.assets {
            if !a.current_value.is_finite() || a.current_value < 0.0 {
                return Err(Error::Scenario(format!(
                    "current value of {} ({}) must be finite and >= 0",
                    a.name, a.current_value
                )));
            }
            if !(0.0..=1.0).contains(&a.target_fraction) {
                return Err(Error::Scenario(format!(
                    "target fraction of {} ({}) must be in [0, 1]",
                    a.name, a.target_fraction
                )));
            }
        }

        let targets: Vec<f64> = self.assets.iter().map(|a| a.target_fraction).collect();
        let target_sum = precise_sum(&targets);
        if (target_sum - 1.0).abs() > tolerance {
            return Err(Error::Scenario(format!(
                "target fractions sum to {target_sum:.6} (expected 1)"
            )));
        }

        if !self.delta.is_finite() {
            return Err(Error::Scenario(format!("delta ({}) must be finite", self.delta)));
        }
        let total = self.total();
        if total + self.delta < 0.0 {
            return Err(Error::Scenario(format!(
                "cannot withdraw {:.2} from a total of {total:.2}",
                -self.delta
            )));
        }
        if total == 0.0 && self.delta == 0.0 {
            warn!("Scenario has no holdings and no delta; nothing to plan");
        }

        debug!(
            "Scenario valid: {} assets, total {total}, delta {}",
            self.assets.len(),
            self.delta
        );
        Ok(())
    }

    /// Precise total of current holdings.
    pub fn total(&self) -> f64 {
        let values: Vec<f64> = self.assets.iter().map(|a| a.current_value).collect();
        precise_sum(&values)
    }

    /// Display name: the label, or a description of the delta.
    pub fn title(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None if self.delta >= 0.0 => format!("deposit {:.2}", self.delta),
            None => format!("withdraw {:.2}", -self.delta),
        }
    }

    /// Title plus the holdings timestamp, if any.
    pub fn heading(&self) -> String {
        match &self.as_of {
            Some(at) => format!("{} (as of {})", self.title(), at.format("%Y-%m-%d %H:%M UTC")),
            None => self.title(),
        }
    }

    /// Run the engine over this scenario.
    pub fn plan(&self, strategy: Strategy) -> Result<RebalancePlan> {
        Ok(RebalancePlan::compute(&self.assets, self.delta, strategy)?)
    }
}
