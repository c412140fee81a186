//! Plan rendering: fixed-width tables and JSON.

use std::fmt;

use chrono::{DateTime, Utc};
use flowsplit::{RebalancePlan, allocation_of};
use serde::Serialize;

use crate::config::OutputConfig;
use crate::error::{Error, Result};
use crate::scenario::Scenario;

/// Table view of a single plan.
pub struct PlanTable<'a> {
    pub plan: &'a RebalancePlan,
    pub output: &'a OutputConfig,
}

impl fmt::Display for PlanTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plan = self.plan;
        let d = self.output.decimals;
        let p = self.output.fraction_decimals;

        writeln!(f, "REBALANCE PLAN ({}):", plan.strategy)?;
        writeln!(
            f,
            "  {:12} {:>14} {:>8} {:>8} {:>14} {:>14} {:>8}",
            "Asset", "Current", "Now", "Target", "Adjustment", "Result", "After"
        )?;
        for row in &plan.rows {
            writeln!(
                f,
                "  {:12} {:>14.d$} {:>7.p$}% {:>7.p$}% {:>+14.d$} {:>14.d$} {:>7.p$}%",
                row.name,
                row.current_value,
                row.current_fraction * 100.0,
                row.target_fraction * 100.0,
                row.adjustment,
                row.resulting_value,
                row.resulting_fraction * 100.0,
            )?;
        }
        writeln!(
            f,
            "  {:12} {:>14.d$} {:>8} {:>8} {:>+14.d$} {:>14.d$}",
            "TOTAL", plan.total_before, "", "", plan.delta, plan.total_after,
        )?;
        writeln!(
            f,
            "\nMax drift from target: {:.p$}%  Counter-trades: {}",
            plan.max_drift() * 100.0,
            plan.counter_trades(),
        )
    }
}

/// Side-by-side adjustments from two plans over the same scenario.
pub struct Comparison<'a> {
    pub left: &'a RebalancePlan,
    pub right: &'a RebalancePlan,
    pub output: &'a OutputConfig,
}

impl fmt::Display for Comparison<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.output.decimals;
        let p = self.output.fraction_decimals;

        writeln!(f, "STRATEGY COMPARISON:")?;
        writeln!(
            f,
            "  {:12} {:>8} {:>16} {:>8} {:>16} {:>8}",
            "Asset",
            "Target",
            self.left.strategy.as_str(),
            "After",
            self.right.strategy.as_str(),
            "After"
        )?;
        for (l, r) in self.left.rows.iter().zip(&self.right.rows) {
            writeln!(
                f,
                "  {:12} {:>7.p$}% {:>+16.d$} {:>7.p$}% {:>+16.d$} {:>7.p$}%",
                l.name,
                l.target_fraction * 100.0,
                l.adjustment,
                l.resulting_fraction * 100.0,
                r.adjustment,
                r.resulting_fraction * 100.0,
            )?;
        }
        writeln!(
            f,
            "  {:12} {:>8} {:>15.p$}% {:>8} {:>15.p$}%",
            "max drift",
            "",
            self.left.max_drift() * 100.0,
            "",
            self.right.max_drift() * 100.0,
        )
    }
}

/// Current holdings and their allocation, before any split.
pub struct Holdings<'a> {
    pub scenario: &'a Scenario,
    pub output: &'a OutputConfig,
}

impl fmt::Display for Holdings<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.output.decimals;
        let p = self.output.fraction_decimals;
        let assets = &self.scenario.assets;
        let values: Vec<f64> = assets.iter().map(|a| a.current_value).collect();
        // Validated holdings are finite, so the only failure is a zero total
        let (total, fractions) = match allocation_of(&values) {
            Ok(alloc) => (alloc.total, alloc.fractions),
            Err(_) => (0.0, vec![0.0; values.len()]),
        };

        writeln!(f, "CURRENT PORTFOLIO:")?;
        for (a, fraction) in assets.iter().zip(fractions) {
            writeln!(
                f,
                "  {:12} {:>14.d$}  ({:>6.p$}% now, {:>6.p$}% target)",
                a.name,
                a.current_value,
                fraction * 100.0,
                a.target_fraction * 100.0,
            )?;
        }
        writeln!(f, "  {:12} {:>14.d$}", "TOTAL", total)
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    scenario: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    as_of: Option<DateTime<Utc>>,
    plans: &'a [RebalancePlan],
}

/// Render one or more plans for a scenario as pretty JSON.
pub fn render_json(scenario: &Scenario, plans: &[RebalancePlan]) -> Result<String> {
    let report = JsonReport {
        scenario: scenario.title(),
        as_of: scenario.as_of,
        plans,
    };
    serde_json::to_string_pretty(&report).map_err(|e| Error::Render(e.to_string()))
}
