//! # flowsplit
//!
//! Split a deposit or withdrawal across a set of assets so that the portfolio
//! moves toward a target allocation.
//!
//! ## Features
//!
//! - **Compensated summation**: every total uses Kahan summation
//! - **Unconstrained split**: closed form, lands exactly on target, may sell
//! - **Constrained split**: never sells on a deposit or buys on a withdrawal
//! - **Plans**: per-asset before/after table ready for display
//!
//! ## Quick Start
//!
//! ```
//! use flowsplit::{constrained_rebalance, precise_sum};
//!
//! let holdings = [6000.0, 5000.0, 6000.0];
//! let target = [0.3, 0.5, 0.2];
//!
//! let split = constrained_rebalance(&holdings, &target, 10_000.0).unwrap();
//!
//! assert!(split.iter().all(|&x| x >= 0.0));
//! assert!((precise_sum(&split) - 10_000.0).abs() < 1e-6);
//! assert_eq!(split[2], 0.0); // over-allocated, receives nothing
//! ```
//!
//! ## Choosing a strategy
//!
//! | Strategy | Sums to delta | Reaches target | Counter-trades |
//! |----------|---------------|----------------|----------------|
//! | **Unconstrained** | yes | exactly | allowed |
//! | **Constrained** | yes | as close as allowed | never |
//!
//! ```
//! use flowsplit::{Asset, RebalancePlan, Strategy};
//!
//! let assets = vec![Asset::new("Stocks", 900.0, 0.5), Asset::new("Bonds", 100.0, 0.5)];
//!
//! let free = RebalancePlan::compute(&assets, 200.0, Strategy::Unconstrained).unwrap();
//! assert_eq!(free.adjustments(), vec![-300.0, 500.0]);
//!
//! let bound = RebalancePlan::compute(&assets, 200.0, Strategy::Constrained).unwrap();
//! assert_eq!(bound.adjustments(), vec![0.0, 200.0]);
//! ```
//!
//! ## Caller responsibilities
//!
//! The core operations do not re-validate their inputs. Callers must ensure
//! targets sum to 1, holdings are non-negative and finite, and
//! `total + delta >= 0`. Degenerate numerical cases (zero totals, no asset
//! able to move) are reported as [`RebalanceError`]s.
//!
//! ## Cargo features
//!
//! - `serde`: `Serialize`/`Deserialize` on all public data types
//! - `parallel`: `plan_batch` over a rayon thread pool

mod allocation;
mod asset;
mod error;
mod plan;
mod rebalance;
mod sum;

// Re-export public API
pub use allocation::{Allocation, allocation_of};
pub use asset::{Asset, ParseStrategyError, Strategy};
pub use error::{RebalanceError, Result};
#[cfg(feature = "parallel")]
pub use plan::plan_batch;
pub use plan::{PlanRow, RebalancePlan};
pub use rebalance::{constrained_rebalance, unconstrained_rebalance};
pub use sum::precise_sum;
