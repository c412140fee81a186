//! flowsplit-rebalancer: plan how to split a deposit or withdrawal.
//!
//! Reads a scenario (holdings, targets, delta) from a JSON file, validates
//! the preconditions the engine relies on, runs one or both split strategies,
//! and renders the result as a table or JSON.

pub mod config;
pub mod error;
pub mod report;
pub mod scenario;
