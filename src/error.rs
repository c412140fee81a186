//! Errors raised by the rebalancing engine.

/// Failures the engine detects instead of returning NaN-laden results.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RebalanceError {
    /// Two parallel sequences have different lengths.
    #[error("length mismatch: {left} values vs {right} values")]
    LengthMismatch { left: usize, right: usize },

    /// The values to allocate sum to zero.
    #[error("cannot derive an allocation from values that sum to zero")]
    ZeroTotal,

    /// The values to allocate sum to NaN or an infinity.
    #[error("cannot derive an allocation from a non-finite total")]
    NonFinite,

    /// Every asset would have to trade against the direction of `delta`.
    #[error("no asset can move in the direction of delta {delta}")]
    NoMovableAsset { delta: f64 },

    /// A plan was requested for zero assets.
    #[error("portfolio has no assets")]
    EmptyPortfolio,
}

/// Engine result type.
pub type Result<T> = std::result::Result<T, RebalanceError>;
