//! Error types returned by `HyperLogLog` operations.

use thiserror::Error;

/// Errors reported by [`HyperLogLog`](crate::HyperLogLog).
///
/// Every variant is a configuration or programming error: none of them is transient
/// and none of them leaves the receiving estimator partially mutated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HllError {
    /// Precision outside of the supported `[2..16]` range.
    #[error("precision {precision} is out of range, expected a value in [2, 16]")]
    InvalidArgument { precision: u8 },

    /// Merge attempted between estimators that differ in precision or seed.
    #[error(
        "cannot merge estimator (precision {lhs_precision}, seed {lhs_seed}) \
         with estimator (precision {rhs_precision}, seed {rhs_seed})"
    )]
    IncompatibleMerge {
        lhs_precision: u8,
        rhs_precision: u8,
        lhs_seed: u32,
        rhs_seed: u32,
    },

    /// Register dump could not be decoded.
    #[error("invalid register dump: {0}")]
    InvalidEncoding(String),
}

/// A specialized Result type for `HyperLogLog` operations.
pub type Result<T> = std::result::Result<T, HllError>;
