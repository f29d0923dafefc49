//! Error types for the optcalc library.
//!
//! Pricing itself never fails: degenerate inputs propagate as non-finite
//! numbers. Errors come from the implied volatility solver and from the
//! opt-in validation layer.

use thiserror::Error;

use crate::implied::SolverMethod;

/// Convenience type alias for results in this crate.
pub type Result<T> = std::result::Result<T, OptCalcError>;

/// Errors reported by the solver and by input validation.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum OptCalcError {
    /// The solver method is recognized but has no implementation.
    #[error("not implemented: {method} implied volatility")]
    NotImplemented { method: SolverMethod },

    /// The solver method code does not name any known method.
    #[error("wrong method {method} or not supported")]
    UnsupportedMethod { method: i64 },

    /// The market price cannot be reached by any volatility in the search bracket.
    #[error("implied volatility could not be found in the range {vol_min} - {vol_max}")]
    OutOfRange {
        /// Lower volatility bound of the search.
        vol_min: f64,
        /// Upper volatility bound of the search.
        vol_max: f64,
    },

    /// Input data is invalid (e.g., zero expiry, negative strike, unknown option code).
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
}
