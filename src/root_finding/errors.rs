//! Root-finding error types.
//!
//! ┌ [`RootFindingError`] : runtime failure taxonomy shared by all solvers
//! │   ├ initial endpoints do not straddle a sign change
//! │   ├ non-finite function or derivative evaluation
//! │   ├ vanishing denominator in a Newton-class step
//! │   ├ iteration cap reached without convergence
//! │   └ invalid global parameters (e.g. max_iter)
//! │
//! └ [`ToleranceError`]   : tolerance-related errors
//!     ├ invalid input tolerances
//!     ├ invalid or non-finite computed tolerances
//!     └ mismatched tolerance type vs. algorithm ([`Algorithm`])
//!
//! Every variant is a recoverable-by-caller condition: solvers return them
//! rather than panicking, and the ones reached mid-iteration carry the last
//! computed estimate (see [`RootFindingError::last_estimate`]).

use thiserror::Error;
use super::algorithms::Algorithm;


/// Root-finding runtime failures.
///
/// Inner solvers surface the first disqualifying condition immediately;
/// only the hybrid [`find_zero`](crate::root_finding::find_zero) recovers
/// locally, by substituting a safe bisection step while a bracket exists.
#[derive(Debug, Error)]
pub enum RootFindingError {
    #[error("no sign change on [{a}, {b}]: f(a) * f(b) > 0")]
    NotBracketing { a: f64, b: f64 },

    #[error("non-finite value at x={x}: got {value}")]
    NonFiniteValue { x: f64, value: f64, last_estimate: f64 },

    #[error("slope {slope} at x={x} too small for a finite step")]
    DerivativeTooSmall { x: f64, slope: f64, last_estimate: f64 },

    #[error("no convergence within {iterations} iterations; last estimate x={last_estimate}")]
    MaxIterationsExceeded { iterations: usize, last_estimate: f64 },

    #[error("invalid max_iter: must be >= 1. got max_iter={got}")]
    InvalidMaxIter { got: usize },
}

impl RootFindingError {
    /// Last iterate computed before the failure, when one exists.
    pub fn last_estimate(&self) -> Option<f64> {
        match self {
            RootFindingError::NonFiniteValue { last_estimate, .. }
            | RootFindingError::DerivativeTooSmall { last_estimate, .. }
            | RootFindingError::MaxIterationsExceeded { last_estimate, .. } => {
                Some(*last_estimate)
            }
            RootFindingError::NotBracketing { .. }
            | RootFindingError::InvalidMaxIter { .. } => None,
        }
    }
}


/// Tolerance configuration and evaluation errors.
///
/// ┌ Invalid input tolerances (`abs_fx`, `abs_x`, `rel_x`)
/// ├ Computed tolerance invalid (<= 0 or non-finite)
/// └ Mismatched tolerance type vs. algorithm
#[derive(Debug, Error)]
pub enum ToleranceError {
    #[error("invalid `abs_fx` tolerance: must be finite and > 0. got {got}")]
    InvalidAbsFx { got: f64 },

    #[error("invalid `abs_x` tolerance: must be finite and >= 0. got {got}")]
    InvalidAbsX  { got: f64 },

    #[error("invalid `rel_x` tolerance: must be finite and >= 0. got {got}")]
    InvalidRelX  { got: f64 },

    #[error("either `abs_x` or `rel_x` must be > 0. got {abs_x} and {rel_x}")]
    InvalidAbsRelX { abs_x: f64, rel_x: f64 },

    #[error("width tolerance not applicable for algorithm {algorithm:?}")]
    WidthTolNotApplicable { algorithm: Algorithm },

    #[error("step tolerance not applicable for algorithm {algorithm:?}")]
    StepTolNotApplicable { algorithm: Algorithm },

    #[error("invalid computed tolerance: must be finite and > 0. got {got}")]
    InvalidTolerance { got: f64 },
}
