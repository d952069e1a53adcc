//! Univariate root-finding.
//!
//! Finds zeros of real scalar functions `f: f64 -> f64` supplied as
//! closures. Four solver families are provided:
//!
//! - bracketing       : [`root_finding::bisection`]
//! - derivative-based : [`root_finding::newton`]
//! - derivative-free  : [`root_finding::secant`], [`root_finding::steffensen`]
//! - adaptive hybrid  : [`root_finding::find_zero`]
//!
//! Every solver returns a `Result` with either a
//! [`root_finding::report::RootFindingReport`] or a typed error; none of
//! them panic on numerical trouble.

pub mod root_finding;
