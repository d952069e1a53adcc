//! Root-finding solvers for univariate real functions.
//!
//! Each solve call is synchronous and runs to completion (converge, fail,
//! or hit its iteration cap). No state is shared between calls: batches of
//! independent solves may be run in parallel across threads without
//! locking, provided the supplied function is pure. That purity is a
//! documented precondition, not something the library enforces, and the
//! only cancellation mechanism is the iteration cap.

// shared helpers
pub mod algorithms;
pub mod report;
pub mod errors;
pub mod bracket;
pub mod derivative;
pub(crate) mod config;
pub(crate) mod signs;
pub(crate) mod tolerances;

// algorithms
pub mod bisection;
pub mod newton;
pub mod secant;
pub mod steffensen;
pub mod find_zero;
