//! Derivative oracle seam for derivative-based solvers.
//!
//! [`newton`](crate::root_finding::newton::newton) does not differentiate
//! anything itself: it consumes a [`DerivativeOracle`], which is whatever
//! the caller has — an analytic derivative written by hand, or an adapter
//! around an automatic-differentiation engine. The blanket impl makes any
//! `FnMut(f64) -> f64` closure an oracle, so the common case stays a plain
//! closure argument.

/// Opaque source of derivative values for a target function.
pub trait DerivativeOracle {
    /// Derivative of the target function at `x`.
    ///
    /// May return a non-finite value; the solver checks and reports it as
    /// a [`NonFiniteValue`](crate::root_finding::errors::RootFindingError::NonFiniteValue)
    /// failure rather than assuming anything about the oracle.
    fn slope(&mut self, x: f64) -> f64;
}

impl<G> DerivativeOracle for G
where
    G: FnMut(f64) -> f64,
{
    #[inline]
    fn slope(&mut self, x: f64) -> f64 {
        self(x)
    }
}
