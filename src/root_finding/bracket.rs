//! Sign-change bracket for root-finding.
//!
//! A [`Bracket`] is a pair of abscissas whose function values straddle
//! zero (or hit it exactly), so the intermediate value theorem guarantees
//! a root inside for continuous functions. Bracketing algorithms shrink it
//! one endpoint at a time and stop when no representable point remains
//! between the endpoints.
//!
//! Also hosts the ULP helpers and the monotonic bijection used to
//! reparameterize unbounded intervals onto a finite range.

use super::errors::RootFindingError;
use super::signs::{opposite_sign, same_sign};


/// Smallest representable value above `x`.
#[inline]
pub(crate) fn next_up(x: f64) -> f64 {
    if x.is_nan() || x == f64::INFINITY { return x; }
    // smallest positive subnormal
    if x == 0.0 { return f64::from_bits(1); }

    let bits   = x.to_bits();
    let bumped = if x > 0.0 { bits + 1 } else { bits - 1 };
    f64::from_bits(bumped)
}

/// Strictly increasing bijection from `(-1, 1)` onto the reals:
/// `t / (1 - t^2)`. Composing the target function with this map lets the
/// ordinary interval-halving machinery search unbounded intervals.
#[inline]
pub(crate) fn expand(t: f64) -> f64 {
    t / (1.0 - t * t)
}

/// Inverse of [`expand`]: maps a possibly infinite abscissa into `(-1, 1)`.
///
/// Infinite inputs land just inside the open interval, which corresponds
/// to magnitudes around `4.5e15` after expansion; a root beyond that is
/// out of reach of the remapped search, which is documented behavior for
/// unbounded seeds.
#[inline]
pub(crate) fn compress(x: f64) -> f64 {
    if x.is_infinite() || x.abs() >= 1e15 {
        return x.signum() * (1.0 - f64::EPSILON);
    }
    // t solves t^2 x + t - x = 0; this form avoids cancellation at x ~ 0
    2.0 * x / (1.0 + (1.0 + 4.0 * x * x).sqrt())
}


/// An interval `[a, b]` with `f(a) * f(b) <= 0`.
///
/// The invariant is established at construction and preserved by
/// [`Bracket::absorb`], which replaces exactly one endpoint per step.
/// The struct stores both endpoints and their function values; it never
/// re-evaluates the function itself.
#[derive(Debug, Copy, Clone)]
pub struct Bracket {
    a:  f64,
    b:  f64,
    fa: f64,
    fb: f64,
}

impl Bracket {
    /// Builds a bracket from two evaluated points, reordering so `a < b`.
    ///
    /// # Errors
    /// - [`RootFindingError::NonFiniteValue`] : either function value is
    ///   NaN or infinite
    /// - [`RootFindingError::NotBracketing`]  : the values share a sign
    ///   and neither is exactly zero
    pub fn new(
        (a, fa): (f64, f64),
        (b, fb): (f64, f64),
    ) -> Result<Self, RootFindingError> {
        if !fa.is_finite() {
            return Err(RootFindingError::NonFiniteValue {
                x: a, value: fa, last_estimate: a,
            });
        }
        if !fb.is_finite() {
            return Err(RootFindingError::NonFiniteValue {
                x: b, value: fb, last_estimate: b,
            });
        }
        if fa != 0.0 && fb != 0.0 && same_sign(fa, fb) {
            return Err(RootFindingError::NotBracketing { a, b });
        }

        if a <= b {
            Ok(Self { a, b, fa, fb })
        } else {
            Ok(Self { a: b, b: a, fa: fb, fb: fa })
        }
    }

    pub fn a(&self)  -> f64 { self.a }
    pub fn b(&self)  -> f64 { self.b }
    pub fn fa(&self) -> f64 { self.fa }
    pub fn fb(&self) -> f64 { self.fb }

    pub fn width(&self) -> f64 {
        self.b - self.a
    }

    /// Midpoint as `a + (b - a) / 2`, which neither overflows for huge
    /// endpoints nor loses the bias of `(a + b) / 2` near subnormals.
    pub fn midpoint(&self) -> f64 {
        self.a + (self.b - self.a) * 0.5
    }

    /// `true` once the endpoints are adjacent in floating-point order:
    /// no midpoint distinct from both exists, so the bracket is the
    /// tightest representable one and halving must stop.
    pub fn is_exhausted(&self) -> bool {
        next_up(self.a) >= self.b
    }

    /// `true` if `x` lies strictly between the endpoints.
    pub fn contains(&self, x: f64) -> bool {
        x > self.a && x < self.b
    }

    /// Endpoint with the smaller residual, as `(x, f(x))`.
    pub fn best(&self) -> (f64, f64) {
        if self.fa.abs() <= self.fb.abs() {
            (self.a, self.fa)
        } else {
            (self.b, self.fb)
        }
    }

    /// Replaces the endpoint sharing `fx`'s sign with `x`, keeping the
    /// sign-change invariant. `x` must lie strictly inside the bracket.
    /// An exact zero collapses the bracket onto `x`.
    pub fn absorb(&mut self, x: f64, fx: f64) {
        if fx == 0.0 {
            self.a  = x;
            self.b  = x;
            self.fa = fx;
            self.fb = fx;
            return;
        }

        if opposite_sign(self.fa, fx) {
            self.b  = x;
            self.fb = fx;
        } else {
            self.a  = x;
            self.fa = fx;
        }
    }

    /// One halving step: evaluate the midpoint through `eval` and absorb
    /// it. Returns the midpoint and its function value.
    pub fn step<E>(
        &mut self,
        eval: &mut dyn FnMut(f64) -> Result<f64, E>,
    ) -> Result<(f64, f64), E> {
        let m  = self.midpoint();
        let fm = eval(m)?;
        self.absorb(m, fm);
        Ok((m, fm))
    }
}
