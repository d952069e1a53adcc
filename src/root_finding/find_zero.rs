//! Adaptive hybrid solver.
//!
//! [`find_zero`] mixes bracketing safety with open-method speed:
//!
//! - seeded with a sign-change interval, it runs a Brent-style loop
//!   (inverse quadratic interpolation / secant steps, guarded by a
//!   midpoint fallback) and cannot fail to converge short of a NaN
//!   encountered mid-search;
//! - seeded with a single guess, it runs a monitored secant-class
//!   iteration that promotes any observed sign change into a bracket and
//!   substitutes a bisection step whenever a fast step is disqualified.

use super::algorithms::{Algorithm, HybridFamily, GLOBAL_MAX_ITER_FALLBACK};
use super::report::{RootFindingReport, TerminationReason, ToleranceSatisfied, Stencil};
use super::tolerances::DynamicTolerance;
use super::signs::{opposite_sign, same_sign};
use super::errors::{RootFindingError, ToleranceError};
use super::config::{CommonCfg, impl_common_cfg};
use super::bracket::{Bracket, next_up, compress, expand};
use super::bisection::{midpoint, theoretical_iter, remap_report, remap_error};
use super::secant::secant_x_intercept;
use thiserror::Error;


#[derive(Debug, Error)]
pub enum FindZeroError {
    #[error(transparent)]
    RootFinding(#[from] RootFindingError),

    #[error(transparent)]
    Tolerance(#[from] ToleranceError),

    #[error("invalid initial guess: x0={x0} must be finite")]
    InvalidGuess { x0: f64 },

    #[error("invalid bounds: a must be less than b and neither NaN. got [{a}, {b}]")]
    InvalidBounds { a: f64, b: f64 },
}


/// Starting data for [`find_zero`].
///
/// Built implicitly from the seed argument:
/// - `f64`        -> [`Seed::Point`]
/// - `(f64, f64)` -> [`Seed::Bracket`]
#[derive(Debug, Copy, Clone)]
pub enum Seed {
    Point(f64),
    Bracket(f64, f64),
}
impl From<f64> for Seed {
    fn from(x0: f64) -> Self {
        Seed::Point(x0)
    }
}
impl From<(f64, f64)> for Seed {
    fn from((a, b): (f64, f64)) -> Self {
        Seed::Bracket(a, b)
    }
}


/// Hybrid solver configuration.
///
/// # Fields
/// - `common` : [`CommonCfg`] with tolerances and optional `max_iter`.
///
/// # Construction
/// - Use [`FindZeroCfg::new`] then optional setters.
///
/// # Defaults
/// - If `common.max_iter` is `None`: bracket-seeded calls use the
///   theoretical bisection bound for the initial interval (at least
///   [`GLOBAL_MAX_ITER_FALLBACK`], since interpolation steps may not halve
///   the interval); point-seeded calls use
///   [`Algorithm::default_max_iter`] for [`HybridFamily::PointSeeded`].
#[derive(Debug, Copy, Clone)]
pub struct FindZeroCfg {
    common: CommonCfg,
}
impl FindZeroCfg {
    #[must_use]
    pub fn new() -> Self {
        Self {
            common: CommonCfg::new(),
        }
    }
}
impl Default for FindZeroCfg {
    fn default() -> Self { Self::new() }
}
impl_common_cfg!(FindZeroCfg);


/// Checks degeneracies in iqi and secant candidate calculations.
#[inline]
fn near_equal(x: f64, y: f64) -> bool {
    (x - y).abs() <= 8.0 * f64::EPSILON * (x.abs() + y.abs()).max(1.0)
}


/// Inverse quadratic interpolation (Brent-style ratios).
///
/// Uses three distinct abscissae `(a, b, c)` with values `(fa, fb, fc)` to
/// compute a candidate `s = b + p/q`. Rejects non-finite or degenerate
/// inputs.
///
/// # Returns
/// - `Some(s)` : finite IQI estimate
/// - `None`    : invalid inputs (duplicate points, fa~fb~fc degeneracy,
///               zero denominator, or non-finite result)
#[inline]
fn iqi(
    (a, fa): (f64, f64),
    (b, fb): (f64, f64),
    (c, fc): (f64, f64),
) -> Option<f64> {
    if !(a.is_finite()  && b.is_finite()  && c.is_finite() &&
        fa.is_finite()  && fb.is_finite() && fc.is_finite()) {
        return None;
    }

    if near_equal(a, b)
    || near_equal(a, c)
    || near_equal(b, c) {
        return None;
    }

    if near_equal(fa, fb)
    || near_equal(fa, fc)
    || near_equal(fb, fc) {
        return None;
    }

    let q = fa / fc;
    let r = fb / fc;
    let t = fb / fa;

    let p  = t * ( (c - b) * q * (q - r) - (b - a) * (r - 1.0) );
    let qd = (q - 1.0) * (r - 1.0) * (t - 1.0);

    if !p.is_finite() || !qd.is_finite() || qd == 0.0 { return None; }

    let s = b + p / qd;
    if !s.is_finite() { return None; }
    Some(s)
}


/// Secant candidate through `(a, fa)` and `(b, fb)`, rejecting a flat
/// chord or non-finite result.
#[inline]
fn secant_candidate(
    (a, fa): (f64, f64),
    (b, fb): (f64, f64),
) -> Option<f64> {
    if near_equal(fa, fb) { return None; }

    let s = secant_x_intercept((a, fa), (b, fb));
    if !s.is_finite() { return None; }
    Some(s)
}


/// Brent's "interior window" test for candidate `s`.
///
/// Checks that `s` lies strictly inside the open interval
/// `((3a + b)/4, b)` when `a < b` (mirrored when `a > b`). This guards
/// against overly aggressive extrapolation.
#[inline]
fn interior_window_ok(a: f64, b: f64, s: f64) -> bool {
    let lower = (3.0 * a + b) / 4.0;
    if a < b {
        s > lower && s < b
    } else {
        s < lower && s > b
    }
}


/// Finds a root of a function, adapting the strategy to the seed.
///
/// - `seed = (a, b)` with a sign change across the interval: bracketing
///   search whose point selection favors an interpolation step (inverse
///   quadratic or secant) whenever it stays safely inside the bracket,
///   falling back to the midpoint otherwise. Strictly safer and typically
///   much faster than pure bisection; always terminates. Infinite bounds
///   are allowed and reparameterized as in
///   [`bisection`](crate::root_finding::bisection::bisection).
/// - `seed = x0`: secant-class iteration from the guess. Each candidate
///   step is monitored; once a sign change has been observed, steps that
///   would leave the established bracket — or that produce a non-finite
///   value — are discarded in favor of a bisection step on the best-known
///   bracket.
///
/// # Arguments
/// - `func` : function whose root is sought
/// - `seed` : `f64` starting guess or `(f64, f64)` bracket
/// - `cfg`  : [`FindZeroCfg`] (tolerances, optional `max_iter`)
///
/// # Returns
/// [`RootFindingReport`]; `algorithm_name` is `"find_zero_bracketed"` or
/// `"find_zero_point"` depending on the seed.
///
/// # Errors
/// - [`FindZeroError::InvalidGuess`]  : point seed non-finite
/// - [`FindZeroError::InvalidBounds`] : bracket seed NaN or `a >= b`
///
/// * Propagated via [`FindZeroError::RootFinding`]
/// - [`RootFindingError::NotBracketing`]         : bracket seed without a
///   sign change
/// - [`RootFindingError::NonFiniteValue`]        : NaN/inf encountered with
///   no safe fallback left
/// - [`RootFindingError::MaxIterationsExceeded`] : point-seeded search hit
///   the cap (bracket-seeded calls terminate before the cap barring NaN)
/// - [`RootFindingError::InvalidMaxIter`]        : `max_iter = 0`
///
/// * Propagated via [`FindZeroError::Tolerance`]
/// - [`ToleranceError::InvalidAbsFx`] / [`ToleranceError::InvalidAbsX`] /
///   [`ToleranceError::InvalidRelX`] / [`ToleranceError::InvalidAbsRelX`]
///
/// # Guarantee
/// Bracket-seeded calls converge for any continuous function with a
/// genuine sign change: each step either interpolates inside the bracket
/// or halves it, and the bracket cannot shrink past adjacent
/// representable values. Point-seeded calls inherit the failure modes of
/// the secant method and report them as typed errors rather than looping.
pub fn find_zero<F, S>(
    mut func: F,
    seed: S,
    cfg: FindZeroCfg,
) -> Result<RootFindingReport, FindZeroError>
where
    F: FnMut(f64) -> f64,
    S: Into<Seed>,
{
    match seed.into() {
        Seed::Point(x0) => {
            if !x0.is_finite() {
                return Err(FindZeroError::InvalidGuess { x0 });
            }
            point_seeded(&mut func, x0, &cfg)
        }
        Seed::Bracket(a, b) => {
            if a.is_nan() || b.is_nan() || a >= b {
                return Err(FindZeroError::InvalidBounds { a, b });
            }

            if a.is_infinite() || b.is_infinite() {
                let (ta, tb) = (compress(a), compress(b));
                let mut g = |t: f64| func(expand(t));
                return match bracketed(&mut g, ta, tb, &cfg) {
                    Ok(report) => Ok(remap_report(report)),
                    Err(FindZeroError::RootFinding(e)) => Err(remap_error(e).into()),
                    Err(e) => Err(e),
                };
            }

            bracketed(&mut func, a, b, &cfg)
        }
    }
}


/// Bracket-seeded search: Brent-style interpolation with midpoint guard.
fn bracketed(
    func: &mut dyn FnMut(f64) -> f64,
    mut a: f64,
    mut b: f64,
    cfg: &FindZeroCfg,
) -> Result<RootFindingReport, FindZeroError> {
    let algorithm = Algorithm::Hybrid(HybridFamily::Bracketed);
    let algo_name = algorithm.algorithm_name();

    let abs_fx   = cfg.common.abs_fx();
    let abs_x    = cfg.common.abs_x();
    let rel_x    = cfg.common.rel_x();
    let max_iter = cfg.common.max_iter();

    // already validated via building config; redundant guard
    if let Some(0) = max_iter {
        return Err(RootFindingError::InvalidMaxIter { got: 0 }.into());
    }

    // track function evaluations
    let mut evals: usize = 0;

    // wraps func, increments evals, enforces finiteness
    let mut eval = |x: f64| -> Result<f64, FindZeroError> {
        let fx = { evals += 1; func(x) };
        if !fx.is_finite() {
            return Err(RootFindingError::NonFiniteValue {
                x, value: fx, last_estimate: x,
            }.into());
        }

        Ok(fx)
    };

    // early exit: a is root
    let mut fa = eval(a)?;
    if fa.abs() <= abs_fx {
        return Ok(RootFindingReport {
            root                : a,
            f_root              : fa,
            iterations          : 0,
            evaluations         : evals,
            termination_reason  : TerminationReason::ToleranceReached,
            tolerance_satisfied : ToleranceSatisfied::AbsFxReached,
            stencil             : Stencil::Bracket { bounds: [a, b] },
            algorithm_name      : algo_name,
        });
    }
    // early exit: b is root
    let mut fb = eval(b)?;
    if fb.abs() <= abs_fx {
        return Ok(RootFindingReport {
            root                : b,
            f_root              : fb,
            iterations          : 0,
            evaluations         : evals,
            termination_reason  : TerminationReason::ToleranceReached,
            tolerance_satisfied : ToleranceSatisfied::AbsFxReached,
            stencil             : Stencil::Bracket { bounds: [a, b] },
            algorithm_name      : algo_name,
        });
    }

    // error: no sign change across [a, b]
    if same_sign(fa, fb) {
        return Err(RootFindingError::NotBracketing { a, b }.into());
    }

    let mut width_tol = algorithm.calculate_tolerance(
        &DynamicTolerance::WidthTol { a, b },
        abs_x,
        rel_x,
    )?;
    let theoretical_iters = theoretical_iter(a, b, width_tol)?;
    let num_iter = match max_iter {
        Some(v) => v,
        // interpolation steps need not halve the interval, so allow more
        // headroom than the pure bisection bound
        None    => theoretical_iters.max(GLOBAL_MAX_ITER_FALLBACK),
    };

    // early exit: width tolerance satisfied
    if (b - a).abs() <= width_tol {
        let mid = midpoint(a, b);
        let fm  = eval(mid)?;
        return Ok(RootFindingReport {
            root                : mid,
            f_root              : fm,
            iterations          : 0,
            evaluations         : evals,
            termination_reason  : TerminationReason::ToleranceReached,
            tolerance_satisfied : ToleranceSatisfied::WidthTolReached,
            stencil             : Stencil::Bracket { bounds: [a, b] },
            algorithm_name      : algo_name,
        });
    }

    // ensure |fb| <= |fa|
    if fa.abs() < fb.abs() {
        std::mem::swap(&mut a, &mut b);
        std::mem::swap(&mut fa, &mut fb);
    }

    let mut c  = a;
    let mut d  = c;
    let mut fc = fa;
    let mut mflag = true;

    // main loop
    for iter in 1..=num_iter {
        // no representable point remains between the endpoints
        let lo = a.min(b);
        let hi = a.max(b);
        if next_up(lo) >= hi {
            return Ok(RootFindingReport {
                root                : b,
                f_root              : fb,
                iterations          : iter - 1,
                evaluations         : evals,
                termination_reason  : TerminationReason::MachinePrecisionReached,
                tolerance_satisfied : ToleranceSatisfied::ToleranceNotReached,
                stencil             : Stencil::Bracket { bounds: [lo, hi] },
                algorithm_name      : algo_name,
            });
        }

        // candidate via iqi or secant
        let candidate_iqi    = iqi((a, fa), (b, fb), (c, fc));
        let candidate_secant = secant_candidate((b, fb), (c, fc));

        let mut s = candidate_iqi
            .or(candidate_secant)
            .unwrap_or_else(|| midpoint(a, b));

        let step_bc = (b - c).abs();
        let step_cd = (c - d).abs();

        let reject =
            !interior_window_ok(a, b, s)
            || (mflag && (s - b).abs() >= 0.5 * step_bc)
            || (!mflag && (s - b).abs() >= 0.5 * step_cd)
            || (mflag && step_bc < width_tol)
            || (!mflag
                && step_cd < algorithm.calculate_tolerance(
                    &DynamicTolerance::step_two_scalars(c, d),
                    abs_x,
                    rel_x,
                )?);

        if reject {
            // use bisection
            s = midpoint(a, b);
            mflag = true;
        } else {
            mflag = false;
        }

        // rotation
        let fs = eval(s)?;
        d  = c;
        c  = b;
        fc = fb;

        if opposite_sign(fa, fs) {
            // root inside [a, s]
            b  = s;
            fb = fs;
        } else {
            // root inside [s, b]
            a  = s;
            fa = fs;
        }

        // maintain |fb| <= |fa|
        if fa.abs() < fb.abs() {
            std::mem::swap(&mut a, &mut b);
            std::mem::swap(&mut fa, &mut fb);
        }

        width_tol = algorithm.calculate_tolerance(
            &DynamicTolerance::WidthTol { a, b },
            abs_x,
            rel_x,
        )?;

        if fb.abs() <= abs_fx {
            return Ok(RootFindingReport {
                root                : b,
                f_root              : fb,
                iterations          : iter,
                evaluations         : evals,
                termination_reason  : TerminationReason::ToleranceReached,
                tolerance_satisfied : ToleranceSatisfied::AbsFxReached,
                stencil             : Stencil::Bracket { bounds: [a, b] },
                algorithm_name      : algo_name,
            });
        }

        if (b - a).abs() <= width_tol {
            return Ok(RootFindingReport {
                root                : b,
                f_root              : fb,
                iterations          : iter,
                evaluations         : evals,
                termination_reason  : TerminationReason::ToleranceReached,
                tolerance_satisfied : ToleranceSatisfied::WidthTolReached,
                stencil             : Stencil::Bracket { bounds: [a, b] },
                algorithm_name      : algo_name,
            });
        }
    }

    Err(RootFindingError::MaxIterationsExceeded {
        iterations    : num_iter,
        last_estimate : b,
    }.into())
}


/// Point-seeded search: monitored secant iteration with bisection rescue.
fn point_seeded(
    func: &mut dyn FnMut(f64) -> f64,
    x0: f64,
    cfg: &FindZeroCfg,
) -> Result<RootFindingReport, FindZeroError> {
    let algorithm = Algorithm::Hybrid(HybridFamily::PointSeeded);
    let algo_name = algorithm.algorithm_name();

    let abs_fx = cfg.common.abs_fx();
    let abs_x  = cfg.common.abs_x();
    let rel_x  = cfg.common.rel_x();

    let num_iter = match cfg.common.max_iter() {
        Some(0) => return Err(RootFindingError::InvalidMaxIter { got: 0 }.into()),
        Some(v) => v,
        None    => algorithm.default_max_iter().unwrap_or(GLOBAL_MAX_ITER_FALLBACK),
    };

    // track function evaluations
    let mut evals = 0;

    // wraps func, increments evals, enforces finiteness
    let mut eval = |x: f64| -> Result<f64, FindZeroError> {
        let fx = { evals += 1; func(x) };
        if !fx.is_finite() {
            return Err(RootFindingError::NonFiniteValue {
                x, value: fx, last_estimate: x,
            }.into());
        }

        Ok(fx)
    };

    // early exit: x0 is root
    let fx0 = eval(x0)?;
    if fx0.abs() <= abs_fx {
        return Ok(RootFindingReport {
            root                : x0,
            f_root              : fx0,
            iterations          : 0,
            evaluations         : evals,
            termination_reason  : TerminationReason::ToleranceReached,
            tolerance_satisfied : ToleranceSatisfied::AbsFxReached,
            stencil             : Stencil::singleton(x0),
            algorithm_name      : algo_name,
        });
    }

    // second point, Steffensen-style: offset by f(x0) clamped to the local
    // scale so a huge residual does not fling the companion point away
    let scale  = x0.abs().max(1.0);
    let mut x1 = x0 + fx0.clamp(-scale, scale);
    if x1 == x0 || !x1.is_finite() {
        x1 = x0 + 1e-4 * scale;
    }
    let fx1 = eval(x1)?;
    if fx1.abs() <= abs_fx {
        return Ok(RootFindingReport {
            root                : x1,
            f_root              : fx1,
            iterations          : 0,
            evaluations         : evals,
            termination_reason  : TerminationReason::ToleranceReached,
            tolerance_satisfied : ToleranceSatisfied::AbsFxReached,
            stencil             : Stencil::singleton(x1),
            algorithm_name      : algo_name,
        });
    }

    // any sign change observed so far is promoted into a bracket
    let mut bracket = if opposite_sign(fx0, fx1) {
        Some(Bracket::new((x0, fx0), (x1, fx1))?)
    } else {
        None
    };

    // main loop
    let mut x_prev = x0;
    let mut f_prev = fx0;
    let mut x_curr = x1;
    let mut f_curr = fx1;
    for iter in 1..=num_iter {
        // established bracket shrunk to adjacent representable values
        if let Some(br) = &bracket {
            if br.is_exhausted() {
                let (root, f_root) = br.best();
                return Ok(RootFindingReport {
                    root,
                    f_root,
                    iterations          : iter - 1,
                    evaluations         : evals,
                    termination_reason  : TerminationReason::MachinePrecisionReached,
                    tolerance_satisfied : ToleranceSatisfied::ToleranceNotReached,
                    stencil             : Stencil::Bracket {
                        bounds: [br.a(), br.b()],
                    },
                    algorithm_name      : algo_name,
                });
            }
        }

        // fast candidate, disqualified if non-finite or outside the bracket
        let fast = secant_x_intercept((x_prev, f_prev), (x_curr, f_curr));
        let mut used_safe = false;
        let mut x_next = if fast.is_finite()
            && bracket.map_or(true, |br| br.contains(fast))
        {
            fast
        } else if let Some(br) = &bracket {
            used_safe = true;
            br.midpoint()
        } else {
            return Err(RootFindingError::NonFiniteValue {
                x: x_curr, value: fast, last_estimate: x_curr,
            }.into());
        };

        // a NaN at the fast candidate is also grounds for the safe step
        let f_next = match eval(x_next) {
            Ok(v) => v,
            Err(e) => {
                let nan_eval = matches!(
                    e,
                    FindZeroError::RootFinding(RootFindingError::NonFiniteValue { .. })
                );
                match &bracket {
                    Some(br) if nan_eval && !used_safe => {
                        x_next = br.midpoint();
                        eval(x_next)?
                    }
                    _ => return Err(e),
                }
            }
        };

        // check |f(x)| tolerance
        if f_next.abs() <= abs_fx {
            return Ok(RootFindingReport {
                root                : x_next,
                f_root              : f_next,
                iterations          : iter,
                evaluations         : evals,
                termination_reason  : TerminationReason::ToleranceReached,
                tolerance_satisfied : ToleranceSatisfied::AbsFxReached,
                stencil             : Stencil::doubleton(x_prev, x_curr),
                algorithm_name      : algo_name,
            });
        }

        // bracket bookkeeping
        if let Some(br) = bracket.as_mut() {
            if br.contains(x_next) {
                br.absorb(x_next, f_next);
            }
        } else if opposite_sign(f_curr, f_next) {
            bracket = Some(Bracket::new((x_curr, f_curr), (x_next, f_next))?);
        } else if opposite_sign(f_prev, f_next) {
            bracket = Some(Bracket::new((x_prev, f_prev), (x_next, f_next))?);
        }

        // check step tolerance
        let step_tol = algorithm.calculate_tolerance(
            &DynamicTolerance::step_two_scalars(x_curr, x_next),
            abs_x,
            rel_x,
        )?;
        if (x_next - x_curr).abs() <= step_tol {
            return Ok(RootFindingReport {
                root                : x_next,
                f_root              : f_next,
                iterations          : iter,
                evaluations         : evals,
                termination_reason  : TerminationReason::ToleranceReached,
                tolerance_satisfied : ToleranceSatisfied::StepSizeReached,
                stencil             : Stencil::doubleton(x_prev, x_curr),
                algorithm_name      : algo_name,
            });
        }

        x_prev = x_curr;
        f_prev = f_curr;
        x_curr = x_next;
        f_curr = f_next;
    }

    Err(RootFindingError::MaxIterationsExceeded {
        iterations    : num_iter,
        last_estimate : x_curr,
    }.into())
}
