//! Bisection method.

use super::algorithms::{Algorithm, BracketFamily, GLOBAL_MAX_ITER_FALLBACK};
use super::report::{RootFindingReport, TerminationReason, ToleranceSatisfied, Stencil};
use super::tolerances::DynamicTolerance;
use super::errors::{RootFindingError, ToleranceError};
use super::config::{CommonCfg, impl_common_cfg};
use super::bracket::{Bracket, compress, expand};
use thiserror::Error;


#[derive(Debug, Error)]
pub enum BisectionError {
    #[error(transparent)]
    RootFinding(#[from] RootFindingError),

    #[error(transparent)]
    Tolerance(#[from] ToleranceError),

    #[error("invalid bounds: a must be less than b and neither NaN. got [{a}, {b}]")]
    InvalidBounds { a: f64, b: f64 },
}


/// Bisection configuration.
///
/// # Fields
/// - `common` : [`CommonCfg`] with tolerances and optional `max_iter`.
///
/// # Construction
/// - Use [`BisectionCfg::new`] then optional setters.
///
/// # Defaults
/// - If `common.max_iter` is `None`, [`bisection`] resolves it to the
///   theoretical halving bound for the initial interval, capped by
///   [`GLOBAL_MAX_ITER_FALLBACK`].
#[derive(Debug, Copy, Clone)]
pub struct BisectionCfg {
    common: CommonCfg,
}
impl BisectionCfg {
    #[must_use]
    pub fn new() -> Self {
        Self {
            common: CommonCfg::new(),
        }
    }
}
impl Default for BisectionCfg {
    fn default() -> Self { Self::new() }
}
impl_common_cfg!(BisectionCfg);


/// Midpoint as `a + (b - a) / 2`; safe against overflow for huge bounds.
#[inline]
pub(crate) fn midpoint(a: f64, b: f64) -> f64 {
    a + (b - a) * 0.5
}

/// Number of halvings needed to shrink `[a, b]` below `width_tol`.
pub(crate) fn theoretical_iter(
    a: f64,
    b: f64,
    width_tol: f64,
) -> Result<usize, ToleranceError> {
    if !(width_tol.is_finite() && width_tol > 0.0) {
        return Err(ToleranceError::InvalidTolerance { got: width_tol });
    }

    let w0 = b - a;
    let iters = if w0 <= width_tol { 0 } else {
        (w0 / width_tol).log2().ceil() as usize
    };

    Ok(iters)
}


/// Finds a root of a function using the
/// [bisection method](https://en.wikipedia.org/wiki/Bisection_method).
///
/// This method assumes that the function `func` is continuous on `[a, b]`
/// and that `func(a)` and `func(b)` have opposite signs (or one is exactly
/// zero), guaranteeing a root exists within the interval.
///
/// # Arguments
/// - `func` : function whose root is sought
/// - `a`    : lower bound; `-inf` allowed
/// - `b`    : upper bound; `+inf` allowed; must satisfy `a < b`
/// - `cfg`  : [`BisectionCfg`] (tolerances, optional `max_iter`)
///
/// # Returns
/// [`RootFindingReport`] with
/// - `root`                : approximate root
/// - `f_root`              : residual at `root`
/// - `iterations`          : halving steps performed
/// - `evaluations`         : total function evaluations
/// - `termination_reason`  : why it stopped
/// - `tolerance_satisfied` : which tolerance triggered, or
///                           [`ToleranceSatisfied::ToleranceNotReached`]
///                           when the bracket collapsed to adjacent
///                           representable values first
/// - `stencil`             : final bracket bounds
/// - `algorithm_name`      : "bisection"
///
/// # Errors
/// - [`BisectionError::InvalidBounds`] : `a`/`b` NaN or `a >= b`
///
/// * Propagated via [`BisectionError::RootFinding`]
/// - [`RootFindingError::NotBracketing`]         : no sign change on `[a, b]`
/// - [`RootFindingError::NonFiniteValue`]        : `f(x)` produced NaN/inf
/// - [`RootFindingError::MaxIterationsExceeded`] : cap reached (defensive;
///   unreachable for a genuine bracket with default caps)
/// - [`RootFindingError::InvalidMaxIter`]        : `max_iter = 0`
///
/// * Propagated via [`BisectionError::Tolerance`]
/// - [`ToleranceError::InvalidAbsFx`] / [`ToleranceError::InvalidAbsX`] /
///   [`ToleranceError::InvalidRelX`] / [`ToleranceError::InvalidAbsRelX`]
///
/// # Notes
/// - Infinite bounds are reparameterized through a strictly monotonic
///   bijection onto `(-1, 1)` and the same halving logic runs there; see
///   [`Bracket`] docs for the reachable magnitude range.
/// - Convergence is guaranteed for continuous functions: the interval
///   either meets a tolerance or collapses to the tightest representable
///   bracket ([`TerminationReason::MachinePrecisionReached`]).
pub fn bisection<F>(
    mut func: F,
    a: f64,
    b: f64,
    cfg: BisectionCfg,
) -> Result<RootFindingReport, BisectionError>
where
    F: FnMut(f64) -> f64,
{
    if a.is_nan() || b.is_nan() || a >= b {
        return Err(BisectionError::InvalidBounds { a, b });
    }

    if a.is_infinite() || b.is_infinite() {
        let (ta, tb) = (compress(a), compress(b));
        let mut g = |t: f64| func(expand(t));
        return match bisection_core(&mut g, ta, tb, &cfg) {
            Ok(report) => Ok(remap_report(report)),
            Err(BisectionError::RootFinding(e)) => Err(remap_error(e).into()),
            Err(e) => Err(e),
        };
    }

    bisection_core(&mut func, a, b, &cfg)
}

/// Maps a report produced in compressed coordinates back to `x`-space.
pub(crate) fn remap_report(mut report: RootFindingReport) -> RootFindingReport {
    report.root = expand(report.root);
    if let Stencil::Bracket { bounds } = &mut report.stencil {
        bounds[0] = expand(bounds[0]);
        bounds[1] = expand(bounds[1]);
    }
    report
}

/// Maps abscissas inside an error produced in compressed coordinates back
/// to `x`-space.
pub(crate) fn remap_error(e: RootFindingError) -> RootFindingError {
    match e {
        RootFindingError::NonFiniteValue { x, value, last_estimate } => {
            RootFindingError::NonFiniteValue {
                x: expand(x),
                value,
                last_estimate: expand(last_estimate),
            }
        }
        RootFindingError::MaxIterationsExceeded { iterations, last_estimate } => {
            RootFindingError::MaxIterationsExceeded {
                iterations,
                last_estimate: expand(last_estimate),
            }
        }
        RootFindingError::NotBracketing { a, b } => {
            RootFindingError::NotBracketing { a: expand(a), b: expand(b) }
        }
        other => other,
    }
}

fn bisection_core(
    func: &mut dyn FnMut(f64) -> f64,
    a: f64,
    b: f64,
    cfg: &BisectionCfg,
) -> Result<RootFindingReport, BisectionError> {
    let algorithm = Algorithm::Bracket(BracketFamily::Bisection);
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
    let mut eval = |x: f64| -> Result<f64, BisectionError> {
        let fx = { evals += 1; func(x) };
        if !fx.is_finite() {
            return Err(RootFindingError::NonFiniteValue {
                x, value: fx, last_estimate: x,
            }.into());
        }

        Ok(fx)
    };

    // early exit: a is root
    let fa = eval(a)?;
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
    let fb = eval(b)?;
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

    let mut bracket = Bracket::new((a, fa), (b, fb))?;

    let mut width_tol = algorithm.calculate_tolerance(
        &DynamicTolerance::WidthTol { a, b },
        abs_x,
        rel_x,
    )?;
    let theoretical_iters = theoretical_iter(a, b, width_tol)?;
    let num_iter = match max_iter {
        Some(v) => v,
        None    => theoretical_iters.min(GLOBAL_MAX_ITER_FALLBACK).max(1),
    };

    // early exit: width tolerance satisfied
    if bracket.width() <= width_tol {
        let root   = bracket.midpoint();
        let f_root = eval(root)?;
        return Ok(RootFindingReport {
            root,
            f_root,
            iterations          : 0,
            evaluations         : evals,
            termination_reason  : TerminationReason::ToleranceReached,
            tolerance_satisfied : ToleranceSatisfied::WidthTolReached,
            stencil             : Stencil::Bracket { bounds: [a, b] },
            algorithm_name      : algo_name,
        });
    }

    // main loop
    let mut iterations = 0;
    while iterations < num_iter {
        // no representable midpoint remains
        if bracket.is_exhausted() {
            let (root, f_root) = bracket.best();
            return Ok(RootFindingReport {
                root,
                f_root,
                iterations,
                evaluations         : evals,
                termination_reason  : TerminationReason::MachinePrecisionReached,
                tolerance_satisfied : ToleranceSatisfied::ToleranceNotReached,
                stencil             : Stencil::Bracket {
                    bounds: [bracket.a(), bracket.b()],
                },
                algorithm_name      : algo_name,
            });
        }

        let (m, fm) = bracket.step(&mut eval)?;
        iterations += 1;

        // check |f(x)| tolerance
        if fm.abs() <= abs_fx {
            return Ok(RootFindingReport {
                root                : m,
                f_root              : fm,
                iterations,
                evaluations         : evals,
                termination_reason  : TerminationReason::ToleranceReached,
                tolerance_satisfied : ToleranceSatisfied::AbsFxReached,
                stencil             : Stencil::Bracket {
                    bounds: [bracket.a(), bracket.b()],
                },
                algorithm_name      : algo_name,
            });
        }

        // check width tolerance
        width_tol = algorithm.calculate_tolerance(
            &DynamicTolerance::WidthTol { a: bracket.a(), b: bracket.b() },
            abs_x,
            rel_x,
        )?;
        if bracket.width() <= width_tol {
            let root   = bracket.midpoint();
            let f_root = eval(root)?;
            return Ok(RootFindingReport {
                root,
                f_root,
                iterations,
                evaluations         : evals,
                termination_reason  : TerminationReason::ToleranceReached,
                tolerance_satisfied : ToleranceSatisfied::WidthTolReached,
                stencil             : Stencil::Bracket {
                    bounds: [bracket.a(), bracket.b()],
                },
                algorithm_name      : algo_name,
            });
        }
    }

    Err(RootFindingError::MaxIterationsExceeded {
        iterations    : num_iter,
        last_estimate : bracket.midpoint(),
    }.into())
}
