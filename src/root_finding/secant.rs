//! Secant method.

use super::algorithms::{Algorithm, OpenFamily, GLOBAL_MAX_ITER_FALLBACK};
use super::report::{RootFindingReport, TerminationReason, ToleranceSatisfied, Stencil};
use super::tolerances::DynamicTolerance;
use super::errors::{RootFindingError, ToleranceError};
use super::config::{CommonCfg, impl_common_cfg};
use thiserror::Error;


#[derive(Debug, Error)]
pub enum SecantError {
    #[error(transparent)]
    RootFinding(#[from] RootFindingError),

    #[error(transparent)]
    Tolerance(#[from] ToleranceError),

    #[error("invalid initial guesses: x0={x0} and x1={x1} must be finite and distinct")]
    InvalidGuess { x0: f64, x1: f64 },
}


/// Secant configuration.
///
/// # Fields
/// - `common` : [`CommonCfg`] with tolerances and optional `max_iter`.
///
/// # Construction
/// - Use [`SecantCfg::new`] then optional setters.
///
/// # Defaults
/// - If `common.max_iter` is `None`, [`secant`] resolves it using
///   [`Algorithm::default_max_iter`] for [`OpenFamily::Secant`], or
///   [`GLOBAL_MAX_ITER_FALLBACK`] if unavailable.
#[derive(Debug, Copy, Clone)]
pub struct SecantCfg {
    common: CommonCfg,
}
impl SecantCfg {
    #[must_use]
    pub fn new() -> Self {
        Self {
            common: CommonCfg::new(),
        }
    }
}
impl Default for SecantCfg {
    fn default() -> Self { Self::new() }
}
impl_common_cfg!(SecantCfg);


/// Secant x-intercept for the line through `(x_prev, f_prev)` and
/// `(x_curr, f_curr)`, in update form
/// `x_curr - f_curr * (x_curr - x_prev) / (f_curr - f_prev)`.
///
/// A degenerate denominator (`f_curr == f_prev`, or close enough that the
/// quotient overflows) makes the result non-finite; callers decide whether
/// that is a failure (plain [`secant`]) or a cue to substitute a safe step
/// (the hybrid solver).
#[inline]
pub(crate) fn secant_x_intercept(
    (x_prev, f_prev): (f64, f64),
    (x_curr, f_curr): (f64, f64),
) -> f64 {
    x_curr - f_curr * (x_curr - x_prev) / (f_curr - f_prev)
}


/// Effective step tolerance over the two iterates feeding the update.
#[inline]
fn step_tolerance(
    x1: f64,
    x2: f64,
    abs_x: f64,
    rel_x: f64,
    algorithm: Algorithm,
) -> Result<f64, ToleranceError> {
    algorithm.calculate_tolerance(
        &DynamicTolerance::step_two_scalars(x1, x2),
        abs_x,
        rel_x,
    )
}


/// Finds a root of a function using the
/// [secant method](https://en.wikipedia.org/wiki/Secant_method).
///
/// # Arguments
/// - `func` : function whose root is sought
/// - `x0`   : first initial guess; finite, distinct from `x1`
/// - `x1`   : second initial guess; finite, distinct from `x0`
/// - `cfg`  : [`SecantCfg`] (tolerances, optional `max_iter`)
///
/// # Returns
/// [`RootFindingReport`] with
/// - `root`                : approximate root
/// - `f_root`              : residual at `root`
/// - `iterations`          : iterations performed
/// - `evaluations`         : total function evaluations
/// - `termination_reason`  : why it stopped
/// - `tolerance_satisfied` : which tolerance triggered
/// - `stencil`             : the two iterates that formed the last step
/// - `algorithm_name`      : "secant"
///
/// # Errors
/// - [`SecantError::InvalidGuess`] : `x0`/`x1` NaN/inf or equal
///
/// * Propagated via [`SecantError::RootFinding`]
/// - [`RootFindingError::NonFiniteValue`]        : `f(x)` produced NaN/inf,
///   or `f(x_curr) == f(x_prev)` made the secant step non-finite
/// - [`RootFindingError::MaxIterationsExceeded`] : no stop rule met
/// - [`RootFindingError::InvalidMaxIter`]        : `max_iter = 0`
///
/// * Propagated via [`SecantError::Tolerance`]
/// - [`ToleranceError::InvalidAbsFx`] / [`ToleranceError::InvalidAbsX`] /
///   [`ToleranceError::InvalidRelX`] / [`ToleranceError::InvalidAbsRelX`]
///
/// # Behavior
/// - Update:
///   `x_{k+1} = x_k - f(x_k) * (x_k - x_{k-1}) / (f(x_k) - f(x_{k-1}))`
/// - A flat chord (`f(x_k) == f(x_{k-1})`) fails fast with
///   `NonFiniteValue`; there is no silent fallback here. Recovery by
///   substitution of a bisection step is the job of the hybrid
///   [`find_zero`](crate::root_finding::find_zero::find_zero).
///
/// # Notes
/// - Convergence is superlinear (~1.618) near a simple root but requires
///   two distinct starting guesses and can diverge from poor ones.
pub fn secant<F>(
    mut func: F,
    x0: f64,
    x1: f64,
    cfg: SecantCfg,
) -> Result<RootFindingReport, SecantError>
where
    F: FnMut(f64) -> f64,
{
    if !(x0.is_finite() && x1.is_finite()) || x0 == x1 {
        return Err(SecantError::InvalidGuess { x0, x1 });
    }

    let algorithm = Algorithm::Open(OpenFamily::Secant);
    let algo_name = algorithm.algorithm_name();

    let abs_fx = cfg.common.abs_fx();
    let abs_x  = cfg.common.abs_x();
    let rel_x  = cfg.common.rel_x();

    let num_iter = match cfg.common.max_iter() {
        // already validated via building config; redundant guard
        Some(0) => return Err(RootFindingError::InvalidMaxIter { got: 0 }.into()),

        Some(v) => v,
        None    => algorithm.default_max_iter().unwrap_or(GLOBAL_MAX_ITER_FALLBACK),
    };

    // track function evaluations
    let mut evals = 0;

    // wraps func, increments evals, enforces finiteness
    let mut eval = |x: f64| -> Result<f64, SecantError> {
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
    // early exit: x1 is root
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

    // step tolerance already satisfied
    let mut step_tol = step_tolerance(x0, x1, abs_x, rel_x, algorithm)?;
    if (x1 - x0).abs() <= step_tol {
        return Ok(RootFindingReport {
            root                : x1,
            f_root              : fx1,
            iterations          : 0,
            evaluations         : evals,
            termination_reason  : TerminationReason::ToleranceReached,
            tolerance_satisfied : ToleranceSatisfied::StepSizeReached,
            stencil             : Stencil::doubleton(x0, x1),
            algorithm_name      : algo_name,
        });
    }

    // main loop
    let mut x_prev = x0;
    let mut f_prev = fx0;
    let mut x_curr = x1;
    let mut f_curr = fx1;
    for iter in 1..=num_iter {
        let x_next = secant_x_intercept((x_prev, f_prev), (x_curr, f_curr));
        if !x_next.is_finite() {
            return Err(RootFindingError::NonFiniteValue {
                x: x_curr, value: x_next, last_estimate: x_curr,
            }.into());
        }
        let f_next = eval(x_next)?;

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

        // check step tolerance
        step_tol = step_tolerance(x_next, x_curr, abs_x, rel_x, algorithm)?;
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
