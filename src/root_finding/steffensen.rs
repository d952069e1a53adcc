//! Steffensen's method.

use super::algorithms::{Algorithm, OpenFamily, GLOBAL_MAX_ITER_FALLBACK};
use super::report::{RootFindingReport, TerminationReason, ToleranceSatisfied, Stencil};
use super::tolerances::DynamicTolerance;
use super::errors::{RootFindingError, ToleranceError};
use super::config::{CommonCfg, impl_common_cfg};
use thiserror::Error;


#[derive(Debug, Error)]
pub enum SteffensenError {
    #[error(transparent)]
    RootFinding(#[from] RootFindingError),

    #[error(transparent)]
    Tolerance(#[from] ToleranceError),

    #[error("invalid initial guess: x0={x0} must be finite")]
    InvalidGuess { x0: f64 },
}


/// Steffensen configuration.
///
/// # Fields
/// - `common` : [`CommonCfg`] with tolerances and optional `max_iter`.
///
/// # Construction
/// - Use [`SteffensenCfg::new`] then optional setters.
///
/// # Defaults
/// - If `common.max_iter` is `None`, [`steffensen`] resolves it using
///   [`Algorithm::default_max_iter`] for [`OpenFamily::Steffensen`], or
///   [`GLOBAL_MAX_ITER_FALLBACK`] if unavailable.
#[derive(Debug, Copy, Clone)]
pub struct SteffensenCfg {
    common: CommonCfg,
}
impl SteffensenCfg {
    #[must_use]
    pub fn new() -> Self {
        Self {
            common: CommonCfg::new(),
        }
    }
}
impl Default for SteffensenCfg {
    fn default() -> Self { Self::new() }
}
impl_common_cfg!(SteffensenCfg);


/// Finds a root of a function using
/// [Steffensen's method](https://en.wikipedia.org/wiki/Steffensen%27s_method).
///
/// Newton-like update with the analytic derivative replaced by the divided
/// difference over `[x, x + f(x)]`:
///
/// `x_{k+1} = x_k - f(x_k)^2 / (f(x_k + f(x_k)) - f(x_k))`
///
/// # Arguments
/// - `func` : function whose root is sought
/// - `x0`   : finite initial guess
/// - `cfg`  : [`SteffensenCfg`] (tolerances, optional `max_iter`)
///
/// # Returns
/// [`RootFindingReport`] with
/// - `root`                : approximate root
/// - `f_root`              : residual at `root`
/// - `iterations`          : iterations performed
/// - `evaluations`         : total function evaluations (two per step)
/// - `termination_reason`  : why it stopped
/// - `tolerance_satisfied` : which tolerance triggered
/// - `stencil`             : previous iterate used to form the step
/// - `algorithm_name`      : "steffensen"
///
/// # Errors
/// - [`SteffensenError::InvalidGuess`] : `x0` non-finite
///
/// * Propagated via [`SteffensenError::RootFinding`]
/// - [`RootFindingError::NonFiniteValue`]        : `f` NaN/inf at `x` or at
///   the auxiliary point `x + f(x)`
/// - [`RootFindingError::DerivativeTooSmall`]    : the divided difference
///   vanished, making the step non-finite
/// - [`RootFindingError::MaxIterationsExceeded`] : no stop rule met
/// - [`RootFindingError::InvalidMaxIter`]        : `max_iter = 0`
///
/// * Propagated via [`SteffensenError::Tolerance`]
/// - [`ToleranceError::InvalidAbsFx`] / [`ToleranceError::InvalidAbsX`] /
///   [`ToleranceError::InvalidRelX`] / [`ToleranceError::InvalidAbsRelX`]
///
/// # Notes
/// - Near a simple root the divided difference tracks `f'` and the method
///   recovers near-quadratic convergence without a derivative.
/// - Far from the root, `|f(x)|` is large and the auxiliary point
///   `x + f(x)` lands far away; the slope estimate degrades and progress
///   can stall, surfacing as `MaxIterationsExceeded`. Start close, or use
///   the hybrid [`find_zero`](crate::root_finding::find_zero::find_zero).
pub fn steffensen<F>(
    mut func: F,
    x0: f64,
    cfg: SteffensenCfg,
) -> Result<RootFindingReport, SteffensenError>
where
    F: FnMut(f64) -> f64,
{
    if !x0.is_finite() {
        return Err(SteffensenError::InvalidGuess { x0 });
    }

    let algorithm = Algorithm::Open(OpenFamily::Steffensen);
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
    let mut eval = |x: f64| -> Result<f64, SteffensenError> {
        let fx = { evals += 1; func(x) };
        if !fx.is_finite() {
            return Err(RootFindingError::NonFiniteValue {
                x, value: fx, last_estimate: x,
            }.into());
        }

        Ok(fx)
    };

    // early exit: x0 is root
    let mut x  = x0;
    let mut fx = eval(x)?;
    if fx.abs() <= abs_fx {
        return Ok(RootFindingReport {
            root                : x0,
            f_root              : fx,
            iterations          : 0,
            evaluations         : evals,
            termination_reason  : TerminationReason::ToleranceReached,
            tolerance_satisfied : ToleranceSatisfied::AbsFxReached,
            stencil             : Stencil::singleton(x0),
            algorithm_name      : algo_name,
        });
    }

    // main loop
    for iter in 1..=num_iter {
        // divided difference over [x, x + f(x)]
        let aux   = x + fx;
        if !aux.is_finite() {
            return Err(RootFindingError::NonFiniteValue {
                x, value: aux, last_estimate: x,
            }.into());
        }
        let f_aux = eval(aux)?;
        let slope = (f_aux - fx) / fx;

        let step = -fx / slope;
        if !step.is_finite() {
            return Err(RootFindingError::DerivativeTooSmall {
                x, slope, last_estimate: x,
            }.into());
        }

        let x_next = x + step;
        if !x_next.is_finite() {
            return Err(RootFindingError::NonFiniteValue {
                x, value: x_next, last_estimate: x,
            }.into());
        }

        // machine stagnation
        if x_next == x {
            return Ok(RootFindingReport {
                root                : x,
                f_root              : fx,
                iterations          : iter,
                evaluations         : evals,
                termination_reason  : TerminationReason::MachinePrecisionReached,
                tolerance_satisfied : ToleranceSatisfied::StepSizeReached,
                stencil             : Stencil::singleton(x),
                algorithm_name      : algo_name,
            });
        }

        // check |f(x)| tolerance
        let fx_next = eval(x_next)?;
        if fx_next.abs() <= abs_fx {
            return Ok(RootFindingReport {
                root                : x_next,
                f_root              : fx_next,
                iterations          : iter,
                evaluations         : evals,
                termination_reason  : TerminationReason::ToleranceReached,
                tolerance_satisfied : ToleranceSatisfied::AbsFxReached,
                stencil             : Stencil::singleton(x),
                algorithm_name      : algo_name,
            });
        }

        // check step tolerance
        let step_tol = algorithm.calculate_tolerance(
            &DynamicTolerance::step_two_scalars(x, x_next),
            abs_x,
            rel_x,
        )?;
        if (x_next - x).abs() <= step_tol {
            return Ok(RootFindingReport {
                root                : x_next,
                f_root              : fx_next,
                iterations          : iter,
                evaluations         : evals,
                termination_reason  : TerminationReason::ToleranceReached,
                tolerance_satisfied : ToleranceSatisfied::StepSizeReached,
                stencil             : Stencil::singleton(x),
                algorithm_name      : algo_name,
            });
        }

        x  = x_next;
        fx = fx_next;
    }

    Err(RootFindingError::MaxIterationsExceeded {
        iterations    : num_iter,
        last_estimate : x,
    }.into())
}
