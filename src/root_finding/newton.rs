//! Newton-Raphson method.

use super::algorithms::{Algorithm, OpenFamily, GLOBAL_MAX_ITER_FALLBACK};
use super::report::{RootFindingReport, TerminationReason, ToleranceSatisfied, Stencil};
use super::tolerances::DynamicTolerance;
use super::errors::{RootFindingError, ToleranceError};
use super::config::{CommonCfg, impl_common_cfg};
use super::derivative::DerivativeOracle;
use thiserror::Error;


#[derive(Debug, Error)]
pub enum NewtonError {
    #[error(transparent)]
    RootFinding(#[from] RootFindingError),

    #[error(transparent)]
    Tolerance(#[from] ToleranceError),

    #[error("invalid initial guess: x0={x0} must be finite")]
    InvalidGuess { x0: f64 },

    #[error("invalid max step, must be > 0 or f64::INFINITY")]
    InvalidMaxStep { step: f64 },
}


/// Newton configuration.
///
/// # Fields
/// - `common`   : [`CommonCfg`] with tolerances and optional `max_iter`.
/// - `max_step` : optional limit on the absolute Newton step (default: ∞).
///
/// # Construction
/// - Use [`NewtonCfg::new`] then optional setters.
/// - Set an explicit step cap via [`NewtonCfg::set_max_step`] (must be > 0).
///
/// # Defaults
/// - If `common.max_iter` is `None`, [`newton`] resolves it using
///   [`Algorithm::default_max_iter`] for [`OpenFamily::Newton`], or
///   [`GLOBAL_MAX_ITER_FALLBACK`] if unavailable.
#[derive(Debug, Copy, Clone)]
pub struct NewtonCfg {
    common: CommonCfg,
    max_step: f64,
}
impl NewtonCfg {
    #[must_use]
    pub fn new() -> Self {
        Self {
            common: CommonCfg::new(),
            max_step: f64::INFINITY,
        }
    }
    pub fn set_max_step(mut self, v: f64) -> Result<Self, NewtonError> {
        if v <= 0.0 || v.is_nan() {
            return Err(NewtonError::InvalidMaxStep { step: v });
        }
        self.max_step = v;
        Ok(self)
    }
}
impl Default for NewtonCfg {
    fn default() -> Self { Self::new() }
}
impl_common_cfg!(NewtonCfg);


/// Finds a root of `func` using the
/// [Newton–Raphson method](https://en.wikipedia.org/wiki/Newton%27s_method).
///
/// The derivative comes from a [`DerivativeOracle`]: pass an analytic
/// derivative closure, or an adapter around an automatic-differentiation
/// engine. The solver never differentiates anything itself.
///
/// # Arguments
/// - `func`   : function whose root is sought
/// - `oracle` : derivative source for `func`
/// - `x0`     : finite initial guess
/// - `cfg`    : [`NewtonCfg`] (tolerances, optional `max_iter`/`max_step`)
///
/// # Returns
/// [`RootFindingReport`] with
/// - `root`                : approximate root
/// - `f_root`              : residual at `root`
/// - `iterations`          : iterations performed
/// - `evaluations`         : total evaluations (f and f')
/// - `termination_reason`  : why it stopped
/// - `tolerance_satisfied` : which tolerance triggered
/// - `stencil`             : previous iterate used to form the step
/// - `algorithm_name`      : "newton"
///
/// # Errors
/// - [`NewtonError::InvalidGuess`]   : `x0` non-finite
/// - [`NewtonError::InvalidMaxStep`] : `max_step <= 0` or NaN
///
/// * Propagated via [`NewtonError::RootFinding`]
/// - [`RootFindingError::NonFiniteValue`]        : `f(x)` or `f'(x)` NaN/inf
/// - [`RootFindingError::DerivativeTooSmall`]    : `f'(x)` underflowed
///   toward zero, making `-f/f'` non-finite
/// - [`RootFindingError::MaxIterationsExceeded`] : no stop rule met within
///   the cap (the outcome for cycling or overshooting iterates)
/// - [`RootFindingError::InvalidMaxIter`]        : `max_iter = 0`
///
/// * Propagated via [`NewtonError::Tolerance`]
/// - [`ToleranceError::InvalidAbsFx`] / [`ToleranceError::InvalidAbsX`] /
///   [`ToleranceError::InvalidRelX`] / [`ToleranceError::InvalidAbsRelX`]
///
/// # Behavior
/// - Update: `x' = x - f(x)/f'(x)`, clipped to `max_step` if set.
/// - Stops when `|f(x')| <= abs_fx` or `|x' - x|` meets the step
///   tolerance. Both criteria exist because near a double root the step
///   shrinks while the residual stays large, and a steep simple root does
///   the opposite.
/// - If `x + step == x`, returns [`TerminationReason::MachinePrecisionReached`].
///
/// # Notes
/// - Convergence is locally quadratic near a simple root. That is *local
///   only*: poor guesses or ill-behaved functions can diverge or cycle,
///   which surfaces as `MaxIterationsExceeded`, never an infinite loop.
///   For guaranteed convergence, use a bracketed method
///   ([`bisection`](crate::root_finding::bisection::bisection) or a
///   bracket-seeded [`find_zero`](crate::root_finding::find_zero::find_zero)).
pub fn newton<F, D>(
    mut func: F,
    mut oracle: D,
    x0: f64,
    cfg: NewtonCfg,
) -> Result<RootFindingReport, NewtonError>
where
    F: FnMut(f64) -> f64,
    D: DerivativeOracle,
{
    if !x0.is_finite() {
        return Err(NewtonError::InvalidGuess { x0 });
    }

    let algorithm = Algorithm::Open(OpenFamily::Newton);
    let algo_name = algorithm.algorithm_name();

    let abs_fx   = cfg.common.abs_fx();
    let abs_x    = cfg.common.abs_x();
    let rel_x    = cfg.common.rel_x();
    let max_step = cfg.max_step;

    let num_iter = match cfg.common.max_iter() {
        Some(0) => {
            return Err(RootFindingError::InvalidMaxIter { got: 0 }.into());
        }
        Some(v) => v,
        None    => algorithm
            .default_max_iter()
            .unwrap_or(GLOBAL_MAX_ITER_FALLBACK),
    };

    // track function + derivative evaluations
    let evals = std::cell::Cell::new(0usize);

    // wraps func, increments evals, enforces finiteness
    let mut eval = |x: f64| -> Result<f64, NewtonError> {
        let fx = { evals.set(evals.get() + 1); func(x) };
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
            evaluations         : evals.get(),
            termination_reason  : TerminationReason::ToleranceReached,
            tolerance_satisfied : ToleranceSatisfied::AbsFxReached,
            stencil             : Stencil::singleton(x0),
            algorithm_name      : algo_name,
        });
    }

    // main loop
    for iter in 1..=num_iter {
        let dfx = { evals.set(evals.get() + 1); oracle.slope(x) };
        if !dfx.is_finite() {
            return Err(RootFindingError::NonFiniteValue {
                x, value: dfx, last_estimate: x,
            }.into());
        }

        // raw step
        let mut step = -fx / dfx;
        if !step.is_finite() {
            return Err(RootFindingError::DerivativeTooSmall {
                x, slope: dfx, last_estimate: x,
            }.into());
        }

        // clip to max_step
        if step.abs() > max_step {
            step = step.signum() * max_step;
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
                evaluations         : evals.get(),
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
                evaluations         : evals.get(),
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
                evaluations         : evals.get(),
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
