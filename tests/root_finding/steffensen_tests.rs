//! tests for the steffensen root finding algorithm
use zerofind::root_finding::steffensen::{steffensen, SteffensenCfg, SteffensenError};
use zerofind::root_finding::errors::RootFindingError;
use zerofind::root_finding::report::{TerminationReason, ToleranceSatisfied};

type TestResult = Result<(), SteffensenError>;

#[test]
fn finds_sqrt_2_without_derivative() -> TestResult {
    let f   = |x: f64| x * x - 2.0;
    let cfg = SteffensenCfg::new().set_abs_fx(1e-12)?;
    let res = steffensen(f, 1.0, cfg)?;

    assert_eq!(res.termination_reason, TerminationReason::ToleranceReached);
    assert!((res.root - 2.0_f64.sqrt()).abs() <= 1e-10);
    assert!(res.iterations > 0);
    // two evaluations per step plus the initial residual
    assert!(res.evaluations >= 2 * res.iterations + 1);
    assert_eq!(res.algorithm_name, "steffensen");
    Ok(())
}

#[test]
fn early_abs_fx_exit_at_guess() -> TestResult {
    let f   = |x: f64| x.sin();
    let cfg = SteffensenCfg::new().set_abs_fx(1e-10)?;
    let res = steffensen(f, 0.0, cfg)?;

    assert_eq!(res.iterations, 0);
    assert_eq!(res.evaluations, 1);
    assert_eq!(res.tolerance_satisfied, ToleranceSatisfied::AbsFxReached);
    Ok(())
}

#[test]
fn stalls_far_from_root() -> TestResult {
    // |f(x0)| large places the auxiliary point x + f(x) far away; the slope
    // estimate degrades and progress is O(1) per step
    let f   = |x: f64| x * x - 2.0;
    let cfg = SteffensenCfg::new();
    let err = steffensen(f, 1000.0, cfg).unwrap_err();

    assert!(matches!(
        err,
        SteffensenError::RootFinding(RootFindingError::MaxIterationsExceeded {
            iterations: 100, ..
        })
    ));
    Ok(())
}

#[test]
fn constant_function_reports_flat_slope() -> TestResult {
    let f   = |_x: f64| 5.0;
    let cfg = SteffensenCfg::new();
    let err = steffensen(f, 1.0, cfg).unwrap_err();

    assert!(matches!(
        err,
        SteffensenError::RootFinding(RootFindingError::DerivativeTooSmall {
            x: 1.0, slope: 0.0, last_estimate: 1.0,
        })
    ));
    Ok(())
}

#[test]
fn non_finite_eval_at_auxiliary_point() -> TestResult {
    // finite at x0 = 3.5 but NaN at the auxiliary point x0 + f(x0) < 0
    let f   = |x: f64| x.sqrt() - 6.0;
    let cfg = SteffensenCfg::new();
    let err = steffensen(f, 3.5, cfg).unwrap_err();

    assert!(matches!(
        err,
        SteffensenError::RootFinding(RootFindingError::NonFiniteValue { value, .. })
        if value.is_nan()
    ));
    Ok(())
}

#[test]
fn invalid_guess() {
    let f   = |x: f64| x;
    let err = steffensen(f, f64::NAN, SteffensenCfg::new()).unwrap_err();
    assert!(matches!(err, SteffensenError::InvalidGuess { .. }));
}

#[test]
fn identical_inputs_give_bit_identical_results() -> TestResult {
    let f   = |x: f64| x.cos() - x;
    let cfg = SteffensenCfg::new().set_abs_fx(1e-13)?;

    let res1 = steffensen(f, 0.5, cfg)?;
    let res2 = steffensen(f, 0.5, cfg)?;

    assert_eq!(res1.root.to_bits(), res2.root.to_bits());
    assert_eq!(res1.iterations, res2.iterations);
    Ok(())
}
