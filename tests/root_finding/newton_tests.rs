//! tests for the newton root finding algorithm
use zerofind::root_finding::newton::{newton, NewtonCfg, NewtonError};
use zerofind::root_finding::errors::RootFindingError;
use zerofind::root_finding::report::{TerminationReason, ToleranceSatisfied};

type TestResult = Result<(), NewtonError>;

#[test]
fn finds_sqrt_2_with_analytic_derivative() -> TestResult {
    let f  = |x: f64| x * x - 2.0;
    let df = |x: f64| 2.0 * x;
    let tol = 1e-12;

    let cfg = NewtonCfg::new()
        .set_abs_fx(tol)?
        .set_max_iter(50)?;

    let res = newton(f, df, 1.0, cfg)?;

    assert_eq!(res.termination_reason, TerminationReason::ToleranceReached);
    assert_eq!(res.tolerance_satisfied, ToleranceSatisfied::AbsFxReached);
    assert!((res.root - 2.0_f64.sqrt()).abs() <= tol);
    assert!(res.iterations > 0);
    assert_eq!(res.algorithm_name, "newton");
    Ok(())
}

#[test]
fn quadratic_convergence_on_cubic() -> TestResult {
    // classic Newton example: x^3 - 2x - 5 from x0 = 2 reaches the root
    // near 2.0945514815423265 within a handful of iterations
    let f  = |x: f64| x * x * x - 2.0 * x - 5.0;
    let df = |x: f64| 3.0 * x * x - 2.0;

    let cfg = NewtonCfg::new().set_abs_fx(1e-13)?;
    let res = newton(f, df, 2.0, cfg)?;

    assert!((res.root - 2.094_551_481_542_326_5).abs() <= 1e-12);
    assert!(res.iterations <= 8);
    Ok(())
}

#[test]
fn early_abs_fx_exit_at_x0() -> TestResult {
    let f  = |x: f64| x;
    let df = |_x: f64| 1.0;

    let cfg = NewtonCfg::new().set_abs_fx(1e-20)?;
    let res = newton(f, df, 0.0, cfg)?;

    assert_eq!(res.iterations, 0);
    assert_eq!(res.tolerance_satisfied, ToleranceSatisfied::AbsFxReached);
    Ok(())
}

#[test]
fn vanishing_derivative_fails() -> TestResult {
    let f  = |x: f64| x * x + 1.0;
    let df = |x: f64| 2.0 * x;

    let cfg = NewtonCfg::new();
    let err = newton(f, df, 0.0, cfg).unwrap_err();

    assert!(matches!(
        err,
        NewtonError::RootFinding(RootFindingError::DerivativeTooSmall {
            x: 0.0, slope: 0.0, ..
        })
    ));
    Ok(())
}

#[test]
fn non_finite_derivative_fails() -> TestResult {
    let f  = |x: f64| x - 1.0;
    let df = |_x: f64| f64::NAN;

    let cfg = NewtonCfg::new();
    let err = newton(f, df, 5.0, cfg).unwrap_err();

    assert!(matches!(
        err,
        NewtonError::RootFinding(RootFindingError::NonFiniteValue { value, .. })
        if value.is_nan()
    ));
    Ok(())
}

#[test]
fn non_finite_function_fails() -> TestResult {
    let f  = |x: f64| x.ln() - 1.0;
    let df = |x: f64| 1.0 / x;

    let cfg = NewtonCfg::new();
    let err = newton(f, df, -2.0, cfg).unwrap_err();

    assert!(matches!(
        err,
        NewtonError::RootFinding(RootFindingError::NonFiniteValue { x: -2.0, .. })
    ));
    Ok(())
}

#[test]
fn cbrt_cycle_reports_max_iterations() -> TestResult {
    // f(x) = cbrt(x) has unbounded f'' at the root: the Newton update is
    // x' = -2x, which diverges from any nonzero guess. Must surface as an
    // iteration-cap failure, never a false convergence.
    let f  = |x: f64| x.cbrt();
    let df = |x: f64| {
        let c = x.cbrt();
        1.0 / (3.0 * c * c)
    };

    let cfg = NewtonCfg::new();
    let err = newton(f, df, 2.0, cfg).unwrap_err();

    match err {
        NewtonError::RootFinding(
            inner @ RootFindingError::MaxIterationsExceeded { iterations, .. },
        ) => {
            assert_eq!(iterations, 100);
            assert!(inner.last_estimate().is_some());
        }
        other => panic!("expected MaxIterationsExceeded, got {other:?}"),
    }
    Ok(())
}

#[test]
fn invalid_guess() -> TestResult {
    let f  = |x: f64| x;
    let df = |_x: f64| 1.0;

    let cfg = NewtonCfg::new();
    let err = newton(f, df, f64::NAN, cfg).unwrap_err();
    assert!(matches!(err, NewtonError::InvalidGuess { .. }));
    Ok(())
}

#[test]
fn max_step_clipping_still_converges() -> TestResult {
    let f  = |x: f64| x * x - 2.0;
    let df = |x: f64| 2.0 * x;

    let cfg = NewtonCfg::new()
        .set_abs_fx(1e-12)?
        .set_max_step(0.5)?;

    let res = newton(f, df, 10.0, cfg)?;

    assert!((res.root - 2.0_f64.sqrt()).abs() <= 1e-10);
    // clipped walk from x0 = 10 needs many more steps than plain Newton
    assert!(res.iterations >= 10);
    Ok(())
}

#[test]
fn rejects_invalid_max_step() {
    let cfg = NewtonCfg::new().set_max_step(0.0);
    assert!(matches!(cfg, Err(NewtonError::InvalidMaxStep { .. })));
}

#[test]
fn identical_inputs_give_bit_identical_results() -> TestResult {
    let f  = |x: f64| x.cos() - x * x * x;
    let df = |x: f64| -x.sin() - 3.0 * x * x;

    let cfg = NewtonCfg::new().set_abs_fx(1e-13)?;
    let res1 = newton(f, df, 0.5, cfg)?;
    let res2 = newton(f, df, 0.5, cfg)?;

    assert_eq!(res1.root.to_bits(), res2.root.to_bits());
    assert_eq!(res1.iterations, res2.iterations);
    Ok(())
}
