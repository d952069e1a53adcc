//! tests for the bisection root finding algorithm
use zerofind::root_finding::bisection::{bisection, BisectionCfg, BisectionError};
use zerofind::root_finding::errors::RootFindingError;
use zerofind::root_finding::report::{TerminationReason, ToleranceSatisfied};

type TestResult = Result<(), BisectionError>;

#[test]
fn finds_sqrt_2() -> TestResult {
    let f   = |x: f64| x * x - 2.0;
    let tol = 1e-10;

    let cfg = BisectionCfg::new()
        .set_abs_fx(tol)?
        .set_abs_x(tol)?
        .set_max_iter(60)?;

    let res = bisection(f, 0.0, 2.0, cfg)?;

    assert_eq!(res.termination_reason, TerminationReason::ToleranceReached);
    assert!((res.root - 2.0_f64.sqrt()).abs() <= tol);
    assert!(res.iterations > 0);
    assert_eq!(res.algorithm_name, "bisection");
    Ok(())
}

#[test]
fn finds_3() -> TestResult {
    let f   = |x: f64| 2.0 * x - 6.0;
    let tol = 1e-10;

    let cfg = BisectionCfg::new()
        .set_abs_fx(tol)?
        .set_abs_x(tol)?
        .set_max_iter(60)?;

    let res = bisection(f, 0.0, 10.0, cfg)?;

    assert_eq!(res.termination_reason, TerminationReason::ToleranceReached);
    assert!((res.root - 3.0).abs() <= tol);
    assert!(res.iterations > 0);
    Ok(())
}

#[test]
fn finds_negative_5() -> TestResult {
    let f   = |x: f64| x + 5.0;
    let tol = 1e-10;

    let cfg = BisectionCfg::new()
        .set_abs_fx(tol)?
        .set_abs_x(tol)?
        .set_max_iter(60)?;

    let res = bisection(f, -10.0, 0.0, cfg)?;

    assert_eq!(res.termination_reason, TerminationReason::ToleranceReached);
    assert!((res.root + 5.0).abs() <= tol);
    Ok(())
}

#[test]
fn no_sign_change() -> TestResult {
    let f   = |x: f64| x * x + 1.0;
    let cfg = BisectionCfg::new().set_abs_fx(1e-10)?;
    let err = bisection(f, -1.0, 1.0, cfg).unwrap_err();

    assert!(matches!(
        err,
        BisectionError::RootFinding(RootFindingError::NotBracketing { a: -1.0, b: 1.0 })
    ));
    Ok(())
}

#[test]
fn non_finite_eval() -> TestResult {
    let f   = |x: f64| x.sqrt() - 2.0;
    let cfg = BisectionCfg::new().set_abs_fx(1e-10)?;
    let err = bisection(f, -1.0, 5.0, cfg).unwrap_err();

    assert!(matches!(
        err,
        BisectionError::RootFinding(RootFindingError::NonFiniteValue { x, value, .. })
        if x == -1.0 && value.is_nan()
    ));
    Ok(())
}

#[test]
fn detects_invalid_bounds() -> TestResult {
    let f   = |x: f64| x;
    let cfg = BisectionCfg::new();
    let err = bisection(f, 2.0, 0.0, cfg).unwrap_err();
    assert!(matches!(err, BisectionError::InvalidBounds { a: _, b: _ }));

    let err = bisection(f, f64::NAN, 1.0, cfg).unwrap_err();
    assert!(matches!(err, BisectionError::InvalidBounds { a: _, b: _ }));
    Ok(())
}

#[test]
fn endpoint_a_is_root_iterations_0() -> TestResult {
    let f   = |x: f64| x;
    let cfg = BisectionCfg::new().set_abs_fx(1e-10)?;
    let res = bisection(f, 0.0, 5.0, cfg)?;

    assert_eq!(res.iterations, 0);
    assert_eq!(res.tolerance_satisfied, ToleranceSatisfied::AbsFxReached);
    assert_eq!(res.root, 0.0);
    Ok(())
}

#[test]
fn exceeds_max_iter() -> TestResult {
    let f     = |x: f64| x;
    let niter = 10;

    let cfg = BisectionCfg::new()
        .set_abs_fx(1e-300)?
        .set_rel_x(1e-12)?
        .set_abs_x(0.0)?
        .set_max_iter(niter)?;

    let err = bisection(f, -3.0, 2.0, cfg).unwrap_err();

    assert!(matches!(
        err,
        BisectionError::RootFinding(RootFindingError::MaxIterationsExceeded {
            iterations, ..
        })
        if iterations == niter
    ));
    Ok(())
}

#[test]
fn discontinuity_stops_at_machine_precision() -> TestResult {
    // sign flip at pi with |f| bounded away from zero: no tolerance can
    // trigger, the bracket must collapse to adjacent representable values
    let pi = std::f64::consts::PI;
    let f  = move |x: f64| if x < pi { -1.0 } else { 1.0 };

    let cfg = BisectionCfg::new()
        .set_abs_fx(1e-300)?
        .set_abs_x(5e-324)?;

    let res = bisection(f, 3.0, 4.0, cfg)?;

    assert_eq!(res.termination_reason, TerminationReason::MachinePrecisionReached);
    assert_eq!(res.tolerance_satisfied, ToleranceSatisfied::ToleranceNotReached);
    assert!((res.root - pi).abs() < 1e-15);
    Ok(())
}

#[test]
fn unbounded_interval_converges() -> TestResult {
    let f   = |x: f64| x.tanh() - 0.5;
    let cfg = BisectionCfg::new().set_abs_fx(1e-12)?;

    let res = bisection(f, f64::NEG_INFINITY, f64::INFINITY, cfg)?;

    assert_eq!(res.termination_reason, TerminationReason::ToleranceReached);
    assert!((res.root - 0.5_f64.atanh()).abs() <= 1e-9);
    Ok(())
}

#[test]
fn identical_inputs_give_bit_identical_results() -> TestResult {
    let f   = |x: f64| x.cos() - x;
    let cfg = BisectionCfg::new().set_abs_fx(1e-13)?;

    let res1 = bisection(f, 0.0, 1.0, cfg)?;
    let res2 = bisection(f, 0.0, 1.0, cfg)?;

    assert_eq!(res1.root.to_bits(), res2.root.to_bits());
    assert_eq!(res1.f_root.to_bits(), res2.f_root.to_bits());
    assert_eq!(res1.iterations, res2.iterations);
    assert_eq!(res1.evaluations, res2.evaluations);
    Ok(())
}
