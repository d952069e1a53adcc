//! tests for the sign-change bracket type
use zerofind::root_finding::bracket::Bracket;
use zerofind::root_finding::errors::RootFindingError;

type TestResult = Result<(), RootFindingError>;

#[test]
fn orders_endpoints_on_construction() -> TestResult {
    let br = Bracket::new((2.0, 1.0), (1.0, -1.0))?;

    assert_eq!(br.a(), 1.0);
    assert_eq!(br.b(), 2.0);
    assert_eq!(br.fa(), -1.0);
    assert_eq!(br.fb(), 1.0);
    assert_eq!(br.width(), 1.0);
    Ok(())
}

#[test]
fn rejects_same_sign_values() {
    let err = Bracket::new((1.0, 2.0), (3.0, 4.0)).unwrap_err();
    assert!(matches!(err, RootFindingError::NotBracketing { a: 1.0, b: 3.0 }));
}

#[test]
fn rejects_non_finite_values() {
    let err = Bracket::new((1.0, f64::NAN), (3.0, -1.0)).unwrap_err();
    assert!(matches!(
        err,
        RootFindingError::NonFiniteValue { x, value, .. }
        if x == 1.0 && value.is_nan()
    ));

    let err = Bracket::new((1.0, 1.0), (3.0, f64::NEG_INFINITY)).unwrap_err();
    assert!(matches!(
        err,
        RootFindingError::NonFiniteValue { x, value, .. }
        if x == 3.0 && value.is_infinite()
    ));
}

#[test]
fn zero_endpoint_is_a_valid_bracket() -> TestResult {
    let br = Bracket::new((1.0, 0.0), (2.0, 5.0))?;
    assert_eq!(br.best(), (1.0, 0.0));
    Ok(())
}

#[test]
fn absorb_replaces_matching_sign_endpoint() -> TestResult {
    let mut br = Bracket::new((0.0, -2.0), (4.0, 2.0))?;

    // negative value replaces the negative endpoint
    br.absorb(2.0, -1.0);
    assert_eq!(br.a(), 2.0);
    assert_eq!(br.b(), 4.0);

    // positive value replaces the positive endpoint
    br.absorb(3.0, 1.0);
    assert_eq!(br.a(), 2.0);
    assert_eq!(br.b(), 3.0);
    Ok(())
}

#[test]
fn exact_zero_collapses_the_bracket() -> TestResult {
    let mut br = Bracket::new((0.0, -2.0), (4.0, 2.0))?;
    br.absorb(2.0, 0.0);

    assert!(br.is_exhausted());
    assert_eq!(br.width(), 0.0);
    assert_eq!(br.best(), (2.0, 0.0));
    assert_eq!(br.midpoint(), 2.0);
    Ok(())
}

#[test]
fn adjacent_endpoints_are_exhausted() -> TestResult {
    let a = 1.0_f64;
    let b = f64::from_bits(a.to_bits() + 1);

    let br = Bracket::new((a, -1.0), (b, 1.0))?;
    assert!(br.is_exhausted());

    let wide = Bracket::new((a, -1.0), (2.0, 1.0))?;
    assert!(!wide.is_exhausted());
    Ok(())
}

#[test]
fn contains_is_strict() -> TestResult {
    let br = Bracket::new((1.0, -1.0), (2.0, 1.0))?;

    assert!(br.contains(1.5));
    assert!(!br.contains(1.0));
    assert!(!br.contains(2.0));
    assert!(!br.contains(0.0));
    Ok(())
}

#[test]
fn midpoint_halves_the_interval() -> TestResult {
    let mut br = Bracket::new((0.0, -1.0), (8.0, 1.0))?;
    assert_eq!(br.midpoint(), 4.0);

    br.absorb(4.0, -0.5);
    assert_eq!(br.midpoint(), 6.0);
    Ok(())
}
