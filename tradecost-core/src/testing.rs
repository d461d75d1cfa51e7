//! Test helpers shared by unit and integration tests.

/// Assert two price lists match within tolerance.
///
/// Finite expected values match when
/// `|actual - expected| <= absolute_tolerance + relative_tolerance * |expected|`.
/// Non-finite expected values must match exactly, with NaN equal to NaN.
/// Panics with an index/expected/actual table listing every mismatch.
pub fn assert_prices_close(
    expected: &[f64],
    actual: &[f64],
    absolute_tolerance: f64,
    relative_tolerance: f64,
) {
    assert_eq!(
        expected.len(),
        actual.len(),
        "Different lengths of lists. Expected: {}, got {}",
        expected.len(),
        actual.len()
    );

    let mismatches: Vec<String> = expected
        .iter()
        .zip(actual)
        .enumerate()
        .filter(|&(_, (&e, &a))| values_differ(e, a, absolute_tolerance, relative_tolerance))
        .map(|(i, (e, a))| format!("{i:<7}   {e:<25}   {a:<25}"))
        .collect();

    if !mismatches.is_empty() {
        panic!(
            "\n{:<7}   {:<25}   {:<25}\n{}",
            "Index",
            "Expected",
            "Actual",
            mismatches.join("\n")
        );
    }
}

fn values_differ(expected: f64, actual: f64, abs_tol: f64, rel_tol: f64) -> bool {
    if expected.is_finite() {
        !actual.is_finite() || (actual - expected).abs() > abs_tol + rel_tol * expected.abs()
    } else if expected.is_nan() {
        !actual.is_nan()
    } else {
        expected != actual
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_matches_nan() {
        assert_prices_close(&[1.0, f64::NAN], &[1.00001, f64::NAN], 1e-4, 0.0);
    }

    #[test]
    fn relative_tolerance_scales() {
        assert_prices_close(&[1000.0], &[1000.5], 0.0, 1e-3);
    }

    #[test]
    #[should_panic(expected = "Different lengths")]
    fn length_mismatch_panics() {
        assert_prices_close(&[1.0], &[], 1e-4, 0.0);
    }

    #[test]
    #[should_panic(expected = "Index")]
    fn nan_vs_number_panics() {
        assert_prices_close(&[f64::NAN], &[1.0], 1e-4, 0.0);
    }

    #[test]
    #[should_panic]
    fn infinity_must_match_sign() {
        assert_prices_close(&[f64::INFINITY], &[f64::NEG_INFINITY], 1e-4, 0.0);
    }
}
