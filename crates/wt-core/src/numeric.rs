//! Float helpers: tolerance comparison and range guards.

use crate::WtError;

pub type Real = f64;

/// Absolute and relative tolerance pair for float comparisons.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

impl Tolerances {
    /// Tolerance used when checking stream mass closure (kg/s).
    pub fn conservation() -> Self {
        Self {
            abs: 1e-6,
            rel: 1e-9,
        }
    }
}

/// `|a - b| <= abs`, or within `rel` of the larger magnitude.
pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    diff <= tol.abs || diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, WtError> {
    if !v.is_finite() {
        return Err(WtError::NonFinite { what, value: v });
    }
    Ok(v)
}

/// Accept only finite values in the closed unit interval.
pub fn ensure_fraction(v: Real, what: &'static str) -> Result<Real, WtError> {
    let v = ensure_finite(v, what)?;
    if (0.0..=1.0).contains(&v) {
        Ok(v)
    } else {
        Err(WtError::OutOfRange {
            what,
            value: v,
            range: "[0, 1]",
        })
    }
}

pub fn ensure_non_negative(v: Real, what: &'static str) -> Result<Real, WtError> {
    let v = ensure_finite(v, what)?;
    if v >= 0.0 {
        Ok(v)
    } else {
        Err(WtError::OutOfRange {
            what,
            value: v,
            range: "[0, inf)",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closure_tolerance_absorbs_rounding() {
        let tol = Tolerances::conservation();
        assert!(nearly_equal(10_006.0, 8_500.62 + 1_505.38, tol));
        assert!(!nearly_equal(10_006.0, 10_005.9, tol));
    }

    #[test]
    fn relative_branch_scales_with_magnitude() {
        let tol = Tolerances { abs: 0.0, rel: 1e-5 };
        assert!(nearly_equal(8333.4153, 8333.42, tol));
        assert!(!nearly_equal(1.0, 1.001, tol));
        assert!(nearly_equal(0.0, 0.0, tol));
    }

    #[test]
    fn non_finite_is_rejected() {
        let err = ensure_finite(Real::NAN, "recovery").unwrap_err();
        assert!(matches!(err, WtError::NonFinite { what: "recovery", .. }));
        assert_eq!(ensure_finite(2.5, "x").unwrap(), 2.5);
    }

    #[test]
    fn fraction_bounds_are_inclusive() {
        assert_eq!(ensure_fraction(0.0, "f").unwrap(), 0.0);
        assert_eq!(ensure_fraction(1.0, "f").unwrap(), 1.0);
        assert!(ensure_fraction(1.0 + 1e-12, "f").is_err());
        assert!(ensure_fraction(-0.1, "f").is_err());
        assert!(ensure_fraction(Real::INFINITY, "f").is_err());
    }

    #[test]
    fn non_negative_rejects_negative() {
        assert!(ensure_non_negative(0.0, "e").is_ok());
        assert!(ensure_non_negative(12.5, "e").is_ok());
        let err = ensure_non_negative(-1.0, "e").unwrap_err();
        assert!(matches!(err, WtError::OutOfRange { .. }));
    }
}
