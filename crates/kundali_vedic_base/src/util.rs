//! Shared angle utilities.

/// Normalize an angle to [0, 360) degrees.
///
/// Tiny negative inputs can round up to exactly 360.0; those fold to 0.
pub fn normalize_360(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    if r >= 360.0 { 0.0 } else { r }
}

/// Shortest angular distance between two longitudes, in [0, 180].
pub fn angular_separation(a: f64, b: f64) -> f64 {
    let d = (normalize_360(a) - normalize_360(b)).abs();
    if d > 180.0 { 360.0 - d } else { d }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_zero() {
        assert!((normalize_360(0.0) - 0.0).abs() < 1e-15);
    }

    #[test]
    fn normalize_360_wraps() {
        assert!((normalize_360(360.0) - 0.0).abs() < 1e-15);
    }

    #[test]
    fn normalize_negative() {
        assert!((normalize_360(-10.0) - 350.0).abs() < 1e-15);
    }

    #[test]
    fn normalize_large() {
        assert!((normalize_360(730.0) - 10.0).abs() < 1e-10);
    }

    #[test]
    fn normalize_large_negative() {
        assert!((normalize_360(-370.0) - 350.0).abs() < 1e-10);
    }

    #[test]
    fn normalize_tiny_negative_stays_in_range() {
        let r = normalize_360(-1e-15);
        assert!((0.0..360.0).contains(&r), "{r}");
    }

    #[test]
    fn normalize_idempotent() {
        for &x in &[-1e6, -720.5, -0.25, 0.0, 13.3, 359.999_999, 360.0, 1e7 + 0.3] {
            let once = normalize_360(x);
            assert!((0.0..360.0).contains(&once), "{x} -> {once}");
            assert_eq!(normalize_360(once), once);
        }
    }

    #[test]
    fn separation_wraps() {
        assert!((angular_separation(350.0, 10.0) - 20.0).abs() < 1e-12);
        assert!((angular_separation(0.0, 183.0) - 177.0).abs() < 1e-12);
        assert!((angular_separation(-90.0, 90.0) - 180.0).abs() < 1e-12);
    }
}
