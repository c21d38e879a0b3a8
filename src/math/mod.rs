/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Rotation in 3D space.
pub type Rotation3 = nalgebra::Rotation3<f64>;

/// Global tolerance for floating-point comparisons of lengths.
pub const TOLERANCE: f64 = 1e-10;

/// Returns `true` if `a` and `b` agree within [`TOLERANCE`].
#[must_use]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= TOLERANCE
}

/// Returns `true` if `values` are all positive and strictly increasing.
#[must_use]
pub fn is_strictly_ascending(values: &[f64]) -> bool {
    values.first().is_none_or(|&v| v > TOLERANCE)
        && values.windows(2).all(|w| w[1] - w[0] > TOLERANCE)
}

/// Collapses `values` into the distinct values they contain, within [`TOLERANCE`].
#[must_use]
pub fn distinct_values(values: &[f64]) -> Vec<f64> {
    let mut distinct: Vec<f64> = Vec::new();
    for &v in values {
        if !distinct.iter().any(|&d| approx_eq(d, v)) {
            distinct.push(v);
        }
    }
    distinct
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascending_rejects_non_positive_start() {
        assert!(!is_strictly_ascending(&[0.0, 1.0]));
        assert!(is_strictly_ascending(&[0.1, 0.2, 0.3]));
    }

    #[test]
    fn ascending_rejects_repeats() {
        assert!(!is_strictly_ascending(&[0.5, 0.5]));
        assert!(!is_strictly_ascending(&[0.8, 0.5]));
    }

    #[test]
    fn empty_is_ascending() {
        assert!(is_strictly_ascending(&[]));
    }

    #[test]
    fn distinct_values_dedupes_within_tolerance() {
        let d = distinct_values(&[1.0, 1.0 + 1e-12, 2.0, 1.0]);
        assert_eq!(d, vec![1.0, 2.0]);
    }
}
