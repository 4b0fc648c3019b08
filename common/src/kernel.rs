use crate::{Error, Result};

/// Squared euclidean distance between two equally long vectors
pub fn squared_distance(a: &[f64], b: &[f64]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(Error::dimension_mismatch("squared_distance", a.len(), b.len()));
    }

    Ok(a.iter().zip(b).map(|(x, c)| (x - c).powi(2)).sum())
}

/// The gaussian radial basis function `exp(-|x - c|^2 / width^2)`
///
/// # Arguments:
/// input: The vector to evaluate the kernel at
/// center: The center of the kernel, must have the same length as `input`
/// width: The activation window width, finite and positive
pub fn gaussian(input: &[f64], center: &[f64], width: f64) -> Result<f64> {
    if !(width.is_finite() && width > 0.0) {
        return Err(Error::InvalidParameter(format!("kernel width {} must be finite and > 0", width)));
    }
    if input.len() != center.len() {
        return Err(Error::dimension_mismatch("gaussian kernel", center.len(), input.len()));
    }
    let distance = squared_distance(input, center)?;

    Ok((-distance / width.powi(2)).exp())
}

#[cfg(test)]
mod tests {
    use round::round;

    use super::*;

    #[test]
    fn gaussian_at_center_is_one() {
        assert_eq!(gaussian(&[0.0, 0.0], &[0.0, 0.0], 1.0).unwrap(), 1.0);
    }

    #[test]
    fn gaussian_unit_distance() {
        let v = gaussian(&[1.0, 0.0], &[0.0, 0.0], 1.0).unwrap();
        assert_eq!(round(v, 4), 0.3679);
        assert!((v - (-1.0_f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn gaussian_wider_window_grows() {
        let x = [0.5, -0.25, 1.0];
        let c = [0.0, 0.0, 0.0];
        let mut last = 0.0;
        for width in [0.1, 0.5, 1.0, 2.0, 10.0] {
            let v = gaussian(&x, &c, width).unwrap();
            assert!(v > last, "width {} gave {} <= {}", width, v, last);
            last = v;
        }
    }

    #[test]
    fn gaussian_dimension_mismatch() {
        let err = gaussian(&[1.0, 2.0], &[1.0], 1.0).unwrap_err();
        assert!(matches!(err, Error::DimensionMismatch { .. }));
    }

    #[test]
    fn gaussian_rejects_degenerate_width() {
        for width in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = gaussian(&[0.0], &[0.0], width).unwrap_err();
            assert!(matches!(err, Error::InvalidParameter(_)), "width {}", width);
        }
    }

    #[test]
    fn squared_distance_sums_squares() {
        assert_eq!(squared_distance(&[1.0, 2.0, 3.0], &[0.0, 0.0, 1.0]).unwrap(), 9.0);
    }
}
