use std::{f64::consts::PI, fmt};

use common::{Error, Result};
use nalgebra::DMatrix;
use nanorand::{Rng, WyRand};

/// Matrices whose reciprocal condition number falls below this are treated as singular
pub const SINGULAR_RCOND: f64 = 1e-12;

/// The distribution to draw from when filling a matrix with random values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Distribution {
    /// Uniform in `[0, 1)`
    #[default]
    Uniform,
    /// Normal with zero mean and unit variance
    StandardNormal,
}

impl Distribution {
    fn sample(&self, rng: &mut WyRand) -> f64 {
        match self {
            Distribution::Uniform => rng.generate::<f64>(),
            Distribution::StandardNormal => {
                // Box-Muller, u1 in (0, 1] to keep the log finite
                let u1 = 1.0 - rng.generate::<f64>();
                let u2 = rng.generate::<f64>();
                (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
            }
        }
    }
}

/// Dense, fixed shape matrix of reals.
/// Construction from flat data is row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    inner: DMatrix<f64>,
}

impl Matrix {
    /// Create a matrix from row-major `data`, which must hold exactly `rows * cols` values
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(Error::dimension_mismatch(
                "Matrix::new",
                format!("{} values for {}x{}", rows * cols, rows, cols),
                format!("{} values", data.len()),
            ));
        }

        Ok(Self {
            inner: DMatrix::from_row_slice(rows, cols, &data),
        })
    }

    /// A matrix filled with zeros
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            inner: DMatrix::zeros(rows, cols),
        }
    }

    /// The `n x n` identity matrix
    pub fn identity(n: usize) -> Self {
        Self {
            inner: DMatrix::identity(n, n),
        }
    }

    /// Build a matrix by evaluating `f(row, col)` for every entry
    pub fn from_fn<F>(rows: usize, cols: usize, f: F) -> Self
    where
        F: FnMut(usize, usize) -> f64,
    {
        Self {
            inner: DMatrix::from_fn(rows, cols, f),
        }
    }

    /// Fill a matrix with independent draws from `distribution`
    ///
    /// # Arguments:
    /// seed: Optional seed for the Rng, making the draws reproducible
    pub fn randomized(
        rows: usize,
        cols: usize,
        distribution: Distribution,
        seed: Option<u64>,
    ) -> Self {
        let mut rng = match seed {
            Some(seed) => WyRand::new_seed(seed),
            None => WyRand::new(),
        };
        let data: Vec<f64> = (0..rows * cols).map(|_| distribution.sample(&mut rng)).collect();

        Self {
            inner: DMatrix::from_row_slice(rows, cols, &data),
        }
    }

    #[inline(always)]
    pub fn nrows(&self) -> usize {
        self.inner.nrows()
    }

    #[inline(always)]
    pub fn ncols(&self) -> usize {
        self.inner.ncols()
    }

    #[inline(always)]
    pub fn shape(&self) -> (usize, usize) {
        self.inner.shape()
    }

    /// The entry at `(row, col)`, if it exists
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.inner.get((row, col)).copied()
    }

    /// Copy out the `i`-th row
    pub fn row(&self, i: usize) -> Result<Vec<f64>> {
        if i >= self.nrows() {
            return Err(Error::IndexOutOfRange {
                index: i,
                len: self.nrows(),
            });
        }

        Ok(self.inner.row(i).iter().copied().collect())
    }

    /// Copy out the `j`-th column
    pub fn column(&self, j: usize) -> Result<Vec<f64>> {
        if j >= self.ncols() {
            return Err(Error::IndexOutOfRange {
                index: j,
                len: self.ncols(),
            });
        }

        Ok(self.inner.column(j).iter().copied().collect())
    }

    /// Matrix product `self * rhs`
    pub fn product(&self, rhs: &Matrix) -> Result<Matrix> {
        if self.ncols() != rhs.nrows() {
            return Err(Error::dimension_mismatch(
                "Matrix::product",
                format!("rhs with {} rows", self.ncols()),
                format!("{}x{}", rhs.nrows(), rhs.ncols()),
            ));
        }

        Ok(Matrix {
            inner: &self.inner * &rhs.inner,
        })
    }

    /// Invert a square matrix.
    /// Fails with `SingularMatrix` if the matrix is numerically rank deficient
    /// or holds non-finite entries.
    pub fn inverse(&self) -> Result<Matrix> {
        if self.nrows() != self.ncols() {
            return Err(Error::dimension_mismatch(
                "Matrix::inverse",
                "square matrix",
                format!("{}x{}", self.nrows(), self.ncols()),
            ));
        }

        if !self.is_finite() {
            return Err(Error::SingularMatrix { rcond: f64::NAN });
        }
        let rcond = self.reciprocal_condition();
        trace!("inverting {}x{} matrix, rcond: {:e}", self.nrows(), self.ncols(), rcond);
        if !rcond.is_finite() || rcond < SINGULAR_RCOND {
            return Err(Error::SingularMatrix { rcond });
        }

        let inverse = self
            .inner
            .clone()
            .try_inverse()
            .ok_or(Error::SingularMatrix { rcond })?;
        if inverse.iter().any(|v| !v.is_finite()) {
            return Err(Error::SingularMatrix { rcond });
        }

        Ok(Matrix { inner: inverse })
    }

    /// True if no entry is NaN or infinite
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.inner.iter().all(|v| v.is_finite())
    }

    /// Ratio of the smallest to the largest singular value, 0 for an empty matrix
    /// and NaN if any entry is not finite
    pub fn reciprocal_condition(&self) -> f64 {
        if self.nrows() == 0 || self.ncols() == 0 {
            return 0.0;
        }
        if !self.is_finite() {
            return f64::NAN;
        }
        let singular_values = self.inner.singular_values();
        let (min, max) = singular_values
            .iter()
            .fold((f64::INFINITY, 0.0_f64), |(min, max), s| (min.min(*s), max.max(*s)));
        if max == 0.0 {
            return 0.0;
        }

        min / max
    }

    #[inline]
    pub fn transpose(&self) -> Matrix {
        Matrix {
            inner: self.inner.transpose(),
        }
    }

    /// Borrow the underlying nalgebra matrix
    #[inline(always)]
    pub fn as_dmatrix(&self) -> &DMatrix<f64> {
        &self.inner
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}

#[cfg(test)]
mod tests {
    use round::round;

    use super::*;

    #[test]
    fn new_is_row_major() {
        let m = Matrix::new(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(m.shape(), (2, 3));
        assert_eq!(m.row(0).unwrap(), vec![1.0, 2.0, 3.0]);
        assert_eq!(m.row(1).unwrap(), vec![4.0, 5.0, 6.0]);
        assert_eq!(m.column(2).unwrap(), vec![3.0, 6.0]);
        assert_eq!(m.get(1, 0), Some(4.0));
        assert_eq!(m.get(2, 0), None);
    }

    #[test]
    fn new_rejects_wrong_length() {
        let err = Matrix::new(2, 2, vec![1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(err, Error::DimensionMismatch { .. }));
    }

    #[test]
    fn row_out_of_range() {
        let m = Matrix::zeros(2, 2);
        assert_eq!(m.row(2).unwrap_err(), Error::IndexOutOfRange { index: 2, len: 2 });
        assert_eq!(m.column(5).unwrap_err(), Error::IndexOutOfRange { index: 5, len: 2 });
    }

    #[test]
    fn product_shape_and_values() {
        let a = Matrix::new(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let b = Matrix::new(3, 1, vec![1.0, 0.0, -1.0]).unwrap();
        let c = a.product(&b).unwrap();
        assert_eq!(c.shape(), (2, 1));
        assert_eq!(c.column(0).unwrap(), vec![-2.0, -2.0]);
    }

    #[test]
    fn product_dimension_mismatch() {
        let a = Matrix::zeros(2, 3);
        let b = Matrix::zeros(2, 3);
        assert!(matches!(a.product(&b).unwrap_err(), Error::DimensionMismatch { .. }));
    }

    #[test]
    fn inverse_times_matrix_is_identity() {
        if let Err(_) = pretty_env_logger::try_init() {}

        let m = Matrix::new(3, 3, vec![4.0, 7.0, 2.0, 3.0, 6.0, 1.0, 2.0, 5.0, 3.0]).unwrap();
        let inv = m.inverse().unwrap();
        info!("m: {}, inv: {}", m, inv);

        let prod = m.product(&inv).unwrap();
        let rounded = Matrix::from_fn(3, 3, |i, j| round(prod.get(i, j).unwrap(), 9));
        assert_eq!(rounded, Matrix::identity(3));

        let id = inv.product(&m).unwrap();
        for i in 0..3 {
            for j in 0..3 {
                let goal = if i == j { 1.0 } else { 0.0 };
                assert!((id.get(i, j).unwrap() - goal).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn inverse_requires_square() {
        let m = Matrix::zeros(2, 3);
        assert!(matches!(m.inverse().unwrap_err(), Error::DimensionMismatch { .. }));
    }

    #[test]
    fn inverse_of_singular_matrix() {
        let m = Matrix::new(2, 2, vec![1.0, 2.0, 2.0, 4.0]).unwrap();
        assert!(matches!(m.inverse().unwrap_err(), Error::SingularMatrix { .. }));

        let zeros = Matrix::zeros(3, 3);
        assert_eq!(zeros.inverse().unwrap_err(), Error::SingularMatrix { rcond: 0.0 });
    }

    #[test]
    fn inverse_of_non_finite_matrix() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let m = Matrix::new(2, 2, vec![bad, 0.0, 0.0, 1.0]).unwrap();
            assert!(!m.is_finite());
            assert!(m.reciprocal_condition().is_nan());
            match m.inverse() {
                Err(Error::SingularMatrix { rcond }) => assert!(rcond.is_nan()),
                other => panic!("expected singular matrix for {}, got {:?}", bad, other),
            }
        }
    }

    #[test]
    fn randomized_uniform_range_and_seed() {
        let a = Matrix::randomized(10, 4, Distribution::Uniform, Some(0));
        let b = Matrix::randomized(10, 4, Distribution::Uniform, Some(0));
        assert_eq!(a, b);
        assert_eq!(a.shape(), (10, 4));
        assert!(a.as_dmatrix().iter().all(|v| (0.0..1.0).contains(v)));
    }

    #[test]
    fn randomized_standard_normal_moments() {
        let n = 20_000;
        let m = Matrix::randomized(n, 1, Distribution::StandardNormal, Some(42));
        let vals = m.column(0).unwrap();
        let mean = vals.iter().sum::<f64>() / n as f64;
        let var = vals.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;
        assert!(mean.abs() < 0.05, "mean: {}", mean);
        assert!((var - 1.0).abs() < 0.05, "var: {}", var);
        assert!(vals.iter().all(|v| v.is_finite()));
    }
}
