use common::{Error, Result};

use super::{Matrix, WeightSolver};

/// Tikhonov regularization aka ridge regression
/// It is particularly useful when the activation matrix is close to singular,
/// trading exact interpolation for a well conditioned solve
#[derive(Debug, Clone)]
pub struct TikhonovRegularization {
    /// Ridge parameter
    pub regularization_coeff: f64,
}

impl WeightSolver for TikhonovRegularization {
    fn solve(&self, activations: &Matrix, targets: &Matrix) -> Result<Matrix> {
        if activations.nrows() != targets.nrows() {
            return Err(Error::dimension_mismatch(
                "TikhonovRegularization::solve",
                format!("{} target rows", activations.nrows()),
                format!("{} target rows", targets.nrows()),
            ));
        }
        let n = activations.ncols();
        let design_t = activations.transpose();

        let p0 = design_t.product(activations)?;
        let reg = Matrix::from_fn(n, n, |i, j| {
            let diag = if i == j { self.regularization_coeff } else { 0.0 };
            p0.get(i, j).unwrap_or(0.0) + diag
        });
        let p1 = reg.inverse()?;
        let p2 = design_t.product(targets)?;

        p1.product(&p2)
    }
}

#[cfg(test)]
mod tests {
    use round::round;

    use super::*;

    fn rounded(m: &Matrix, digits: i32) -> Vec<f64> {
        m.column(0).unwrap().iter().map(|v| round(*v, digits)).collect()
    }

    #[test]
    fn tikhonov_regularization() {
        if let Err(_) = pretty_env_logger::try_init() {}

        // Note the first column being just ones
        let design = Matrix::new(
            4,
            3,
            vec![1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 2.0, 1.0, 1.0, 3.0, 2.0],
        )
        .unwrap();
        let targets = Matrix::new(4, 1, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        info!("design: {}, targets: {}", design, targets);

        let regressor = TikhonovRegularization {
            regularization_coeff: 0.0,
        };
        let weights = regressor.solve(&design, &targets).unwrap();
        info!("weights: {}", weights);

        assert_eq!(rounded(&weights, 1), vec![1.0, 1.0, 0.0]);
    }

    #[test]
    fn tikhonov_regularization_shifted() {
        if let Err(_) = pretty_env_logger::try_init() {}

        let design = Matrix::new(
            4,
            3,
            vec![100.0, 0.0, 0.0, 100.0, 100.0, 0.0, 100.0, 200.0, 100.0, 100.0, 300.0, 200.0],
        )
        .unwrap();
        let targets = Matrix::new(4, 1, vec![100.0, 200.0, 300.0, 400.0]).unwrap();
        info!("design: {}, targets: {}", design, targets);

        let regressor = TikhonovRegularization {
            regularization_coeff: 0.0,
        };
        let weights = regressor.solve(&design, &targets).unwrap();

        assert_eq!(rounded(&weights, 1), vec![1.0, 1.0, 0.0]);
    }

    /// A ridge term makes a singular activation matrix solvable
    #[test]
    fn tikhonov_handles_duplicate_templates() {
        let activations = Matrix::new(2, 2, vec![1.0, 1.0, 1.0, 1.0]).unwrap();
        let targets = Matrix::new(2, 1, vec![0.5, 0.5]).unwrap();
        let regressor = TikhonovRegularization {
            regularization_coeff: 1e-3,
        };
        let weights = regressor.solve(&activations, &targets).unwrap();

        let out = activations.product(&weights).unwrap();
        assert_eq!(rounded(&out, 2), vec![0.5, 0.5]);
    }

    /// Tests how to perform a readout from a single state once the weights are known
    #[test]
    fn readout_from_state() {
        let state = Matrix::new(1, 3, vec![1.0, 3.0, 2.0]).unwrap();
        let weights = Matrix::new(3, 1, vec![1.0, 1.0, 0.0]).unwrap();

        let o = state.product(&weights).unwrap();
        assert_eq!(o, Matrix::new(1, 1, vec![4.0]).unwrap());
    }
}
