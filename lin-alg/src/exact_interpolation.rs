use common::{Error, Result};

use super::{Matrix, WeightSolver};

/// Solves `A * W = Y` exactly through the inverse of the square activation matrix,
/// so the fitted network reproduces every target at its template
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactInterpolation;

impl WeightSolver for ExactInterpolation {
    fn solve(&self, activations: &Matrix, targets: &Matrix) -> Result<Matrix> {
        if activations.nrows() != targets.nrows() {
            return Err(Error::dimension_mismatch(
                "ExactInterpolation::solve",
                format!("{} target rows", activations.nrows()),
                format!("{} target rows", targets.nrows()),
            ));
        }
        let inverse = activations.inverse()?;
        debug!("activations: {}x{}, inverse ok", activations.nrows(), activations.ncols());

        inverse.product(targets)
    }
}
