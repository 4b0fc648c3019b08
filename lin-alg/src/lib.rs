#[macro_use]
extern crate log;

use common::Result;

mod exact_interpolation;
mod matrix;
mod tikhonov_regularization;

pub use exact_interpolation::ExactInterpolation;
pub use matrix::{Distribution, Matrix, SINGULAR_RCOND};
pub use tikhonov_regularization::TikhonovRegularization;

/// Generic way of solving for the output weights of a network
pub trait WeightSolver: Clone {
    /// Solve for the weights mapping activations to targets
    ///
    /// # Parameters
    /// activations: Kernel activations, one row per template and one column per center
    /// targets: Target data having one row per template
    fn solve(&self, activations: &Matrix, targets: &Matrix) -> Result<Matrix>;
}
