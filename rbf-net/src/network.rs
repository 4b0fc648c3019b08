use common::{gaussian, Error, Result};
use lin_alg::{Matrix, WeightSolver};

use crate::{Forecaster, Params};

/// Radial basis function network fit by exact interpolation.
/// Every training template becomes a center of a gaussian neuron,
/// the output is the weighted sum of all neuron activations.
#[derive(Debug, Clone)]
pub struct RbfNetwork<S> {
    params: Params,
    // one row per center, fixed at construction
    centers: Matrix,
    // one row per center, single output column
    weights: Matrix,
    widths: Vec<f64>,
    solver: S,
}

impl<S> RbfNetwork<S>
where
    S: WeightSolver,
{
    /// Create a new network whose centers are the given template inputs
    ///
    /// # Arguments:
    /// params: The parameters
    /// template_inputs: The inputs of the training templates, one row per center
    /// solver: Solves for the output weights during training
    ///
    /// Fails with `InvalidParameter` if the width is not finite and positive
    pub fn new(params: Params, template_inputs: &Matrix, solver: S) -> Result<Self> {
        params.validate()?;
        let num_centers = template_inputs.nrows();
        let weights = Matrix::randomized(num_centers, 1, params.weight_init, params.seed);
        let widths = vec![params.width; num_centers];
        trace!("initial weights: {}", weights);

        Ok(Self {
            params,
            centers: template_inputs.clone(),
            weights,
            widths,
            solver,
        })
    }

    #[inline(always)]
    pub fn centers(&self) -> &Matrix {
        &self.centers
    }

    #[inline(always)]
    pub fn widths(&self) -> &[f64] {
        &self.widths
    }

    #[inline(always)]
    pub fn num_centers(&self) -> usize {
        self.centers.nrows()
    }

    /// The square activation matrix, row `i` holding the kernel values of input `i`
    /// against every center.
    /// The width is taken from the input row, not the center. Both coincide only as
    /// long as the inputs are the templates the network was built from, in that order.
    pub fn activations(&self, inputs: &Matrix) -> Result<Matrix> {
        let n = self.num_centers();
        if inputs.nrows() != n || inputs.ncols() != self.centers.ncols() {
            return Err(Error::dimension_mismatch(
                "RbfNetwork::activations",
                format!("{}x{} template inputs", n, self.centers.ncols()),
                format!("{}x{}", inputs.nrows(), inputs.ncols()),
            ));
        }

        let centers = (0..n).map(|j| self.centers.row(j)).collect::<Result<Vec<_>>>()?;
        let mut data = Vec::with_capacity(n * n);
        for i in 0..n {
            let input = inputs.row(i)?;
            for center in centers.iter() {
                data.push(gaussian(&input, center, self.widths[i])?);
            }
        }

        Matrix::new(n, n, data)
    }

    /// Log the network settings
    pub fn log_settings(&self) {
        info!(
            "hidden neurons: {}, center dimension: {}, weights: {}, activation width: {}",
            self.num_centers(),
            self.centers.ncols(),
            self.weights.nrows(),
            self.widths.first().copied().unwrap_or(self.params.width),
        );
    }
}

impl<S> Forecaster for RbfNetwork<S>
where
    S: WeightSolver,
{
    #[inline(always)]
    fn input_dim(&self) -> usize {
        self.centers.ncols()
    }

    fn train(&mut self, inputs: &Matrix, targets: &Matrix) -> Result<Matrix> {
        if inputs.nrows() != self.num_centers() {
            return Err(Error::dimension_mismatch(
                "RbfNetwork::train",
                format!("{} templates, one per center", self.num_centers()),
                format!("{} templates", inputs.nrows()),
            ));
        }
        if targets.nrows() != inputs.nrows() || targets.ncols() != 1 {
            return Err(Error::dimension_mismatch(
                "RbfNetwork::train",
                format!("{}x1 targets", inputs.nrows()),
                format!("{}x{}", targets.nrows(), targets.ncols()),
            ));
        }

        let activations = self.activations(inputs)?;
        trace!("activations: {}", activations);

        let result = activations.product(&self.weights)?;
        self.weights = self.solver.solve(&activations, targets)?;
        debug!("fit {} weights", self.weights.nrows());

        Ok(result)
    }

    fn predict(&self, input: &[f64]) -> Result<f64> {
        if input.len() != self.input_dim() {
            return Err(Error::dimension_mismatch(
                "RbfNetwork::predict",
                self.input_dim(),
                input.len(),
            ));
        }

        let mut output = 0.0;
        for (i, width) in self.widths.iter().enumerate() {
            let center = self.centers.row(i)?;
            let weight = self
                .weights
                .get(i, 0)
                .ok_or(Error::IndexOutOfRange { index: i, len: self.weights.nrows() })?;
            output += gaussian(input, &center, *width)? * weight;
        }

        Ok(output)
    }

    #[inline(always)]
    fn weights(&self) -> &Matrix {
        &self.weights
    }
}
