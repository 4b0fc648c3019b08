use std::collections::VecDeque;

use common::{Error, Result};
use lin_alg::Matrix;

/// Anything that can be fit to templates and then forecast a series
pub trait Forecaster {
    /// Number of values a single prediction consumes
    fn input_dim(&self) -> usize;

    /// Fit the model to the given templates
    ///
    /// # Arguments:
    /// inputs: A Matrix with one row per template
    /// targets: A Matrix with the desired output of each template as its row
    ///
    /// # Returns:
    /// The in-sample predictions made before the fit was updated
    fn train(&mut self, inputs: &Matrix, targets: &Matrix) -> Result<Matrix>;

    /// Predict the value following `input`
    fn predict(&self, input: &[f64]) -> Result<f64>;

    /// Get a reference to the output weights
    fn weights(&self) -> &Matrix;

    /// Forecast `steps` values by feeding every prediction back as the newest input.
    /// Errors compound with each step as the model never sees real data again.
    fn predict_recursively(&self, initial_input: &[f64], steps: usize) -> Result<Vec<f64>> {
        if initial_input.len() != self.input_dim() {
            return Err(Error::dimension_mismatch(
                "predict_recursively",
                self.input_dim(),
                initial_input.len(),
            ));
        }
        debug!("forecasting {} values from {} inputs", steps, initial_input.len());

        let mut window: VecDeque<f64> = initial_input.iter().copied().collect();
        let mut out = Vec::with_capacity(steps);
        for _ in 0..steps {
            let predicted = self.predict(window.make_contiguous())?;
            out.push(predicted);

            let _ = window.pop_front();
            window.push_back(predicted);
        }

        Ok(out)
    }
}
