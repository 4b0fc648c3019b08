use common::{Error, Result};
use lin_alg::Distribution;

/// The parameters of the radial basis function network
#[derive(Debug, Clone)]
pub struct Params {
    /// Activation window width assigned to every center
    pub width: f64,
    /// Distribution of the initial output weights
    pub weight_init: Distribution,
    /// Optional seed for Rng
    pub seed: Option<u64>,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            width: 1.0,
            weight_init: Distribution::Uniform,
            seed: None,
        }
    }
}

impl Params {
    /// Check that every parameter is in its valid range
    pub fn validate(&self) -> Result<()> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "activation width {} must be finite and > 0",
                self.width
            )));
        }

        Ok(())
    }
}
