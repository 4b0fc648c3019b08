//! Radial basis function networks fit by exact interpolation,
//! for forecasting univariate time series.

#[macro_use]
extern crate log;

pub use forecaster::Forecaster;
pub use network::RbfNetwork;
pub use params::Params;
pub use templates::{TemplateSet, WindowConfig};

#[cfg(feature = "environments")]
pub mod environments;
mod forecaster;
mod network;
mod params;
mod templates;
