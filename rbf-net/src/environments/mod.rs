//! Environments for evaluating a forecaster against a known series

mod env_series;

pub use env_series::{EnvSeries, Evaluation};
