//! This crate provides functionality shared by all crates of the workspace:
//! the error taxonomy, the radial basis kernel and evaluation helpers.

#![deny(unused_imports, unused_crate_dependencies)]
#![warn(missing_docs)]

#[macro_use]
extern crate log;

mod accuracy;
mod error;
mod kernel;
mod normalization;

pub use accuracy::{average_accuracy, average_accuracy_with, ZeroTargetPolicy};
pub use error::{Error, Result};
pub use kernel::{gaussian, squared_distance};
pub use normalization::MinMax;
