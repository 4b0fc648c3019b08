#[macro_use]
extern crate log;

pub mod plot;
mod plot_gather;

pub use plot::{plot, plot_comparison};
pub use plot_gather::PlotGather;

/// Points of a line, as (x, y)
pub type Series = Vec<(f64, f64)>;

/// Result of rendering a plot to disk
pub type PlotResult = Result<(), Box<dyn std::error::Error>>;
