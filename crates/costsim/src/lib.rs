//! Command-line front end for the costsim Monte Carlo cost estimator
//!
//! Loads cost and risk items, runs the two-stage simulation from
//! `costsim_core`, and writes a text report and histogram per stage.

pub mod cli;
pub mod items_file;
pub mod logging;
pub mod plot;
pub mod report;
pub mod util;

pub use logging::init_logging;
