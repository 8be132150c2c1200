//! Project cost risk simulation library
//!
//! This crate provides a Monte Carlo engine for estimating the distribution of
//! a project's total cost. It supports:
//! - PERT-distributed three-point estimates (min, mode, max)
//! - Bernoulli occurrence gates for risks that may or may not happen
//! - Stage simulation: vectorized trials per item, summed across items
//! - Reproducible runs from a single seed, optionally parallel across trial chunks
//! - Distribution summaries with zero-floored sigma bands and percentiles
//!
//! # Example
//!
//! ```ignore
//! use costsim_core::config::{RunConfig, reference_costs, reference_risks};
//! use costsim_core::simulation::run;
//!
//! let costs = reference_costs()?;
//! let risks = reference_risks()?;
//! let result = run(&RunConfig::new(100_000).with_seed(42), &costs, &risks)?;
//!
//! for titled in result.into_titled() {
//!     let summary = titled.samples.summary().unwrap();
//!     println!("{}: {:.2} ± {:.2}", titled.title, summary.mean, summary.std_dev);
//! }
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod error;
pub mod sampling;
pub mod simulation;
pub mod summary;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use config::{CollectionBuilder, RunConfig};
pub use error::{InvalidParameterError, ItemError, SimulationError};
pub use model::{CostItem, Estimate, ItemCollection, SampleArray, TitledSamples};
pub use summary::{ConfidenceInterval, DistributionSummary, PercentileSet};
