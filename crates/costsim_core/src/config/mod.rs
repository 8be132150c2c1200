//! Run configuration
//!
//! The main configuration type is `RunConfig`, which holds the knobs for one
//! two-stage run. Item collections are built with `CollectionBuilder` or
//! deserialized from an item file by the caller, then passed by reference.
//!
//! # Builder DSL
//!
//! ```ignore
//! use costsim_core::config::{CollectionBuilder, RunConfig};
//!
//! let costs = CollectionBuilder::new()
//!     .cost("soil", (1800.0, 2000.0, 2500.0))
//!     .cost("edification", (4500.0, 5000.0, 6250.0))
//!     .build()?;
//!
//! let risks = CollectionBuilder::new()
//!     .risk("permit_issues", 0.10, (2000.0, 3000.0, 7000.0))
//!     .build()?;
//!
//! let run = costsim_core::simulation::run(&RunConfig::new(10_000).with_seed(42), &costs, &risks)?;
//! ```

use serde::{Deserialize, Serialize};

pub mod builder;
pub mod reference;

pub use builder::CollectionBuilder;
pub use reference::{reference_costs, reference_risks};

fn default_trials() -> usize {
    10_000
}

/// Settings for a single simulation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Number of trials per stage
    #[serde(default = "default_trials")]
    pub trials: usize,

    /// Master seed. Drawn at random when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            trials: default_trials(),
            seed: None,
        }
    }
}

impl RunConfig {
    #[must_use]
    pub fn new(trials: usize) -> Self {
        Self { trials, seed: None }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The configured seed, or a fresh one from the thread RNG
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_config_defaults() {
        let config = RunConfig::default();
        assert_eq!(config.trials, 10_000);
        assert!(config.seed.is_none());

        let config = RunConfig::new(500).with_seed(7);
        assert_eq!(config.trials, 500);
        assert_eq!(config.resolve_seed(), 7);
    }
}
