//! Distribution summaries computed from trial totals
//!
//! Summaries are derived on demand from a sample slice and never stored
//! alongside it. Costs cannot be negative, so the lower end of every sigma
//! band is floored at zero; the upper end is left as computed.

use serde::{Deserialize, Serialize};

/// Sigma multiples reported for every distribution
pub const SIGMA_LEVELS: [u8; 3] = [1, 2, 3];

/// Standard percentiles reported alongside the sigma bands
pub mod standard {
    pub const P5: f64 = 0.05;
    pub const P50: f64 = 0.50;
    pub const P95: f64 = 0.95;
}

/// `mean ± k·σ` with the lower bound floored at zero
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub sigmas: u8,
    pub lower: f64,
    pub upper: f64,
}

impl ConfidenceInterval {
    pub fn new(mean: f64, std_dev: f64, sigmas: u8) -> Self {
        let spread = f64::from(sigmas) * std_dev;
        Self {
            sigmas,
            lower: (mean - spread).max(0.0),
            upper: mean + spread,
        }
    }

    /// Nominal normal-theory coverage label, e.g. "68%"
    pub fn coverage_label(&self) -> &'static str {
        match self.sigmas {
            1 => "68%",
            2 => "95%",
            3 => "99.7%",
            _ => "",
        }
    }
}

/// Mean, population standard deviation and range of a set of trial totals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistributionSummary {
    pub trials: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl DistributionSummary {
    /// Summarize a slice of samples; `None` when it is empty
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;

        let (min, max) = samples
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
                (lo.min(x), hi.max(x))
            });

        Some(Self {
            trials: samples.len(),
            mean,
            std_dev: variance.sqrt(),
            min,
            max,
        })
    }

    pub fn confidence_interval(&self, sigmas: u8) -> ConfidenceInterval {
        ConfidenceInterval::new(self.mean, self.std_dev, sigmas)
    }

    /// The 1σ, 2σ and 3σ bands, innermost first
    pub fn sigma_bands(&self) -> [ConfidenceInterval; 3] {
        SIGMA_LEVELS.map(|k| self.confidence_interval(k))
    }
}

/// Nearest-rank percentile of an already sorted slice
fn percentile_of_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&p) {
        return None;
    }
    let rank = (p * sorted.len() as f64).ceil() as usize;
    Some(sorted[rank.saturating_sub(1).min(sorted.len() - 1)])
}

/// Standard percentile set extracted from trial totals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentileSet {
    pub p5: f64,
    pub p50: f64,
    pub p95: f64,
}

impl PercentileSet {
    /// Sort a copy of the samples and read off P5/P50/P95
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        let mut sorted = samples.to_vec();
        sorted.sort_by(f64::total_cmp);
        Some(Self {
            p5: percentile_of_sorted(&sorted, standard::P5)?,
            p50: percentile_of_sorted(&sorted, standard::P50)?,
            p95: percentile_of_sorted(&sorted, standard::P95)?,
        })
    }
}
