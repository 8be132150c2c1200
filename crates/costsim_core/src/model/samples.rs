//! Trial outcome arrays

use serde::{Deserialize, Serialize};

use crate::error::SimulationError;
use crate::summary::{DistributionSummary, PercentileSet};

/// Write-once array of per-trial totals from one stage run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleArray {
    values: Box<[f64]>,
}

impl SampleArray {
    /// Wrap a fully populated buffer
    pub fn from_vec(values: Vec<f64>) -> Self {
        Self {
            values: values.into_boxed_slice(),
        }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    /// Mean, standard deviation and sigma bands. `None` for an empty array.
    pub fn summary(&self) -> Option<DistributionSummary> {
        DistributionSummary::from_samples(&self.values)
    }

    /// Empirical P5/P50/P95
    pub fn percentiles(&self) -> Option<PercentileSet> {
        PercentileSet::from_samples(&self.values)
    }

    /// Element-wise sum of equally sized arrays
    ///
    /// Fails rather than truncating when lengths differ.
    pub fn combine(arrays: &[&SampleArray]) -> Result<SampleArray, SimulationError> {
        let (first, rest) = arrays
            .split_first()
            .ok_or(SimulationError::NothingToCombine)?;

        if let Some(bad) = rest.iter().find(|a| a.len() != first.len()) {
            return Err(SimulationError::LengthMismatch {
                expected: first.len(),
                found: bad.len(),
            });
        }

        let mut totals = first.values.to_vec();
        for array in rest {
            for (total, value) in totals.iter_mut().zip(array.values.iter()) {
                *total += value;
            }
        }
        Ok(SampleArray::from_vec(totals))
    }
}

impl From<Vec<f64>> for SampleArray {
    fn from(values: Vec<f64>) -> Self {
        Self::from_vec(values)
    }
}

/// A sample array paired with the title used for its report and plot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitledSamples {
    pub title: String,
    pub samples: SampleArray,
    /// Analytic expected value, when the inputs allow one
    #[serde(default)]
    pub expected: Option<f64>,
}

impl TitledSamples {
    pub fn new(title: impl Into<String>, samples: SampleArray) -> Self {
        Self {
            title: title.into(),
            samples,
            expected: None,
        }
    }

    #[must_use]
    pub fn with_expected(mut self, expected: f64) -> Self {
        self.expected = Some(expected);
        self
    }
}
