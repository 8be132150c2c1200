//! Cost and risk items
//!
//! Items are the immutable reference data a stage is simulated from. Each one
//! carries a three-point estimate and the probability that it is incurred at
//! all. Validation happens once, at construction or deserialization, so the
//! simulator never sees a malformed item.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{InvalidParameterError, ItemError};

/// Three-point (min, mode, max) estimate with `min <= mode <= max`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "(f64, f64, f64)", into = "(f64, f64, f64)")]
pub struct Estimate {
    min: f64,
    mode: f64,
    max: f64,
}

impl Estimate {
    pub fn new(min: f64, mode: f64, max: f64) -> Result<Self, InvalidParameterError> {
        // The width must be representable too, or rescaled samples overflow
        let finite = min.is_finite() && mode.is_finite() && max.is_finite();
        if !finite || !(max - min).is_finite() || min > mode || mode > max {
            return Err(InvalidParameterError::Estimate { min, mode, max });
        }
        Ok(Self { min, mode, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn mode(&self) -> f64 {
        self.mode
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Width of the support
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    /// Expected value of the PERT distribution with shape `lambda`
    pub fn pert_mean(&self, lambda: f64) -> f64 {
        (self.min + lambda * self.mode + self.max) / (lambda + 2.0)
    }
}

impl TryFrom<(f64, f64, f64)> for Estimate {
    type Error = InvalidParameterError;

    fn try_from((min, mode, max): (f64, f64, f64)) -> Result<Self, Self::Error> {
        Estimate::new(min, mode, max)
    }
}

impl From<Estimate> for (f64, f64, f64) {
    fn from(e: Estimate) -> Self {
        (e.min, e.mode, e.max)
    }
}

/// Validate an occurrence probability
pub fn check_probability(probability: f64) -> Result<f64, InvalidParameterError> {
    // NaN fails the range check
    if (0.0..=1.0).contains(&probability) {
        Ok(probability)
    } else {
        Err(InvalidParameterError::Probability(probability))
    }
}

/// A cost category or a risk: how likely it is and what it costs when it happens
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostItem {
    probability: f64,
    values: Estimate,
}

impl CostItem {
    pub fn new(probability: f64, values: Estimate) -> Result<Self, InvalidParameterError> {
        Ok(Self {
            probability: check_probability(probability)?,
            values,
        })
    }

    /// Build an item straight from a raw triple
    pub fn from_triple(
        probability: f64,
        (min, mode, max): (f64, f64, f64),
    ) -> Result<Self, InvalidParameterError> {
        Self::new(probability, Estimate::new(min, mode, max)?)
    }

    /// A baseline cost category that is always incurred
    pub fn certain(values: Estimate) -> Self {
        Self {
            probability: 1.0,
            values,
        }
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    pub fn values(&self) -> Estimate {
        self.values
    }

    /// Probability-weighted PERT mean
    pub fn expected_cost(&self, lambda: f64) -> f64 {
        self.probability * self.values.pert_mean(lambda)
    }
}

/// Serialized form of one collection entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemRecord {
    pub name: String,
    pub probability: f64,
    pub values: (f64, f64, f64),
}

/// Ordered, uniquely-named set of items
///
/// Order is preserved for report output and for assigning random streams,
/// which keeps a seeded run reproducible.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ItemRecord>", into = "Vec<ItemRecord>")]
pub struct ItemCollection {
    items: Vec<(String, CostItem)>,
    index: FxHashMap<String, usize>,
}

impl ItemCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection, rejecting duplicate names
    pub fn from_items<I, S>(items: I) -> Result<Self, ItemError>
    where
        I: IntoIterator<Item = (S, CostItem)>,
        S: Into<String>,
    {
        let mut collection = Self::new();
        for (name, item) in items {
            collection.insert(name.into(), item)?;
        }
        Ok(collection)
    }

    pub(crate) fn insert(&mut self, name: String, item: CostItem) -> Result<(), ItemError> {
        if self.index.contains_key(&name) {
            return Err(ItemError::DuplicateName(name));
        }
        self.index.insert(name.clone(), self.items.len());
        self.items.push((name, item));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&CostItem> {
        self.index.get(name).map(|&i| &self.items[i].1)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CostItem)> {
        self.items.iter().map(|(name, item)| (name.as_str(), item))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|(name, _)| name.as_str())
    }

    /// Analytic expectation of a stage total: sum of probability-weighted PERT means
    pub fn expected_total(&self, lambda: f64) -> f64 {
        self.items
            .iter()
            .map(|(_, item)| item.expected_cost(lambda))
            .sum()
    }
}

impl TryFrom<Vec<ItemRecord>> for ItemCollection {
    type Error = ItemError;

    fn try_from(records: Vec<ItemRecord>) -> Result<Self, Self::Error> {
        let mut collection = Self::new();
        for record in records {
            let item = CostItem::from_triple(record.probability, record.values).map_err(
                |source| ItemError::Invalid {
                    name: record.name.clone(),
                    source,
                },
            )?;
            collection.insert(record.name, item)?;
        }
        Ok(collection)
    }
}

impl From<ItemCollection> for Vec<ItemRecord> {
    fn from(collection: ItemCollection) -> Self {
        collection
            .items
            .into_iter()
            .map(|(name, item)| ItemRecord {
                name,
                probability: item.probability,
                values: item.values.into(),
            })
            .collect()
    }
}
