//! Collection Builder
//!
//! Fluent construction of item collections. Entries are validated together in
//! `build()`, so a typo in one triple surfaces with the item's name attached.

use crate::error::ItemError;
use crate::model::{CostItem, ItemCollection};

#[derive(Debug, Clone)]
struct PendingItem {
    name: String,
    probability: f64,
    values: (f64, f64, f64),
}

/// Builder for an ordered item collection
#[derive(Debug, Clone, Default)]
pub struct CollectionBuilder {
    pending: Vec<PendingItem>,
}

impl CollectionBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a baseline cost category (always incurred)
    #[must_use]
    pub fn cost(self, name: impl Into<String>, values: (f64, f64, f64)) -> Self {
        self.item(name, 1.0, values)
    }

    /// Add a risk that occurs with `probability`
    #[must_use]
    pub fn risk(self, name: impl Into<String>, probability: f64, values: (f64, f64, f64)) -> Self {
        self.item(name, probability, values)
    }

    #[must_use]
    pub fn item(
        mut self,
        name: impl Into<String>,
        probability: f64,
        values: (f64, f64, f64),
    ) -> Self {
        self.pending.push(PendingItem {
            name: name.into(),
            probability,
            values,
        });
        self
    }

    /// Validate every entry and produce the collection
    pub fn build(self) -> Result<ItemCollection, ItemError> {
        let mut collection = ItemCollection::new();
        for PendingItem {
            name,
            probability,
            values,
        } in self.pending
        {
            match CostItem::from_triple(probability, values) {
                Ok(item) => collection.insert(name, item)?,
                Err(source) => return Err(ItemError::Invalid { name, source }),
            }
        }
        Ok(collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InvalidParameterError;

    #[test]
    fn test_builder_costs_are_certain() {
        let collection = CollectionBuilder::new()
            .cost("it", (900.0, 1000.0, 1250.0))
            .risk("permit_issues", 0.1, (2000.0, 3000.0, 7000.0))
            .build()
            .unwrap();

        assert_eq!(collection.len(), 2);
        assert_eq!(collection.get("it").unwrap().probability(), 1.0);
        assert_eq!(collection.get("permit_issues").unwrap().probability(), 0.1);
    }

    #[test]
    fn test_builder_names_invalid_item() {
        let err = CollectionBuilder::new()
            .cost("ok", (1.0, 2.0, 3.0))
            .cost("reversed", (5.0, 25.0, 20.0))
            .build()
            .unwrap_err();

        assert_eq!(
            err,
            ItemError::Invalid {
                name: "reversed".to_string(),
                source: InvalidParameterError::Estimate {
                    min: 5.0,
                    mode: 25.0,
                    max: 20.0
                },
            }
        );
    }

    #[test]
    fn test_builder_rejects_duplicate() {
        let err = CollectionBuilder::new()
            .cost("it", (1.0, 2.0, 3.0))
            .cost("it", (1.0, 2.0, 3.0))
            .build()
            .unwrap_err();
        assert_eq!(err, ItemError::DuplicateName("it".to_string()));
    }
}
