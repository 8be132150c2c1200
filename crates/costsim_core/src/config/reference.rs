//! Reference item collections
//!
//! A small construction project: eight baseline cost categories and ten
//! discrete risks. Used when no item file is supplied.

use super::CollectionBuilder;
use crate::error::ItemError;
use crate::model::ItemCollection;

pub fn reference_costs() -> Result<ItemCollection, ItemError> {
    CollectionBuilder::new()
        .cost("soil", (1800.0, 2000.0, 2500.0))
        .cost("edification", (4500.0, 5000.0, 6250.0))
        .cost("material", (3600.0, 4000.0, 5000.0))
        .cost("salaries", (1800.0, 2000.0, 2500.0))
        .cost("it", (900.0, 1000.0, 1250.0))
        .cost("vehicles", (450.0, 500.0, 625.0))
        .cost("marketing", (1350.0, 1500.0, 1875.0))
        .cost("others", (2250.0, 2500.0, 3125.0))
        .build()
}

pub fn reference_risks() -> Result<ItemCollection, ItemError> {
    CollectionBuilder::new()
        .risk("incomplete_design", 0.25, (8000.0, 10000.0, 11000.0))
        .risk("errors_and_omissions", 0.25, (250.0, 500.0, 600.0))
        .risk("contract_termination", 0.35, (500.0, 1000.0, 2500.0))
        .risk(
            "project_location_and_environmental_conditions",
            0.15,
            (1000.0, 1500.0, 6000.0),
        )
        .risk("regulatory_risks", 0.60, (1000.0, 1500.0, 6000.0))
        .risk("land_acquisition_issues", 0.25, (1000.0, 1500.0, 5500.0))
        .risk("permit_issues", 0.10, (2000.0, 3000.0, 7000.0))
        .risk("construction_problems", 0.05, (10000.0, 12000.0, 15000.0))
        .risk("availability_of_skilled_labor", 0.03, (2000.0, 4000.0, 4500.0))
        .risk(
            "capabilities_and_experience_of_subcontractors_and_suppliers",
            0.01,
            (500.0, 1200.0, 1650.0),
        )
        .build()
}
