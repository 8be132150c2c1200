mod items;
mod samples;

pub use items::{CostItem, Estimate, ItemCollection, ItemRecord, check_probability};
pub use samples::{SampleArray, TitledSamples};
