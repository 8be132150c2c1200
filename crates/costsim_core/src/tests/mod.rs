//! Integration tests for the cost simulation engine
//!
//! Tests are organized by topic:
//! - `pert` - PERT sampler support, degenerate cases and moments
//! - `stage` - Stage simulator gating, aggregation and reproducibility
//! - `combination` - Combining stage outputs and summarizing them
//! - `end_to_end` - Two-stage runs over the reference collections

mod pert;
