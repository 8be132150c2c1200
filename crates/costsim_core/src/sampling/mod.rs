//! Random variate generation: PERT magnitudes and occurrence gates

mod event;
mod pert;

pub use event::{Occurrence, event, events};
pub use pert::{DEFAULT_LAMBDA, Pert, rpert};
