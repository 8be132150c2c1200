//! Bernoulli occurrence gates

use rand::{Rng, distr::Distribution};

use crate::error::InvalidParameterError;
use crate::model::check_probability;

/// Occurrence gate for an item with a fixed probability
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Occurrence {
    probability: f64,
}

impl Occurrence {
    pub fn new(probability: f64) -> Result<Self, InvalidParameterError> {
        Ok(Self {
            probability: check_probability(probability)?,
        })
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// One uniform `[0, 1)` draw compared against the probability
    #[inline]
    pub fn occurs<R: Rng + ?Sized>(&self, rng: &mut R) -> bool {
        rng.random::<f64>() < self.probability
    }
}

impl Distribution<u8> for Occurrence {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u8 {
        u8::from(self.occurs(rng))
    }
}

/// Sample a single event: 1 with `probability`, 0 otherwise
///
/// Out-of-range probabilities fail instead of being clamped.
pub fn event<R: Rng + ?Sized>(rng: &mut R, probability: f64) -> Result<u8, InvalidParameterError> {
    Ok(Occurrence::new(probability)?.sample(rng))
}

/// Sample `n` independent events with the same probability
pub fn events<R: Rng + ?Sized>(
    rng: &mut R,
    n: usize,
    probability: f64,
) -> Result<Vec<u8>, InvalidParameterError> {
    let gate = Occurrence::new(probability)?;
    Ok((0..n).map(|_| gate.sample(rng)).collect())
}
