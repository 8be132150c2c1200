//! PERT distribution sampling
//!
//! The PERT distribution is a Beta distribution rescaled onto `[min, max]` and
//! shaped so that its mode sits at the most-likely estimate. The shape
//! parameter `lambda` controls how strongly mass concentrates around the
//! mode; 4 is the conventional value.

use rand::{Rng, distr::Distribution};
use rand_distr::Beta;

use crate::error::InvalidParameterError;
use crate::model::Estimate;

/// Standard PERT shape parameter
pub const DEFAULT_LAMBDA: f64 = 4.0;

/// Relative distance from the mode under which the mean counts as the mode
const SYMMETRY_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone)]
enum Shape {
    /// Zero-width support, every sample is `min`
    Point,
    Beta(Beta<f64>),
}

/// A PERT distribution over a validated estimate
#[derive(Debug, Clone)]
pub struct Pert {
    estimate: Estimate,
    lambda: f64,
    shape: Shape,
}

impl Pert {
    /// PERT with the standard shape parameter
    pub fn new(estimate: Estimate) -> Result<Self, InvalidParameterError> {
        Self::with_lambda(estimate, DEFAULT_LAMBDA)
    }

    pub fn with_lambda(estimate: Estimate, lambda: f64) -> Result<Self, InvalidParameterError> {
        if !lambda.is_finite() || lambda < 0.0 {
            return Err(InvalidParameterError::Shape(lambda));
        }

        if estimate.range() == 0.0 {
            return Ok(Self {
                estimate,
                lambda,
                shape: Shape::Point,
            });
        }

        let (v, w) = beta_parameters(&estimate, lambda);
        let beta = Beta::new(v, w).map_err(|_| InvalidParameterError::Estimate {
            min: estimate.min(),
            mode: estimate.mode(),
            max: estimate.max(),
        })?;

        Ok(Self {
            estimate,
            lambda,
            shape: Shape::Beta(beta),
        })
    }

    pub fn mean(&self) -> f64 {
        self.estimate.pert_mean(self.lambda)
    }

    /// Fill `out` with independent draws
    fn fill<R: Rng + ?Sized>(&self, rng: &mut R, out: &mut [f64]) {
        match &self.shape {
            Shape::Point => out.fill(self.estimate.min()),
            Shape::Beta(beta) => {
                let (min, range) = (self.estimate.min(), self.estimate.range());
                for slot in out.iter_mut() {
                    *slot = beta.sample(rng) * range + min;
                }
            }
        }
    }

    /// Draw `n` independent samples into a freshly allocated buffer
    pub fn sample_n<R: Rng + ?Sized>(&self, rng: &mut R, n: usize) -> Vec<f64> {
        let mut samples = vec![0.0; n];
        self.fill(rng, &mut samples);
        samples
    }
}

impl Distribution<f64> for Pert {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match &self.shape {
            Shape::Point => self.estimate.min(),
            Shape::Beta(beta) => beta.sample(rng) * self.estimate.range() + self.estimate.min(),
        }
    }
}

/// Beta shape parameters `(v, w)` for a non-degenerate estimate
fn beta_parameters(estimate: &Estimate, lambda: f64) -> (f64, f64) {
    let (min, mode, max) = (estimate.min(), estimate.mode(), estimate.max());
    let mu = estimate.pert_mean(lambda);

    // The general formula divides by (mode - mu) which vanishes for a centred mode
    if (mu - mode).abs() <= SYMMETRY_TOLERANCE * (max - min) {
        let v = lambda / 2.0 + 1.0;
        return (v, v);
    }

    let v = ((mu - min) * (2.0 * mode - min - max)) / ((mode - mu) * (max - min));
    let w = (v * (max - mu)) / (mu - min);
    (v, w)
}

/// Draw `n` PERT samples on `[x_min, x_max]` with mode `x_mode`
///
/// Fails with [`InvalidParameterError`] when the triple is not ordered or
/// `n` is zero. A zero-width estimate yields `n` copies of `x_min`.
pub fn rpert<R: Rng + ?Sized>(
    rng: &mut R,
    n: usize,
    x_min: f64,
    x_mode: f64,
    x_max: f64,
    lambda: f64,
) -> Result<Vec<f64>, InvalidParameterError> {
    if n == 0 {
        return Err(InvalidParameterError::ZeroTrials);
    }
    let estimate = Estimate::new(x_min, x_mode, x_max)?;
    let pert = Pert::with_lambda(estimate, lambda)?;
    Ok(pert.sample_n(rng, n))
}
