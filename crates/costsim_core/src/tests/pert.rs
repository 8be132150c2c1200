//! Tests for the PERT sampler
//!
//! These tests verify that:
//! - Samples never leave `[min, max]`
//! - Zero-width estimates return `min` exactly
//! - Reversed triples are rejected with the offending values
//! - The sample mean converges on the PERT expectation

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::error::InvalidParameterError;
use crate::model::Estimate;
use crate::sampling::{DEFAULT_LAMBDA, Pert, rpert};

#[test]
fn test_samples_within_support() {
    let mut rng = StdRng::seed_from_u64(42);
    let cases = [
        (0.0, 0.0, 1.0),
        (0.0, 1.0, 1.0),
        (1800.0, 2000.0, 2500.0),
        (1000.0, 1500.0, 6000.0),
        (-50.0, 10.0, 20.0),
        (0.1, 0.2, 0.3),
    ];

    for (min, mode, max) in cases {
        for n in [1, 17, 5_000] {
            let samples = rpert(&mut rng, n, min, mode, max, DEFAULT_LAMBDA).unwrap();
            assert_eq!(samples.len(), n);
            assert!(
                samples.iter().all(|&x| (min..=max).contains(&x)),
                "sample outside [{min}, {max}] for mode {mode}"
            );
        }
    }
}

#[test]
fn test_zero_width_returns_min_exactly() {
    let mut rng = StdRng::seed_from_u64(1);
    for n in [1, 10, 10_000] {
        let samples = rpert(&mut rng, n, 10.0, 10.0, 10.0, DEFAULT_LAMBDA).unwrap();
        assert_eq!(samples.len(), n);
        assert!(samples.iter().all(|&x| x == 10.0));
    }

    // Shape parameter is irrelevant for a point estimate
    let samples = rpert(&mut rng, 100, -3.5, -3.5, -3.5, 0.0).unwrap();
    assert!(samples.iter().all(|&x| x == -3.5));
}

#[test]
fn test_mode_below_min_rejected() {
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(
        rpert(&mut rng, 10, 10.0, 5.0, 20.0, DEFAULT_LAMBDA),
        Err(InvalidParameterError::Estimate {
            min: 10.0,
            mode: 5.0,
            max: 20.0
        })
    );
}

#[test]
fn test_mode_above_max_rejected() {
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(
        rpert(&mut rng, 10, 5.0, 25.0, 20.0, DEFAULT_LAMBDA),
        Err(InvalidParameterError::Estimate {
            min: 5.0,
            mode: 25.0,
            max: 20.0
        })
    );
}

#[test]
fn test_sample_mean_matches_expectation() {
    let mut rng = StdRng::seed_from_u64(2024);
    let cases = [
        (1000.0, 1500.0, 6000.0),
        (8000.0, 10000.0, 11000.0),
        (0.0, 5.0, 10.0),
    ];

    for (min, mode, max) in cases {
        let estimate = Estimate::new(min, mode, max).unwrap();
        let pert = Pert::new(estimate).unwrap();
        let samples = pert.sample_n(&mut rng, 200_000);
        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        let expected = pert.mean();

        assert!(
            (mean - expected).abs() < 0.01 * (max - min),
            "mean {mean} too far from expected {expected}"
        );
    }
}

#[test]
fn test_higher_lambda_concentrates_mass() {
    let estimate = Estimate::new(0.0, 3.0, 10.0).unwrap();
    let spread = |lambda| {
        let mut rng = StdRng::seed_from_u64(77);
        let pert = Pert::with_lambda(estimate, lambda).unwrap();
        let samples = pert.sample_n(&mut rng, 50_000);
        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        let variance =
            samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / samples.len() as f64;
        variance.sqrt()
    };

    assert!(spread(12.0) < spread(DEFAULT_LAMBDA));
}

#[test]
fn test_seeded_sampling_is_reproducible() {
    let draw = |seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        rpert(&mut rng, 1_000, 500.0, 1000.0, 2500.0, DEFAULT_LAMBDA).unwrap()
    };
    assert_eq!(draw(5), draw(5));
    assert_ne!(draw(5), draw(6));
}
