//! Stage simulation
//!
//! A stage turns one item collection into `n` trial totals. Trials are cut
//! into fixed-size chunks and every (item, chunk) pair gets its own random
//! stream, derived from per-item seeds drawn in collection order. Totals
//! within a chunk are accumulated item by item, so a fixed seed reproduces
//! the same totals whether or not chunks are filled in parallel, and memory
//! stays at the single output buffer.

use rand::distr::Distribution;
use rand::rngs::{SmallRng, StdRng};
use rand::{RngCore, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::RunConfig;
use crate::error::{InvalidParameterError, SimulationError};
use crate::model::{ItemCollection, SampleArray, TitledSamples};
use crate::sampling::{DEFAULT_LAMBDA, Occurrence, Pert};

pub const COSTS_TITLE: &str = "Costs";
pub const RISKS_TITLE: &str = "Risks impact in cost";
pub const TOTAL_TITLE: &str = "Total cost";

/// Trials per chunk; each chunk draws from its own stream per item
pub const CHUNK_TRIALS: usize = 8192;

/// Odd constant (2^64 / golden ratio) spreading chunk indices across the seed space
const CHUNK_SEED_STEP: u64 = 0x9E37_79B9_7F4A_7C15;

/// Validated sampler for one item plus the seed its streams derive from
struct ItemSampler {
    gate: Occurrence,
    magnitude: Pert,
    seed: u64,
}

impl ItemSampler {
    fn stream(&self, chunk: usize) -> SmallRng {
        SmallRng::seed_from_u64(
            self.seed
                .wrapping_add((chunk as u64).wrapping_mul(CHUNK_SEED_STEP)),
        )
    }

    /// Add `gate * magnitude` for every trial in the chunk
    fn accumulate(&self, chunk: usize, totals: &mut [f64]) {
        let mut rng = self.stream(chunk);
        for total in totals.iter_mut() {
            let hit = self.gate.occurs(&mut rng);
            let magnitude = self.magnitude.sample(&mut rng);
            if hit {
                *total += magnitude;
            }
        }
    }
}

fn fill_chunk(samplers: &[ItemSampler], chunk: usize, totals: &mut [f64]) {
    for sampler in samplers {
        sampler.accumulate(chunk, totals);
    }
}

/// Validate every item and assign per-item seeds in collection order
fn prepare(
    collection: &ItemCollection,
    trials: usize,
    seed: u64,
) -> Result<Vec<ItemSampler>, SimulationError> {
    if trials == 0 {
        return Err(InvalidParameterError::ZeroTrials.into());
    }

    let mut master = StdRng::seed_from_u64(seed);
    collection
        .iter()
        .map(|(name, item)| {
            let item_seed = master.next_u64();
            let build = || -> Result<ItemSampler, InvalidParameterError> {
                Ok(ItemSampler {
                    gate: Occurrence::new(item.probability())?,
                    magnitude: Pert::with_lambda(item.values(), DEFAULT_LAMBDA)?,
                    seed: item_seed,
                })
            };
            build().map_err(|source| SimulationError::Item {
                name: name.to_string(),
                source,
            })
        })
        .collect()
}

fn fill_sequential(samplers: &[ItemSampler], totals: &mut [f64]) {
    for (chunk, slice) in totals.chunks_mut(CHUNK_TRIALS).enumerate() {
        fill_chunk(samplers, chunk, slice);
    }
}

#[cfg(feature = "parallel")]
fn fill_totals(samplers: &[ItemSampler], totals: &mut [f64]) {
    totals
        .par_chunks_mut(CHUNK_TRIALS)
        .enumerate()
        .for_each(|(chunk, slice)| fill_chunk(samplers, chunk, slice));
}

#[cfg(not(feature = "parallel"))]
fn fill_totals(samplers: &[ItemSampler], totals: &mut [f64]) {
    fill_sequential(samplers, totals);
}

/// Single-threaded stage simulation, whatever features are enabled
#[cfg_attr(all(feature = "parallel", not(test)), allow(dead_code))]
pub(crate) fn simulate_stage_sequential(
    collection: &ItemCollection,
    trials: usize,
    seed: u64,
) -> Result<SampleArray, SimulationError> {
    let samplers = prepare(collection, trials, seed)?;
    let mut totals = vec![0.0; trials];
    fill_sequential(&samplers, &mut totals);
    Ok(SampleArray::from_vec(totals))
}

/// Simulate `trials` totals for a collection
///
/// Element `i` is the sum over items of `gate_i * magnitude_i`. An empty
/// collection yields `trials` zeros.
pub fn simulate_stage(
    collection: &ItemCollection,
    trials: usize,
    seed: u64,
) -> Result<SampleArray, SimulationError> {
    tracing::debug!(items = collection.len(), trials, seed, "simulating stage");

    let samplers = prepare(collection, trials, seed)?;
    let mut totals = vec![0.0; trials];
    fill_totals(&samplers, &mut totals);
    Ok(SampleArray::from_vec(totals))
}

/// Outputs of a two-stage run: costs, risks and their element-wise total
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostRun {
    pub seed: u64,
    pub trials: usize,
    pub costs: SampleArray,
    pub risks: SampleArray,
    pub total: SampleArray,
    pub expected_costs: f64,
    pub expected_risks: f64,
}

impl CostRun {
    /// Titled arrays in report order
    pub fn into_titled(self) -> Vec<TitledSamples> {
        vec![
            TitledSamples::new(COSTS_TITLE, self.costs).with_expected(self.expected_costs),
            TitledSamples::new(RISKS_TITLE, self.risks).with_expected(self.expected_risks),
            TitledSamples::new(TOTAL_TITLE, self.total)
                .with_expected(self.expected_costs + self.expected_risks),
        ]
    }
}

/// Simulate the cost and risk stages on independent streams and combine them
///
/// Either stage failing aborts the run; the total is only formed from two
/// complete arrays.
pub fn run(
    config: &RunConfig,
    costs: &ItemCollection,
    risks: &ItemCollection,
) -> Result<CostRun, SimulationError> {
    let seed = config.resolve_seed();
    let mut master = StdRng::seed_from_u64(seed);
    let (cost_seed, risk_seed) = (master.next_u64(), master.next_u64());

    tracing::info!(
        trials = config.trials,
        seed,
        costs = costs.len(),
        risks = risks.len(),
        "starting run"
    );

    let cost_samples = simulate_stage(costs, config.trials, cost_seed)?;
    let risk_samples = simulate_stage(risks, config.trials, risk_seed)?;
    let total = SampleArray::combine(&[&cost_samples, &risk_samples])?;

    Ok(CostRun {
        seed,
        trials: config.trials,
        costs: cost_samples,
        risks: risk_samples,
        total,
        expected_costs: costs.expected_total(DEFAULT_LAMBDA),
        expected_risks: risks.expected_total(DEFAULT_LAMBDA),
    })
}
