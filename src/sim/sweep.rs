use rayon::prelude::*;
use tracing::info;

use super::runner::run;
use crate::model::{ConfigError, History, Params};

/// Seed for the `index`-th run of a sweep. Each run gets its own stream so
/// parallel runs never share or reuse randomness.
pub fn run_seed(base_seed: u64, index: usize) -> u64 {
    base_seed.wrapping_add(index as u64)
}

/// Run every parameter set independently on the rayon pool.
///
/// Results come back in input order; an invalid parameter set fails only
/// its own slot.
pub fn run_sweep(params: &[Params], base_seed: u64) -> Vec<Result<History, ConfigError>> {
    info!(runs = params.len(), base_seed, "parameter sweep starting");
    params
        .par_iter()
        .enumerate()
        .map(|(i, p)| run(p.clone(), run_seed(base_seed, i)))
        .collect()
}
