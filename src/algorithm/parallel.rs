//! Independent generation attempts on the rayon thread pool
//!
//! Every attempt owns its grid and random source; only the rule set is
//! shared, read-only. Results come back in seed order regardless of which
//! thread finished first, so the output is as deterministic as [`generate`].
//!
//! [`generate`]: crate::algorithm::executor::generate

use crate::{
    algorithm::{
        cancellation::CancellationToken,
        executor::{GenerationConfig, generate_with},
        rules::AdjacencyRuleSet,
    },
    io::error::{GenerationError, Result, invalid_parameter},
    spatial::TileMap,
};
use rayon::prelude::*;
use std::sync::{Mutex, PoisonError};

/// Run one attempt per seed in parallel
///
/// The seed in `config` is ignored; each attempt uses its entry of `seeds`.
pub fn generate_many(
    config: &GenerationConfig,
    rules: &AdjacencyRuleSet,
    seeds: &[u64],
) -> Vec<Result<TileMap>> {
    seeds
        .par_iter()
        .map(|&seed| {
            let attempt = config.with_seed(seed);
            generate_with(&attempt, rules, None, &CancellationToken::new())
        })
        .collect()
}

/// First successful map in seed order, with the seed that produced it
///
/// Attempts after the first success are abandoned as soon as possible.
///
/// # Errors
///
/// Returns the error of the last seed when every attempt fails, and
/// `InvalidParameter` when `seeds` is empty
pub fn generate_first(
    config: &GenerationConfig,
    rules: &AdjacencyRuleSet,
    seeds: &[u64],
) -> Result<(u64, TileMap)> {
    config.validate()?;

    // Failed attempts report here; the error from the latest seed in order wins
    let last_error: Mutex<Option<(usize, GenerationError)>> = Mutex::new(None);

    let found = seeds
        .par_iter()
        .enumerate()
        .find_map_first(|(index, &seed)| {
            let attempt = config.with_seed(seed);
            match generate_with(&attempt, rules, None, &CancellationToken::new()) {
                Ok(map) => Some((seed, map)),
                Err(e) => {
                    let mut slot = last_error.lock().unwrap_or_else(PoisonError::into_inner);
                    if slot.as_ref().is_none_or(|(kept, _)| *kept < index) {
                        *slot = Some((index, e));
                    }
                    None
                }
            }
        });

    if let Some(found) = found {
        return Ok(found);
    }

    match last_error
        .into_inner()
        .unwrap_or_else(PoisonError::into_inner)
    {
        Some((_, e)) => Err(e),
        None => Err(invalid_parameter(
            "seeds",
            &0,
            &"at least one seed is required",
        )),
    }
}
