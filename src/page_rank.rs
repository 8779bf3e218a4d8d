//! Random-surfer ranking of a [`LinkGraph`].
//!
//! Two independent estimators share the same transition model:
//! [`sampled::SampledPageRank`] simulates the surfer and counts visits,
//! [`iterated::IteratedPageRank`] solves the PageRank recurrence directly.
//! Each one normalizes dangling pages once, up front, on its own copy of the
//! graph.

mod traits;
pub use self::traits::*;
pub mod iterated;
pub use self::iterated::IteratedPageRank;
pub mod sampled;
pub use self::sampled::SampledPageRank;
pub mod transition;
pub use self::transition::transition;

use crate::{LinkGraph, Ranks, Result};
use rand::Rng;

/// Estimates ranks from a `samples`-step random walk driven by the thread-local RNG.
pub fn sample_rank(graph: &LinkGraph, damping: f64, samples: usize) -> Result<Ranks> {
    sample_rank_with(graph, damping, samples, rand::rng())
}

/// Same as [`sample_rank`] with a caller-supplied random source.
pub fn sample_rank_with<R: Rng>(
    graph: &LinkGraph,
    damping: f64,
    samples: usize,
    rng: R,
) -> Result<Ranks> {
    let cfg = sampled::Config { damping, samples };
    let mut spr = SampledPageRank::new(graph, &cfg, rng)?;
    Ok(spr.calc()?.page_rank)
}

pub fn iterate_rank(graph: &LinkGraph, damping: f64, threshold: f64) -> Result<Ranks> {
    let cfg = iterated::Config {
        damping,
        threshold,
        ..Default::default()
    };
    let mut ipr = IteratedPageRank::new(graph, &cfg)?;
    Ok(ipr.calc()?.page_rank)
}
