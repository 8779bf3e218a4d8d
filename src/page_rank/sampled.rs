use super::{transition::transition_row, *};
use crate::{common::check_damping, Error, LinkGraph, Ranks, DEFAULT_DAMPING, DEFAULT_SAMPLES};
use algograph::graph::VertexId;
use rand::{
    distr::{weighted::WeightedIndex, Distribution},
    seq::IndexedRandom,
    Rng,
};
use std::collections::HashMap;

/// Monte-Carlo estimate of PageRank.
///
/// A single surfer walks `samples` steps over the normalized graph, each
/// step drawn from the transition distribution of the current page. A page's
/// rank is the share of steps that landed on it.
pub struct SampledPageRank<R: Rng> {
    graph: LinkGraph,
    samples: usize,
    rng: R,
    vertices: Vec<VertexId>,
    transitions: HashMap<VertexId, (Vec<VertexId>, WeightedIndex<f64>), ahash::RandomState>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub damping: f64,
    pub samples: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            damping: DEFAULT_DAMPING,
            samples: DEFAULT_SAMPLES,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Ranking {
    pub page_rank: Ranks,
    pub visits: HashMap<String, usize, ahash::RandomState>,
    pub samples: usize,
}

impl<R: Rng> SampledPageRank<R> {
    pub fn new(g: &LinkGraph, config: &Config, rng: R) -> crate::Result<Self> {
        check_damping(config.damping)?;
        if config.samples == 0 {
            return Err(Error::invalid("samples", config.samples, "must be positive"));
        }
        if g.is_empty() {
            return Err(Error::EmptyCorpus);
        }
        let graph = g.normalize();
        let vertices: Vec<_> = graph.vertices().collect();
        let transitions = {
            let mut transitions = HashMap::with_hasher(ahash::RandomState::new());
            for u in vertices.iter() {
                let (sinks, weights): (Vec<_>, Vec<_>) =
                    transition_row(&graph, *u, config.damping).into_iter().unzip();
                let dist = WeightedIndex::new(weights).map_err(|_| {
                    Error::invalid("damping", config.damping, "leaves a page without moves")
                })?;
                transitions.insert(*u, (sinks, dist));
            }
            transitions
        };
        Ok(Self {
            graph,
            samples: config.samples,
            rng,
            vertices,
            transitions,
        })
    }
}

impl<R: Rng> PageRank for SampledPageRank<R> {
    type Ranking = self::Ranking;

    fn calc(&mut self) -> crate::Result<Self::Ranking> {
        let mut visits: HashMap<VertexId, usize, ahash::RandomState> = self
            .vertices
            .iter()
            .map(|v| (*v, 0))
            .collect();
        let mut cur = *self.vertices.choose(&mut self.rng).ok_or(Error::EmptyCorpus)?;
        tracing::debug!(
            start = self.graph.name(cur),
            samples = self.samples,
            "random walk started"
        );
        for _ in 0..self.samples {
            let (sinks, dist) = &self.transitions[&cur];
            let next = sinks[dist.sample(&mut self.rng)];
            *visits.entry(next).or_insert(0) += 1;
            cur = next;
        }
        let n = self.samples as f64;
        let page_rank: Ranks = visits
            .iter()
            .map(|(v, k)| (self.graph.name(*v).to_string(), *k as f64 / n))
            .collect();
        let visits: HashMap<_, _, ahash::RandomState> = visits
            .into_iter()
            .map(|(v, k)| (self.graph.name(v).to_string(), k))
            .collect();
        tracing::info!(
            samples = self.samples,
            visited = visits.values().filter(|k| **k > 0).count(),
            "random walk finished"
        );
        Ok(Self::Ranking {
            page_rank,
            visits,
            samples: self.samples,
        })
    }
}

impl PageRankResult for self::Ranking {
    fn page_rank(&self) -> &Ranks {
        &self.page_rank
    }

    fn debug<'a>(&'a self, graph: &'a LinkGraph) -> impl std::fmt::Debug + 'a {
        RankingDebug {
            graph,
            ranking: self,
        }
    }
}

pub struct RankingDebug<'a> {
    graph: &'a LinkGraph,
    ranking: &'a self::Ranking,
}

impl std::fmt::Debug for RankingDebug<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for page in self.graph.pages() {
            let p = self.ranking.page_rank.get(page).copied().unwrap_or(0.0);
            let k = self.ranking.visits.get(page).copied().unwrap_or(0);
            writeln!(f, "{page}: {p:?}, {k}/{}", self.ranking.samples)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page_rank::tests::RandomCorpus;
    use quickcheck_macros::quickcheck;
    use rand::{rngs::StdRng, SeedableRng};

    fn run(g: &LinkGraph, damping: f64, samples: usize, seed: u64) -> Ranking {
        let cfg = Config { damping, samples };
        let mut spr = SampledPageRank::new(g, &cfg, StdRng::seed_from_u64(seed)).unwrap();
        spr.calc().unwrap()
    }

    #[test]
    fn zero_samples() {
        let g = LinkGraph::from_links([("a", vec!["b"]), ("b", vec!["a"])]).unwrap();
        let cfg = Config {
            damping: 0.85,
            samples: 0,
        };
        let res = SampledPageRank::new(&g, &cfg, StdRng::seed_from_u64(1));
        assert!(matches!(
            res,
            Err(Error::InvalidParameter {
                name: "samples",
                ..
            })
        ));
    }

    #[test]
    fn bad_damping() {
        let g = LinkGraph::from_links([("a", vec!["b"]), ("b", vec!["a"])]).unwrap();
        let cfg = Config {
            damping: 1.5,
            samples: 10,
        };
        let res = SampledPageRank::new(&g, &cfg, StdRng::seed_from_u64(1));
        assert!(matches!(
            res,
            Err(Error::InvalidParameter {
                name: "damping",
                ..
            })
        ));
    }

    #[test]
    fn multiples_of_one_over_n() {
        const N: usize = 997;
        let g = LinkGraph::from_links([
            ("1", vec!["2"]),
            ("2", vec!["1", "3"]),
            ("3", vec!["2", "5"]),
            ("4", vec!["2", "1"]),
            ("5", vec![]),
        ])
        .unwrap();
        let res = run(&g, 0.85, N, 3407);
        // every step lands on exactly one page, so the ranks sum to N/N
        assert_eq!(res.visits.values().sum::<usize>(), N);
        for (page, rank) in res.page_rank.iter() {
            let k = res.visits[page];
            assert_eq!(*rank, k as f64 / N as f64, "{page}");
        }
    }

    #[test]
    fn same_seed_same_walk() {
        let g = LinkGraph::from_links([("a", vec!["b", "c"]), ("b", vec!["c"]), ("c", vec!["a"])])
            .unwrap();
        let r0 = run(&g, 0.85, 500, 42);
        let r1 = run(&g, 0.85, 500, 42);
        assert_eq!(r0.visits, r1.visits);
    }

    #[test]
    fn two_cycle() {
        let g = LinkGraph::from_links([("a", vec!["b"]), ("b", vec!["a"])]).unwrap();
        let res = run(&g, 0.85, 10_000, 7);
        assert!((res.page_rank["a"] - 0.5).abs() < 0.05, "{:?}", res.page_rank);
        assert!((res.page_rank["b"] - 0.5).abs() < 0.05, "{:?}", res.page_rank);
    }

    #[test]
    fn full_damping_follows_links() {
        let g = LinkGraph::from_links([("a", vec!["b"]), ("b", vec!["a"])]).unwrap();
        let res = run(&g, 1.0, 1_000, 5);
        assert_eq!(res.visits["a"], 500);
        assert_eq!(res.visits["b"], 500);
    }

    #[test]
    fn single_page() {
        let g = LinkGraph::from_links([("only", Vec::<&str>::new())]).unwrap();
        let res = run(&g, 0.85, 10, 1);
        assert_eq!(res.page_rank["only"], 1.0);
        assert_eq!(res.visits["only"], 10);
    }

    #[test]
    fn top_n_and_debug() {
        let g = LinkGraph::from_links([("a", vec!["c"]), ("b", vec!["c"]), ("c", vec!["a", "b"])])
            .unwrap();
        let res = run(&g, 0.85, 2_000, 11);
        let top = res.top_n(1);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].0, "c", "{:?}", res.page_rank);
        let dbg = format!("{:?}", res.debug(&g));
        assert_eq!(dbg.lines().count(), 3, "{dbg}");
        assert!(dbg.starts_with("a: "), "{dbg}");
    }

    #[quickcheck]
    fn visits_sum_to_samples(g: RandomCorpus, seed: u64) -> bool {
        const N: usize = 200;
        let graph = g.graph();
        let res = run(&graph, 0.85, N, seed);
        res.visits.values().sum::<usize>() == N
            && res.page_rank.values().all(|p| (0.0..=1.0).contains(p))
            && res.page_rank.keys().all(|p| graph.contains(p))
    }
}
