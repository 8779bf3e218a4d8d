use super::*;
use crate::{
    common::{check_damping, norm_1, norm_inf},
    Error, LinkGraph, Ranks, DEFAULT_DAMPING, DEFAULT_MAX_ITERATIONS, DEFAULT_THRESHOLD,
};
use algograph::graph::VertexId;
use std::collections::{BTreeMap, HashMap};

/// PageRank by fixed-point iteration of
/// `rank(p) = (1 - d) / N + d * sum(rank(q) / |out(q)|)` over the pages `q`
/// linking to `p`, starting from the uniform distribution.
///
/// Iteration stops once no page moves by more than `threshold`.
pub struct IteratedPageRank {
    graph: LinkGraph,
    damping: f64,
    threshold: f64,
    max_iterations: usize,
    transitions: BTreeMap<(VertexId, VertexId), f64>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub damping: f64,
    pub threshold: f64,
    pub max_iterations: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            damping: DEFAULT_DAMPING,
            threshold: DEFAULT_THRESHOLD,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Ranking {
    pub page_rank: Ranks,
    pub delta: Ranks,
    pub iterations: usize,
}

type VertexRanks = HashMap<VertexId, f64, ahash::RandomState>;

impl IteratedPageRank {
    pub fn new(g: &LinkGraph, config: &Config) -> crate::Result<Self> {
        let damping = config.damping;
        check_damping(damping)?;
        if damping == 1.0 {
            return Err(Error::invalid("damping", damping, "iteration needs damping below 1"));
        }
        let threshold = config.threshold;
        if threshold.is_nan() || threshold <= 0.0 {
            return Err(Error::invalid("threshold", threshold, "must be positive"));
        }
        if config.max_iterations == 0 {
            return Err(Error::invalid(
                "max_iterations",
                config.max_iterations,
                "must be positive",
            ));
        }
        if g.is_empty() {
            return Err(Error::EmptyCorpus);
        }
        let graph = g.normalize();
        let transitions = {
            let mut transitions = BTreeMap::new();
            for u in graph.vertices() {
                let unit = damping / (graph.out_degree(u) as f64);
                for v in graph.successors(u) {
                    transitions.insert((u, v), unit);
                }
            }
            transitions
        };
        Ok(Self {
            graph,
            damping,
            threshold,
            max_iterations: config.max_iterations,
            transitions,
        })
    }

    /// Applies the recurrence once. Pages missing from `ranks` count as 0.
    pub fn step(&self, ranks: &Ranks) -> crate::Result<Ranks> {
        let mut p: VertexRanks = self.graph.vertices().map(|v| (v, 0.0)).collect();
        for (page, w) in ranks.iter() {
            p.insert(self.graph.vertex(page)?, *w);
        }
        let r = self.advance(&p);
        Ok(self.by_name(&r))
    }

    fn advance(&self, p: &VertexRanks) -> VertexRanks {
        let teleport = (1.0 - self.damping) / (self.graph.len() as f64);
        let mut r: VertexRanks = self.graph.vertices().map(|v| (v, teleport)).collect();
        for ((v0, v1), w) in self.transitions.iter() {
            let from = p[v0];
            if let Some(to) = r.get_mut(v1) {
                *to += from * w;
            }
        }
        r
    }

    fn by_name(&self, ranks: &VertexRanks) -> Ranks {
        ranks
            .iter()
            .map(|(v, w)| (self.graph.name(*v).to_string(), *w))
            .collect()
    }
}

impl PageRank for IteratedPageRank {
    type Ranking = self::Ranking;

    fn calc(&mut self) -> crate::Result<Self::Ranking> {
        let n = self.graph.len() as f64;
        let mut p: VertexRanks = self.graph.vertices().map(|v| (v, 1.0 / n)).collect();
        let mut delta: VertexRanks = HashMap::with_hasher(ahash::RandomState::new());
        tracing::debug!(
            pages = self.graph.len(),
            damping = self.damping,
            threshold = self.threshold,
            "iteration started"
        );
        for iterations in 1..=self.max_iterations {
            let r = self.advance(&p);

            delta.clear();
            for v in self.graph.vertices() {
                delta.insert(v, p[&v] - r[&v]);
            }

            let max_delta = norm_inf(&delta);
            if max_delta <= self.threshold {
                tracing::info!(
                    iterations,
                    delta = max_delta,
                    mass = norm_1(&r),
                    "iteration converged"
                );
                return Ok(Self::Ranking {
                    page_rank: self.by_name(&r),
                    delta: self.by_name(&delta),
                    iterations,
                });
            }

            p = r;
        }
        let max_delta = norm_inf(&delta);
        tracing::warn!(
            iterations = self.max_iterations,
            delta = max_delta,
            "iteration did not converge"
        );
        Err(Error::NonConvergence {
            iterations: self.max_iterations,
            delta: max_delta,
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
            let d = self.ranking.delta.get(page).copied().unwrap_or(0.0);
            writeln!(f, "{page}: {p:?}, {d:?}")?;
        }
        Ok(())
    }
}
