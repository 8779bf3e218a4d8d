use crate::{LinkGraph, Ranks};

pub trait PageRank {
    type Ranking: PageRankResult;

    fn calc(&mut self) -> crate::Result<Self::Ranking>;
}

pub trait PageRankResult {
    fn page_rank(&self) -> &Ranks;
    fn debug<'a>(&'a self, graph: &'a LinkGraph) -> impl std::fmt::Debug + 'a;

    /// The `n` highest ranked pages, ties broken by page name.
    fn top_n(&self, n: usize) -> Vec<(&str, f64)> {
        let mut ranked: Vec<_> = self
            .page_rank()
            .iter()
            .map(|(page, rank)| (page.as_str(), *rank))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(n);
        ranked
    }
}
