use crate::{Error, Result};
use algograph::graph::*;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Link structure of a closed corpus.
///
/// Pages are identified by name. Every link target is itself a page of the
/// corpus and self-links are stripped on construction. A page without
/// outlinks is *dangling*; [`LinkGraph::normalize`] rewrites those to link to
/// every page, themselves included.
pub struct LinkGraph {
    graph: directed::TreeBackedGraph,
    names: HashMap<VertexId, String, ahash::RandomState>,
    ids: BTreeMap<String, VertexId>,
}

impl LinkGraph {
    pub fn from_links<I, P, L, Q>(links: I) -> Result<Self>
    where
        I: IntoIterator<Item = (P, L)>,
        P: Into<String>,
        L: IntoIterator<Item = Q>,
        Q: Into<String>,
    {
        let mut merged: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for (page, targets) in links {
            let page = page.into();
            let targets: BTreeSet<String> = targets
                .into_iter()
                .map(Into::into)
                .filter(|t| *t != page)
                .collect();
            merged.entry(page).or_default().extend(targets);
        }
        Self::build(merged)
    }

    fn build(links: BTreeMap<String, BTreeSet<String>>) -> Result<Self> {
        if links.is_empty() {
            return Err(Error::EmptyCorpus);
        }
        for targets in links.values() {
            if let Some(t) = targets.iter().find(|t| !links.contains_key(*t)) {
                return Err(Error::UnknownPage(t.clone()));
            }
        }
        let res = Self::assemble(&links);
        tracing::debug!(
            pages = res.len(),
            links = res.graph.edge_size(),
            dangling = res.dangling_pages().len(),
            "built link graph"
        );
        Ok(res)
    }

    fn assemble(links: &BTreeMap<String, BTreeSet<String>>) -> Self {
        let mut graph = directed::TreeBackedGraph::new();
        let mut names = HashMap::with_hasher(ahash::RandomState::new());
        let mut ids = BTreeMap::new();
        for page in links.keys() {
            let v = graph.add_vertex();
            names.insert(v, page.clone());
            ids.insert(page.clone(), v);
        }
        for (page, targets) in links.iter() {
            for t in targets.iter() {
                graph.add_edge(ids[page], ids[t]);
            }
        }
        Self { graph, names, ids }
    }

    /// Returns a new graph where every dangling page links to all pages.
    pub fn normalize(&self) -> Self {
        let all: BTreeSet<String> = self.ids.keys().cloned().collect();
        let links: BTreeMap<String, BTreeSet<String>> = self
            .ids
            .iter()
            .map(|(page, v)| {
                let targets: BTreeSet<String> = self
                    .graph
                    .out_edges(v)
                    .map(|e| self.names[&e.sink].clone())
                    .collect();
                if targets.is_empty() {
                    (page.clone(), all.clone())
                } else {
                    (page.clone(), targets)
                }
            })
            .collect();
        tracing::debug!(
            rewritten = self.dangling_pages().len(),
            "normalized dangling pages"
        );
        Self::assemble(&links)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, page: &str) -> bool {
        self.ids.contains_key(page)
    }

    /// Page names in sorted order.
    pub fn pages(&self) -> impl Iterator<Item = &str> + '_ {
        self.ids.keys().map(String::as_str)
    }

    pub fn outlinks(&self, page: &str) -> Result<BTreeSet<&str>> {
        let v = self.vertex(page)?;
        Ok(self.graph.out_edges(&v).map(|e| self.name(e.sink)).collect())
    }

    pub fn dangling_pages(&self) -> Vec<&str> {
        self.ids
            .iter()
            .filter(|(_, v)| self.out_degree(**v) == 0)
            .map(|(page, _)| page.as_str())
            .collect()
    }

    pub fn is_normalized(&self) -> bool {
        self.ids.values().all(|v| self.out_degree(*v) > 0)
    }

    pub(crate) fn vertex(&self, page: &str) -> Result<VertexId> {
        self.ids
            .get(page)
            .copied()
            .ok_or_else(|| Error::UnknownPage(page.to_string()))
    }

    pub(crate) fn name(&self, v: VertexId) -> &str {
        &self.names[&v]
    }

    /// Vertices in page-name order.
    pub(crate) fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.ids.values().copied()
    }

    pub(crate) fn out_degree(&self, v: VertexId) -> usize {
        self.graph.out_edges(&v).count()
    }

    pub(crate) fn successors(&self, v: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.graph.out_edges(&v).map(|e| e.sink)
    }
}

impl std::fmt::Debug for LinkGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (page, v) in self.ids.iter() {
            let mut sinks: Vec<_> = self.successors(*v).map(|u| self.name(u)).collect();
            sinks.sort_unstable();
            writeln!(f, "{page}: {sinks:?}")?;
        }
        Ok(())
    }
}
