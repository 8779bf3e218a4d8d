use crate::{common::check_damping, LinkGraph, Ranks, Result};
use algograph::graph::VertexId;
use std::collections::HashSet;

/// One-step distribution of the random surfer standing on `page`.
///
/// With probability `damping` the surfer follows one of the outlinks of
/// `page` uniformly, otherwise it teleports to any page of the corpus.
/// A dangling page is read as linking to every page.
pub fn transition(graph: &LinkGraph, page: &str, damping: f64) -> Result<Ranks> {
    check_damping(damping)?;
    let u = graph.vertex(page)?;
    Ok(transition_row(graph, u, damping)
        .into_iter()
        .map(|(v, w)| (graph.name(v).to_string(), w))
        .collect())
}

/// Probabilities of moving from `u` to each vertex, in page-name order.
pub(crate) fn transition_row(graph: &LinkGraph, u: VertexId, damping: f64) -> Vec<(VertexId, f64)> {
    let n = graph.len() as f64;
    let teleport = (1.0 - damping) / n;
    let links: HashSet<VertexId, ahash::RandomState> = if graph.out_degree(u) == 0 {
        graph.vertices().collect()
    } else {
        graph.successors(u).collect()
    };
    let follow = damping / (links.len() as f64);
    graph
        .vertices()
        .map(|v| {
            if links.contains(&v) {
                (v, follow + teleport)
            } else {
                (v, teleport)
            }
        })
        .collect()
}
