//! One-call query functions over the resumable engine.
//!
//! Each one builds a `SearchState`, drives it with the matching stock
//! visitor, and hands the populated state (and visitor, where it carries
//! results of its own) back to the caller. The states stay resumable: wrap
//! one in `ResumableSearch::new` to keep expanding it.

use crate::config::SearchConfig;
use crate::error::{Result, SearchError};
use crate::graph::SearchGraph;
use crate::resumable::ResumableSearch;
use crate::state::{Color, SearchState};
use crate::visitor::NullVisitor;
use crate::visitors::{DistanceBoundVisitor, NearestSourceVisitor, TargetVisitor};

/// A single source-to-target shortest path.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPath<V, D> {
    /// Both endpoints included.
    pub vertices: Vec<V>,
    pub distance: D,
}

impl<V, D> ShortestPath<V, D> {
    /// Number of edges on the path.
    pub fn hops(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }
}

/// Fail fast on a vertex the dense stores cannot hold.
fn ensure_vertex<G: SearchGraph>(state: &SearchState<'_, G>, v: G::Vertex) -> Result<()> {
    if state.contains_vertex(v) {
        return Ok(());
    }
    Err(SearchError::ConfigurationMismatch(format!(
        "vertex {:?} is outside the graph",
        v
    )))
}

/// Full single-source search with no early stop.
pub fn shortest_path_plain<'g, G: SearchGraph>(
    graph: &'g G,
    source: G::Vertex,
    config: SearchConfig<G>,
) -> Result<SearchState<'g, G>> {
    let mut search = ResumableSearch::from_graph(graph, config)?;
    ensure_vertex(search.state(), source)?;
    search.init_from_source(source, &mut NullVisitor);
    search.expand_all()?;
    Ok(search.into_state())
}

/// Search from `source` until every vertex in `targets` is finalised.
///
/// Unreachable targets keep the search going until the reachable part of
/// the graph is exhausted. The returned visitor can grow its target set and
/// drive the state further.
pub fn shortest_path_to_targets<'g, G, I>(
    graph: &'g G,
    source: G::Vertex,
    targets: I,
    config: SearchConfig<G>,
) -> Result<(SearchState<'g, G>, TargetVisitor<G::Vertex>)>
where
    G: SearchGraph,
    I: IntoIterator<Item = G::Vertex>,
{
    let mut visitor = TargetVisitor::new(targets);
    let mut search = ResumableSearch::from_graph(graph, config)?;
    ensure_vertex(search.state(), source)?;
    search.init_from_source(source, &mut visitor);
    search.expand_with(&mut visitor)?;
    Ok((search.into_state(), visitor))
}

/// Search from `source` until the frontier reaches `bound`. Every vertex
/// strictly closer than `bound` is Black on return.
pub fn shortest_path_within_distance<'g, G: SearchGraph>(
    graph: &'g G,
    source: G::Vertex,
    bound: G::Weight,
    config: SearchConfig<G>,
) -> Result<SearchState<'g, G>> {
    let mut visitor = DistanceBoundVisitor::new(bound);
    let mut search = ResumableSearch::from_graph(graph, config)?;
    ensure_vertex(search.state(), source)?;
    search.init_from_source(source, &mut visitor);
    search.expand_with(&mut visitor)?;
    Ok(search.into_state())
}

/// Exhaustive multi-source search; the visitor maps every reached vertex to
/// the source it is closest to.
pub fn shortest_path_nearest_source<'g, G, I>(
    graph: &'g G,
    sources: I,
    config: SearchConfig<G>,
) -> Result<(SearchState<'g, G>, NearestSourceVisitor<G::Vertex>)>
where
    G: SearchGraph,
    I: IntoIterator<Item = G::Vertex>,
{
    let mut visitor = NearestSourceVisitor::new();
    let mut search = ResumableSearch::from_graph(graph, config)?;
    let sources: Vec<G::Vertex> = sources.into_iter().collect();
    for &s in &sources {
        ensure_vertex(search.state(), s)?;
    }
    search.init_from_sources(sources, &mut visitor);
    search.expand_with(&mut visitor)?;
    Ok((search.into_state(), visitor))
}

/// Shortest path from `source` to `target`, stopping as soon as `target` is
/// final. `None` if `target` is unreachable.
pub fn shortest_path<G: SearchGraph>(
    graph: &G,
    source: G::Vertex,
    target: G::Vertex,
    config: SearchConfig<G>,
) -> Result<Option<ShortestPath<G::Vertex, G::Weight>>> {
    let (state, _) = shortest_path_to_targets(graph, source, [target], config)?;
    ensure_vertex(&state, target)?;
    if state.color(target) != Color::Black {
        return Ok(None);
    }
    Ok(state.path_to(target).map(|vertices| ShortestPath {
        vertices,
        distance: state.distance(target),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{DenseGraph, MapGraph};

    fn make_chain(n: usize) -> DenseGraph<u32> {
        DenseGraph::from_edges(n, (0..n - 1).map(|i| (i, i + 1, 1)))
    }

    fn make_star(leaves: usize) -> DenseGraph<u32> {
        DenseGraph::from_edges(leaves + 1, (1..=leaves).map(|i| (0, i, i as u32)))
    }

    fn make_ring(n: usize) -> DenseGraph<u32> {
        DenseGraph::ring(n, 1)
    }

    #[test]
    fn test_plain_on_chain() {
        let g = make_chain(5);
        let state = shortest_path_plain(&g, 0, SearchConfig::default()).unwrap();
        for v in 0..5 {
            assert_eq!(state.distance(v), v as u32);
            assert_eq!(state.color(v), Color::Black);
        }
        assert!(state.is_queue_empty());
    }

    #[test]
    fn test_plain_from_chain_end_reaches_nothing() {
        let g = make_chain(5);
        let state = shortest_path_plain(&g, 4, SearchConfig::default()).unwrap();
        assert_eq!(state.distance(4), 0);
        assert_eq!(state.distance(0), u32::MAX);
        assert_eq!(state.color(0), Color::White);
    }

    #[test]
    fn test_targets_on_ring_stop_early() {
        let g = make_ring(12);
        let (state, targets) =
            shortest_path_to_targets(&g, 4, [3, 6], SearchConfig::default()).unwrap();
        assert!(targets.pending().is_empty());
        assert_eq!(state.distance(3), 1);
        assert_eq!(state.distance(6), 2);
        assert_eq!(state.color(3), Color::Black);
        assert_eq!(state.color(6), Color::Black);
        assert!(!state.is_queue_empty());
    }

    #[test]
    fn test_unreachable_target_exhausts() {
        let g = make_chain(4);
        let (state, targets) =
            shortest_path_to_targets(&g, 2, [0], SearchConfig::default()).unwrap();
        assert!(state.is_queue_empty());
        assert!(targets.pending().contains(&0));
    }

    #[test]
    fn test_within_distance_on_star() {
        let g = make_star(6);
        let state = shortest_path_within_distance(&g, 0, 4, SearchConfig::default()).unwrap();
        for leaf in 1..4 {
            assert_eq!(state.color(leaf), Color::Black);
        }
        // leaf 4 is the first at the bound; 5 and 6 are still queued
        assert_eq!(state.color(4), Color::Black);
        assert_eq!(state.color(5), Color::Gray);
        assert_eq!(state.color(6), Color::Gray);
    }

    #[test]
    fn test_nearest_source_on_ring() {
        let g = make_ring(10);
        let (state, nearest) =
            shortest_path_nearest_source(&g, [0, 5], SearchConfig::default()).unwrap();
        assert_eq!(nearest.nearest_source(1), 0);
        assert_eq!(nearest.nearest_source(9), 0);
        assert_eq!(nearest.nearest_source(4), 5);
        assert_eq!(nearest.nearest_source(6), 5);
        assert_eq!(state.distance(2), 2);
        assert_eq!(state.distance(7), 2);
    }

    #[test]
    fn test_shortest_path_prefers_lighter_route() {
        // 0 -> 1 -> 3 costs 2 + 2, 0 -> 2 -> 3 costs 1 + 5
        let g = DenseGraph::from_edges(4, vec![(0, 1, 2u32), (1, 3, 2), (0, 2, 1), (2, 3, 5)]);
        let path = shortest_path(&g, 0, 3, SearchConfig::default())
            .unwrap()
            .unwrap();
        assert_eq!(path.vertices, vec![0, 1, 3]);
        assert_eq!(path.distance, 4);
        assert_eq!(path.hops(), 2);
    }

    #[test]
    fn test_shortest_path_to_self_and_unreachable() {
        let g = make_chain(3);
        let path = shortest_path(&g, 1, 1, SearchConfig::default())
            .unwrap()
            .unwrap();
        assert_eq!(path.vertices, vec![1]);
        assert_eq!(path.hops(), 0);
        assert_eq!(shortest_path(&g, 2, 0, SearchConfig::default()).unwrap(), None);
    }

    #[test]
    fn test_shortest_path_on_sparse_ids() {
        let g = MapGraph::from_edges(vec![(100, 200, 1.5f64), (200, 300, 0.5), (100, 300, 3.0)]);
        let path = shortest_path(&g, 100, 300, SearchConfig::default())
            .unwrap()
            .unwrap();
        assert_eq!(path.vertices, vec![100, 200, 300]);
        assert_eq!(path.distance, 2.0);
    }

    #[test]
    fn test_unknown_vertices_rejected() {
        let g = make_ring(12);
        assert!(matches!(
            shortest_path_plain(&g, 99, SearchConfig::default()),
            Err(SearchError::ConfigurationMismatch(_))
        ));
        assert!(matches!(
            shortest_path_nearest_source(&g, [0, 12], SearchConfig::default()),
            Err(SearchError::ConfigurationMismatch(_))
        ));
        assert!(matches!(
            shortest_path(&g, 0, 40, SearchConfig::default()),
            Err(SearchError::ConfigurationMismatch(_))
        ));
    }

    #[test]
    fn test_bad_config_surfaces_before_search() {
        let g = make_chain(3);
        let config = SearchConfig::default().with_infinity(0);
        assert!(matches!(
            shortest_path_plain(&g, 0, config),
            Err(SearchError::ConfigurationMismatch(_))
        ));
    }
}
