use std::collections::HashMap;

use crate::graph::{SearchGraph, VertexId};
use crate::state::SearchState;
use crate::visitor::{Interruptor, Visitor};

/// For multi-source searches: which source each vertex is closest to.
///
/// A vertex with no entry is its own nearest source, which is what every
/// source is and what unreached vertices read as.
#[derive(Debug, Clone, Default)]
pub struct NearestSourceVisitor<V> {
    nearest: HashMap<V, V>,
}

impl<V: VertexId> NearestSourceVisitor<V> {
    pub fn new() -> Self {
        Self {
            nearest: HashMap::new(),
        }
    }

    pub fn nearest_source(&self, v: V) -> V {
        self.nearest.get(&v).copied().unwrap_or(v)
    }

    /// Vertices assigned to a source other than themselves.
    pub fn assignments(&self) -> impl Iterator<Item = (V, V)> + '_ {
        self.nearest.iter().map(|(&v, &s)| (v, s))
    }
}

impl<G, V> Visitor<G> for NearestSourceVisitor<V>
where
    G: SearchGraph<Vertex = V>,
    V: VertexId,
{
    fn initialize_vertex(&mut self, u: V, _state: &SearchState<'_, G>) {
        self.nearest.remove(&u);
    }

    fn discover_vertex(&mut self, v: V, state: &SearchState<'_, G>) {
        // seeded sources have no predecessor
        if state.predecessor(v) == v {
            self.nearest.remove(&v);
        }
    }

    fn edge_relaxed(&mut self, e: G::Edge, state: &SearchState<'_, G>) {
        let graph = state.graph();
        let source = self.nearest_source(graph.source(e));
        self.nearest.insert(graph.target(e), source);
    }
}

impl<V> Interruptor for NearestSourceVisitor<V> {
    fn should_stop(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::DenseGraph;
    use crate::resumable::ResumableSearch;
    use crate::config::SearchConfig;

    #[test]
    fn test_two_sources_split_a_chain() {
        // 0 - 1 - 2 - 3 - 4 - 5 - 6, sources 0 and 6
        let edges = (0..6).flat_map(|v| [(v, v + 1, 1u32), (v + 1, v, 1u32)]);
        let g = DenseGraph::from_edges(7, edges);
        let mut search = ResumableSearch::from_graph(&g, SearchConfig::default()).unwrap();
        let mut nearest = NearestSourceVisitor::<usize>::new();
        search.init_from_sources([0, 6], &mut nearest);
        search.expand_with(&mut nearest).unwrap();

        for v in 0..3 {
            assert_eq!(nearest.nearest_source(v), 0);
        }
        for v in 4..7 {
            assert_eq!(nearest.nearest_source(v), 6);
        }
        // equidistant: whichever source reached it first
        assert!(matches!(nearest.nearest_source(3), 0 | 6));
        assert_eq!(search.state().distance(3), 3);
    }

    #[test]
    fn test_later_improvement_reassigns() {
        // 0 -> 2 (10), 1 -> 2 (1): 2 first relaxed from 0, then improved from 1
        let g = DenseGraph::from_edges(3, vec![(0, 2, 10u32), (1, 2, 1)]);
        let mut search = ResumableSearch::from_graph(&g, SearchConfig::default()).unwrap();
        let mut nearest = NearestSourceVisitor::<usize>::new();
        search.init_from_sources([0, 1], &mut nearest);
        search.expand_with(&mut nearest).unwrap();
        assert_eq!(nearest.nearest_source(2), 1);
        assert_eq!(nearest.assignments().count(), 1);
    }
}
