use std::collections::HashMap;

use crate::graph::{SearchGraph, VertexId};
use crate::state::SearchState;
use crate::visitor::{Interruptor, Visitor};

/// Appends every discovered vertex, sources included, in discovery order.
#[derive(Debug, Clone, Default)]
pub struct RecordDiscoveryVisitor<V> {
    pub discovered: Vec<V>,
}

impl<V> RecordDiscoveryVisitor<V> {
    pub fn new() -> Self {
        Self {
            discovered: Vec::new(),
        }
    }
}

impl<G, V> Visitor<G> for RecordDiscoveryVisitor<V>
where
    G: SearchGraph<Vertex = V>,
    V: VertexId,
{
    fn discover_vertex(&mut self, v: V, _state: &SearchState<'_, G>) {
        self.discovered.push(v);
    }
}

impl<V> Interruptor for RecordDiscoveryVisitor<V> {
    fn should_stop(&self) -> bool {
        false
    }
}

/// Keeps the edge that last improved each vertex.
///
/// The predecessor store only names the parent vertex; with parallel edges
/// this is the way to know which one the shortest path actually uses.
#[derive(Debug, Clone)]
pub struct PredecessorEdgeVisitor<V, E> {
    edges: HashMap<V, E>,
}

impl<V: VertexId, E: Copy> PredecessorEdgeVisitor<V, E> {
    pub fn new() -> Self {
        Self {
            edges: HashMap::new(),
        }
    }

    /// `None` for sources and unreached vertices.
    pub fn predecessor_edge(&self, v: V) -> Option<E> {
        self.edges.get(&v).copied()
    }
}

impl<V: VertexId, E: Copy> Default for PredecessorEdgeVisitor<V, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G> Visitor<G> for PredecessorEdgeVisitor<G::Vertex, G::Edge>
where
    G: SearchGraph,
{
    fn initialize_vertex(&mut self, u: G::Vertex, _state: &SearchState<'_, G>) {
        self.edges.remove(&u);
    }

    fn discover_vertex(&mut self, v: G::Vertex, state: &SearchState<'_, G>) {
        if state.predecessor(v) == v {
            self.edges.remove(&v);
        }
    }

    fn edge_relaxed(&mut self, e: G::Edge, state: &SearchState<'_, G>) {
        self.edges.insert(state.graph().target(e), e);
    }
}

impl<V, E> Interruptor for PredecessorEdgeVisitor<V, E> {
    fn should_stop(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchConfig;
    use crate::graph::{DenseGraph, WeightedEdge};
    use crate::resumable::ResumableSearch;
    use crate::visitor::Composite;
    use crate::visitors::TargetVisitor;

    #[test]
    fn test_parallel_edges_keep_the_lighter_one() {
        let g = DenseGraph::from_edges(3, vec![(0, 1, 5u32), (0, 1, 2), (1, 2, 1)]);
        let mut search = ResumableSearch::from_graph(&g, SearchConfig::default()).unwrap();
        let mut v = Composite::new(
            RecordDiscoveryVisitor::<usize>::new(),
            PredecessorEdgeVisitor::<usize, WeightedEdge<usize, u32>>::new(),
        );
        search.init_from_source(0, &mut v);
        search.expand_with(&mut v).unwrap();
        let (record, pred) = v.into_inner();

        assert_eq!(record.discovered, vec![0, 1, 2]);
        assert_eq!(
            pred.predecessor_edge(1),
            Some(WeightedEdge {
                source: 0,
                target: 1,
                weight: 2
            })
        );
        assert_eq!(pred.predecessor_edge(0), None);
        assert_eq!(search.state().distance(2), 3);
    }

    #[test]
    fn test_discovery_order_until_target() {
        let g = DenseGraph::from_edges(6, (0..5).map(|i| (i, i + 1, 1u32)));
        let mut search = ResumableSearch::from_graph(&g, SearchConfig::default()).unwrap();
        let mut v = Composite::new(RecordDiscoveryVisitor::new(), TargetVisitor::new([2]));
        search.init_from_source(0, &mut v);
        assert!(!search.expand_with(&mut v).unwrap());
        let (record, targets) = v.into_inner();

        // 3 is discovered while 2 is expanded, before 2 finishes
        assert_eq!(record.discovered, vec![0, 1, 2, 3]);
        assert!(targets.is_reached(2));
        assert!(search.state().is_queued(3));
    }

    #[test]
    fn test_multi_source_discovery_order() {
        let g = DenseGraph::ring(4, 1u32);
        let mut search = ResumableSearch::from_graph(&g, SearchConfig::default()).unwrap();
        let mut record = RecordDiscoveryVisitor::new();
        search.init_from_sources([0, 2], &mut record);
        search.expand_with(&mut record).unwrap();
        assert_eq!(&record.discovered[..2], &[0, 2]);
        assert_eq!(record.discovered.len(), 4);
    }
}
