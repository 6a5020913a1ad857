use tracing::trace;

use crate::graph::SearchGraph;
use crate::state::SearchState;
use crate::visitor::{Interruptor, Visitor};

/// Emits a `trace!` event for every control point.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingVisitor;

impl TracingVisitor {
    fn edge<G: SearchGraph>(event: &'static str, e: G::Edge, state: &SearchState<'_, G>) {
        let graph = state.graph();
        trace!(
            event = event,
            from = ?graph.source(e),
            to = ?graph.target(e),
            "dijkstra"
        );
    }

    fn vertex<G: SearchGraph>(event: &'static str, u: G::Vertex, state: &SearchState<'_, G>) {
        trace!(event = event, vertex = ?u, distance = ?state.distance(u), "dijkstra");
    }
}

impl<G: SearchGraph> Visitor<G> for TracingVisitor {
    fn initialize_vertex(&mut self, u: G::Vertex, state: &SearchState<'_, G>) {
        Self::vertex("initialize_vertex", u, state);
    }

    fn examine_vertex(&mut self, u: G::Vertex, state: &SearchState<'_, G>) {
        Self::vertex("examine_vertex", u, state);
    }

    fn examine_edge(&mut self, e: G::Edge, state: &SearchState<'_, G>) {
        Self::edge("examine_edge", e, state);
    }

    fn tree_edge(&mut self, e: G::Edge, state: &SearchState<'_, G>) {
        Self::edge("tree_edge", e, state);
    }

    fn discover_vertex(&mut self, v: G::Vertex, state: &SearchState<'_, G>) {
        Self::vertex("discover_vertex", v, state);
    }

    fn non_tree_edge(&mut self, e: G::Edge, state: &SearchState<'_, G>) {
        Self::edge("non_tree_edge", e, state);
    }

    fn gray_target(&mut self, e: G::Edge, state: &SearchState<'_, G>) {
        Self::edge("gray_target", e, state);
    }

    fn black_target(&mut self, e: G::Edge, state: &SearchState<'_, G>) {
        Self::edge("black_target", e, state);
    }

    fn finish_vertex(&mut self, u: G::Vertex, state: &SearchState<'_, G>) {
        Self::vertex("finish_vertex", u, state);
    }

    fn edge_relaxed(&mut self, e: G::Edge, state: &SearchState<'_, G>) {
        Self::edge("edge_relaxed", e, state);
    }

    fn edge_not_relaxed(&mut self, e: G::Edge, state: &SearchState<'_, G>) {
        Self::edge("edge_not_relaxed", e, state);
    }
}

impl Interruptor for TracingVisitor {
    fn should_stop(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchConfig;
    use crate::control::ControlPointSet;
    use crate::graph::DenseGraph;
    use crate::resumable::ResumableSearch;
    use crate::state::Color;
    use crate::stepwise::StepwiseSearch;

    #[test]
    fn test_expand_with_tracing_visitor() {
        // ring edges hit tree, gray and black targets, relaxed and not
        let g = DenseGraph::ring(6, 1u32);
        let mut search = ResumableSearch::from_graph(&g, SearchConfig::default()).unwrap();
        let mut visitor = TracingVisitor;
        search.init_from_source(0, &mut visitor);
        assert!(search.expand_with(&mut visitor).unwrap());
        assert!(!Interruptor::should_stop(&visitor));
        for v in 0..6usize {
            assert_eq!(search.state().color(v), Color::Black);
        }
        assert_eq!(search.state().distance(3), 3);
    }

    #[test]
    fn test_stepwise_with_tracing_visitor() {
        let g = DenseGraph::from_edges(3, vec![(0, 1, 4u32), (0, 2, 1), (2, 1, 1)]);
        let state = SearchState::new(&g, SearchConfig::default()).unwrap();
        let mut search =
            StepwiseSearch::with_visitor(state, [0], ControlPointSet::none(), TracingVisitor);
        assert!(!search.advance().unwrap());
        assert_eq!(search.state().distance(1), 2);
        assert_eq!(search.state().predecessor(1), 2);
    }
}
