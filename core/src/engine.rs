//! The interruptible Dijkstra visit loop.
//!
//! All loop state is in `SearchState` (heap, colors, distances), so calling
//! `visit` again after it halted continues exactly where it stopped.

use crate::error::Result;
use crate::graph::SearchGraph;
use crate::state::{Color, SearchState};
use crate::visitor::{Interruptor, Visitor};

/// Run until the heap is empty or `control` asks to stop before a pop.
/// `control` observes every event and is the interruptor; see `Driven` for
/// pairing two separate objects. Returns the number of vertices finalised
/// by this call.
///
/// On error the vertex being expanded is queued again, so the state stays
/// consistent; edges it already relaxed keep their (valid) improvements.
pub(crate) fn visit<G, C>(state: &mut SearchState<'_, G>, control: &mut C) -> Result<usize>
where
    G: SearchGraph,
    C: Visitor<G> + Interruptor + ?Sized,
{
    let visitor = control;
    let mut finished = 0;
    while !state.is_queue_empty() && !visitor.should_stop() {
        let Some(u) = state.pop() else {
            break;
        };
        visitor.examine_vertex(u, state);
        if let Err(err) = scan_out_edges(state, u, visitor) {
            state.push(u);
            return Err(err);
        }
        state.set_color(u, Color::Black);
        visitor.finish_vertex(u, state);
        finished += 1;
    }
    Ok(finished)
}

fn scan_out_edges<G, V>(
    state: &mut SearchState<'_, G>,
    u: G::Vertex,
    visitor: &mut V,
) -> Result<()>
where
    G: SearchGraph,
    V: Visitor<G> + ?Sized,
{
    let graph = state.graph();
    for e in graph.out_edges(u) {
        let w = state.checked_weight(e)?;
        visitor.examine_edge(e, state);
        let v = graph.target(e);
        match state.color(v) {
            Color::White => {
                visitor.tree_edge(e, state);
                state.relax_confident(e, w);
                visitor.edge_relaxed(e, state);
                state.set_color(v, Color::Gray);
                state.push(v);
                visitor.discover_vertex(v, state);
            }
            Color::Gray => {
                visitor.non_tree_edge(e, state);
                visitor.gray_target(e, state);
                if state.relax(e, w) {
                    state.decrease_key(v)?;
                    visitor.edge_relaxed(e, state);
                } else {
                    visitor.edge_not_relaxed(e, state);
                }
            }
            // final under non-negative weights; nothing to relax
            Color::Black => {
                visitor.non_tree_edge(e, state);
                visitor.black_target(e, state);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchConfig;
    use crate::control::ControlPoint;
    use crate::graph::DenseGraph;
    use crate::visitor::{Driven, NeverStop, NullVisitor};
    use std::cell::Cell;

    /// Records the control point sequence with the vertex it concerns.
    type Graph = DenseGraph<u32>;
    type Edge = crate::graph::WeightedEdge<usize, u32>;

    #[derive(Default)]
    struct Trace(Vec<(ControlPoint, usize)>);

    impl Visitor<Graph> for Trace {
        fn examine_vertex(&mut self, u: usize, _s: &SearchState<'_, Graph>) {
            self.0.push((ControlPoint::ExamineVertex, u));
        }
        fn tree_edge(&mut self, e: Edge, _s: &SearchState<'_, Graph>) {
            self.0.push((ControlPoint::TreeEdge, e.target));
        }
        fn discover_vertex(&mut self, v: usize, s: &SearchState<'_, Graph>) {
            assert_eq!(s.color(v), Color::Gray);
            assert!(s.is_queued(v));
            self.0.push((ControlPoint::DiscoverVertex, v));
        }
        fn gray_target(&mut self, e: Edge, _s: &SearchState<'_, Graph>) {
            self.0.push((ControlPoint::GrayTarget, e.target));
        }
        fn black_target(&mut self, e: Edge, _s: &SearchState<'_, Graph>) {
            self.0.push((ControlPoint::BlackTarget, e.target));
        }
        fn edge_not_relaxed(&mut self, e: Edge, _s: &SearchState<'_, Graph>) {
            self.0.push((ControlPoint::EdgeNotRelaxed, e.target));
        }
        fn finish_vertex(&mut self, u: usize, s: &SearchState<'_, Graph>) {
            assert_eq!(s.color(u), Color::Black);
            self.0.push((ControlPoint::FinishVertex, u));
        }
    }

    #[test]
    fn test_event_order_on_chain_with_back_edge() {
        // 0 -> 1 -> 2, plus 2 -> 1
        let g = DenseGraph::from_edges(3, vec![(0, 1, 1), (1, 2, 1), (2, 1, 1)]);
        let mut state = SearchState::new(&g, SearchConfig::default()).unwrap();
        state.seed(0);
        let mut trace = Trace::default();
        let finished = visit(&mut state, &mut Driven::new(&NeverStop, &mut trace)).unwrap();
        assert_eq!(finished, 3);
        assert_eq!(
            trace.0,
            vec![
                (ControlPoint::ExamineVertex, 0),
                (ControlPoint::TreeEdge, 1),
                (ControlPoint::DiscoverVertex, 1),
                (ControlPoint::FinishVertex, 0),
                (ControlPoint::ExamineVertex, 1),
                (ControlPoint::TreeEdge, 2),
                (ControlPoint::DiscoverVertex, 2),
                (ControlPoint::FinishVertex, 1),
                (ControlPoint::ExamineVertex, 2),
                (ControlPoint::BlackTarget, 1),
                (ControlPoint::FinishVertex, 2),
            ]
        );
    }

    #[test]
    fn test_gray_target_not_improved() {
        // 0 -> 1 (1), 0 -> 2 (1), 1 -> 2 (5): 2 is gray when 1 is expanded
        let g = DenseGraph::from_edges(3, vec![(0, 1, 1), (0, 2, 1), (1, 2, 5)]);
        let mut state = SearchState::new(&g, SearchConfig::default()).unwrap();
        state.seed(0);
        let mut trace = Trace::default();
        visit(&mut state, &mut Driven::new(&NeverStop, &mut trace)).unwrap();
        assert!(trace.0.contains(&(ControlPoint::GrayTarget, 2)));
        assert!(trace.0.contains(&(ControlPoint::EdgeNotRelaxed, 2)));
        assert_eq!(state.distance(2), 1);
    }

    #[test]
    fn test_decrease_key_reorders_queue() {
        // 0 -> 1 (10), 0 -> 2 (1), 2 -> 1 (2): 1 must end at 3 through 2
        let g = DenseGraph::from_edges(3, vec![(0, 1, 10), (0, 2, 1), (2, 1, 2)]);
        let mut state = SearchState::new(&g, SearchConfig::default()).unwrap();
        state.seed(0);
        visit(&mut state, &mut NullVisitor).unwrap();
        assert_eq!(state.distance(1), 3);
        assert_eq!(state.predecessor(1), 2);
    }

    #[test]
    fn test_interruptor_checked_before_each_pop() {
        let g = DenseGraph::ring(10, 1u32);
        let mut state = SearchState::new(&g, SearchConfig::default()).unwrap();
        state.seed(0);
        let pops = Cell::new(0);
        let budget = || {
            pops.set(pops.get() + 1);
            pops.get() > 3
        };
        let finished = visit(&mut state, &mut Driven::new(&budget, &mut NullVisitor)).unwrap();
        assert_eq!(finished, 3);
        assert!(!state.is_queue_empty());

        let finished = visit(&mut state, &mut NullVisitor).unwrap();
        assert_eq!(finished, 7);
        assert_eq!(state.distance(5), 5);
    }

    #[test]
    fn test_negative_edge_keeps_vertex_queued() {
        let g = DenseGraph::from_edges(3, vec![(0, 1, 2i32), (0, 2, -1)]);
        let mut state = SearchState::new(&g, SearchConfig::default()).unwrap();
        state.seed(0);
        let err = visit(&mut state, &mut NullVisitor).unwrap_err();
        assert!(matches!(err, crate::error::SearchError::NegativeEdgeWeight { .. }));
        assert_eq!(state.color(0), Color::Gray);
        assert!(state.is_queued(0));
        assert_eq!(state.color(2), Color::White);
        assert_eq!(state.distance(2), i32::MAX);
    }
}
