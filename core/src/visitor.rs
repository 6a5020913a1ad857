//! Observer and interruptor capabilities.
//!
//! A `Visitor` is told about every control point as it happens and may read
//! the search state; it cannot mutate it. An `Interruptor` is consulted
//! before each heap pop and halts the loop when it says so. One object can
//! be both (see `ResumableSearch::expand_with`).

use crate::control::ControlPoint;
use crate::graph::SearchGraph;
use crate::state::SearchState;

#[allow(unused_variables)]
pub trait Visitor<G: SearchGraph> {
    fn initialize_vertex(&mut self, u: G::Vertex, state: &SearchState<'_, G>) {}

    fn examine_vertex(&mut self, u: G::Vertex, state: &SearchState<'_, G>) {}

    fn examine_edge(&mut self, e: G::Edge, state: &SearchState<'_, G>) {}

    fn tree_edge(&mut self, e: G::Edge, state: &SearchState<'_, G>) {}

    fn discover_vertex(&mut self, v: G::Vertex, state: &SearchState<'_, G>) {}

    fn non_tree_edge(&mut self, e: G::Edge, state: &SearchState<'_, G>) {}

    fn gray_target(&mut self, e: G::Edge, state: &SearchState<'_, G>) {}

    fn black_target(&mut self, e: G::Edge, state: &SearchState<'_, G>) {}

    fn finish_vertex(&mut self, u: G::Vertex, state: &SearchState<'_, G>) {}

    fn edge_relaxed(&mut self, e: G::Edge, state: &SearchState<'_, G>) {}

    fn edge_not_relaxed(&mut self, e: G::Edge, state: &SearchState<'_, G>) {}
}

pub trait Interruptor {
    fn should_stop(&self) -> bool;
}

impl<F: Fn() -> bool> Interruptor for F {
    fn should_stop(&self) -> bool {
        self()
    }
}

/// Interruptor that never fires: run until the heap is empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverStop;

impl Interruptor for NeverStop {
    fn should_stop(&self) -> bool {
        false
    }
}

/// Visitor that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullVisitor;

impl<G: SearchGraph> Visitor<G> for NullVisitor {}

impl Interruptor for NullVisitor {
    fn should_stop(&self) -> bool {
        false
    }
}

impl<G: SearchGraph, V: Visitor<G> + ?Sized> Visitor<G> for &mut V {
    fn initialize_vertex(&mut self, u: G::Vertex, state: &SearchState<'_, G>) {
        (**self).initialize_vertex(u, state)
    }

    fn examine_vertex(&mut self, u: G::Vertex, state: &SearchState<'_, G>) {
        (**self).examine_vertex(u, state)
    }

    fn examine_edge(&mut self, e: G::Edge, state: &SearchState<'_, G>) {
        (**self).examine_edge(e, state)
    }

    fn tree_edge(&mut self, e: G::Edge, state: &SearchState<'_, G>) {
        (**self).tree_edge(e, state)
    }

    fn discover_vertex(&mut self, v: G::Vertex, state: &SearchState<'_, G>) {
        (**self).discover_vertex(v, state)
    }

    fn non_tree_edge(&mut self, e: G::Edge, state: &SearchState<'_, G>) {
        (**self).non_tree_edge(e, state)
    }

    fn gray_target(&mut self, e: G::Edge, state: &SearchState<'_, G>) {
        (**self).gray_target(e, state)
    }

    fn black_target(&mut self, e: G::Edge, state: &SearchState<'_, G>) {
        (**self).black_target(e, state)
    }

    fn finish_vertex(&mut self, u: G::Vertex, state: &SearchState<'_, G>) {
        (**self).finish_vertex(u, state)
    }

    fn edge_relaxed(&mut self, e: G::Edge, state: &SearchState<'_, G>) {
        (**self).edge_relaxed(e, state)
    }

    fn edge_not_relaxed(&mut self, e: G::Edge, state: &SearchState<'_, G>) {
        (**self).edge_not_relaxed(e, state)
    }
}

/// Runs `first` then `second` for every event.
///
/// As an interruptor it stops when either half stops, so a logging visitor
/// can ride along with a stopping one.
#[derive(Debug, Clone, Default)]
pub struct Composite<A, B> {
    pub first: A,
    pub second: B,
}

impl<A, B> Composite<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }

    pub fn into_inner(self) -> (A, B) {
        (self.first, self.second)
    }
}

impl<G: SearchGraph, A: Visitor<G>, B: Visitor<G>> Visitor<G> for Composite<A, B> {
    fn initialize_vertex(&mut self, u: G::Vertex, state: &SearchState<'_, G>) {
        self.first.initialize_vertex(u, state);
        self.second.initialize_vertex(u, state);
    }

    fn examine_vertex(&mut self, u: G::Vertex, state: &SearchState<'_, G>) {
        self.first.examine_vertex(u, state);
        self.second.examine_vertex(u, state);
    }

    fn examine_edge(&mut self, e: G::Edge, state: &SearchState<'_, G>) {
        self.first.examine_edge(e, state);
        self.second.examine_edge(e, state);
    }

    fn tree_edge(&mut self, e: G::Edge, state: &SearchState<'_, G>) {
        self.first.tree_edge(e, state);
        self.second.tree_edge(e, state);
    }

    fn discover_vertex(&mut self, v: G::Vertex, state: &SearchState<'_, G>) {
        self.first.discover_vertex(v, state);
        self.second.discover_vertex(v, state);
    }

    fn non_tree_edge(&mut self, e: G::Edge, state: &SearchState<'_, G>) {
        self.first.non_tree_edge(e, state);
        self.second.non_tree_edge(e, state);
    }

    fn gray_target(&mut self, e: G::Edge, state: &SearchState<'_, G>) {
        self.first.gray_target(e, state);
        self.second.gray_target(e, state);
    }

    fn black_target(&mut self, e: G::Edge, state: &SearchState<'_, G>) {
        self.first.black_target(e, state);
        self.second.black_target(e, state);
    }

    fn finish_vertex(&mut self, u: G::Vertex, state: &SearchState<'_, G>) {
        self.first.finish_vertex(u, state);
        self.second.finish_vertex(u, state);
    }

    fn edge_relaxed(&mut self, e: G::Edge, state: &SearchState<'_, G>) {
        self.first.edge_relaxed(e, state);
        self.second.edge_relaxed(e, state);
    }

    fn edge_not_relaxed(&mut self, e: G::Edge, state: &SearchState<'_, G>) {
        self.first.edge_not_relaxed(e, state);
        self.second.edge_not_relaxed(e, state);
    }
}

impl<A: Interruptor, B: Interruptor> Interruptor for Composite<A, B> {
    fn should_stop(&self) -> bool {
        self.first.should_stop() || self.second.should_stop()
    }
}

/// Pairs a borrowed interruptor with a borrowed visitor so the engine can
/// drive one object that is both.
pub(crate) struct Driven<'a, I: ?Sized, V: ?Sized> {
    interruptor: &'a I,
    visitor: &'a mut V,
}

impl<'a, I: ?Sized, V: ?Sized> Driven<'a, I, V> {
    pub(crate) fn new(interruptor: &'a I, visitor: &'a mut V) -> Self {
        Self { interruptor, visitor }
    }
}

impl<I: Interruptor + ?Sized, V: ?Sized> Interruptor for Driven<'_, I, V> {
    fn should_stop(&self) -> bool {
        self.interruptor.should_stop()
    }
}

impl<G: SearchGraph, I: ?Sized, V: Visitor<G> + ?Sized> Visitor<G> for Driven<'_, I, V> {
    fn initialize_vertex(&mut self, u: G::Vertex, state: &SearchState<'_, G>) {
        self.visitor.initialize_vertex(u, state)
    }

    fn examine_vertex(&mut self, u: G::Vertex, state: &SearchState<'_, G>) {
        self.visitor.examine_vertex(u, state)
    }

    fn examine_edge(&mut self, e: G::Edge, state: &SearchState<'_, G>) {
        self.visitor.examine_edge(e, state)
    }

    fn tree_edge(&mut self, e: G::Edge, state: &SearchState<'_, G>) {
        self.visitor.tree_edge(e, state)
    }

    fn discover_vertex(&mut self, v: G::Vertex, state: &SearchState<'_, G>) {
        self.visitor.discover_vertex(v, state)
    }

    fn non_tree_edge(&mut self, e: G::Edge, state: &SearchState<'_, G>) {
        self.visitor.non_tree_edge(e, state)
    }

    fn gray_target(&mut self, e: G::Edge, state: &SearchState<'_, G>) {
        self.visitor.gray_target(e, state)
    }

    fn black_target(&mut self, e: G::Edge, state: &SearchState<'_, G>) {
        self.visitor.black_target(e, state)
    }

    fn finish_vertex(&mut self, u: G::Vertex, state: &SearchState<'_, G>) {
        self.visitor.finish_vertex(u, state)
    }

    fn edge_relaxed(&mut self, e: G::Edge, state: &SearchState<'_, G>) {
        self.visitor.edge_relaxed(e, state)
    }

    fn edge_not_relaxed(&mut self, e: G::Edge, state: &SearchState<'_, G>) {
        self.visitor.edge_not_relaxed(e, state)
    }
}

/// Fire the visitor callback matching `cp`. Vertex events take `vertex`,
/// edge events take `edge`; the unused one is ignored.
pub(crate) fn dispatch<G, V>(
    visitor: &mut V,
    cp: ControlPoint,
    vertex: G::Vertex,
    edge: Option<G::Edge>,
    state: &SearchState<'_, G>,
) where
    G: SearchGraph,
    V: Visitor<G> + ?Sized,
{
    match (cp, edge) {
        (ControlPoint::InitializeVertex, _) => visitor.initialize_vertex(vertex, state),
        (ControlPoint::ExamineVertex, _) => visitor.examine_vertex(vertex, state),
        (ControlPoint::DiscoverVertex, _) => visitor.discover_vertex(vertex, state),
        (ControlPoint::FinishVertex, _) => visitor.finish_vertex(vertex, state),
        (ControlPoint::ExamineEdge, Some(e)) => visitor.examine_edge(e, state),
        (ControlPoint::TreeEdge, Some(e)) => visitor.tree_edge(e, state),
        (ControlPoint::NonTreeEdge, Some(e)) => visitor.non_tree_edge(e, state),
        (ControlPoint::GrayTarget, Some(e)) => visitor.gray_target(e, state),
        (ControlPoint::BlackTarget, Some(e)) => visitor.black_target(e, state),
        (ControlPoint::EdgeRelaxed, Some(e)) => visitor.edge_relaxed(e, state),
        (ControlPoint::EdgeNotRelaxed, Some(e)) => visitor.edge_not_relaxed(e, state),
        (_, None) => debug_assert!(false, "edge event {} without an edge", cp),
    }
}
