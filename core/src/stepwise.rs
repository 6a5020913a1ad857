//! Single-event stepping over the same loop as the engine.
//!
//! The loop position lives in fields (phase tag, vertex and out-edge
//! cursors), so `advance` can return after any control point and pick up
//! from there on the next call. Each transition fires at most one control
//! point; `advance` keeps transitioning until one in the reportable set
//! comes up.
//!
//! While suspended inside a vertex expansion, the examined vertex is Gray but
//! no longer queued; it is Black at its `finish_vertex` step. `into_state`
//! and `into_parts` settle the search first, so the state they return can be
//! handed to any other driver.

use tracing::debug;

use crate::config::SearchConfig;
use crate::control::{ControlPoint, ControlPointSet};
use crate::error::{Result, SearchError};
use crate::graph::SearchGraph;
use crate::state::{Color, SearchState};
use crate::visitor::{dispatch, NullVisitor, Visitor};

/// One reported control point. For edge events `vertex` is the edge target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step<V, E> {
    pub control_point: ControlPoint,
    pub vertex: V,
    pub edge: Option<E>,
}

impl<V, E> Step<V, E> {
    fn at_vertex(control_point: ControlPoint, vertex: V) -> Self {
        Self {
            control_point,
            vertex,
            edge: None,
        }
    }

    fn at_edge(control_point: ControlPoint, target: V, edge: E) -> Self {
        Self {
            control_point,
            vertex: target,
            edge: Some(edge),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Initialize(usize),
    Seed(usize),
    Pop,
    NextEdge,
    Classify,
    RelaxTree,
    DiscoverTree,
    GrayTarget,
    RelaxGray,
    BlackTarget,
    Done,
}

/// The out-edge being worked on.
#[derive(Debug, Clone, Copy)]
struct EdgeCursor<V, E, W> {
    edge: E,
    target: V,
    weight: W,
}

/// Dijkstra as a generator of control-point events.
///
/// Also an `Iterator` over the reported steps; the iterator ends at the
/// first error instead of hitting it again.
#[derive(Debug)]
pub struct StepwiseSearch<'g, G: SearchGraph, V = NullVisitor> {
    state: SearchState<'g, G>,
    visitor: V,
    points: ControlPointSet,
    phase: Phase,
    vertices: Vec<G::Vertex>,
    sources: Vec<G::Vertex>,
    examined: Option<G::Vertex>,
    out_edges: Vec<G::Edge>,
    next_edge: usize,
    cursor: Option<EdgeCursor<G::Vertex, G::Edge, G::Weight>>,
    target: Option<G::Vertex>,
    current: Option<Step<G::Vertex, G::Edge>>,
    finished: usize,
    failed: bool,
}

impl<'g, G: SearchGraph> StepwiseSearch<'g, G, NullVisitor> {
    /// Fresh search from `sources`, suspending at every control point in
    /// `points`. The state is reset immediately; nothing else happens until
    /// the first `advance`.
    pub fn new<I>(state: SearchState<'g, G>, sources: I, points: ControlPointSet) -> Self
    where
        I: IntoIterator<Item = G::Vertex>,
    {
        Self::with_visitor(state, sources, points, NullVisitor)
    }

    pub fn from_graph<I>(
        graph: &'g G,
        config: SearchConfig<G>,
        sources: I,
        points: ControlPointSet,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = G::Vertex>,
    {
        Ok(Self::new(SearchState::new(graph, config)?, sources, points))
    }

    /// Continue a search that was initialised and partly expanded elsewhere,
    /// e.g. by `ResumableSearch`.
    pub fn resume(state: SearchState<'g, G>, points: ControlPointSet) -> Self {
        Self::resume_with_visitor(state, points, NullVisitor)
    }
}

impl<'g, G: SearchGraph, V: Visitor<G>> StepwiseSearch<'g, G, V> {
    /// Like `new`, with a visitor that is told about every event, reportable
    /// or not.
    pub fn with_visitor<I>(
        mut state: SearchState<'g, G>,
        sources: I,
        points: ControlPointSet,
        visitor: V,
    ) -> Self
    where
        I: IntoIterator<Item = G::Vertex>,
    {
        state.reset();
        let vertices = state.graph().vertices().collect();
        let mut search = Self::resume_with_visitor(state, points, visitor);
        search.vertices = vertices;
        search.sources = sources.into_iter().collect();
        search.phase = Phase::Initialize(0);
        search
    }

    pub fn resume_with_visitor(
        state: SearchState<'g, G>,
        points: ControlPointSet,
        visitor: V,
    ) -> Self {
        Self {
            state,
            visitor,
            points,
            phase: Phase::Pop,
            vertices: Vec::new(),
            sources: Vec::new(),
            examined: None,
            out_edges: Vec::new(),
            next_edge: 0,
            cursor: None,
            target: None,
            current: None,
            finished: 0,
            failed: false,
        }
    }

    /// Run to the next reportable control point. Returns false once the
    /// heap is empty and nothing is left to report.
    ///
    /// On error the examined vertex is queued again; a later call restarts
    /// its expansion and meets the same edge.
    pub fn advance(&mut self) -> Result<bool> {
        while self.phase != Phase::Done {
            let step = match self.transition() {
                Ok(step) => step,
                Err(err) => {
                    self.current = None;
                    return Err(err);
                }
            };
            if let Some(step) = step {
                dispatch(
                    &mut self.visitor,
                    step.control_point,
                    step.vertex,
                    step.edge,
                    &self.state,
                );
                if self.points.contains(step.control_point) {
                    self.current = Some(step);
                    return Ok(true);
                }
            }
        }
        self.current = None;
        Ok(false)
    }

    pub fn is_running(&self) -> bool {
        self.phase != Phase::Done
    }

    /// The control point the search is suspended at.
    pub fn control_point(&self) -> Option<ControlPoint> {
        self.current.map(|s| s.control_point)
    }

    pub fn step(&self) -> Option<Step<G::Vertex, G::Edge>> {
        self.current
    }

    /// The vertex the current control point is about: the vertex itself for
    /// vertex events, the edge target for edge events.
    pub fn vertex(&self) -> Option<G::Vertex> {
        self.current.map(|s| s.vertex)
    }

    /// The vertex whose out-edges are being scanned.
    pub fn examined_vertex(&self) -> Option<G::Vertex> {
        self.examined
    }

    /// Target of the last examined edge, or the last initialised or
    /// discovered vertex.
    pub fn target_vertex(&self) -> Option<G::Vertex> {
        self.target
    }

    pub fn edge(&self) -> Option<G::Edge> {
        self.current.and_then(|s| s.edge)
    }

    /// The live state. While suspended mid-expansion the examined vertex is
    /// out of the heap; use `into_state` to get a state another driver can
    /// continue.
    pub fn state(&self) -> &SearchState<'g, G> {
        &self.state
    }

    pub fn visitor(&self) -> &V {
        &self.visitor
    }

    /// Settle and give up the state. A vertex suspended mid-expansion is
    /// queued again and will be examined afresh by whoever continues.
    pub fn into_state(mut self) -> SearchState<'g, G> {
        self.settle();
        self.state
    }

    pub fn into_parts(mut self) -> (SearchState<'g, G>, V) {
        self.settle();
        (self.state, self.visitor)
    }

    /// Restore "Gray iff queued": pending initialisation and seeding run to
    /// the end, the current edge is finished, and an examined vertex that is
    /// still Gray goes back on the heap. The visitor hears every event fired
    /// on the way.
    fn settle(&mut self) {
        while !matches!(self.phase, Phase::Pop | Phase::NextEdge | Phase::Done) {
            match self.transition() {
                Ok(Some(step)) => dispatch(
                    &mut self.visitor,
                    step.control_point,
                    step.vertex,
                    step.edge,
                    &self.state,
                ),
                Ok(None) => {}
                // abandon already queued the examined vertex again
                Err(_) => break,
            }
        }
        self.current = None;
        if let Some(u) = self.examined.take() {
            if self.state.color(u) == Color::Gray && !self.state.is_queued(u) {
                self.state.push(u);
            }
        }
    }

    fn transition(&mut self) -> Result<Option<Step<G::Vertex, G::Edge>>> {
        match self.phase {
            Phase::Initialize(i) => {
                let Some(&u) = self.vertices.get(i) else {
                    self.vertices = Vec::new();
                    self.phase = Phase::Seed(0);
                    return Ok(None);
                };
                self.phase = Phase::Initialize(i + 1);
                self.target = Some(u);
                Ok(Some(Step::at_vertex(ControlPoint::InitializeVertex, u)))
            }
            Phase::Seed(i) => {
                let Some(&s) = self.sources.get(i) else {
                    debug!(
                        vertices = self.state.graph().vertex_count(),
                        sources = self.state.queued(),
                        "stepwise search initialised"
                    );
                    self.sources = Vec::new();
                    self.phase = Phase::Pop;
                    return Ok(None);
                };
                self.phase = Phase::Seed(i + 1);
                if !self.state.seed(s) {
                    return Ok(None);
                }
                self.target = Some(s);
                Ok(Some(Step::at_vertex(ControlPoint::DiscoverVertex, s)))
            }
            Phase::Pop => {
                let Some(u) = self.state.pop() else {
                    self.examined = None;
                    self.cursor = None;
                    self.phase = Phase::Done;
                    debug!(finished = self.finished, "stepwise search complete");
                    return Ok(None);
                };
                let graph = self.state.graph();
                self.examined = Some(u);
                self.out_edges.clear();
                self.out_edges.extend(graph.out_edges(u));
                self.next_edge = 0;
                self.cursor = None;
                self.phase = Phase::NextEdge;
                Ok(Some(Step::at_vertex(ControlPoint::ExamineVertex, u)))
            }
            Phase::NextEdge => {
                let Some(u) = self.examined else {
                    self.phase = Phase::Pop;
                    return Ok(None);
                };
                let Some(&edge) = self.out_edges.get(self.next_edge) else {
                    self.state.set_color(u, Color::Black);
                    self.finished += 1;
                    self.cursor = None;
                    self.phase = Phase::Pop;
                    return Ok(Some(Step::at_vertex(ControlPoint::FinishVertex, u)));
                };
                let weight = match self.state.checked_weight(edge) {
                    Ok(w) => w,
                    Err(err) => return Err(self.abandon(u, err)),
                };
                self.next_edge += 1;
                let target = self.state.graph().target(edge);
                self.cursor = Some(EdgeCursor {
                    edge,
                    target,
                    weight,
                });
                self.target = Some(target);
                self.phase = Phase::Classify;
                Ok(Some(Step::at_edge(ControlPoint::ExamineEdge, target, edge)))
            }
            Phase::Classify => {
                let Some(c) = self.cursor else {
                    return Ok(self.drop_edge());
                };
                let (cp, next) = match self.state.color(c.target) {
                    Color::White => (ControlPoint::TreeEdge, Phase::RelaxTree),
                    Color::Gray => (ControlPoint::NonTreeEdge, Phase::GrayTarget),
                    Color::Black => (ControlPoint::NonTreeEdge, Phase::BlackTarget),
                };
                self.phase = next;
                Ok(Some(Step::at_edge(cp, c.target, c.edge)))
            }
            Phase::RelaxTree => {
                let Some(c) = self.cursor else {
                    return Ok(self.drop_edge());
                };
                self.state.relax_confident(c.edge, c.weight);
                self.phase = Phase::DiscoverTree;
                Ok(Some(Step::at_edge(ControlPoint::EdgeRelaxed, c.target, c.edge)))
            }
            Phase::DiscoverTree => {
                let Some(c) = self.cursor else {
                    return Ok(self.drop_edge());
                };
                self.state.set_color(c.target, Color::Gray);
                self.state.push(c.target);
                self.phase = Phase::NextEdge;
                Ok(Some(Step::at_vertex(ControlPoint::DiscoverVertex, c.target)))
            }
            Phase::GrayTarget => {
                let Some(c) = self.cursor else {
                    return Ok(self.drop_edge());
                };
                self.phase = Phase::RelaxGray;
                Ok(Some(Step::at_edge(ControlPoint::GrayTarget, c.target, c.edge)))
            }
            Phase::RelaxGray => {
                let Some(c) = self.cursor else {
                    return Ok(self.drop_edge());
                };
                let cp = if self.state.relax(c.edge, c.weight) {
                    if let Err(err) = self.state.decrease_key(c.target) {
                        let u = self.examined.unwrap_or(c.target);
                        return Err(self.abandon(u, err));
                    }
                    ControlPoint::EdgeRelaxed
                } else {
                    ControlPoint::EdgeNotRelaxed
                };
                self.phase = Phase::NextEdge;
                Ok(Some(Step::at_edge(cp, c.target, c.edge)))
            }
            Phase::BlackTarget => {
                let Some(c) = self.cursor else {
                    return Ok(self.drop_edge());
                };
                self.phase = Phase::NextEdge;
                Ok(Some(Step::at_edge(ControlPoint::BlackTarget, c.target, c.edge)))
            }
            Phase::Done => Ok(None),
        }
    }

    /// Edge phases without a cursor: move on to the next out-edge.
    fn drop_edge(&mut self) -> Option<Step<G::Vertex, G::Edge>> {
        self.phase = Phase::NextEdge;
        None
    }

    /// Put `u` back on the heap so its expansion restarts on the next call.
    fn abandon(&mut self, u: G::Vertex, err: SearchError) -> SearchError {
        self.state.push(u);
        self.cursor = None;
        self.phase = Phase::Pop;
        err
    }
}

impl<G: SearchGraph, V: Visitor<G>> Iterator for StepwiseSearch<'_, G, V> {
    type Item = Result<Step<G::Vertex, G::Edge>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.advance() {
            Ok(true) => self.current.map(Ok),
            Ok(false) => None,
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}
