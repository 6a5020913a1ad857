//! Coarse-grained resumable search: initialise once, then `expand` as many
//! times as needed with whatever interruptor and visitor fit the moment.

use tracing::debug;

use crate::config::SearchConfig;
use crate::engine::visit;
use crate::error::Result;
use crate::graph::SearchGraph;
use crate::state::SearchState;
use crate::visitor::{Driven, Interruptor, NeverStop, NullVisitor, Visitor};

/// Owns a `SearchState` and drives it in bounded chunks.
///
/// Nothing about loop progress is kept here; a halted `expand` leaves the
/// heap and stores exactly as the next call needs them.
#[derive(Debug, Clone)]
pub struct ResumableSearch<'g, G: SearchGraph> {
    state: SearchState<'g, G>,
}

impl<'g, G: SearchGraph> ResumableSearch<'g, G> {
    pub fn new(state: SearchState<'g, G>) -> Self {
        Self { state }
    }

    pub fn from_graph(graph: &'g G, config: SearchConfig<G>) -> Result<Self> {
        Ok(Self::new(SearchState::new(graph, config)?))
    }

    pub fn state(&self) -> &SearchState<'g, G> {
        &self.state
    }

    pub fn into_state(self) -> SearchState<'g, G> {
        self.state
    }

    /// True once the heap is empty, i.e. every reachable vertex is Black.
    pub fn is_complete(&self) -> bool {
        self.state.is_queue_empty()
    }

    /// Reset every store, fire `initialize_vertex` for every vertex, then
    /// seed `s`.
    pub fn init_from_source<V>(&mut self, s: G::Vertex, visitor: &mut V)
    where
        V: Visitor<G> + ?Sized,
    {
        self.init_from_sources(std::iter::once(s), visitor);
    }

    /// Multi-source initialisation. Repeated sources are seeded once.
    pub fn init_from_sources<I, V>(&mut self, sources: I, visitor: &mut V)
    where
        I: IntoIterator<Item = G::Vertex>,
        V: Visitor<G> + ?Sized,
    {
        self.state.reset();
        let graph = self.state.graph();
        for u in graph.vertices() {
            visitor.initialize_vertex(u, &self.state);
        }
        let seeded = self.put_sources(sources, &mut *visitor);
        debug!(
            vertices = graph.vertex_count(),
            sources = seeded,
            dense = self.state.uses_dense_storage(),
            "search initialised"
        );
    }

    /// Add `s` as a source at distance zero without resetting anything.
    /// Returns false when `s` is already queued at distance zero, or when it
    /// lies outside a dense-stored graph (nothing is touched then).
    ///
    /// A vertex that was already finalised is seeded again and its out-edges
    /// are rescanned on the next `expand`.
    pub fn put_source<V>(&mut self, s: G::Vertex, visitor: &mut V) -> bool
    where
        V: Visitor<G> + ?Sized,
    {
        if !self.state.seed(s) {
            return false;
        }
        visitor.discover_vertex(s, &self.state);
        true
    }

    /// Returns how many of `sources` were newly seeded.
    pub fn put_sources<I, V>(&mut self, sources: I, visitor: &mut V) -> usize
    where
        I: IntoIterator<Item = G::Vertex>,
        V: Visitor<G> + ?Sized,
    {
        let mut seeded = 0;
        for s in sources {
            if self.put_source(s, &mut *visitor) {
                seeded += 1;
            }
        }
        seeded
    }

    /// Run the visit loop until the heap is empty or `interruptor` fires.
    /// Returns whether the search is complete.
    ///
    /// Safe to call again after it returned `Ok(true)`: nothing happens.
    pub fn expand<I, V>(&mut self, interruptor: &I, visitor: &mut V) -> Result<bool>
    where
        I: Interruptor + ?Sized,
        V: Visitor<G> + ?Sized,
    {
        self.run(&mut Driven::new(interruptor, visitor))
    }

    /// `expand` with one object acting as both visitor and interruptor, as
    /// the stopping visitors do.
    pub fn expand_with<V>(&mut self, visitor: &mut V) -> Result<bool>
    where
        V: Visitor<G> + Interruptor + ?Sized,
    {
        self.run(visitor)
    }

    /// Run to exhaustion with no observer.
    pub fn expand_all(&mut self) -> Result<bool> {
        self.expand(&NeverStop, &mut NullVisitor)
    }

    fn run<C>(&mut self, control: &mut C) -> Result<bool>
    where
        C: Visitor<G> + Interruptor + ?Sized,
    {
        let finished = visit(&mut self.state, control)?;
        let complete = self.state.is_queue_empty();
        debug!(
            finished = finished,
            queued = self.state.queued(),
            complete = complete,
            "expand halted"
        );
        Ok(complete)
    }
}
