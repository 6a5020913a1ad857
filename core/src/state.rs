use std::fmt;

use tracing::warn;

use crate::config::{CombineFn, CompareFn, SearchConfig, WeightFn};
use crate::error::{Result, SearchError};
use crate::graph::SearchGraph;
use crate::heap::{HeapOrder, IndexedHeap};
use crate::store::{StoreStrategy, VertexMap, VertexStore};

/// Discovery state of a vertex. Only ever moves White -> Gray -> Black
/// between two initialisations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// Not discovered yet.
    White,
    /// Discovered, queued for finalisation.
    Gray,
    /// Popped and all out-edges relaxed; distance is final.
    Black,
}

/// Everything a search mutates: distance, predecessor and color stores, the
/// heap, and the distance semiring. Owned by exactly one driver
/// (`ResumableSearch` or `StepwiseSearch`); all loop progress lives here, so
/// a halted search resumes from these fields alone.
///
/// Outside a driving call, a vertex is queued iff it is Gray.
pub struct SearchState<'g, G: SearchGraph> {
    graph: &'g G,
    weight: Option<WeightFn<G>>,
    compare: CompareFn<G::Weight>,
    combine: CombineFn<G::Weight>,
    zero: G::Weight,
    infinity: G::Weight,
    pub(crate) distance: VertexMap<G::Vertex, G::Weight>,
    /// `None` reads as "self".
    pub(crate) predecessor: VertexMap<G::Vertex, Option<G::Vertex>>,
    pub(crate) color: VertexMap<G::Vertex, Color>,
    heap: IndexedHeap<G::Vertex>,
}

/// Heap order induced by the current distance store.
pub(crate) struct DistanceOrder<'a, V, D> {
    distance: &'a VertexMap<V, D>,
    compare: &'a dyn Fn(&D, &D) -> bool,
}

impl<V: crate::graph::VertexId, D: Clone> HeapOrder<V> for DistanceOrder<'_, V, D> {
    #[inline]
    fn precedes(&self, a: V, b: V) -> bool {
        (self.compare)(&self.distance.get(a), &self.distance.get(b))
    }
}

impl<'g, G: SearchGraph> SearchState<'g, G> {
    /// Validate `config` against `graph` and allocate the stores. Every
    /// vertex starts White at infinity with itself as predecessor.
    pub fn new(graph: &'g G, config: SearchConfig<G>) -> Result<Self> {
        if !(config.compare)(&config.zero, &config.infinity) {
            return Err(SearchError::ConfigurationMismatch(format!(
                "zero {:?} must compare strictly before infinity {:?}",
                config.zero, config.infinity
            )));
        }
        if (config.compare)(&config.zero, &config.zero) {
            return Err(SearchError::ConfigurationMismatch(
                "distance compare is not a strict order: compare(zero, zero) holds".to_string(),
            ));
        }
        let bound = graph.index_bound();
        if config.store == StoreStrategy::Dense && bound.is_none() {
            return Err(SearchError::ConfigurationMismatch(
                "dense vertex storage requires a bounded, contiguous vertex index".to_string(),
            ));
        }

        let n = graph.vertex_count();
        Ok(Self {
            graph,
            weight: config.weight,
            compare: config.compare,
            combine: config.combine,
            zero: config.zero,
            infinity: config.infinity,
            distance: VertexMap::new(config.store, bound, n, config.infinity),
            predecessor: VertexMap::new(config.store, bound, n, None),
            color: VertexMap::new(config.store, bound, n, Color::White),
            heap: IndexedHeap::new(config.store, bound, n),
        })
    }

    pub fn graph(&self) -> &'g G {
        self.graph
    }

    pub fn distance(&self, v: G::Vertex) -> G::Weight {
        self.distance.get(v)
    }

    pub fn predecessor(&self, v: G::Vertex) -> G::Vertex {
        self.predecessor.get(v).unwrap_or(v)
    }

    pub fn color(&self, v: G::Vertex) -> Color {
        self.color.get(v)
    }

    pub fn zero(&self) -> G::Weight {
        self.zero
    }

    pub fn infinity(&self) -> G::Weight {
        self.infinity
    }

    /// The configured distance order.
    pub fn compare_distances(&self, a: &G::Weight, b: &G::Weight) -> bool {
        (self.compare)(a, b)
    }

    /// The configured distance combiner.
    pub fn combine_distances(&self, a: &G::Weight, b: &G::Weight) -> G::Weight {
        (self.combine)(a, b)
    }

    /// Edge weight through the configured accessor, falling back to the
    /// graph's intrinsic weight.
    pub fn edge_weight(&self, e: G::Edge) -> G::Weight {
        match &self.weight {
            Some(weight) => weight(e),
            None => self.graph.weight(e),
        }
    }

    /// True once no vertex is waiting to be finalised.
    pub fn is_queue_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn queued(&self) -> usize {
        self.heap.len()
    }

    pub fn is_queued(&self, v: G::Vertex) -> bool {
        self.heap.contains(v)
    }

    pub fn uses_dense_storage(&self) -> bool {
        self.distance.is_dense()
    }

    /// Predecessor chain from a source to `v`, both ends included. `None`
    /// while `v` has not been reached.
    pub fn path_to(&self, v: G::Vertex) -> Option<Vec<G::Vertex>> {
        if !self.compare_distances(&self.distance(v), &self.infinity) {
            return None;
        }
        let mut path = vec![v];
        let mut current = v;
        loop {
            let parent = self.predecessor(current);
            if parent == current {
                break;
            }
            // predecessor links form a tree; a longer walk means a corrupted store
            if path.len() > self.graph.vertex_count() {
                return None;
            }
            path.push(parent);
            current = parent;
        }
        path.reverse();
        Some(path)
    }

    /// Re-derive the heap from the color store: every Gray vertex is queued
    /// afresh, nothing else is.
    pub fn rebuild_queue(&mut self) {
        self.heap.clear();
        let graph = self.graph;
        for v in graph.vertices() {
            if self.color.get(v) == Color::Gray {
                self.push(v);
            }
        }
    }

    /// Bulk reset of every store and the heap, in O(n).
    pub(crate) fn reset(&mut self) {
        self.heap.clear();
        self.color.reset(Color::White);
        self.predecessor.reset(None);
        self.distance.reset(self.infinity);
    }

    /// Whether `v` fits the stores. Always true for sparse storage.
    pub fn contains_vertex(&self, v: G::Vertex) -> bool {
        self.distance.covers(v)
    }

    /// Mark `s` as a source at distance zero and queue it. Returns false when
    /// `s` is already queued at zero, or lies outside the dense stores.
    pub(crate) fn seed(&mut self, s: G::Vertex) -> bool {
        if !self.contains_vertex(s) {
            warn!(vertex = ?s, "ignoring source outside the graph");
            return false;
        }
        let was_gray = self.color.get(s) == Color::Gray;
        if was_gray && !(self.compare)(&self.zero, &self.distance.get(s)) {
            return false;
        }
        self.color.set(s, Color::Gray);
        self.predecessor.set(s, None);
        self.distance.set(s, self.zero);
        // a gray vertex is normally queued already; zero is an improvement
        if !was_gray || self.decrease_key(s).is_err() {
            self.push(s);
        }
        true
    }

    pub(crate) fn set_color(&mut self, v: G::Vertex, c: Color) {
        self.color.set(v, c);
    }

    /// Weight of `e`, rejecting edges lighter than zero.
    pub(crate) fn checked_weight(&self, e: G::Edge) -> Result<G::Weight> {
        let w = self.edge_weight(e);
        if (self.compare)(&w, &self.zero) {
            warn!(edge = ?e, weight = ?w, "rejecting negative edge weight");
            return Err(SearchError::NegativeEdgeWeight {
                edge: format!(
                    "{:?} -> {:?}",
                    self.graph.source(e),
                    self.graph.target(e)
                ),
                weight: format!("{:?}", w),
            });
        }
        Ok(w)
    }

    fn queue(&mut self) -> (&mut IndexedHeap<G::Vertex>, DistanceOrder<'_, G::Vertex, G::Weight>) {
        (
            &mut self.heap,
            DistanceOrder {
                distance: &self.distance,
                compare: &*self.compare,
            },
        )
    }

    pub(crate) fn push(&mut self, v: G::Vertex) {
        let (heap, order) = self.queue();
        heap.push(v, &order);
    }

    pub(crate) fn pop(&mut self) -> Option<G::Vertex> {
        let (heap, order) = self.queue();
        heap.pop(&order)
    }

    pub(crate) fn decrease_key(&mut self, v: G::Vertex) -> Result<()> {
        let (heap, order) = self.queue();
        heap.decrease_key(v, &order)
    }
}

impl<G: SearchGraph> Clone for SearchState<'_, G> {
    fn clone(&self) -> Self {
        Self {
            graph: self.graph,
            weight: self.weight.clone(),
            compare: self.compare.clone(),
            combine: self.combine.clone(),
            zero: self.zero,
            infinity: self.infinity,
            distance: self.distance.clone(),
            predecessor: self.predecessor.clone(),
            color: self.color.clone(),
            heap: self.heap.clone(),
        }
    }
}

impl<G: SearchGraph> fmt::Debug for SearchState<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchState")
            .field("vertices", &self.graph.vertex_count())
            .field("queued", &self.heap.len())
            .field("dense", &self.distance.is_dense())
            .field("zero", &self.zero)
            .field("infinity", &self.infinity)
            .finish_non_exhaustive()
    }
}
