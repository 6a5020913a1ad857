use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::distance::Distance;

/// Vertex identifier handed out by a graph.
///
/// `index` is the position of the vertex in a dense store. It only has to be
/// meaningful when the owning graph reports an `index_bound`.
pub trait VertexId: Copy + Eq + Hash + Debug + 'static {
    fn index(self) -> Option<usize>;
}

impl VertexId for usize {
    #[inline]
    fn index(self) -> Option<usize> {
        Some(self)
    }
}

macro_rules! int_vertex_id {
    ($($t:ty),*) => {
        $(
            impl VertexId for $t {
                #[inline]
                fn index(self) -> Option<usize> {
                    usize::try_from(self).ok()
                }
            }
        )*
    };
}

int_vertex_id!(u16, u32, u64, i32, i64);

/// Read-only adjacency the search engine walks.
///
/// The engine never mutates the graph. Out-edge order is whatever the
/// implementation yields; it only has to be stable if callers rely on
/// identical event sequences across runs.
pub trait SearchGraph {
    type Vertex: VertexId;
    type Edge: Copy + Debug;
    type Weight: Distance;

    fn vertices(&self) -> impl Iterator<Item = Self::Vertex> + '_;

    fn out_edges(&self, u: Self::Vertex) -> impl Iterator<Item = Self::Edge> + '_;

    fn source(&self, e: Self::Edge) -> Self::Vertex;

    fn target(&self, e: Self::Edge) -> Self::Vertex;

    /// Intrinsic edge weight, used unless the search configuration overrides it.
    fn weight(&self, e: Self::Edge) -> Self::Weight;

    fn vertex_count(&self) -> usize;

    /// Exclusive upper bound of `VertexId::index` over all vertices, when the
    /// id domain is bounded and contiguous. `None` forces sparse storage.
    fn index_bound(&self) -> Option<usize> {
        None
    }
}

/// A directed, weighted edge as stored in the adjacency lists below.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedEdge<V, W> {
    pub source: V,
    pub target: V,
    pub weight: W,
}

/// Adjacency list over the contiguous vertex range `0..n`.
///
/// Supports dense per-vertex storage.
#[derive(Debug, Clone)]
pub struct DenseGraph<W> {
    outgoing: Vec<Vec<WeightedEdge<usize, W>>>,
    edge_count: usize,
}

impl<W: Distance> DenseGraph<W> {
    /// Build from `(from, to, weight)` triples. Endpoints at or beyond
    /// `vertex_count` grow the vertex range.
    pub fn from_edges<I>(vertex_count: usize, edges: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize, W)>,
    {
        let mut outgoing: Vec<Vec<WeightedEdge<usize, W>>> = vec![Vec::new(); vertex_count];
        let mut edge_count = 0;
        for (from, to, weight) in edges {
            let needed = from.max(to) + 1;
            if needed > outgoing.len() {
                outgoing.resize_with(needed, Vec::new);
            }
            outgoing[from].push(WeightedEdge { source: from, target: to, weight });
            edge_count += 1;
        }
        Self { outgoing, edge_count }
    }

    /// Bidirectional ring: `i <-> (i + 1) % n`, every edge weighing `weight`.
    pub fn ring(n: usize, weight: W) -> Self {
        Self::from_edges(
            n,
            (0..n).flat_map(|i| {
                let j = (i + 1) % n;
                [(i, j, weight), (j, i, weight)]
            }),
        )
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Approximate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        let lists = self.outgoing.len() * size_of::<Vec<WeightedEdge<usize, W>>>();
        let edges: usize = self
            .outgoing
            .iter()
            .map(|v| v.capacity() * size_of::<WeightedEdge<usize, W>>())
            .sum();
        lists + edges
    }
}

impl<W: Distance> SearchGraph for DenseGraph<W> {
    type Vertex = usize;
    type Edge = WeightedEdge<usize, W>;
    type Weight = W;

    fn vertices(&self) -> impl Iterator<Item = usize> + '_ {
        0..self.outgoing.len()
    }

    fn out_edges(&self, u: usize) -> impl Iterator<Item = Self::Edge> + '_ {
        self.outgoing
            .get(u)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
            .iter()
            .copied()
    }

    fn source(&self, e: Self::Edge) -> usize {
        e.source
    }

    fn target(&self, e: Self::Edge) -> usize {
        e.target
    }

    fn weight(&self, e: Self::Edge) -> W {
        e.weight
    }

    fn vertex_count(&self) -> usize {
        self.outgoing.len()
    }

    fn index_bound(&self) -> Option<usize> {
        Some(self.outgoing.len())
    }
}

/// External node identifier for graphs without a contiguous id space.
pub type NodeId = u64;

/// Hash-map adjacency keyed by arbitrary `NodeId`s.
///
/// Reports no index bound, so searches over it use sparse stores.
/// Vertices enumerate in first-seen order.
#[derive(Debug, Clone)]
pub struct MapGraph<W> {
    outgoing: HashMap<NodeId, Vec<WeightedEdge<NodeId, W>>>,
    nodes: Vec<NodeId>,
}

impl<W: Distance> MapGraph<W> {
    /// Bulk load from `(from, to, weight)` triples; both endpoints are registered.
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (NodeId, NodeId, W)>,
    {
        let mut graph = Self {
            outgoing: HashMap::new(),
            nodes: Vec::new(),
        };
        for (from, to, weight) in edges {
            graph.register(from);
            graph.register(to);
            if let Some(list) = graph.outgoing.get_mut(&from) {
                list.push(WeightedEdge { source: from, target: to, weight });
            }
        }
        graph
    }

    fn register(&mut self, id: NodeId) {
        if let Entry::Vacant(slot) = self.outgoing.entry(id) {
            slot.insert(Vec::new());
            self.nodes.push(id);
        }
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.outgoing.contains_key(&id)
    }

    pub fn edge_count(&self) -> usize {
        self.outgoing.values().map(|v| v.len()).sum()
    }
}

impl<W: Distance> SearchGraph for MapGraph<W> {
    type Vertex = NodeId;
    type Edge = WeightedEdge<NodeId, W>;
    type Weight = W;

    fn vertices(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().copied()
    }

    fn out_edges(&self, u: NodeId) -> impl Iterator<Item = Self::Edge> + '_ {
        self.outgoing
            .get(&u)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
            .iter()
            .copied()
    }

    fn source(&self, e: Self::Edge) -> NodeId {
        e.source
    }

    fn target(&self, e: Self::Edge) -> NodeId {
        e.target
    }

    fn weight(&self, e: Self::Edge) -> W {
        e.weight
    }

    fn vertex_count(&self) -> usize {
        self.nodes.len()
    }
}
