//! Per-vertex storage.
//!
//! `VertexStore` is the capability the search state needs from a per-vertex
//! map. Two strategies implement it: `DenseStore` indexes a `Vec` by
//! `VertexId::index` (O(1), needs a bounded contiguous id domain) and
//! `SparseStore` hashes arbitrary ids. `VertexMap` picks one at runtime.

use std::collections::HashMap;

use crate::graph::VertexId;

/// Requested storage strategy for per-vertex state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreStrategy {
    /// Dense when the graph reports an index bound, sparse otherwise.
    #[default]
    Auto,
    Dense,
    Sparse,
}

pub trait VertexStore<V, T> {
    fn get(&self, v: V) -> T;

    fn set(&mut self, v: V, value: T);

    /// Set every vertex to `value` in one pass.
    fn reset(&mut self, value: T);
}

/// `Vec`-backed store over `0..len`.
#[derive(Debug, Clone)]
pub struct DenseStore<T> {
    values: Vec<T>,
}

impl<T: Clone> DenseStore<T> {
    pub fn filled(len: usize, value: T) -> Self {
        Self {
            values: vec![value; len],
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[inline]
fn slot<V: VertexId>(v: V) -> usize {
    match v.index() {
        Some(i) => i,
        None => panic!("vertex {:?} has no dense index", v),
    }
}

impl<V: VertexId, T: Clone> VertexStore<V, T> for DenseStore<T> {
    #[inline]
    fn get(&self, v: V) -> T {
        self.values[slot(v)].clone()
    }

    #[inline]
    fn set(&mut self, v: V, value: T) {
        self.values[slot(v)] = value;
    }

    fn reset(&mut self, value: T) {
        self.values.fill(value);
    }
}

/// Hash-map store; unset vertices read as the fill value.
#[derive(Debug, Clone)]
pub struct SparseStore<V, T> {
    values: HashMap<V, T>,
    fill: T,
}

impl<V: VertexId, T: Clone> SparseStore<V, T> {
    pub fn new(fill: T) -> Self {
        Self {
            values: HashMap::new(),
            fill,
        }
    }

    pub fn with_capacity(capacity: usize, fill: T) -> Self {
        Self {
            values: HashMap::with_capacity(capacity),
            fill,
        }
    }
}

impl<V: VertexId, T: Clone> VertexStore<V, T> for SparseStore<V, T> {
    #[inline]
    fn get(&self, v: V) -> T {
        self.values.get(&v).unwrap_or(&self.fill).clone()
    }

    #[inline]
    fn set(&mut self, v: V, value: T) {
        self.values.insert(v, value);
    }

    fn reset(&mut self, value: T) {
        self.values.clear();
        self.fill = value;
    }
}

/// Runtime-selected store.
#[derive(Debug, Clone)]
pub enum VertexMap<V, T> {
    Dense(DenseStore<T>),
    Sparse(SparseStore<V, T>),
}

impl<V: VertexId, T: Clone> VertexMap<V, T> {
    /// Resolve `strategy` against the graph's `index_bound`. `Dense` without
    /// a bound is a configuration error; callers check that beforehand, so
    /// here it degrades to sparse.
    pub fn new(
        strategy: StoreStrategy,
        index_bound: Option<usize>,
        capacity: usize,
        fill: T,
    ) -> Self {
        match (strategy, index_bound) {
            (StoreStrategy::Auto | StoreStrategy::Dense, Some(len)) => {
                VertexMap::Dense(DenseStore::filled(len, fill))
            }
            _ => VertexMap::Sparse(SparseStore::with_capacity(capacity, fill)),
        }
    }

    pub fn is_dense(&self) -> bool {
        matches!(self, VertexMap::Dense(_))
    }

    /// Whether `v` can be stored. Sparse maps take any vertex; dense ones
    /// only indices below their length.
    pub fn covers(&self, v: V) -> bool {
        match self {
            VertexMap::Dense(s) => v.index().is_some_and(|i| i < s.len()),
            VertexMap::Sparse(_) => true,
        }
    }
}

impl<V: VertexId, T: Clone> VertexStore<V, T> for VertexMap<V, T> {
    #[inline]
    fn get(&self, v: V) -> T {
        match self {
            VertexMap::Dense(s) => s.get(v),
            VertexMap::Sparse(s) => s.get(v),
        }
    }

    #[inline]
    fn set(&mut self, v: V, value: T) {
        match self {
            VertexMap::Dense(s) => s.set(v, value),
            VertexMap::Sparse(s) => s.set(v, value),
        }
    }

    fn reset(&mut self, value: T) {
        match self {
            VertexMap::Dense(s) => VertexStore::<V, T>::reset(s, value),
            VertexMap::Sparse(s) => s.reset(value),
        }
    }
}
