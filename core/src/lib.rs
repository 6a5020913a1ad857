//! resumable-paths-core: Dijkstra shortest paths that can be paused and
//! resumed.
//!
//! All search progress (heap, colors, distances, predecessors) lives in a
//! `SearchState`, so a search can be driven in bounded chunks with
//! `ResumableSearch::expand`, one control point at a time with
//! `StepwiseSearch`, or stopped early by a visitor that doubles as an
//! interruptor. Chunked and stepwise runs end in the same state as one
//! uninterrupted run.
//!
//! Pure library: graphs are supplied through the `SearchGraph` trait;
//! `DenseGraph` and `MapGraph` are provided for contiguous and sparse ids.

mod config;
mod control;
mod distance;
mod engine;
mod error;
mod graph;
mod heap;
mod relax;
mod resumable;
mod state;
mod stepwise;
mod store;
mod traversal;
mod visitor;
pub mod visitors;

pub use config::{CombineFn, CompareFn, SearchConfig, WeightFn};
pub use control::{ControlPoint, ControlPointSet};
pub use distance::Distance;
pub use error::{Result, SearchError};
pub use graph::{DenseGraph, MapGraph, NodeId, SearchGraph, VertexId, WeightedEdge};
pub use heap::{HeapOrder, IndexedHeap};
pub use resumable::ResumableSearch;
pub use state::{Color, SearchState};
pub use stepwise::{Step, StepwiseSearch};
pub use store::{DenseStore, SparseStore, StoreStrategy, VertexMap, VertexStore};
pub use traversal::{
    shortest_path, shortest_path_nearest_source, shortest_path_plain, shortest_path_to_targets,
    shortest_path_within_distance, ShortestPath,
};
pub use visitor::{Composite, Interruptor, NeverStop, NullVisitor, Visitor};
pub use visitors::{
    DistanceBoundVisitor, NearestSourceVisitor, PredecessorEdgeVisitor, RecordDiscoveryVisitor,
    TargetVisitor, TracingVisitor,
};
