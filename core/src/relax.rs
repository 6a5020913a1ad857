//! Edge relaxation.
//!
//! Both primitives assume the edge weight was already checked against zero
//! by the caller (`SearchState::checked_weight`).

use crate::graph::SearchGraph;
use crate::state::SearchState;
use crate::store::VertexStore;

impl<G: SearchGraph> SearchState<'_, G> {
    /// Improve `target(e)` through `e` if `combine(d[u], w) < d[v]`.
    /// Returns whether anything changed; repeated calls with no better path
    /// are no-ops.
    pub(crate) fn relax(&mut self, e: G::Edge, w: G::Weight) -> bool {
        let graph = self.graph();
        let u = graph.source(e);
        let v = graph.target(e);
        let candidate = self.combine_distances(&self.distance.get(u), &w);
        if self.compare_distances(&candidate, &self.distance.get(v)) {
            self.distance.set(v, candidate);
            self.predecessor.set(v, Some(u));
            true
        } else {
            false
        }
    }

    /// Unconditionally route `target(e)` through `e`. Only valid on first
    /// discovery of a White target, where there is no prior distance to beat.
    pub(crate) fn relax_confident(&mut self, e: G::Edge, w: G::Weight) {
        let graph = self.graph();
        let u = graph.source(e);
        let v = graph.target(e);
        let candidate = self.combine_distances(&self.distance.get(u), &w);
        self.distance.set(v, candidate);
        self.predecessor.set(v, Some(u));
    }
}
