use crate::distance::Distance;
use crate::graph::SearchGraph;
use crate::state::SearchState;
use crate::visitor::{Interruptor, Visitor};

/// Stops once a vertex at or beyond `bound` is finalised.
///
/// Finalisation order is non-decreasing in distance, so at that point every
/// vertex strictly within the bound is already Black.
#[derive(Debug, Clone, Copy)]
pub struct DistanceBoundVisitor<D> {
    bound: D,
    reached: bool,
}

impl<D: Distance> DistanceBoundVisitor<D> {
    pub fn new(bound: D) -> Self {
        Self {
            bound,
            reached: false,
        }
    }

    pub fn bound(&self) -> D {
        self.bound
    }

    /// Move the bound and re-arm, for reuse across `expand` calls.
    pub fn set_bound(&mut self, bound: D) {
        self.bound = bound;
        self.reached = false;
    }
}

impl<G, D> Visitor<G> for DistanceBoundVisitor<D>
where
    G: SearchGraph<Weight = D>,
    D: Distance,
{
    fn finish_vertex(&mut self, u: G::Vertex, state: &SearchState<'_, G>) {
        if !state.compare_distances(&state.distance(u), &self.bound) {
            self.reached = true;
        }
    }
}

impl<D> Interruptor for DistanceBoundVisitor<D> {
    fn should_stop(&self) -> bool {
        self.reached
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchConfig;
    use crate::graph::DenseGraph;
    use crate::store::VertexStore;

    #[test]
    fn test_fires_at_bound() {
        let g = DenseGraph::from_edges(3, vec![(0, 1, 2.5f64), (1, 2, 1.0)]);
        let mut state = SearchState::new(&g, SearchConfig::default()).unwrap();
        state.seed(0);
        let mut v = DistanceBoundVisitor::new(2.5);
        Visitor::<DenseGraph<f64>>::finish_vertex(&mut v, 0, &state);
        assert!(!v.should_stop());

        state.distance.set(1, 2.5);
        Visitor::<DenseGraph<f64>>::finish_vertex(&mut v, 1, &state);
        assert!(v.should_stop());

        v.set_bound(10.0);
        assert!(!v.should_stop());
        assert_eq!(v.bound(), 10.0);
    }
}
