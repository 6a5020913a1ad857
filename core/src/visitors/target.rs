use std::collections::HashSet;

use crate::graph::{SearchGraph, VertexId};
use crate::state::SearchState;
use crate::visitor::{Interruptor, Visitor};

/// Stops the search once every target vertex is finalised.
///
/// Remembers every vertex it has seen finish, so a target added between two
/// `expand` calls that is already Black is not waited for.
#[derive(Debug, Clone)]
pub struct TargetVisitor<V> {
    targets: HashSet<V>,
    pending: HashSet<V>,
    finished: HashSet<V>,
}

impl<V: VertexId> TargetVisitor<V> {
    pub fn new(targets: impl IntoIterator<Item = V>) -> Self {
        let targets: HashSet<V> = targets.into_iter().collect();
        Self {
            pending: targets.clone(),
            targets,
            finished: HashSet::new(),
        }
    }

    pub fn add_target(&mut self, v: V) {
        self.targets.insert(v);
        if !self.finished.contains(&v) {
            self.pending.insert(v);
        }
    }

    pub fn add_targets(&mut self, targets: impl IntoIterator<Item = V>) {
        for v in targets {
            self.add_target(v);
        }
    }

    pub fn targets(&self) -> &HashSet<V> {
        &self.targets
    }

    /// Targets not finalised yet.
    pub fn pending(&self) -> &HashSet<V> {
        &self.pending
    }

    pub fn is_reached(&self, v: V) -> bool {
        self.targets.contains(&v) && self.finished.contains(&v)
    }
}

impl<G, V> Visitor<G> for TargetVisitor<V>
where
    G: SearchGraph<Vertex = V>,
    V: VertexId,
{
    fn initialize_vertex(&mut self, u: V, _state: &SearchState<'_, G>) {
        self.finished.remove(&u);
        if self.targets.contains(&u) {
            self.pending.insert(u);
        }
    }

    fn finish_vertex(&mut self, u: V, _state: &SearchState<'_, G>) {
        self.finished.insert(u);
        self.pending.remove(&u);
    }
}

impl<V> Interruptor for TargetVisitor<V> {
    fn should_stop(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchConfig;
    use crate::graph::DenseGraph;

    #[test]
    fn test_pending_shrinks_on_finish() {
        let g = DenseGraph::ring(4, 1u32);
        let state = SearchState::new(&g, SearchConfig::default()).unwrap();
        let mut t = TargetVisitor::new([1usize, 2]);
        assert!(!t.should_stop());
        Visitor::<DenseGraph<u32>>::finish_vertex(&mut t, 1, &state);
        assert!(t.is_reached(1));
        assert!(!t.should_stop());
        Visitor::<DenseGraph<u32>>::finish_vertex(&mut t, 2, &state);
        assert!(t.should_stop());
    }

    #[test]
    fn test_late_target_already_finished() {
        let g = DenseGraph::ring(4, 1u32);
        let state = SearchState::new(&g, SearchConfig::default()).unwrap();
        let mut t = TargetVisitor::new([1usize]);
        Visitor::<DenseGraph<u32>>::finish_vertex(&mut t, 3, &state);
        Visitor::<DenseGraph<u32>>::finish_vertex(&mut t, 1, &state);
        t.add_targets([3]);
        assert!(t.should_stop());
        assert!(t.is_reached(3));
    }

    #[test]
    fn test_initialize_rearms_targets() {
        let g = DenseGraph::ring(4, 1u32);
        let state = SearchState::new(&g, SearchConfig::default()).unwrap();
        let mut t = TargetVisitor::new([2usize]);
        Visitor::<DenseGraph<u32>>::finish_vertex(&mut t, 2, &state);
        assert!(t.should_stop());
        for u in 0..4 {
            Visitor::<DenseGraph<u32>>::initialize_vertex(&mut t, u, &state);
        }
        assert!(!t.should_stop());
        assert_eq!(t.pending().len(), 1);
    }

    #[test]
    fn test_empty_target_set_stops_immediately() {
        let t = TargetVisitor::<usize>::new([]);
        assert!(t.should_stop());
    }
}
