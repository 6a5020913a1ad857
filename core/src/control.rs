use std::fmt;

/// The algorithmic events a visitor is told about and a stepwise search can
/// suspend at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlPoint {
    InitializeVertex,
    ExamineVertex,
    ExamineEdge,
    TreeEdge,
    DiscoverVertex,
    NonTreeEdge,
    GrayTarget,
    BlackTarget,
    FinishVertex,
    EdgeRelaxed,
    EdgeNotRelaxed,
}

impl ControlPoint {
    pub const ALL: [ControlPoint; 11] = [
        ControlPoint::InitializeVertex,
        ControlPoint::ExamineVertex,
        ControlPoint::ExamineEdge,
        ControlPoint::TreeEdge,
        ControlPoint::DiscoverVertex,
        ControlPoint::NonTreeEdge,
        ControlPoint::GrayTarget,
        ControlPoint::BlackTarget,
        ControlPoint::FinishVertex,
        ControlPoint::EdgeRelaxed,
        ControlPoint::EdgeNotRelaxed,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ControlPoint::InitializeVertex => "initialize_vertex",
            ControlPoint::ExamineVertex => "examine_vertex",
            ControlPoint::ExamineEdge => "examine_edge",
            ControlPoint::TreeEdge => "tree_edge",
            ControlPoint::DiscoverVertex => "discover_vertex",
            ControlPoint::NonTreeEdge => "non_tree_edge",
            ControlPoint::GrayTarget => "gray_target",
            ControlPoint::BlackTarget => "black_target",
            ControlPoint::FinishVertex => "finish_vertex",
            ControlPoint::EdgeRelaxed => "edge_relaxed",
            ControlPoint::EdgeNotRelaxed => "edge_not_relaxed",
        }
    }

    /// Whether the event is about an edge rather than a single vertex.
    pub fn is_edge_event(self) -> bool {
        matches!(
            self,
            ControlPoint::ExamineEdge
                | ControlPoint::TreeEdge
                | ControlPoint::NonTreeEdge
                | ControlPoint::GrayTarget
                | ControlPoint::BlackTarget
                | ControlPoint::EdgeRelaxed
                | ControlPoint::EdgeNotRelaxed
        )
    }

    #[inline]
    fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

impl fmt::Display for ControlPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Set of control points at which a stepwise search suspends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlPointSet(u16);

impl ControlPointSet {
    pub const fn none() -> Self {
        Self(0)
    }

    pub fn all() -> Self {
        ControlPoint::ALL.iter().fold(Self::none(), |s, &cp| s.with(cp))
    }

    pub fn only(cp: ControlPoint) -> Self {
        Self::none().with(cp)
    }

    /// The seven events a classic Dijkstra visitor observes.
    pub fn visitor_events() -> Self {
        Self::none()
            .with(ControlPoint::InitializeVertex)
            .with(ControlPoint::ExamineVertex)
            .with(ControlPoint::ExamineEdge)
            .with(ControlPoint::DiscoverVertex)
            .with(ControlPoint::FinishVertex)
            .with(ControlPoint::EdgeRelaxed)
            .with(ControlPoint::EdgeNotRelaxed)
    }

    pub fn with(self, cp: ControlPoint) -> Self {
        Self(self.0 | cp.bit())
    }

    pub fn without(self, cp: ControlPoint) -> Self {
        Self(self.0 & !cp.bit())
    }

    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub fn contains(self, cp: ControlPoint) -> bool {
        self.0 & cp.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(self) -> impl Iterator<Item = ControlPoint> {
        ControlPoint::ALL.into_iter().filter(move |cp| self.contains(*cp))
    }
}

impl FromIterator<ControlPoint> for ControlPointSet {
    fn from_iter<I: IntoIterator<Item = ControlPoint>>(iter: I) -> Self {
        iter.into_iter().fold(Self::none(), |s, cp| s.with(cp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_has_eleven() {
        assert_eq!(ControlPointSet::all().len(), 11);
        assert!(ControlPointSet::none().is_empty());
    }

    #[test]
    fn test_visitor_events() {
        let s = ControlPointSet::visitor_events();
        assert_eq!(s.len(), 7);
        assert!(s.contains(ControlPoint::EdgeNotRelaxed));
        assert!(!s.contains(ControlPoint::TreeEdge));
        assert!(!s.contains(ControlPoint::BlackTarget));
    }

    #[test]
    fn test_set_algebra() {
        let a = ControlPointSet::only(ControlPoint::FinishVertex);
        let b: ControlPointSet = [ControlPoint::TreeEdge, ControlPoint::FinishVertex]
            .into_iter()
            .collect();
        assert_eq!(a.union(b), b);
        assert_eq!(b.without(ControlPoint::TreeEdge), a);
        assert_eq!(
            b.iter().collect::<Vec<_>>(),
            vec![ControlPoint::TreeEdge, ControlPoint::FinishVertex]
        );
    }

    #[test]
    fn test_names() {
        assert_eq!(ControlPoint::GrayTarget.to_string(), "gray_target");
        assert!(ControlPoint::EdgeRelaxed.is_edge_event());
        assert!(!ControlPoint::DiscoverVertex.is_edge_event());
    }
}
