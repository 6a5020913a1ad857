//! Stock visitors. The stopping ones (`TargetVisitor`,
//! `DistanceBoundVisitor`) are also interruptors and are meant to be driven
//! with `ResumableSearch::expand_with`; the observers never interrupt and can
//! be paired with a stopping visitor through `Composite`.

mod distance_bound;
mod logging;
mod nearest_source;
mod record;
mod target;

pub use distance_bound::DistanceBoundVisitor;
pub use logging::TracingVisitor;
pub use nearest_source::NearestSourceVisitor;
pub use record::{PredecessorEdgeVisitor, RecordDiscoveryVisitor};
pub use target::TargetVisitor;
