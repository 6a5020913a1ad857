use thiserror::Error;

/// Errors raised while configuring or driving a search.
///
/// Empty heaps, interruptors firing and exhausted target sets are normal
/// control flow and never show up here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// An examined edge weighs less than the configured zero. Raised before
    /// any store is touched for that edge.
    #[error("negative edge weight {weight} on edge {edge}")]
    NegativeEdgeWeight { edge: String, weight: String },

    /// decrease-key on a vertex that is not queued. This is a logic fault in
    /// the caller of the heap, not a recoverable user error.
    #[error("decrease-key on vertex {vertex} which is not in the heap")]
    InvalidDecreaseKey { vertex: String },

    /// The distance configuration (zero, infinity, compare, storage) is not
    /// coherent for the graph it was paired with.
    #[error("configuration mismatch: {0}")]
    ConfigurationMismatch(String),
}

pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = SearchError::NegativeEdgeWeight {
            edge: "1 -> 2".to_string(),
            weight: "-3".to_string(),
        };
        assert_eq!(err.to_string(), "negative edge weight -3 on edge 1 -> 2");

        let err = SearchError::ConfigurationMismatch("zero must precede infinity".to_string());
        assert!(err.to_string().starts_with("configuration mismatch"));
    }
}
