use thiserror::Error;

/// Contract violations surfaced by the engine.
///
/// A search that terminates without finding a goal is not an error; it is
/// reported as a `SearchResult` with `success = false`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("pop from an empty frontier")]
    EmptyFrontier,

    #[error("action {action} is not legal in state {state}")]
    InvalidAction { state: String, action: String },
}
