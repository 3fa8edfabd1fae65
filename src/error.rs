use std::collections::TryReserveError;
use thiserror::Error;

/// Errors surfaced when building a search engine or binding a target.
/// Searching itself is infallible once construction has succeeded.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The pattern (or another argument) cannot be searched for: it is
    /// empty, or consists entirely of ignorable characters at the
    /// configured strength.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// A preallocated buffer or table could not be allocated.
    #[error("allocation failed during engine construction")]
    OutOfMemory(#[from] TryReserveError),

    /// The collator configuration is outside what the engine supports.
    #[error("unsupported configuration: {0}")]
    Unsupported(&'static str),

    /// A pattern weight has no decomposition in the inverse index, so no
    /// safe skip distance exists. The engine cannot search for this
    /// pattern under this collator configuration; callers may rebuild
    /// with a richer index or fall back to
    /// [`SearchEngine::simple_search`](crate::SearchEngine::simple_search).
    #[error("no character decomposition for pattern weight {weight:#010X}")]
    DataDependency {
        /// The first pattern weight for which the solver dead-ended.
        weight: u32,
    },
}
