//! Four-state result of an asynchronous load.
//!
//! Each value is one point in a load sequence: a `Loading` marker followed by
//! a terminal element. Consumers match exhaustively; there is no catch-all
//! state and no nullable-field combination to get wrong.

/// Lifecycle of an asynchronous computation producing `T`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadResult<T> {
    /// Work has started and no terminal outcome is known yet.
    Loading,
    /// Work finished with a value.
    Success(T),
    /// Work finished successfully but produced nothing worth showing.
    ///
    /// Not a failure: consumers render an empty state, not an error.
    Empty { title: String, message: String },
    /// Work failed. `data` optionally carries a stale value to keep showing.
    Error { message: String, data: Option<T> },
}

impl<T> LoadResult<T> {
    pub fn loading() -> Self {
        Self::Loading
    }

    pub fn success(data: T) -> Self {
        Self::Success(data)
    }

    pub fn empty(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Empty {
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
            data: None,
        }
    }

    pub fn error_with_data(message: impl Into<String>, data: T) -> Self {
        Self::Error {
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadResult::Loading)
    }

    /// `true` for every variant that ends a load sequence.
    pub fn is_terminal(&self) -> bool {
        !self.is_loading()
    }

    pub fn as_success(&self) -> Option<&T> {
        match self {
            LoadResult::Success(data) => Some(data),
            LoadResult::Loading | LoadResult::Empty { .. } | LoadResult::Error { .. } => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            LoadResult::Error { message, .. } => Some(message),
            LoadResult::Loading | LoadResult::Success(_) | LoadResult::Empty { .. } => None,
        }
    }

    /// Stable variant name, used as a tracing field.
    pub fn kind(&self) -> &'static str {
        match self {
            LoadResult::Loading => "loading",
            LoadResult::Success(_) => "success",
            LoadResult::Empty { .. } => "empty",
            LoadResult::Error { .. } => "error",
        }
    }
}
