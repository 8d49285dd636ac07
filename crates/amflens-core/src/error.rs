//! Error type shared by the store queries, loaders and auth helpers
//!
//! Graph accessors never fail; they return `None` for absent data. Errors are
//! reserved for queries that cannot be answered and for inputs that break a
//! structural precondition.

use thiserror::Error;

/// Errors reported by amflens-core
#[derive(Debug, Error)]
pub enum AmfError {
    /// A query ran before any graph was loaded
    #[error("no AMF graph is loaded")]
    NoGraph,

    /// The loaded document does not encode a WebAPI or AsyncAPI
    #[error("the loaded document does not encode an API")]
    NotAnApi,

    /// No node of the requested kind has this id
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// The input breaks a structural assumption (empty flow list, ...)
    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// No usable model could be extracted from an HTML page
    #[error("unable to read HTML input: {0}")]
    Html(String),

    #[cfg(feature = "full-expansion")]
    #[error("JSON-LD expansion failed: {0}")]
    Expansion(String),

    #[cfg(feature = "full-expansion")]
    #[error("failed to fetch model: {0}")]
    Fetch(#[from] reqwest::Error),
}

impl AmfError {
    pub(crate) fn not_found(kind: &'static str, id: &str) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AmfError>;
