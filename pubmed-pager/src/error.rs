use std::{fmt, result};

use thiserror::Error;

/// The step of the acquisition protocol that issued a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// The total-count query
    Count,
    /// A single identifier page
    Page { index: usize, start: usize },
    /// A batch of the record fetch
    Records { batch: usize },
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Count => write!(f, "count query"),
            Stage::Page { index, start } => write!(f, "page {} (retstart {})", index, start),
            Stage::Records { batch } => write!(f, "record batch {}", batch),
        }
    }
}

/// Failure of the fetch capability itself
///
/// The core treats these as opaque and never retries them.
#[derive(Error, Debug)]
pub enum TransportError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    /// Failure reported by a non-HTTP fetcher
    #[error("transport unavailable: {0}")]
    Unavailable(String),
}

/// The payload did not match the ESearch response contract
#[derive(Error, Debug)]
pub enum MalformedResponse {
    /// Payload is not well-formed JSON, or a field has the wrong type
    #[error("JSON parsing failed: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A required object or field is absent
    #[error("missing field `{field}`")]
    MissingField { field: &'static str },

    /// The count field is not a non-negative integer
    #[error("count `{value}` is not a non-negative integer")]
    InvalidCount { value: String },

    /// NCBI sometimes answers 200 OK with an `ERROR` field
    #[error("NCBI ESearch API error: {message}")]
    ServiceError { message: String },
}

/// Error types for paged search operations
#[derive(Error, Debug)]
pub enum PubMedError {
    /// The fetch capability failed while serving `stage`
    #[error("{stage} failed: {source}")]
    Transport {
        stage: Stage,
        #[source]
        source: TransportError,
    },

    /// The payload returned for `stage` could not be decoded
    #[error("{stage} returned a malformed response: {source}")]
    Decode {
        stage: Stage,
        #[source]
        source: MalformedResponse,
    },

    /// Pages were requested before the total count was known
    #[error("total result count is not known yet; run the count query first")]
    TotalUnknown,

    /// A page index past the last page
    #[error("page {index} is out of range: the search has {page_count} pages")]
    PageOutOfRange { index: usize, page_count: usize },

    /// Invalid query structure or parameters
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Invalid PMID format
    #[error("Invalid PMID format: {pmid}")]
    InvalidPmid { pmid: String },
}

pub type Result<T> = result::Result<T, PubMedError>;

impl PubMedError {
    /// The protocol step that failed, for transport and decode errors
    pub fn stage(&self) -> Option<Stage> {
        match self {
            PubMedError::Transport { stage, .. } | PubMedError::Decode { stage, .. } => {
                Some(*stage)
            }
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, PubMedError::Transport { .. })
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, PubMedError::Decode { .. })
    }
}
