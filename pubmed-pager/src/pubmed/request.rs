//! E-utilities request parameters
//!
//! A [`Request`] describes what the pager asks for; how it travels (HTTP
//! method, headers, identification parameters) belongs to the fetcher.

use crate::common::PubMedId;

/// Endpoint serving search requests
pub const ESEARCH_ENDPOINT: &str = "esearch.fcgi";
/// Endpoint serving record requests
pub const EFETCH_ENDPOINT: &str = "efetch.fcgi";

/// One request issued through a [`Fetch`](crate::transport::Fetch) capability
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Total number of records matching `term` in the last `back_days` days
    Count { back_days: u32, term: String },
    /// Up to `page_size` identifiers starting at offset `start`
    Page {
        back_days: u32,
        term: String,
        start: usize,
        page_size: usize,
    },
    /// Full records for a batch of identifiers
    Records { ids: Vec<PubMedId> },
}

impl Request {
    pub fn endpoint(&self) -> &'static str {
        match self {
            Request::Count { .. } | Request::Page { .. } => ESEARCH_ENDPOINT,
            Request::Records { .. } => EFETCH_ENDPOINT,
        }
    }

    /// Query string for this request, without a leading `?`
    ///
    /// The search term is appended verbatim: it is expected to arrive already
    /// percent-encoded and its grammar belongs to the service.
    ///
    /// # Example
    ///
    /// ```
    /// use pubmed_pager::pubmed::Request;
    ///
    /// let request = Request::Page {
    ///     back_days: 7,
    ///     term: "asthma%5Btiab%5D".to_string(),
    ///     start: 1000,
    ///     page_size: 1000,
    /// };
    /// assert_eq!(
    ///     request.query_string(),
    ///     "db=pubmed&retmode=json&reldate=7&datetype=pdat&retstart=1000&retmax=1000&term=asthma%5Btiab%5D"
    /// );
    /// ```
    pub fn query_string(&self) -> String {
        match self {
            Request::Count { back_days, term } => format!(
                "db=pubmed&retmode=json&reldate={}&datetype=pdat&term={}&rettype=count",
                back_days, term
            ),
            Request::Page {
                back_days,
                term,
                start,
                page_size,
            } => format!(
                "db=pubmed&retmode=json&reldate={}&datetype=pdat&retstart={}&retmax={}&term={}",
                back_days, start, page_size, term
            ),
            Request::Records { ids } => {
                let id_list = ids
                    .iter()
                    .map(|id| id.to_string())
                    .collect::<Vec<_>>()
                    .join(",");
                format!("db=pubmed&retmode=xml&rettype=abstract&id={}", id_list)
            }
        }
    }

    /// Path plus query string relative to the E-utilities base URL
    pub fn path_and_query(&self) -> String {
        format!("{}?{}", self.endpoint(), self.query_string())
    }
}
