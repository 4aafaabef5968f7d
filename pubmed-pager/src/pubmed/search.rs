//! Count-then-page acquisition of ESearch identifiers
//!
//! A [`Search`] moves through `Created -> CountKnown -> FullyPaged`. The total
//! is queried first, the page count is derived from it, and pages are then
//! requested one at a time in increasing offset order.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::error::{PubMedError, Result, Stage};
use crate::pubmed::decoder::{extract_count, extract_identifiers};
use crate::pubmed::request::Request;
use crate::transport::Fetch;

/// Recency window used when none is given
pub const DEFAULT_BACK_DAYS: u32 = 7;
/// Page size used when none is given
pub const DEFAULT_PAGE_SIZE: usize = 1000;

/// Number of pages needed to hold `total` identifiers, `page_size` at a time
///
/// Integer ceiling division, so boundary totals never gain or lose a page.
///
/// # Panics
///
/// Panics if `page_size` is zero. [`Search`] never constructs one.
///
/// # Example
///
/// ```
/// use pubmed_pager::pubmed::page_count;
///
/// assert_eq!(page_count(3000, 1000), 3);
/// assert_eq!(page_count(2091, 50), 42);
/// assert_eq!(page_count(0, 1000), 0);
/// ```
pub fn page_count(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size)
}

/// Tunable parameters of a [`Search`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Only records published in the last `back_days` days
    pub back_days: u32,
    /// Maximum identifiers per page
    pub page_size: usize,
}

impl SearchOptions {
    pub fn new() -> Self {
        Self {
            back_days: DEFAULT_BACK_DAYS,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_back_days(mut self, back_days: u32) -> Self {
        self.back_days = back_days;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Where a [`Search`] is in the acquisition protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    /// Nothing queried yet
    Created,
    /// The total is known; pages may be requested
    CountKnown,
    /// Every page of the last `query_all` run was retrieved
    FullyPaged,
}

/// One offset-addressed slice of the matching identifiers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifierPage {
    /// Zero-based page index
    pub index: usize,
    /// Offset of the first identifier (`index * page_size`)
    pub start: usize,
    /// Identifiers in the order the service returned them
    pub ids: Vec<String>,
}

impl IdentifierPage {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Paginated ESearch query session
///
/// A search is single-use: create it, run it, take the identifiers. The
/// mutating operations take `&mut self`, so one search cannot be driven by two
/// callers at once.
///
/// # Example
///
/// ```no_run
/// use pubmed_pager::{HttpFetcher, Search, SearchOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let fetcher = HttpFetcher::new()?;
///     let options = SearchOptions::new().with_back_days(30);
///     let mut search = Search::new(fetcher, "asthma%5Btiab%5D", options)?;
///
///     search.query_all().await?;
///     println!("{} matches in {} pages", search.total().unwrap_or(0), search.pages().len());
///
///     Ok(())
/// }
/// ```
pub struct Search<F> {
    fetcher: F,
    term: String,
    back_days: u32,
    page_size: usize,
    total: Option<usize>,
    pages: Vec<IdentifierPage>,
    state: SearchState,
}

impl<F: Fetch> Search<F> {
    /// Create a search for `term`
    ///
    /// The term is opaque and expected to be pre-encoded; only emptiness is
    /// checked.
    ///
    /// # Errors
    ///
    /// * `PubMedError::InvalidQuery` - term is empty or whitespace, or the
    ///   page size is zero
    pub fn new(fetcher: F, term: impl Into<String>, options: SearchOptions) -> Result<Self> {
        let term = term.into();

        if term.trim().is_empty() {
            return Err(PubMedError::InvalidQuery(
                "search term must not be empty".to_string(),
            ));
        }
        if options.page_size == 0 {
            return Err(PubMedError::InvalidQuery(
                "page size must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            fetcher,
            term,
            back_days: options.back_days,
            page_size: options.page_size,
            total: None,
            pages: Vec::new(),
            state: SearchState::Created,
        })
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn back_days(&self) -> u32 {
        self.back_days
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Total matches, once the count query has succeeded
    pub fn total(&self) -> Option<usize> {
        self.total
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Pages accumulated by `query_all`, in index order
    ///
    /// After a failed run this holds the pages retrieved before the failure.
    pub fn pages(&self) -> &[IdentifierPage] {
        &self.pages
    }

    /// Every accumulated identifier in page order
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.pages
            .iter()
            .flat_map(|page| page.ids.iter().map(String::as_str))
    }

    /// Consume the search, returning all accumulated identifiers in page order
    pub fn into_identifiers(self) -> Vec<String> {
        self.pages.into_iter().flat_map(|page| page.ids).collect()
    }

    /// Query the total number of matching records
    ///
    /// May be called again; the latest count wins. Pages already fetched are
    /// left untouched.
    ///
    /// # Errors
    ///
    /// * `PubMedError::Transport` with `Stage::Count` - the fetch failed
    /// * `PubMedError::Decode` with `Stage::Count` - the reply was malformed
    #[instrument(skip(self), fields(term = %self.term, back_days = self.back_days))]
    pub async fn query_total(&mut self) -> Result<usize> {
        let request = Request::Count {
            back_days: self.back_days,
            term: self.term.clone(),
        };

        debug!("Making ESearch count request");
        let payload = self
            .fetcher
            .fetch(&request)
            .await
            .map_err(|source| PubMedError::Transport {
                stage: Stage::Count,
                source,
            })?;

        let total = extract_count(&payload).map_err(|source| PubMedError::Decode {
            stage: Stage::Count,
            source,
        })?;

        self.total = Some(total);
        self.state = SearchState::CountKnown;

        info!(
            total,
            pages = page_count(total, self.page_size),
            "Total result count known"
        );
        Ok(total)
    }

    /// Number of pages needed for the known total
    ///
    /// # Errors
    ///
    /// * `PubMedError::TotalUnknown` - `query_total` has not succeeded yet
    pub fn page_count(&self) -> Result<usize> {
        self.total
            .map(|total| page_count(total, self.page_size))
            .ok_or(PubMedError::TotalUnknown)
    }

    /// Query one page of identifiers
    ///
    /// The page is returned, not accumulated; `query_all` does the
    /// accumulation.
    ///
    /// # Errors
    ///
    /// * `PubMedError::TotalUnknown` - `query_total` has not succeeded yet
    /// * `PubMedError::PageOutOfRange` - `index >= page_count()`
    /// * `PubMedError::Transport` / `PubMedError::Decode` with `Stage::Page`
    #[instrument(skip(self), fields(term = %self.term, page_size = self.page_size))]
    pub async fn query_page(&self, index: usize) -> Result<IdentifierPage> {
        let page_count = self.page_count()?;
        if index >= page_count {
            return Err(PubMedError::PageOutOfRange { index, page_count });
        }

        let start = index * self.page_size;
        let stage = Stage::Page { index, start };
        let request = Request::Page {
            back_days: self.back_days,
            term: self.term.clone(),
            start,
            page_size: self.page_size,
        };

        debug!(start, "Making ESearch page request");
        let payload = self
            .fetcher
            .fetch(&request)
            .await
            .map_err(|source| PubMedError::Transport { stage, source })?;

        let ids =
            extract_identifiers(&payload).map_err(|source| PubMedError::Decode { stage, source })?;

        let expected = self.expected_page_len(index);
        if ids.len() != expected {
            // The index can move between the count and page queries
            warn!(
                index,
                expected,
                received = ids.len(),
                "Page length differs from the count"
            );
        }

        debug!(index, received = ids.len(), "Page retrieved");
        Ok(IdentifierPage { index, start, ids })
    }

    /// Query the total, then every page in order
    ///
    /// Pages from an earlier run are discarded first, and a search that was
    /// `FullyPaged` drops back to `CountKnown`. The first failing page aborts
    /// the run; the pages retrieved before it stay in `pages()` and the search
    /// stays in `CountKnown`.
    #[instrument(skip(self), fields(term = %self.term))]
    pub async fn query_all(&mut self) -> Result<()> {
        self.pages.clear();
        if self.state == SearchState::FullyPaged {
            self.state = SearchState::CountKnown;
        }
        self.query_total().await?;

        let page_count = self.page_count()?;
        for index in 0..page_count {
            match self.query_page(index).await {
                Ok(page) => self.pages.push(page),
                Err(e) => {
                    warn!(
                        index,
                        retrieved = self.pages.len(),
                        "Stopping paged search: {}",
                        e
                    );
                    return Err(e);
                }
            }
        }

        self.state = SearchState::FullyPaged;
        info!(
            pages = self.pages.len(),
            identifiers = self.identifiers().count(),
            "Paged search completed"
        );
        Ok(())
    }

    fn expected_page_len(&self, index: usize) -> usize {
        let total = self.total.unwrap_or(0);
        total
            .saturating_sub(index * self.page_size)
            .min(self.page_size)
    }
}
