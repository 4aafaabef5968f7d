//! # PubMed Pager
//!
//! A client for acquiring the full identifier set behind a PubMed search.
//! Given a search term and a recency window it asks ESearch how many records
//! match, splits that total into fixed-size pages and retrieves the PMIDs of
//! each page in order. The identifiers can then be handed to EFetch in
//! batches.
//!
//! ## Features
//!
//! - **Count-then-page protocol**: exact page arithmetic, sequential paging
//! - **Pluggable transport**: everything goes through the [`Fetch`] trait;
//!   [`HttpFetcher`] is the reqwest-backed implementation
//! - **Staged errors**: every failure says whether it came from the count
//!   query, a specific page or a record batch
//!
//! ## Quick Start
//!
//! ```no_run
//! use pubmed_pager::{HttpFetcher, Search, SearchOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let fetcher = HttpFetcher::new()?;
//!     let mut search = Search::new(
//!         &fetcher,
//!         "covid-19%5Btiab%5D",
//!         SearchOptions::new().with_back_days(30),
//!     )?;
//!
//!     search.query_all().await?;
//!
//!     for page in search.pages() {
//!         println!("page {} starts at {}: {} ids", page.index, page.start, page.len());
//!     }
//!
//!     let ids: Vec<String> = search.into_identifiers();
//!     let batches = pubmed_pager::pubmed::fetch_records(&fetcher, ids.as_slice()).await?;
//!     println!("fetched {} record batches", batches.len());
//!
//!     Ok(())
//! }
//! ```

pub mod common;
pub mod config;
pub mod error;
pub mod pubmed;
pub mod transport;

// Re-export main types for convenience
pub use common::PubMedId;
pub use config::ClientConfig;
pub use error::{MalformedResponse, PubMedError, Result, Stage, TransportError};
pub use pubmed::{IdentifierPage, Request, Search, SearchOptions, SearchState};
pub use transport::{Fetch, HttpFetcher};
