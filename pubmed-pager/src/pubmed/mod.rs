//! Paginated PubMed ESearch acquisition
//!
//! - `decoder` - pure extraction of the count and identifier list from ESearch JSON
//! - `search` - the count-then-page state machine
//! - `request` - parameters of each E-utilities request
//! - `records` - raw EFetch of records for a batch of identifiers

pub mod decoder;
pub mod records;
pub mod request;
pub(crate) mod responses;
pub mod search;

// Re-export public types
pub use decoder::{extract_count, extract_identifiers};
pub use records::{RECORD_BATCH_SIZE, RecordBatch, fetch_records, fetch_records_in_batches};
pub use request::Request;
pub use search::{
    DEFAULT_BACK_DAYS, DEFAULT_PAGE_SIZE, IdentifierPage, Search, SearchOptions, SearchState,
    page_count,
};
