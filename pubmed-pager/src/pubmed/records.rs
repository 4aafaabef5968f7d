//! Raw EFetch of records for identifiers produced by a [`Search`](super::Search)
//!
//! Records come back as the service's XML, unparsed. Mapping them onto a
//! bibliographic model is left to the caller.

use tracing::{debug, info, instrument};

use crate::common::PubMedId;
use crate::error::{PubMedError, Result, Stage};
use crate::pubmed::request::Request;
use crate::transport::Fetch;

/// NCBI recommends batches of up to 200 IDs per request
pub const RECORD_BATCH_SIZE: usize = 200;

/// Raw payload for one batch of identifiers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordBatch {
    /// Zero-based batch index
    pub index: usize,
    /// Identifiers requested in this batch
    pub ids: Vec<PubMedId>,
    /// EFetch XML as returned by the service
    pub payload: Vec<u8>,
}

/// Fetch records for `ids` in batches of [`RECORD_BATCH_SIZE`]
///
/// See [`fetch_records_in_batches`].
pub async fn fetch_records<F, S>(fetcher: &F, ids: &[S]) -> Result<Vec<RecordBatch>>
where
    F: Fetch + ?Sized,
    S: AsRef<str>,
{
    fetch_records_in_batches(fetcher, ids, RECORD_BATCH_SIZE).await
}

/// Fetch records for `ids`, `batch_size` identifiers per request
///
/// Every identifier is validated before the first request is made. Batches
/// are fetched sequentially and returned in request order; the first failure
/// aborts the run.
///
/// # Errors
///
/// * `PubMedError::InvalidPmid` - an identifier is not a valid PMID
/// * `PubMedError::InvalidQuery` - `batch_size` is zero
/// * `PubMedError::Transport` with `Stage::Records` - a batch request failed
#[instrument(skip(fetcher, ids), fields(ids_count = ids.len()))]
pub async fn fetch_records_in_batches<F, S>(
    fetcher: &F,
    ids: &[S],
    batch_size: usize,
) -> Result<Vec<RecordBatch>>
where
    F: Fetch + ?Sized,
    S: AsRef<str>,
{
    if batch_size == 0 {
        return Err(PubMedError::InvalidQuery(
            "batch size must be greater than zero".to_string(),
        ));
    }

    let validated = ids
        .iter()
        .map(|id| PubMedId::parse(id.as_ref()))
        .collect::<Result<Vec<_>>>()?;

    let mut batches = Vec::with_capacity(validated.len().div_ceil(batch_size));

    for (index, chunk) in validated.chunks(batch_size).enumerate() {
        let request = Request::Records {
            ids: chunk.to_vec(),
        };

        debug!(batch = index, size = chunk.len(), "Making batch EFetch API request");
        let payload = fetcher
            .fetch(&request)
            .await
            .map_err(|source| PubMedError::Transport {
                stage: Stage::Records { batch: index },
                source,
            })?;

        batches.push(RecordBatch {
            index,
            ids: chunk.to_vec(),
            payload,
        });
    }

    info!(batches = batches.len(), "Record fetch completed");
    Ok(batches)
}
