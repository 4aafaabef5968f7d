//! Pure decoding of ESearch JSON payloads
//!
//! Neither function touches the network or keeps state; they only turn raw
//! response bytes into a count or an ordered identifier list.

use crate::error::MalformedResponse;
use crate::pubmed::responses::{CountResponse, ListResponse};

const RESULT_FIELD: &str = "esearchresult";

/// Extract the total result count from an ESearch reply
///
/// The count is sent as a numeric string (`"count": "2091"`). Zero is a valid
/// count meaning no matches.
///
/// # Errors
///
/// * `MalformedResponse::JsonError` - payload is not well-formed JSON
/// * `MalformedResponse::MissingField` - no `esearchresult` object or no `count`
/// * `MalformedResponse::InvalidCount` - `count` is not a non-negative integer
/// * `MalformedResponse::ServiceError` - the service reported an `ERROR`
///
/// # Example
///
/// ```
/// use pubmed_pager::pubmed::extract_count;
///
/// let payload = br#"{"esearchresult": {"count": "2091"}}"#;
/// assert_eq!(extract_count(payload).unwrap(), 2091);
///
/// assert!(extract_count(br#"{"header": {}}"#).is_err());
/// ```
pub fn extract_count(payload: &[u8]) -> Result<usize, MalformedResponse> {
    let response: CountResponse = serde_json::from_slice(payload)?;
    let result = response.esearchresult.ok_or(MalformedResponse::MissingField {
        field: RESULT_FIELD,
    })?;

    if let Some(message) = result.error {
        return Err(MalformedResponse::ServiceError { message });
    }

    let raw = result
        .count
        .ok_or(MalformedResponse::MissingField { field: "count" })?;

    parse_count(&raw)
}

/// Extract the ordered identifier list from a paged ESearch reply
///
/// Order is kept exactly as sent; page offsets rely on it. An empty list is a
/// valid page.
///
/// # Errors
///
/// * `MalformedResponse::JsonError` - payload is not well-formed JSON, or
///   `idlist` is not an array of strings
/// * `MalformedResponse::MissingField` - no `esearchresult` object or no `idlist`
/// * `MalformedResponse::ServiceError` - the service reported an `ERROR`
///
/// # Example
///
/// ```
/// use pubmed_pager::pubmed::extract_identifiers;
///
/// let payload = br#"{"esearchresult": {"idlist": ["39999999", "39999998"]}}"#;
/// assert_eq!(
///     extract_identifiers(payload).unwrap(),
///     vec!["39999999".to_string(), "39999998".to_string()]
/// );
/// ```
pub fn extract_identifiers(payload: &[u8]) -> Result<Vec<String>, MalformedResponse> {
    let response: ListResponse = serde_json::from_slice(payload)?;
    let result = response.esearchresult.ok_or(MalformedResponse::MissingField {
        field: RESULT_FIELD,
    })?;

    if let Some(message) = result.error {
        return Err(MalformedResponse::ServiceError { message });
    }

    result
        .idlist
        .ok_or(MalformedResponse::MissingField { field: "idlist" })
}

fn parse_count(raw: &str) -> Result<usize, MalformedResponse> {
    let invalid = || MalformedResponse::InvalidCount {
        value: raw.to_string(),
    };

    // str::parse would also accept a leading '+'
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    raw.parse::<usize>().map_err(|_| invalid())
}
