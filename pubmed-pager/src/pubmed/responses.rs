//! Serde shapes for the two ESearch replies the pager reads
//!
//! Count and page requests are issued separately, so each reply gets its own
//! minimal shape instead of one combined struct.

use serde::Deserialize;

/// Reply to an `rettype=count` ESearch request
#[derive(Debug, Deserialize)]
pub(crate) struct CountResponse {
    #[serde(default)]
    pub esearchresult: Option<CountResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CountResult {
    #[serde(default, rename = "ERROR")]
    pub error: Option<String>,
    #[serde(default)]
    pub count: Option<String>,
}

/// Reply to a paged (`retstart`/`retmax`) ESearch request
#[derive(Debug, Deserialize)]
pub(crate) struct ListResponse {
    #[serde(default)]
    pub esearchresult: Option<ListResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListResult {
    #[serde(default, rename = "ERROR")]
    pub error: Option<String>,
    #[serde(default)]
    pub idlist: Option<Vec<String>>,
}
