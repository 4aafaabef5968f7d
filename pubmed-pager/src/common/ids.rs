//! Validated PubMed identifiers
//!
//! ESearch pages hand identifiers back as plain strings. Before they are sent
//! on to EFetch they are checked here, so a bad id fails locally instead of
//! producing a confusing upstream response.

use crate::error::{PubMedError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A validated PubMed ID (PMID)
///
/// # Examples
///
/// ```
/// use pubmed_pager::common::PubMedId;
///
/// let pmid = PubMedId::parse("31978945").unwrap();
/// assert_eq!(pmid.as_u32(), 31978945);
///
/// // Surrounding whitespace is ignored
/// let pmid = PubMedId::parse("  31978945  ").unwrap();
/// assert_eq!(pmid.to_string(), "31978945");
///
/// assert!(PubMedId::parse("").is_err());
/// assert!(PubMedId::parse("abc").is_err());
/// assert!(PubMedId::parse("0").is_err());
/// assert!(PubMedId::parse("-123").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PubMedId {
    value: u32,
}

impl PubMedId {
    /// Parse a PMID from a string
    ///
    /// # Errors
    ///
    /// Returns `PubMedError::InvalidPmid` if the trimmed input is empty,
    /// contains anything but ASCII digits, is zero, or overflows a u32.
    pub fn parse(s: &str) -> Result<Self> {
        let invalid = || PubMedError::InvalidPmid {
            pmid: s.to_string(),
        };

        let trimmed = s.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let value = trimmed.parse::<u32>().map_err(|_| invalid())?;

        // PMIDs start at 1
        if value == 0 {
            return Err(invalid());
        }

        Ok(Self { value })
    }

    pub fn as_u32(&self) -> u32 {
        self.value
    }
}

impl fmt::Display for PubMedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl FromStr for PubMedId {
    type Err = PubMedError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<PubMedId> for u32 {
    fn from(pmid: PubMedId) -> Self {
        pmid.value
    }
}
