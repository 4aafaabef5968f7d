//! Identifier types shared by the search and record-fetch paths

pub mod ids;

pub use ids::PubMedId;
