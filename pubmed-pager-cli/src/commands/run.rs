use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use pubmed_pager::pubmed::DEFAULT_PAGE_SIZE;
use pubmed_pager::{HttpFetcher, Search, SearchOptions};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::write_output;

#[derive(Args, Debug)]
pub struct Run {
    /// JSON file holding an array of search profiles
    #[arg(value_name = "PROFILES")]
    profiles: PathBuf,

    /// Maximum PMIDs per ESearch request
    #[arg(short, long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: usize,

    /// Save results to file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// One saved search
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Profile {
    pub category: String,
    pub term: String,
    /// Recency window in days
    pub reldate: u32,
}

#[derive(Debug, Serialize)]
struct ProfileResult<'a> {
    category: &'a str,
    term: &'a str,
    total: usize,
    ids: Vec<String>,
}

pub async fn load_profiles(path: &Path) -> Result<Vec<Profile>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read profiles from {}", path.display()))?;
    let profiles: Vec<Profile> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse profiles in {}", path.display()))?;
    Ok(profiles)
}

impl Run {
    pub async fn execute(&self, fetcher: &HttpFetcher) -> Result<()> {
        let profiles = load_profiles(&self.profiles).await?;
        info!(count = profiles.len(), "Loaded search profiles");

        let mut lines = Vec::with_capacity(profiles.len());
        for profile in &profiles {
            let options = SearchOptions::new()
                .with_back_days(profile.reldate)
                .with_page_size(self.page_size);
            let mut search = Search::new(fetcher, profile.term.as_str(), options)
                .with_context(|| format!("Invalid profile '{}'", profile.category))?;

            search
                .query_all()
                .await
                .with_context(|| format!("Search failed for profile '{}'", profile.category))?;

            let total = search.total().unwrap_or_default();
            info!(category = %profile.category, total, "Profile complete");

            let result = ProfileResult {
                category: &profile.category,
                term: &profile.term,
                total,
                ids: search.into_identifiers(),
            };
            lines.push(serde_json::to_string(&result)?);
        }

        write_output(self.output.as_deref(), &lines.join("\n")).await
    }
}
