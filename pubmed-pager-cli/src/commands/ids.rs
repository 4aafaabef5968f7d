use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use pubmed_pager::pubmed::{DEFAULT_BACK_DAYS, DEFAULT_PAGE_SIZE};
use pubmed_pager::{HttpFetcher, Search, SearchOptions};

use super::write_output;

#[derive(Args, Debug)]
pub struct Ids {
    /// Search term, already URL-encoded as PubMed expects it
    #[arg(value_name = "TERM")]
    term: String,

    /// Only include records published in the last N days
    #[arg(short, long, default_value_t = DEFAULT_BACK_DAYS)]
    back_days: u32,

    /// Maximum PMIDs per ESearch request
    #[arg(short, long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: usize,

    /// Save PMIDs to file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl Ids {
    pub async fn execute(&self, fetcher: &HttpFetcher) -> Result<()> {
        let options = SearchOptions::new()
            .with_back_days(self.back_days)
            .with_page_size(self.page_size);
        let mut search = Search::new(fetcher, self.term.as_str(), options)?;

        if let Err(e) = search.query_all().await {
            let retrieved = search.pages().len();
            return Err(e).with_context(|| {
                format!("Paged search stopped after {} complete pages", retrieved)
            });
        }

        let ids = search.into_identifiers();
        write_output(self.output.as_deref(), &ids.join("\n")).await
    }
}
