use anyhow::Result;
use clap::Args;
use pubmed_pager::pubmed::{DEFAULT_BACK_DAYS, DEFAULT_PAGE_SIZE};
use pubmed_pager::{HttpFetcher, Search, SearchOptions};

#[derive(Args, Debug)]
pub struct Count {
    /// Search term, already URL-encoded as PubMed expects it
    #[arg(value_name = "TERM")]
    term: String,

    /// Only count records published in the last N days
    #[arg(short, long, default_value_t = DEFAULT_BACK_DAYS)]
    back_days: u32,

    /// Page size used to report the number of pages
    #[arg(short, long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: usize,
}

impl Count {
    pub async fn execute(&self, fetcher: &HttpFetcher) -> Result<()> {
        let options = SearchOptions::new()
            .with_back_days(self.back_days)
            .with_page_size(self.page_size);
        let mut search = Search::new(fetcher, self.term.as_str(), options)?;

        let total = search.query_total().await?;
        println!("{}", total);
        tracing::info!(
            total,
            pages = search.page_count()?,
            page_size = self.page_size,
            "Count complete"
        );

        Ok(())
    }
}
