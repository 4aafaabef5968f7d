use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Args;
use pubmed_pager::HttpFetcher;
use pubmed_pager::pubmed::{RECORD_BATCH_SIZE, RecordBatch, fetch_records};
use tokio::io::AsyncWriteExt;

#[derive(Args, Debug)]
pub struct Fetch {
    /// PubMed IDs to fetch
    #[arg(value_name = "PMID", required = true)]
    ids: Vec<String>,

    /// Save raw XML to file instead of stdout; with more than one batch,
    /// each batch goes to its own file (`records_1.xml`, `records_2.xml`, ...)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl Fetch {
    pub async fn execute(&self, fetcher: &HttpFetcher) -> Result<()> {
        let batch_count = self.ids.len().div_ceil(RECORD_BATCH_SIZE);
        if self.output.is_none() && batch_count > 1 {
            bail!(
                "{} PMIDs span {} EFetch batches of {}; use --output to write one file per batch",
                self.ids.len(),
                batch_count,
                RECORD_BATCH_SIZE
            );
        }

        let batches = fetch_records(fetcher, self.ids.as_slice())
            .await
            .context("Failed to fetch records")?;

        tracing::info!(
            ids = self.ids.len(),
            batches = batches.len(),
            "Fetched raw records"
        );

        match &self.output {
            Some(path) => {
                write_batches(path, &batches).await?;
            }
            None => {
                let mut stdout = tokio::io::stdout();
                for batch in &batches {
                    stdout.write_all(&batch.payload).await?;
                }
                stdout.flush().await?;
            }
        }

        Ok(())
    }
}

/// File that batch `index` of `batch_count` is written to
fn batch_path(output: &Path, index: usize, batch_count: usize) -> PathBuf {
    if batch_count <= 1 {
        return output.to_path_buf();
    }

    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "records".to_string());
    let file_name = match output.extension() {
        Some(ext) => format!("{}_{}.{}", stem, index + 1, ext.to_string_lossy()),
        None => format!("{}_{}", stem, index + 1),
    };
    output.with_file_name(file_name)
}

/// Write each batch payload unchanged, one file per batch
async fn write_batches(output: &Path, batches: &[RecordBatch]) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(batches.len());
    for batch in batches {
        let path = batch_path(output, batch.index, batches.len());
        tokio::fs::write(&path, &batch.payload)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), batch = batch.index, "Records saved to file");
        written.push(path);
    }
    Ok(written)
}
