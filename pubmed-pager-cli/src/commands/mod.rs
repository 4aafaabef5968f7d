pub mod count;
pub mod fetch;
pub mod ids;
pub mod run;

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use pubmed_pager::{ClientConfig, HttpFetcher};

pub fn create_fetcher(api_key: Option<&str>, email: Option<&str>, tool: &str) -> Result<HttpFetcher> {
    let mut config = ClientConfig::new().with_tool(tool);

    if let Some(key) = api_key {
        config = config.with_api_key(key);
    }

    if let Some(email) = email {
        config = config.with_email(email);
    }

    HttpFetcher::with_config(config).context("Failed to create HTTP client")
}

/// Write `content` to `output`, or to stdout when no path is given
///
/// Empty content prints nothing.
pub async fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            tokio::fs::write(path, content)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "Results saved to file");
        }
        None => print_content(&mut std::io::stdout().lock(), content)?,
    }
    Ok(())
}

fn print_content<W: Write>(out: &mut W, content: &str) -> std::io::Result<()> {
    if content.is_empty() {
        return Ok(());
    }
    writeln!(out, "{}", content)
}
