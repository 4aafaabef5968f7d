use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;

#[derive(Parser)]
#[command(
    name = "pubmed-pager",
    about = "Page through every PubMed record matching a search",
    long_about = "Counts the records matching a PubMed search within a recency window, \
                  retrieves their PMIDs page by page and fetches raw records for them"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// API key for NCBI E-utilities
    #[arg(long, env = "NCBI_API_KEY", global = true)]
    api_key: Option<String>,

    /// Email for NCBI requests (recommended)
    #[arg(long, env = "NCBI_EMAIL", global = true)]
    email: Option<String>,

    /// Tool name for NCBI requests
    #[arg(long, env = "NCBI_TOOL", default_value = "pubmed-pager", global = true)]
    tool: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Print how many records match a search
    Count(commands::count::Count),
    /// Retrieve every matching PMID, page by page
    Ids(commands::ids::Ids),
    /// Run every search profile in a JSON file
    Run(commands::run::Run),
    /// Fetch raw PubMed XML records for PMIDs
    Fetch(commands::fetch::Fetch),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();

    let fetcher = commands::create_fetcher(cli.api_key.as_deref(), cli.email.as_deref(), &cli.tool)?;

    match &cli.command {
        Commands::Count(cmd) => cmd.execute(&fetcher).await,
        Commands::Ids(cmd) => cmd.execute(&fetcher).await,
        Commands::Run(cmd) => cmd.execute(&fetcher).await,
        Commands::Fetch(cmd) => cmd.execute(&fetcher).await,
    }
}
