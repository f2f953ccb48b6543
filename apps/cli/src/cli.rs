use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "fmp", version, about = "Query Financial Modeling Prep through the FMP provider")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show provider metadata and registered fetchers.
    List,

    /// Run a fetcher and print its records as JSON.
    Fetch {
        /// Fetcher name, e.g. HistoricalRating
        fetcher: String,

        /// One or more comma-separated symbols
        #[arg(short, long)]
        symbol: String,

        /// Maximum records per symbol
        #[arg(short, long)]
        limit: Option<u32>,

        /// API key; overrides FMP_API_KEY
        #[arg(long)]
        api_key: Option<String>,
    },
}
