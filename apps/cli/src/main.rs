mod cli;
mod main_lib;

use clap::Parser;
use fmp_provider::{fmp_provider, FmpConfig};

use cli::{Cli, Command};
use main_lib::{build_credentials, build_params, describe, fetch, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = FmpConfig::from_env()?;
    let provider = fmp_provider(config);

    let output = match cli.command {
        Command::List => describe(&provider),
        Command::Fetch {
            fetcher,
            symbol,
            limit,
            api_key,
        } => {
            let params = build_params(&symbol, limit);
            let credentials = build_credentials(api_key);
            fetch(&provider, &fetcher, &params, credentials.as_ref()).await?
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
