use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;

mod collect;
mod error;
mod extraction;
mod output;
mod price;
mod record;
mod stats;
mod storage;
mod telemetry;
mod util;

#[derive(Parser)]
#[command(name = "prices", about = "Catalogue price collector (Books to Scrape + WebScraper laptops)")]
struct Cli {
    /// Emit a single JSON envelope to stdout; logs go to stderr
    #[arg(global = true, long, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape both sites, append to the CSV store, print a summary
    Collect(collect::CollectCmd),
    /// Summarize an existing CSV store
    Stats(stats::StatsCmd),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    telemetry::config::set_json_mode(cli.json);

    // initialize logging/tracing (stderr). Respect RUST_LOG and PRICES_LOG_FORMAT
    telemetry::config::init_tracing();

    match cli.command {
        Commands::Collect(args) => collect::run(args).await?,
        Commands::Stats(args) => stats::run(args).await?,
    }

    Ok(())
}
