use anyhow::Result;
use clap::Parser;
use weather_backdrop::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    weather_backdrop::run(cli).await
}
