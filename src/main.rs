use clap::Parser;
use ghcnd_processor::cli::{run, Cli};
use ghcnd_processor::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli).await
}
