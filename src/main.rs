use clap::Parser;
use pricebeacon::adapter::inbound::cli::{self, command::Cli};

#[tokio::main]
async fn main() -> miette::Result<()> {
    let _ = dotenvy::dotenv();
    cli::execute(Cli::parse()).await
}
