//! HTTP entry point for the deck assembly service.

use clap::Parser;

use server::Args;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    server::run(Args::parse()).await
}
