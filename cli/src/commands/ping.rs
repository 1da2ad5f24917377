//! # DexQA Ping Command
//!
//! File: cli/src/commands/ping.rs
//!
//! `dexqa ping` checks that the question-answering service is reachable by
//! fetching its root route and printing the reported name and version.
//!
use crate::{
    common::network::http::QaClient,
    core::{config::Config, error::Result},
};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(about = "Check that the question-answering service is reachable")]
pub struct PingArgs {}

pub async fn handle_ping(_args: PingArgs, config: &Config) -> Result<()> {
    let client = QaClient::new(&config.api)?;
    let info = client.health().await?;

    println!(
        "✅ {} (v{})",
        info.message.as_deref().unwrap_or("service is up"),
        info.version.as_deref().unwrap_or("unknown")
    );
    println!("Ask endpoint: {}", client.ask_url());
    if let Some(docs) = info.docs {
        println!("Docs: {}", docs);
    }
    Ok(())
}
