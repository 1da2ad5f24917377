//! # DexQA Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! This file serves as the main entry point for the DexQA CLI, a terminal client
//! for the Pokédex AI question-answering service. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Loading the effective configuration
//! - Routing execution to the appropriate command handler
//!
//! ## Architecture
//!
//! - Each top-level command (`ask`, `parse`, `shell`, `ping`) is a variant in the `Commands` enum
//! - Global flags (`--base-url`, `--timeout`, `--compact`, `--config`) become config overrides
//! - All errors are propagated to this level for consistent reporting
//!
//! ## Examples
//!
//! ```bash
//! # Ask one question
//! dexqa ask 皮卡丘的属性和种族值？
//!
//! # Interactive prompt against another host, with debug logs
//! dexqa -vv --base-url http://192.168.1.20:8000 shell
//! ```
//!
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Command handlers (ask, parse, shell, ping)
mod common; // Shared utilities (HTTP client, terminal rendering)
mod core; // Core infrastructure (errors, config)
mod dex; // Question validation and answer segmentation

use crate::core::{
    config::{self, Overrides},
    error::DexError,
};

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "dexqa",
    about = "Pokédex AI 智能图鉴系统: ask questions about Pokémon from the terminal",
    long_about = "Sends natural-language questions to the Pokédex AI service and prints the\n\
                  answer split into a summary and itemized points.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Configuration file to use instead of the project/user files.
    #[arg(long, global = true, env = "DEXQA_CONFIG")]
    config: Option<PathBuf>,
    /// Base URL of the question-answering service.
    #[arg(long, global = true, env = "DEXQA_BASE_URL")]
    base_url: Option<String>,
    /// Request timeout in seconds (default: no timeout).
    #[arg(long, global = true)]
    timeout: Option<u64>,
    /// Use short labels for narrow terminals.
    #[arg(long, global = true)]
    compact: bool,
}

/// Enum defining all available top-level commands.
#[derive(Parser, Debug)]
enum Commands {
    #[command(alias = "a")]
    Ask(commands::ask::AskArgs),
    #[command(alias = "p")]
    Parse(commands::parse::ParseArgs),
    #[command(alias = "s")]
    Shell(commands::shell::ShellArgs),
    Ping(commands::ping::PingArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let overrides = Overrides {
        base_url: cli.base_url.clone(),
        timeout_secs: cli.timeout,
        compact: cli.compact,
    };
    let command_result = match config::load_config(cli.config.as_deref(), &overrides) {
        Ok(cfg) => match cli.command {
            Commands::Ask(args) => commands::ask::handle_ask(args, &cfg).await,
            Commands::Parse(args) => commands::parse::handle_parse(args, &cfg).await,
            Commands::Shell(args) => commands::shell::handle_shell(args, &cfg).await,
            Commands::Ping(args) => commands::ping::handle_ping(args, &cfg).await,
        },
        Err(e) => Err(e),
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        match e.downcast_ref::<DexError>() {
            Some(dex_err) if dex_err.is_user_facing() => {
                eprintln!("{}", common::ui::render::render_error(dex_err))
            }
            _ => eprintln!("Error: {:#}", e),
        }
        std::process::exit(1);
    }

    Ok(())
}
