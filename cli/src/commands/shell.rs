//! # DexQA Interactive Shell
//!
//! File: cli/src/commands/shell.rs
//!
//! ## Overview
//!
//! `dexqa shell` keeps a prompt open and answers one question per line, the
//! terminal counterpart of the Pokédex web page.
//!
//! ## Architecture
//!
//! - Lines are read from standard input with a Tokio `BufReader`.
//! - Each question is validated, then sent; the loop awaits the reply before it
//!   reads the next line, so at most one request is in flight.
//! - Any failure is printed and the prompt comes back. Only `exit`, `quit` or the
//!   end of input leave the shell.
//! - After an empty answer the example questions are listed; typing `1`-`3`
//!   asks the matching one.
//!
//! ## Usage
//!
//! ```bash
//! dexqa shell
//! dexqa --compact shell
//! ```
//!
use super::ask::present;
use crate::{
    common::{
        network::http::QaClient,
        ui::render::{self, Labels, SUGGESTIONS},
    },
    core::{config::Config, error::Result},
    dex::Question,
};
use anyhow::Context;
use clap::Parser;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

const PROMPT: &str = "dexqa> ";

/// # Shell Arguments (`ShellArgs`)
///
/// No options yet; service address and display mode come from the global flags.
#[derive(Parser, Debug)]
#[command(about = "Ask questions interactively, one per line")]
pub struct ShellArgs {}

/// # Handle Shell Command (`handle_shell`)
///
/// Runs the read-ask-print loop until `exit`/`quit` or end of input.
///
/// ## Returns
///
/// * `Result<()>`: `Err` only if the client cannot be built or standard
///   input/output fails. Request errors are shown and the loop continues.
pub async fn handle_shell(_args: ShellArgs, config: &Config) -> Result<()> {
    let client = QaClient::new(&config.api)?;
    let labels = Labels::for_mode(config.display.compact);
    info!("Starting shell against {}", client.ask_url());

    println!("Pokédex AI 智能图鉴系统");
    println!("请提出关于宝可梦的任何问题！(输入 exit 退出)");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut suggestions_offered = false;

    loop {
        print!("{}", PROMPT);
        std::io::stdout().flush().context("Failed to flush prompt")?;

        let Some(line) = lines
            .next_line()
            .await
            .context("Failed to read from standard input")?
        else {
            println!();
            break;
        };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if matches!(input, "exit" | "quit") {
            break;
        }

        let text = match pick_suggestion(input, suggestions_offered) {
            Some(suggestion) => {
                println!("{}", suggestion);
                suggestion
            }
            None => input,
        };
        suggestions_offered = false;

        let question = match Question::parse(text) {
            Ok(question) => question,
            Err(e) => {
                println!("{}", render::render_error(&e));
                continue;
            }
        };

        println!("{}", render::render_loading());
        match client.ask(&question).await {
            Ok(response) => {
                suggestions_offered = response.answer.is_empty();
                println!("{}", present(&response, &labels));
            }
            Err(e) => {
                warn!("Question failed: {:?}", e);
                println!("{}", render::render_error(&e));
            }
        }
    }

    println!("{}", render::footer());
    Ok(())
}

/// `"1"`..`"3"` right after the empty state selects an example question.
fn pick_suggestion(input: &str, offered: bool) -> Option<&'static str> {
    if !offered {
        return None;
    }
    input
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| SUGGESTIONS.get(i).copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_suggestion_only_after_empty_state() {
        assert_eq!(pick_suggestion("2", true), Some(SUGGESTIONS[1]));
        assert_eq!(pick_suggestion("2", false), None);
    }

    #[test]
    fn test_pick_suggestion_out_of_range() {
        assert_eq!(pick_suggestion("0", true), None);
        assert_eq!(pick_suggestion("4", true), None);
        assert_eq!(pick_suggestion("皮卡丘", true), None);
    }
}
