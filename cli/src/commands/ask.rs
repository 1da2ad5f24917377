//! # DexQA Ask Command
//!
//! File: cli/src/commands/ask.rs
//!
//! ## Overview
//!
//! This module implements `dexqa ask`, the one-shot form of the Pokédex client.
//! It validates the question, sends a single request to the question-answering
//! service, segments the returned text and prints it.
//!
//! ## Architecture
//!
//! 1. Join the positional words into one question and validate it (`dex::Question`).
//!    Invalid questions fail here, before any request is made.
//! 2. Build a `QaClient` from the effective configuration.
//! 3. Send the question and wait for the reply.
//! 4. Print the reply in one of three forms:
//!    - default: segmented answer (`common::ui::render`)
//!    - `--raw`: the answer text exactly as received
//!    - `--json`: a machine-readable report
//!
//! Request failures propagate to `main`, which prints the fixed message and exits
//! with status 1.
//!
//! ## Examples
//!
//! ```bash
//! dexqa ask 皮卡丘的属性和种族值？
//! dexqa ask --json "喷火龙有几种进化形态？"
//! dexqa --base-url http://127.0.0.1:8000 ask 超梦的种族值是多少？
//! ```
//!
use crate::{
    common::{
        network::http::{AskResponse, Intent, QaClient},
        ui::render::{self, AnswerView, Labels},
    },
    core::{config::Config, error::Result},
    dex::{self, Question},
};
use clap::Parser;
use serde::Serialize;
use tracing::{debug, info};

/// # Ask Command Arguments (`AskArgs`)
#[derive(Parser, Debug)]
#[command(about = "Ask a question about a Pokémon")]
pub struct AskArgs {
    /// The question to ask. Multiple words are joined with single spaces.
    #[arg(required = true, num_args = 1..)]
    question: Vec<String>,

    /// Print a JSON report instead of the formatted answer.
    #[arg(long)]
    json: bool,

    /// Print the answer text as received, without segmentation.
    #[arg(long, conflicts_with = "json")]
    raw: bool,
}

/// Shape of `--json` output.
#[derive(Serialize, Debug)]
struct AnswerReport<'a> {
    question: &'a str,
    summary: &'a str,
    points: &'a [String],
    pokemon_name: Option<&'a str>,
    pokemon_id: Option<i64>,
    intent: Option<&'a Intent>,
}

/// # Handle Ask Command (`handle_ask`)
///
/// ## Arguments
///
/// * `args`: Parsed `AskArgs`.
/// * `config`: Effective configuration (service address, display mode).
///
/// ## Returns
///
/// * `Result<()>`: `Ok(())` once the answer is printed. An invalid question or
///   any request failure is returned as a `DexError` inside the `anyhow` error.
pub async fn handle_ask(args: AskArgs, config: &Config) -> Result<()> {
    debug!("Ask args: {:?}", args);
    let question = Question::parse(&args.question.join(" "))?;
    let client = QaClient::new(&config.api)?;

    if !args.json && !args.raw {
        eprintln!("{}", render::render_loading());
    }
    let response = client.ask(&question).await?;
    info!(
        "Answer received for '{}' (pokemon: {:?})",
        question, response.pokemon_name
    );

    if args.raw {
        println!("{}", response.answer);
    } else if args.json {
        let parsed = dex::segment(&response.answer);
        let report = AnswerReport {
            question: question.as_str(),
            summary: &parsed.summary,
            points: &parsed.points,
            pokemon_name: response.pokemon_name.as_deref(),
            pokemon_id: response.pokemon_id,
            intent: response.intent.as_ref(),
        };
        println!("{}", render::render_json(&report)?);
    } else {
        let labels = Labels::for_mode(config.display.compact);
        println!("{}", present(&response, &labels));
        println!();
        println!("{}", render::footer());
    }
    Ok(())
}

/// Formats a successful reply: the empty state for an empty answer, the
/// segmented answer otherwise. Shared with the interactive shell.
pub(crate) fn present(response: &AskResponse, labels: &Labels) -> String {
    if response.answer.is_empty() {
        return render::render_empty_state();
    }
    let parsed = dex::segment(&response.answer);
    let view = AnswerView {
        pokemon_name: response.pokemon_name.as_deref(),
        pokemon_id: response.pokemon_id,
        parsed: &parsed,
    };
    render::render_answer(&view, labels)
}
