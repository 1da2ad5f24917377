//! # DexQA Parse Command
//!
//! File: cli/src/commands/parse.rs
//!
//! ## Overview
//!
//! `dexqa parse` runs the answer segmenter on text that is already at hand (a
//! saved reply, a pasted snippet) without contacting the service. It reads a
//! file, or standard input when the path is `-` or omitted.
//!
//! ```bash
//! dexqa parse saved_answer.txt
//! printf '0. 概述\n1. 第一点\n' | dexqa parse --json
//! ```
//!
use crate::{
    common::ui::render::{self, AnswerView, Labels},
    core::{config::Config, error::Result},
    dex::{self, AnswerShape, ParsedAnswer},
};
use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;
use tracing::debug;

/// # Parse Command Arguments (`ParseArgs`)
#[derive(Parser, Debug)]
#[command(about = "Split a saved answer into summary and points (offline)")]
pub struct ParseArgs {
    /// File containing the raw answer. `-` reads standard input.
    #[arg(default_value = "-")]
    input: PathBuf,

    /// Print the segmentation as JSON, including the recognised layout.
    #[arg(long)]
    json: bool,
}

#[derive(Serialize, Debug)]
struct ParseReport<'a> {
    shape: AnswerShape,
    #[serde(flatten)]
    answer: &'a ParsedAnswer,
}

/// # Handle Parse Command (`handle_parse`)
///
/// Fails only if the input cannot be read; segmentation itself cannot fail.
pub async fn handle_parse(args: ParseArgs, config: &Config) -> Result<()> {
    let raw = read_input(&args.input).await?;
    let (shape, parsed) = dex::segment_with_shape(&raw);
    debug!("Parsed input as {:?}", shape);

    if args.json {
        let report = ParseReport {
            shape,
            answer: &parsed,
        };
        println!("{}", render::render_json(&report)?);
        return Ok(());
    }

    if parsed.summary.is_empty() && !parsed.has_points() {
        println!("{}", render::render_empty_state());
        return Ok(());
    }
    let view = AnswerView {
        pokemon_name: None,
        pokemon_id: None,
        parsed: &parsed,
    };
    println!(
        "{}",
        render::render_answer(&view, &Labels::for_mode(config.display.compact))
    );
    Ok(())
}

async fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buffer = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buffer)
            .await
            .context("Failed to read answer from standard input")?;
        Ok(buffer)
    } else {
        tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read answer from {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_read_input_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("answer.txt");
        std::fs::write(&path, "整体：概述").unwrap();
        assert_eq!(read_input(&path).await.unwrap(), "整体：概述");
    }

    #[tokio::test]
    async fn test_read_input_missing_file() {
        let dir = tempdir().unwrap();
        let err = read_input(&dir.path().join("nope.txt")).await.unwrap_err();
        assert!(err.to_string().contains("Failed to read answer from"));
    }

    #[test]
    fn test_report_flattens_answer() {
        let parsed = dex::segment("整体：概述。分点：1. 一");
        let report = ParseReport {
            shape: AnswerShape::LabeledSections,
            answer: &parsed,
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["shape"], "labeled_sections");
        assert_eq!(value["summary"], "概述。");
        assert_eq!(value["points"][0], "一");
    }
}
