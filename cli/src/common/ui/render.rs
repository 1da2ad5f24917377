//! # DexQA Terminal Renderer
//!
//! File: cli/src/common/ui/render.rs
//!
//! ## Overview
//!
//! Turns answers, errors and status into terminal text. Every function returns a
//! `String`; printing is left to the command handlers so the layout can be tested
//! directly.
//!
//! Answer layout:
//!
//! ```text
//! 智能回答 ✅
//! ⚡ pikachu #25
//!
//! 皮卡丘为电属性宝可梦，其种族值及核心信息如下:
//!
//! 详细信息 (2)
//!   1. 属性：电属性
//!   2. 种族值：总和320
//! ```
//!
//! The creature line appears only when the service identified one, and the
//! points block only when there is at least one point.
//!
use crate::core::error::{DexError, Result};
use crate::dex::ParsedAnswer;
use anyhow::Context;
use serde::Serialize;

/// Example questions offered when an answer comes back empty.
pub const SUGGESTIONS: [&str; 3] = [
    "皮卡丘的特性是什么？",
    "喷火龙有几种进化形态？",
    "超梦的种族值是多少？",
];

/// Section titles. The compact set is for narrow terminals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Labels {
    pub answer_title: &'static str,
    pub points_title: &'static str,
}

impl Labels {
    pub fn for_mode(compact: bool) -> Self {
        if compact {
            Self {
                answer_title: "回答",
                points_title: "详情",
            }
        } else {
            Self {
                answer_title: "智能回答",
                points_title: "详细信息",
            }
        }
    }
}

/// What the answer screen shows.
#[derive(Debug, Clone, Copy)]
pub struct AnswerView<'a> {
    pub pokemon_name: Option<&'a str>,
    pub pokemon_id: Option<i64>,
    pub parsed: &'a ParsedAnswer,
}

/// # Render Answer (`render_answer`)
///
/// Lays out title, optional creature line, summary and numbered points.
pub fn render_answer(view: &AnswerView<'_>, labels: &Labels) -> String {
    let mut lines = vec![format!("{} ✅", labels.answer_title)];

    if let Some(line) = creature_line(view.pokemon_name, view.pokemon_id) {
        lines.push(line);
    }

    if !view.parsed.summary.is_empty() {
        lines.push(String::new());
        lines.push(view.parsed.summary.clone());
    }

    if view.parsed.has_points() {
        lines.push(String::new());
        lines.push(format!(
            "{} ({})",
            labels.points_title,
            view.parsed.points.len()
        ));
        lines.extend(
            view.parsed
                .points
                .iter()
                .enumerate()
                .map(|(i, point)| format!("  {}. {}", i + 1, point)),
        );
    }

    lines.join("\n")
}

fn creature_line(name: Option<&str>, id: Option<i64>) -> Option<String> {
    match (name, id) {
        (Some(name), Some(id)) => Some(format!("⚡ {} #{}", name, id)),
        (Some(name), None) => Some(format!("⚡ {}", name)),
        (None, Some(id)) => Some(format!("🔍 #{}", id)),
        (None, None) => None,
    }
}

/// Shown when the service answered with an empty text.
pub fn render_empty_state() -> String {
    let mut lines = vec![
        "🔮 暂无相关信息".to_string(),
        "尝试提出不同的宝可梦问题，例如：".to_string(),
    ];
    lines.extend(
        SUGGESTIONS
            .iter()
            .enumerate()
            .map(|(i, s)| format!("  {}. {}", i + 1, s)),
    );
    lines.join("\n")
}

pub fn render_error(err: &DexError) -> String {
    format!("⚠️  {}", err)
}

pub fn render_loading() -> String {
    "正在为您分析宝可梦数据...\n请稍候，智能图鉴正在努力工作中".to_string()
}

pub fn footer() -> String {
    format!("基于PokeAPI与AI技术构建 | v{}", env!("CARGO_PKG_VERSION"))
}

/// Pretty-printed JSON for `--json` output.
pub fn render_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize output as JSON")
}
