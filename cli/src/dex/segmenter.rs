//! # DexQA Answer Segmenter
//!
//! File: cli/src/dex/segmenter.rs
//!
//! ## Overview
//!
//! The question-answering service replies with free text. Most replies follow one
//! of a few loose layouts: a lead sentence followed by "N." items, a pair of
//! `整体：` / `分点：` labels, or markdown section headers. This module splits a
//! reply into a short `summary` and an ordered list of `points` so the terminal
//! renderer can show the list separately.
//!
//! ## Architecture
//!
//! - Section headers (`### 整体概括`, `### 分点说明`) are removed first.
//! - `STRATEGIES` is an ordered list of (shape, predicate, extractor) entries.
//!   The first predicate that matches wins. Later entries are broader than earlier
//!   ones, so the order is significant:
//!   1. `FixedLead`: one specific lead sentence seen in stat-block replies.
//!   2. `OrdinalList`: any later line starting with "N.".
//!   3. `LabeledSections`: inline `整体：` / `分点：` labels.
//! - Nothing matched: the cleaned text is the summary (`PlainText`).
//!
//! `segment` never fails. It computes the plain-text fallback up front and returns
//! it whenever refinement reports a `SegmentError`.
//!
//! ## Examples
//!
//! ```rust
//! let parsed = segment("0. 这是概述\n1. 第一点\n2. 第二点\n");
//! assert_eq!(parsed.summary, "这是概述");
//! assert_eq!(parsed.points, vec!["第一点", "第二点"]);
//! ```
//!
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::{debug, warn};

/// Lead sentence of the stat-block reply format. Handled as its own case.
const FIXED_LEAD_SENTENCE: &str = "1. 皮卡丘为电属性宝可梦，其种族值及核心信息如下:";
/// Inline "overall" label.
const OVERALL_LABEL: &str = "整体：";
/// Inline "itemized" label.
const ITEMIZED_LABEL: &str = "分点：";

/// A reply split into its lead statement and itemized points.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedAnswer {
    pub summary: String,
    /// Presentation order.
    pub points: Vec<String>,
}

impl ParsedAnswer {
    /// The whole (trimmed) text as summary, no points.
    pub fn plain(text: &str) -> Self {
        Self {
            summary: text.trim().to_string(),
            points: Vec::new(),
        }
    }

    pub fn has_points(&self) -> bool {
        !self.points.is_empty()
    }
}

/// Which layout a reply was recognised as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerShape {
    FixedLead,
    OrdinalList,
    LabeledSections,
    PlainText,
}

/// Failures inside refinement. Never escapes `segment`.
#[derive(Error, Debug)]
pub enum SegmentError {
    #[error("failed to compile segmentation pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("answer matched {0:?} but has no lead line")]
    MissingLeadLine(AnswerShape),
}

/// Compiled patterns shared by all strategies.
struct Patterns {
    section_header: Regex,
    ordinal_prefix: Regex,
    /// `"3. 1.属性：电属性"`: an outer ordinal wrapping an inner one.
    nested_ordinal: Regex,
    /// An ordinal followed by whitespace and then content.
    ordinal_item: Regex,
    ordinal_after_newline: Regex,
    /// Attribute, stats and ability fields, in output order.
    labeled_fields: [Regex; 3],
}

impl Patterns {
    fn compile() -> Result<Self, regex::Error> {
        Ok(Self {
            section_header: Regex::new(r"###\s*(整体概括|分点说明)\s*")?,
            ordinal_prefix: Regex::new(r"^[0-9]+\.\s*")?,
            nested_ordinal: Regex::new(r"^[0-9]+\.\s*([0-9]+)\.(.+)$")?,
            ordinal_item: Regex::new(r"^[0-9]+\.\s+\S")?,
            ordinal_after_newline: Regex::new(r"\n\s*[0-9]+\.")?,
            labeled_fields: [
                Regex::new(r"属性：[^\n]+")?,
                Regex::new(r"种族值：[^\n]+")?,
                Regex::new(r"特性：[^\n]+")?,
            ],
        })
    }

    fn strip_headers(&self, raw: &str) -> String {
        self.section_header.replace_all(raw, "").trim().to_string()
    }

    fn strip_ordinal(&self, line: &str) -> String {
        self.ordinal_prefix.replace(line, "").trim().to_string()
    }

    fn nested_remainder<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.nested_ordinal
            .captures(line)
            .and_then(|caps| caps.get(2))
            .map(|rest| rest.as_str().trim())
    }
}

fn patterns() -> Result<&'static Patterns, SegmentError> {
    static PATTERNS: OnceLock<Result<Patterns, regex::Error>> = OnceLock::new();
    PATTERNS
        .get_or_init(Patterns::compile)
        .as_ref()
        .map_err(|e| SegmentError::Pattern(e.clone()))
}

struct Strategy {
    shape: AnswerShape,
    matches: fn(&Patterns, &str) -> bool,
    extract: fn(&Patterns, &str) -> Result<ParsedAnswer, SegmentError>,
}

static STRATEGIES: [Strategy; 3] = [
    Strategy {
        shape: AnswerShape::FixedLead,
        matches: has_fixed_lead,
        extract: extract_fixed_lead,
    },
    Strategy {
        shape: AnswerShape::OrdinalList,
        matches: has_ordinal_line,
        extract: extract_ordinal_list,
    },
    Strategy {
        shape: AnswerShape::LabeledSections,
        matches: has_section_label,
        extract: extract_labeled_sections,
    },
];

/// # Segment Answer (`segment`)
///
/// Splits a raw reply into a `ParsedAnswer`. Total: any input, including the empty
/// string, produces a value.
pub fn segment(raw: &str) -> ParsedAnswer {
    segment_with_shape(raw).1
}

/// Like `segment`, also reporting which layout matched. Replies that fall back
/// after a refinement error are reported as `PlainText`.
pub fn segment_with_shape(raw: &str) -> (AnswerShape, ParsedAnswer) {
    let fallback = ParsedAnswer::plain(&minimal_clean(raw));
    match refine(raw) {
        Ok((shape, parsed)) => {
            debug!(
                "Segmented answer as {:?} with {} point(s)",
                shape,
                parsed.points.len()
            );
            (shape, parsed)
        }
        Err(e) => {
            warn!("Answer segmentation failed, showing plain text: {}", e);
            (AnswerShape::PlainText, fallback)
        }
    }
}

/// Header-stripped and trimmed when the patterns are usable, trimmed otherwise.
fn minimal_clean(raw: &str) -> String {
    match patterns() {
        Ok(p) => p.strip_headers(raw),
        Err(_) => raw.trim().to_string(),
    }
}

fn refine(raw: &str) -> Result<(AnswerShape, ParsedAnswer), SegmentError> {
    let p = patterns()?;
    let text = p.strip_headers(raw);
    for strategy in STRATEGIES.iter() {
        if (strategy.matches)(p, &text) {
            let parsed = (strategy.extract)(p, &text)?;
            return Ok((strategy.shape, parsed));
        }
    }
    Ok((AnswerShape::PlainText, ParsedAnswer::plain(&text)))
}

// --- Predicates ---

fn has_fixed_lead(_: &Patterns, text: &str) -> bool {
    text.contains(FIXED_LEAD_SENTENCE)
}

fn has_ordinal_line(p: &Patterns, text: &str) -> bool {
    p.ordinal_after_newline.is_match(text)
}

fn has_section_label(_: &Patterns, text: &str) -> bool {
    text.contains(OVERALL_LABEL) || text.contains(ITEMIZED_LABEL)
}

// --- Extractors ---

fn extract_fixed_lead(p: &Patterns, text: &str) -> Result<ParsedAnswer, SegmentError> {
    let lines = non_empty_lines(text);
    let (lead, rest) = lines
        .split_first()
        .ok_or(SegmentError::MissingLeadLine(AnswerShape::FixedLead))?;

    let mut points: Vec<String> = rest
        .iter()
        .filter_map(|line| {
            if let Some(inner) = p.nested_remainder(line) {
                Some(inner.to_string())
            } else if p.ordinal_item.is_match(line) {
                Some(p.strip_ordinal(line))
            } else {
                None
            }
        })
        .filter(|point| !point.is_empty())
        .collect();

    // No itemized lines: pick the labeled fields out of the body instead.
    if points.is_empty() {
        points = p
            .labeled_fields
            .iter()
            .filter_map(|field| field.find(text))
            .map(|m| m.as_str().trim().to_string())
            .collect();
    }

    Ok(ParsedAnswer {
        summary: lead_summary(p, lead),
        points,
    })
}

fn extract_ordinal_list(p: &Patterns, text: &str) -> Result<ParsedAnswer, SegmentError> {
    let lines = non_empty_lines(text);
    let (lead, rest) = lines
        .split_first()
        .ok_or(SegmentError::MissingLeadLine(AnswerShape::OrdinalList))?;

    let points = rest
        .iter()
        .map(|line| match p.nested_remainder(line) {
            Some(inner) => inner.to_string(),
            None => p.strip_ordinal(line),
        })
        .filter(|point| !point.is_empty())
        .collect();

    Ok(ParsedAnswer {
        summary: lead_summary(p, lead),
        points,
    })
}

fn extract_labeled_sections(p: &Patterns, text: &str) -> Result<ParsedAnswer, SegmentError> {
    let points = match text.find(ITEMIZED_LABEL) {
        Some(idx) => text[idx + ITEMIZED_LABEL.len()..]
            .trim()
            .split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| p.strip_ordinal(line))
            .filter(|point| !point.is_empty())
            .collect(),
        None => Vec::new(),
    };

    Ok(ParsedAnswer {
        summary: tidy_labels(text),
        points,
    })
}

// --- Helpers ---

fn non_empty_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

fn lead_summary(p: &Patterns, lead: &str) -> String {
    tidy_labels(&p.strip_ordinal(lead))
}

/// Drops the first `整体：` and cuts at the first `分点：`.
fn tidy_labels(text: &str) -> String {
    let without_overall = text.replacen(OVERALL_LABEL, "", 1);
    without_overall
        .split(ITEMIZED_LABEL)
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert_eq!(segment(""), ParsedAnswer::default());
        assert_eq!(segment("  \n\t\n "), ParsedAnswer::default());
    }

    #[test]
    fn test_plain_text_is_trimmed_summary() {
        let raw = "  皮卡丘是一只电属性的宝可梦，性格活泼。 \n";
        let (shape, parsed) = segment_with_shape(raw);
        assert_eq!(shape, AnswerShape::PlainText);
        assert_eq!(parsed.summary, raw.trim());
        assert!(parsed.points.is_empty());
    }

    #[test]
    fn test_fixed_lead_with_nested_ordinals() {
        let raw = "1. 皮卡丘为电属性宝可梦，其种族值及核心信息如下:\n3. 1.属性：电属性\n4. 2.种族值：...\n";
        let (shape, parsed) = segment_with_shape(raw);
        assert_eq!(shape, AnswerShape::FixedLead);
        assert_eq!(parsed.summary, "皮卡丘为电属性宝可梦，其种族值及核心信息如下:");
        assert_eq!(parsed.points, points(&["属性：电属性", "种族值：..."]));
    }

    #[test]
    fn test_fixed_lead_with_simple_ordinals() {
        let raw = "1. 皮卡丘为电属性宝可梦，其种族值及核心信息如下:\n\n2. 属性：电\n3. 特性：静电\n4.\n";
        let parsed = segment(raw);
        assert_eq!(parsed.points, points(&["属性：电", "特性：静电"]));
    }

    #[test]
    fn test_fixed_lead_falls_back_to_labeled_fields_in_fixed_order() {
        let raw = "1. 皮卡丘为电属性宝可梦，其种族值及核心信息如下:\n特性：静电\n种族值：总和320\n属性：电属性";
        let parsed = segment(raw);
        assert_eq!(
            parsed.points,
            points(&["属性：电属性", "种族值：总和320", "特性：静电"])
        );
    }

    #[test]
    fn test_fixed_lead_alone_has_no_points() {
        let parsed = segment("1. 皮卡丘为电属性宝可梦，其种族值及核心信息如下:");
        assert_eq!(parsed.summary, "皮卡丘为电属性宝可梦，其种族值及核心信息如下:");
        assert!(parsed.points.is_empty());
    }

    #[test]
    fn test_ordinal_list() {
        let (shape, parsed) = segment_with_shape("0. 这是概述\n1. 第一点\n2. 第二点\n");
        assert_eq!(shape, AnswerShape::OrdinalList);
        assert_eq!(parsed.summary, "这是概述");
        assert_eq!(parsed.points, points(&["第一点", "第二点"]));
    }

    #[test]
    fn test_ordinal_list_keeps_inner_remainder_of_nested_items() {
        let parsed = segment("喷火龙的信息如下\n1. 1.属性：火/飞行\n2. 2.种族值：534\n3. 特性：猛火");
        assert_eq!(parsed.summary, "喷火龙的信息如下");
        assert_eq!(
            parsed.points,
            points(&["属性：火/飞行", "种族值：534", "特性：猛火"])
        );
    }

    #[test]
    fn test_ordinal_list_handles_crlf() {
        let parsed = segment("概述\r\n1. 第一\r\n2. 第二\r\n");
        assert_eq!(parsed.summary, "概述");
        assert_eq!(parsed.points, points(&["第一", "第二"]));
    }

    #[test]
    fn test_labels_on_separate_lines() {
        let parsed = segment("整体：这是概述。分点：\n1. 第一点\n2. 第二点");
        assert_eq!(parsed.summary, "这是概述。");
        assert_eq!(parsed.points, points(&["第一点", "第二点"]));
    }

    #[test]
    fn test_labeled_sections_on_one_line() {
        let (shape, parsed) = segment_with_shape("整体：皮卡丘是电属性。分点：1. 速度很快");
        assert_eq!(shape, AnswerShape::LabeledSections);
        assert_eq!(parsed.summary, "皮卡丘是电属性。");
        assert_eq!(parsed.points, points(&["速度很快"]));
    }

    #[test]
    fn test_labeled_sections_without_items() {
        assert_eq!(segment("整体：只有概述"), ParsedAnswer::plain("只有概述"));
        assert_eq!(segment("整体：概述。分点："), ParsedAnswer::plain("概述。"));
    }

    #[test]
    fn test_section_headers_are_removed() {
        let raw = "### 整体概括\n皮卡丘是电属性宝可梦。\n\n### 分点说明\n1. 属性：电\n2. 特性：静电";
        let parsed = segment(raw);
        assert_eq!(parsed.summary, "皮卡丘是电属性宝可梦。");
        assert_eq!(parsed.points, points(&["属性：电", "特性：静电"]));
        assert!(!parsed.summary.contains("###"));
    }

    #[test]
    fn test_headers_removed_from_plain_text() {
        let parsed = segment("###整体概括   超梦是超能力属性。");
        assert_eq!(parsed, ParsedAnswer::plain("超梦是超能力属性。"));
    }

    #[test]
    fn test_malformed_inputs_do_not_panic() {
        let inputs = [
            "1.",
            "\n\n2.",
            "\n1.\n2.",
            "分点：",
            "整体：",
            "###",
            "### 分点说明",
            "1. 1.",
            "3. 1.   ",
            "整体：分点：整体：分点：",
            "1. 皮卡丘为电属性宝可梦，其种族值及核心信息如下:\n5. 5.",
            "\u{0}\u{feff}\r\r\n",
        ];
        for input in inputs {
            let parsed = segment(input);
            assert!(parsed.points.iter().all(|p| !p.is_empty()), "{input:?}");
        }
    }

    #[test]
    fn test_tidy_labels_is_identity_without_labels() {
        assert_eq!(tidy_labels("  普通句子。 "), "普通句子。");
        assert_eq!(tidy_labels("整体：甲分点：乙"), "甲");
    }
}
