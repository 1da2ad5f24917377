//! # DexQA Domain Logic
//!
//! File: cli/src/dex/mod.rs
//!
//! ## Overview
//!
//! Everything here is pure and network-free:
//! - `question`: validation of user questions before they are sent
//! - `segmenter`: splitting a free-text reply into a summary and itemized points
//!
pub mod question;
pub mod segmenter;

pub use question::Question;
pub use segmenter::{segment, segment_with_shape, AnswerShape, ParsedAnswer};
