//! # DexQA UI Utilities Module (`common::ui`)
//!
//! File: cli/src/common/ui/mod.rs
//!
//! ## Overview
//!
//! Terminal presentation for DexQA.
//!
//! - **`render`**: pure layout functions for answers, the empty state, errors,
//!   the waiting line, the footer and `--json` output.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::ui::render::{self, AnswerView, Labels};
//!
//! let parsed = dex::segment(&response.answer);
//! let view = AnswerView { pokemon_name: None, pokemon_id: None, parsed: &parsed };
//! println!("{}", render::render_answer(&view, &Labels::for_mode(false)));
//! ```
//!
pub mod render;
