//! # DexQA Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the top-level commands of the DexQA CLI and makes them
//! accessible to `main.rs`. Each command defines its own `clap` arguments struct
//! and an async `handle_*` function taking those arguments and the effective
//! configuration.
//!
//! ## Commands
//!
//! - `ask`: Ask one question and print the segmented answer
//! - `parse`: Segment a saved answer offline
//! - `shell`: Interactive prompt, one question per line
//! - `ping`: Check that the service is reachable
//!

/// One-shot question. Also hosts the answer formatting shared with `shell`.
pub mod ask;
/// Offline segmentation of saved answers.
pub mod parse;
/// Service reachability check.
pub mod ping;
/// Interactive question loop.
pub mod shell;
