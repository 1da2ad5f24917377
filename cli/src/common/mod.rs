//! # DexQA Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared utilities used by the command handlers, kept apart from command-specific
//! logic (`commands::`), core infrastructure (`core::`) and the domain logic
//! (`dex::`).
//!
//! - **`network`**: the HTTP client for the question-answering service.
//! - **`ui`**: terminal rendering of answers, errors and status.
//!

/// HTTP access to the question-answering service.
pub mod network;
/// Terminal rendering helpers.
pub mod ui;
