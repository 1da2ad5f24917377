//! # DexQA Network Utilities Module (`common::network`)
//!
//! File: cli/src/common/network/mod.rs
//!
//! ## Overview
//!
//! Network access for DexQA. Currently this is a single submodule:
//!
//! - **`http`**: the question-answering client (`QaClient`), its request and
//!   response types, and the status-code classification used to pick the
//!   user-facing error message.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::network::http::QaClient;
//!
//! let client = QaClient::new(&cfg.api)?;
//! let info = client.health().await?;
//! ```
//!
pub mod http;
