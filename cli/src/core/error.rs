//! # DexQA Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout DexQA. Two kinds of
//! failure reach this level:
//! - Request outcomes the user must see (invalid question, not found, server
//!   trouble, network trouble). Each displays one fixed message.
//! - Configuration failures, which carry a detail string and are wrapped with
//!   `anyhow` context by the caller.
//!
//! Segmentation failures never appear here: the segmenter recovers from them
//! internally (see `dex::segmenter`).
//!
//! ## Architecture
//!
//! - `DexError`: a `thiserror` enum with one variant per outcome.
//! - `Result<T>`: a type alias for `anyhow::Result<T>` used by command handlers.
//!
//! ## Examples
//!
//! ```rust
//! // Surface a request outcome
//! return Err(DexError::PokemonNotFound)?;
//!
//! // Pattern matching on a request outcome
//! match client.ask(&question).await {
//!     Ok(response) => render(response),
//!     Err(e) if e.is_user_facing() => println!("{}", render::render_error(&e)),
//!     Err(e) => return Err(e.into()),
//! }
//! ```
//!
use thiserror::Error;

/// Custom error type for the DexQA application.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DexError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// The question was empty after trimming or longer than the limit.
    #[error("请输入有效问题（1-500个字符）")]
    InvalidQuestion,

    /// HTTP 400 from the service.
    #[error("输入问题无法理解，请尝试重新表述")]
    Unintelligible,

    /// HTTP 404 from the service.
    #[error("未找到相关宝可梦信息，请检查是否正确拼写了宝可梦名称")]
    PokemonNotFound,

    /// HTTP 500 from the service.
    #[error("服务器暂时无法处理请求，请稍后重试")]
    ServerUnavailable,

    /// Any other status, a transport failure, or an undecodable success body.
    /// `detail` is for logs only.
    #[error("网络连接问题，请检查您的网络并重试")]
    Network { detail: String },
}

impl DexError {
    /// Returns true for the outcomes that have a fixed user-facing message.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            DexError::InvalidQuestion
                | DexError::Unintelligible
                | DexError::PokemonNotFound
                | DexError::ServerUnavailable
                | DexError::Network { .. }
        )
    }
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let config_err = DexError::Config("base_url is empty".to_string());
        assert_eq!(config_err.to_string(), "Configuration error: base_url is empty");

        assert_eq!(
            DexError::InvalidQuestion.to_string(),
            "请输入有效问题（1-500个字符）"
        );
        assert_eq!(
            DexError::PokemonNotFound.to_string(),
            "未找到相关宝可梦信息，请检查是否正确拼写了宝可梦名称"
        );
    }

    #[test]
    fn test_network_detail_is_not_displayed() {
        let err = DexError::Network {
            detail: "connection refused (os error 111)".into(),
        };
        assert_eq!(err.to_string(), "网络连接问题，请检查您的网络并重试");
        assert!(!err.to_string().contains("refused"));
    }

    #[test]
    fn test_user_facing_classification() {
        assert!(DexError::Unintelligible.is_user_facing());
        assert!(DexError::ServerUnavailable.is_user_facing());
        assert!(!DexError::Config("x".into()).is_user_facing());
    }
}
