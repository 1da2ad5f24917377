//! # DexQA Question Validation
//!
//! File: cli/src/dex/question.rs
//!
//! A `Question` can only be built through `Question::parse`, so holding one
//! means the text is trimmed and between 1 and `MAX_QUESTION_CHARS` characters.
//!
use crate::core::error::DexError;
use std::fmt;

/// Upper bound on question length, counted in characters after trimming.
pub const MAX_QUESTION_CHARS: usize = 500;

/// A validated, trimmed question ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question(String);

impl Question {
    /// Trims `input` and checks its length.
    ///
    /// ## Errors
    ///
    /// Returns `DexError::InvalidQuestion` when the trimmed text is empty or
    /// longer than `MAX_QUESTION_CHARS`.
    pub fn parse(input: &str) -> Result<Self, DexError> {
        let trimmed = input.trim();
        let len = trimmed.chars().count();
        if len == 0 || len > MAX_QUESTION_CHARS {
            return Err(DexError::InvalidQuestion);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
