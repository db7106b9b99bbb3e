use std::fmt;

use crate::types::ErrorCode;

/// Failure reported by a platform or raised by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameError {
    code: ErrorCode,
    message: String,
}

impl GameError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "{} ({})", self.code, self.code as i32)
        } else {
            write!(f, "{} ({}): {}", self.code, self.code as i32, self.message)
        }
    }
}

impl std::error::Error for GameError {}
