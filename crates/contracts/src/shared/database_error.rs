use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Normalised failure of a single backend operation.
///
/// Every gateway call resolves to either its value or this shape; nothing
/// below the gateway is allowed to escape as a panic or a raw transport error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct DatabaseError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl DatabaseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
        }
    }

    pub fn with_code(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: Some(code.into()),
        }
    }

    /// Keep the code but replace the user-facing message
    pub fn relabel(self, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: self.code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_message_only() {
        let err = DatabaseError::with_code("Failed to fetch bug reports", "42501");
        assert_eq!(err.to_string(), "Failed to fetch bug reports");
        assert_eq!(err.code.as_deref(), Some("42501"));
    }

    #[test]
    fn relabel_preserves_code() {
        let err = DatabaseError::with_code("permission denied", "42501").relabel("Failed");
        assert_eq!(err.message, "Failed");
        assert_eq!(err.code.as_deref(), Some("42501"));
    }
}
