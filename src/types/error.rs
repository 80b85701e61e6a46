use thiserror::Error;

/// Errors produced when reading a rule document from JSON text.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("malformed rule document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("rule document must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },
}

/// Returned by a [`TagParser`](crate::TagParser) when a tag payload is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("bad tag payload: {message}")]
pub struct TagParseError {
    message: String,
}

impl TagParseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}
