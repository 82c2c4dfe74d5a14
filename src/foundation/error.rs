use crate::config::error::ParseError;

/// Convenience result type used across the slideshow engine.
pub type SlideshowResult<T> = Result<T, SlideshowError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum SlideshowError {
    /// Fatal configuration syntax error with its source position.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Invalid programmatically-built show data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Failure reported by a renderer collaborator.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SlideshowError {
    /// Build a [`SlideshowError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SlideshowError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// The parse diagnostic, if this error came from the configuration parser.
    pub fn as_parse(&self) -> Option<&ParseError> {
        match self {
            Self::Parse(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
