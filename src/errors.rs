use thiserror::Error;

pub const NO_TEXT_PROVIDED: &str = "No text provided.";
pub const NON_POSITIVE_SENTENCES: &str = "Number of sentences must be positive.";
pub const INVALID_JSON: &str = "Invalid JSON format in request body.";
pub const INVALID_INPUT: &str = "Invalid input format.";

#[derive(Debug, Error)]
pub enum SummarizerError {
    #[error("{0}")]
    ValidationError(String),

    #[error("Summarization model not loaded.")]
    ModelNotLoaded,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Not found")]
    NotFound,

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    #[error("Summarization backend error: {0}")]
    EngineError(String),

    #[error("An unexpected error occurred during summarization: {0}")]
    Unexpected(String),
}

impl SummarizerError {
    #[must_use]
    pub fn validation(message: &str) -> Self {
        SummarizerError::ValidationError(message.to_string())
    }

    /// HTTP status code the error is reported with.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            SummarizerError::ValidationError(_) => 400,
            SummarizerError::MethodNotAllowed => 405,
            SummarizerError::NotFound => 404,
            SummarizerError::ModelNotLoaded
            | SummarizerError::HttpError(_)
            | SummarizerError::EngineError(_)
            | SummarizerError::Unexpected(_) => 500,
        }
    }

    /// Wraps a failure raised while generating or trimming a summary.
    ///
    /// Validation and availability errors pass through untouched so callers
    /// keep their fixed messages.
    #[must_use]
    pub fn into_unexpected(self) -> Self {
        match self {
            SummarizerError::HttpError(_) | SummarizerError::EngineError(_) => {
                SummarizerError::Unexpected(self.to_string())
            }
            other => other,
        }
    }
}

impl From<reqwest::Error> for SummarizerError {
    fn from(error: reqwest::Error) -> Self {
        SummarizerError::HttpError(error.to_string())
    }
}

impl From<serde_json::Error> for SummarizerError {
    fn from(error: serde_json::Error) -> Self {
        SummarizerError::EngineError(format!("Failed to parse backend response: {error}"))
    }
}
