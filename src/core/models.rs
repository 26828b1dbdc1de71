use serde::{Deserialize, Serialize};

pub const DEFAULT_SENTENCE_COUNT: i64 = 3;

const MIN_TOKENS_PER_SENTENCE: u64 = 20;
const MAX_TOKENS_PER_SENTENCE: u64 = 30;
const MAX_TOKENS_BUFFER: u64 = 50;
const WIDENING_MARGIN: u64 = 20;

/// Raw input for one summarization call, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarizationRequest {
    pub text: String,
    pub num_sentences: i64,
}

impl SummarizationRequest {
    /// Builds a request, trimming surrounding whitespace from the text.
    #[must_use]
    pub fn new(text: &str, num_sentences: i64) -> Self {
        Self {
            text: text.trim().to_string(),
            num_sentences,
        }
    }
}

impl Default for SummarizationRequest {
    fn default() -> Self {
        Self {
            text: String::new(),
            num_sentences: DEFAULT_SENTENCE_COUNT,
        }
    }
}

/// Generation length bounds handed to the summarization engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthBounds {
    pub min_tokens: u64,
    pub max_tokens: u64,
}

impl LengthBounds {
    /// Derives bounds from a positive sentence count.
    ///
    /// `min = n * 20`, `max = n * 30 + 50`; `max` is widened to `min + 20`
    /// should it ever fall below `min`.
    #[must_use]
    pub fn derive(sentence_count: u64) -> Self {
        let min_tokens = sentence_count.saturating_mul(MIN_TOKENS_PER_SENTENCE);
        let mut max_tokens = sentence_count
            .saturating_mul(MAX_TOKENS_PER_SENTENCE)
            .saturating_add(MAX_TOKENS_BUFFER);

        if min_tokens > max_tokens {
            max_tokens = min_tokens.saturating_add(WIDENING_MARGIN);
        }

        Self {
            min_tokens,
            max_tokens,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarizationResult {
    pub summary: String,
}

/// Shape of the response, picked once from the request's content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseMode {
    Json,
    Form,
}

impl ResponseMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ResponseMode::Json => "json",
            ResponseMode::Form => "form",
        }
    }
}
