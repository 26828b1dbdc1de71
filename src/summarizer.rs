//! Request-independent summarization pipeline.
//!
//! [`Summarizer`] is built once at cold start and owns the engine handle and
//! the sentence splitter. Each call validates its input, derives the length
//! bounds, asks the engine for a summary and trims it to the requested number
//! of sentences.

use std::sync::Arc;
use tracing::{error, info};

use crate::ai::{EngineHandle, SentenceSplitter, UnicodeSentenceSplitter, trim_to_sentences};
use crate::core::models::{LengthBounds, SummarizationRequest, SummarizationResult};
use crate::errors::{NO_TEXT_PROVIDED, NON_POSITIVE_SENTENCES, SummarizerError};

pub struct Summarizer {
    engine: EngineHandle,
    splitter: Arc<dyn SentenceSplitter>,
}

impl Summarizer {
    #[must_use]
    pub fn new(engine: EngineHandle) -> Self {
        Self::with_splitter(engine, Arc::new(UnicodeSentenceSplitter))
    }

    #[must_use]
    pub fn with_splitter(engine: EngineHandle, splitter: Arc<dyn SentenceSplitter>) -> Self {
        Self { engine, splitter }
    }

    #[must_use]
    pub fn engine(&self) -> &EngineHandle {
        &self.engine
    }

    /// Runs one request through validation, generation and trimming.
    ///
    /// # Errors
    ///
    /// - [`SummarizerError::ValidationError`] for empty text or a non-positive
    ///   sentence count; the engine is not called.
    /// - [`SummarizerError::ModelNotLoaded`] when the engine failed to load.
    /// - [`SummarizerError::Unexpected`] when the engine call fails.
    pub async fn summarize(
        &self,
        request: &SummarizationRequest,
    ) -> Result<SummarizationResult, SummarizerError> {
        let text = request.text.trim();
        if text.is_empty() {
            return Err(SummarizerError::validation(NO_TEXT_PROVIDED));
        }
        let sentence_count = u64::try_from(request.num_sentences)
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| SummarizerError::validation(NON_POSITIVE_SENTENCES))?;

        let engine = self.engine.engine()?;

        let bounds = LengthBounds::derive(sentence_count);

        #[cfg(feature = "debug-logs")]
        info!(input = %text, "Summarizing input");

        info!(
            model = %engine.model_name(),
            input_chars = text.chars().count(),
            num_sentences = sentence_count,
            min_tokens = bounds.min_tokens,
            max_tokens = bounds.max_tokens,
            "Generating summary"
        );

        let generated = engine.generate(text, bounds, false).await.map_err(|e| {
            error!("Error during summarization: {}", e);
            e.into_unexpected()
        })?;

        let limit = usize::try_from(sentence_count).unwrap_or(usize::MAX);
        let summary = trim_to_sentences(self.splitter.as_ref(), &generated, limit);

        info!(summary_chars = summary.chars().count(), "Summary generated");

        Ok(SummarizationResult { summary })
    }
}
