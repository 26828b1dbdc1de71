//! Summarization engine seam and its process-wide handle.
//!
//! The engine is built once at cold start from [`AppConfig`] and then shared
//! read-only by every invocation. A failed build is kept as
//! [`EngineHandle::Unavailable`] so requests can report it without retrying.

use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use tracing::{error, info};

use super::huggingface::HuggingFaceEngine;
use super::openai::OpenAiEngine;
use crate::core::config::{AppConfig, EngineBackend};
use crate::core::models::LengthBounds;
use crate::errors::SummarizerError;

/// A pre-trained text-to-text summarizer.
#[async_trait]
pub trait SummarizationEngine: Send + Sync {
    /// Generates one summary of `text` within `bounds`.
    ///
    /// `sampling = false` asks for deterministic decoding.
    async fn generate(
        &self,
        text: &str,
        bounds: LengthBounds,
        sampling: bool,
    ) -> Result<String, SummarizerError>;

    /// Identifier of the backing model, for logs.
    fn model_name(&self) -> &str;
}

#[derive(Clone)]
pub enum EngineHandle {
    Ready(Arc<dyn SummarizationEngine>),
    Unavailable { reason: String },
}

impl EngineHandle {
    pub fn ready<E>(engine: E) -> Self
    where
        E: SummarizationEngine + 'static,
    {
        EngineHandle::Ready(Arc::new(engine))
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        EngineHandle::Unavailable {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, EngineHandle::Ready(_))
    }

    /// Borrows the engine, or fails with [`SummarizerError::ModelNotLoaded`].
    pub fn engine(&self) -> Result<&dyn SummarizationEngine, SummarizerError> {
        match self {
            EngineHandle::Ready(engine) => Ok(engine.as_ref()),
            EngineHandle::Unavailable { .. } => Err(SummarizerError::ModelNotLoaded),
        }
    }
}

impl std::fmt::Debug for EngineHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineHandle::Ready(engine) => f
                .debug_tuple("Ready")
                .field(&engine.model_name())
                .finish(),
            EngineHandle::Unavailable { reason } => f
                .debug_struct("Unavailable")
                .field("reason", reason)
                .finish(),
        }
    }
}

/// Builds the configured engine, logging and capturing any failure.
#[must_use]
pub fn init_engine(config: &AppConfig) -> EngineHandle {
    info!(
        backend = ?config.backend,
        model = %config.model_name(),
        "Loading summarization engine"
    );

    match build_engine(config) {
        Ok(handle) => {
            info!("Summarization engine loaded successfully");
            handle
        }
        Err(e) => {
            error!("Error loading summarization engine: {}", e);
            EngineHandle::unavailable(e.to_string())
        }
    }
}

fn build_engine(config: &AppConfig) -> Result<EngineHandle, SummarizerError> {
    let http = build_http_client(config)?;

    match config.backend {
        EngineBackend::HuggingFace => {
            let token = config.hf_api_token.clone().ok_or_else(|| {
                SummarizerError::EngineError("HF_API_TOKEN is not set".to_string())
            })?;
            Ok(EngineHandle::ready(HuggingFaceEngine::new(
                http,
                config.hf_api_base.as_deref(),
                token,
                config.model_name().to_string(),
            )?))
        }
        EngineBackend::OpenAi => {
            let api_key = config.openai_api_key.clone().ok_or_else(|| {
                SummarizerError::EngineError("OPENAI_API_KEY is not set".to_string())
            })?;
            Ok(EngineHandle::ready(OpenAiEngine::new(
                http,
                config.openai_api_base.as_deref(),
                api_key,
                config.openai_org_id.clone(),
                config.model_name().to_string(),
            )?))
        }
    }
}

fn build_http_client(config: &AppConfig) -> Result<Client, SummarizerError> {
    let mut builder = Client::builder();
    if let Some(timeout) = config.request_timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| SummarizerError::HttpError(format!("Failed to build HTTP client: {e}")))
}
