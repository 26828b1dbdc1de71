//! Hugging Face inference client for seq2seq summarization models.
//!
//! Talks to the hosted `summarization` task: the request carries the model's
//! own `min_length`/`max_length`/`do_sample` generation parameters, so the
//! derived [`LengthBounds`] reach the model untouched.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, info};
use url::Url;

use super::engine::SummarizationEngine;
use crate::core::config::DEFAULT_HF_API_BASE;
use crate::core::models::LengthBounds;
use crate::errors::SummarizerError;

#[derive(Debug, Deserialize)]
struct SummaryOutput {
    summary_text: String,
}

pub struct HuggingFaceEngine {
    http: Client,
    endpoint: Url,
    api_token: String,
    model_name: String,
}

impl HuggingFaceEngine {
    /// # Errors
    ///
    /// Returns an error if `api_base` is not an absolute URL.
    pub fn new(
        http: Client,
        api_base: Option<&str>,
        api_token: String,
        model_name: String,
    ) -> Result<Self, SummarizerError> {
        let base = api_base.unwrap_or(DEFAULT_HF_API_BASE).trim_end_matches('/');
        let endpoint = Url::parse(&format!("{base}/models/{model_name}")).map_err(|e| {
            SummarizerError::EngineError(format!("Invalid Hugging Face API base '{base}': {e}"))
        })?;

        Ok(Self {
            http,
            endpoint,
            api_token,
            model_name,
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    fn request_body(text: &str, bounds: LengthBounds, sampling: bool) -> Value {
        json!({
            "inputs": text,
            "parameters": {
                "min_length": bounds.min_tokens,
                "max_length": bounds.max_tokens,
                "do_sample": sampling
            },
            "options": { "wait_for_model": true }
        })
    }
}

#[async_trait]
impl SummarizationEngine for HuggingFaceEngine {
    async fn generate(
        &self,
        text: &str,
        bounds: LengthBounds,
        sampling: bool,
    ) -> Result<String, SummarizerError> {
        info!(
            model = %self.model_name,
            min_length = bounds.min_tokens,
            max_length = bounds.max_tokens,
            "Requesting summary from Hugging Face"
        );

        let response = self
            .http
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_token)
            .json(&Self::request_body(text, bounds, sampling))
            .send()
            .await
            .map_err(|e| {
                SummarizerError::HttpError(format!("Hugging Face API request failed: {e}"))
            })?;

        let status = response.status();
        let body = response.text().await?;
        debug!(status = %status, bytes = body.len(), "Hugging Face response received");

        if !status.is_success() {
            let detail = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
                .unwrap_or(body);
            return Err(SummarizerError::EngineError(format!(
                "Hugging Face API error (status {status}): {detail}"
            )));
        }

        let outputs: Vec<SummaryOutput> = serde_json::from_str(&body)?;
        outputs
            .into_iter()
            .next()
            .map(|o| o.summary_text)
            .ok_or_else(|| {
                SummarizerError::EngineError("No summary in Hugging Face response".to_string())
            })
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
