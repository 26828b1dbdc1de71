//! `OpenAI` chat-completions backend.
//!
//! Chat models have no minimum-length knob, so the lower bound travels in the
//! system prompt while the upper bound is enforced through `max_tokens`.

use async_trait::async_trait;
use openai_api_rs::v1::chat_completion::{ChatCompletionMessage, Content, MessageRole};
use reqwest::Client;
use serde_json::{Value, json};
use tracing::{debug, info};
use url::Url;

use super::engine::SummarizationEngine;
use crate::core::config::DEFAULT_OPENAI_API_BASE;
use crate::core::models::LengthBounds;
use crate::errors::SummarizerError;

const SAMPLING_TEMPERATURE: f64 = 0.7;

pub struct OpenAiEngine {
    http: Client,
    endpoint: Url,
    api_key: String,
    org_id: Option<String>,
    model_name: String,
}

impl OpenAiEngine {
    /// # Errors
    ///
    /// Returns an error if `api_base` is not an absolute URL.
    pub fn new(
        http: Client,
        api_base: Option<&str>,
        api_key: String,
        org_id: Option<String>,
        model_name: String,
    ) -> Result<Self, SummarizerError> {
        let base = api_base
            .unwrap_or(DEFAULT_OPENAI_API_BASE)
            .trim_end_matches('/');
        let endpoint = Url::parse(&format!("{base}/chat/completions")).map_err(|e| {
            SummarizerError::EngineError(format!("Invalid OpenAI API base '{base}': {e}"))
        })?;

        Ok(Self {
            http,
            endpoint,
            api_key,
            org_id,
            model_name,
        })
    }

    #[must_use]
    pub fn build_prompt(text: &str, bounds: LengthBounds) -> Vec<ChatCompletionMessage> {
        vec![
            ChatCompletionMessage {
                role: MessageRole::system,
                content: Content::Text(format!(
                    "You are a news-style summarizer. Summarize the user's text as plain prose \
                    made of complete sentences. Do not add headings, bullet points, or commentary. \
                    Write at least {} and at most {} tokens.",
                    bounds.min_tokens, bounds.max_tokens
                )),
                name: None,
                tool_calls: None,
                tool_call_id: None,
            },
            ChatCompletionMessage {
                role: MessageRole::user,
                content: Content::Text(text.to_string()),
                name: None,
                tool_calls: None,
                tool_call_id: None,
            },
        ]
    }

    fn request_body(
        &self,
        text: &str,
        bounds: LengthBounds,
        sampling: bool,
    ) -> Result<Value, SummarizerError> {
        let messages = serde_json::to_value(Self::build_prompt(text, bounds))?;
        let temperature = if sampling { SAMPLING_TEMPERATURE } else { 0.0 };

        Ok(json!({
            "model": self.model_name,
            "messages": messages,
            "max_tokens": bounds.max_tokens,
            "temperature": temperature
        }))
    }
}

fn extract_message_text(response_json: &Value) -> Option<String> {
    response_json
        .get("choices")
        .and_then(|c| c.as_array())
        .and_then(|choices| choices.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(|content| content.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl SummarizationEngine for OpenAiEngine {
    async fn generate(
        &self,
        text: &str,
        bounds: LengthBounds,
        sampling: bool,
    ) -> Result<String, SummarizerError> {
        info!(
            model = %self.model_name,
            min_tokens = bounds.min_tokens,
            max_tokens = bounds.max_tokens,
            "Requesting summary from OpenAI"
        );

        let mut request = self
            .http
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&self.request_body(text, bounds, sampling)?);

        if let Some(org) = &self.org_id {
            request = request.header("OpenAI-Organization", org);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SummarizerError::HttpError(format!("OpenAI API request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|e| {
                format!("Failed to read error response body (status {status}): {e}")
            });
            return Err(SummarizerError::EngineError(format!(
                "OpenAI API error (status {status}): {error_text}"
            )));
        }

        let response_json: Value = response.json().await.map_err(|e| {
            SummarizerError::EngineError(format!("Failed to parse OpenAI response: {e}"))
        })?;
        debug!("OpenAI response parsed");

        extract_message_text(&response_json)
            .ok_or_else(|| SummarizerError::EngineError("No text in OpenAI response".to_string()))
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
