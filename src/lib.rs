//! NLP Summarizer - a small web service that condenses text to a requested
//! number of sentences using a hosted pre-trained summarization model.
//!
//! # Architecture
//!
//! The service runs as a single AWS Lambda behind a function URL or an API
//! Gateway HTTP API:
//! - `GET /` renders the input page
//! - `POST /` summarizes form or JSON input, answering in the same shape
//! - `POST /api/summarize/` summarizes JSON input for the page's script
//!
//! The summarization engine (Hugging Face inference or `OpenAI`) is loaded
//! once at cold start and shared by every invocation. Sentence segmentation
//! uses Unicode sentence boundaries that respect common abbreviations.
//!
//! # Example
//!
//! ```no_run
//! use nlp_summarizer::core::config::AppConfig;
//! use nlp_summarizer::core::models::SummarizationRequest;
//! use nlp_summarizer::state::AppState;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     nlp_summarizer::setup_logging();
//!
//!     let config = AppConfig {
//!         hf_api_token: Some("hf_dummy_token".to_string()),
//!         ..AppConfig::default()
//!     };
//!     let state = AppState::from_config(&config)?;
//!
//!     let request = SummarizationRequest::new("A long article about foxes...", 2);
//!     let result = state.summarizer.summarize(&request).await?;
//!     println!("Summary: {}", result.summary);
//!
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod ai;
pub mod api;
pub mod core;
pub mod errors;
pub mod state;
pub mod summarizer;
pub mod views;

pub use errors::SummarizerError;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// This function sets up tracing-subscriber with a JSON formatter suitable for
/// `CloudWatch` Logs integration, filtered by `RUST_LOG` (default `info`).
/// It should be called once at process start.
///
/// # Example
///
/// ```
/// // Initialize structured logging at the start of your Lambda handler
/// nlp_summarizer::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
