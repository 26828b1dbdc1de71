use anyhow::Context;
use std::sync::Arc;

use nlp_summarizer::ai::{EngineHandle, init_engine};
use nlp_summarizer::api::handler;
use nlp_summarizer::core::config::AppConfig;
use nlp_summarizer::state::AppState;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    nlp_summarizer::setup_logging();

    let engine = match AppConfig::from_env() {
        Ok(config) => init_engine(&config),
        Err(e) => {
            error!("Config error: {}", e);
            EngineHandle::unavailable(e)
        }
    };

    let state = Arc::new(AppState::new(engine).context("Failed to compile page template")?);
    info!(engine_ready = state.summarizer.engine().is_ready(), "Starting API Lambda");

    lambda_runtime::run(lambda_runtime::service_fn(|event| {
        handler(Arc::clone(&state), event)
    }))
    .await
}
