//! Lambda handler: routes proxy events to the summarization pipeline.
//!
//! Routes:
//! - `/`: `POST` summarizes (JSON or form, by `Content-Type`); any other
//!   method renders the empty input page.
//! - `/api/summarize/`: `POST` summarizes and always answers JSON; any other
//!   method is a 405.
//! - anything else is a 404.

use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::{helpers, parsing};
use crate::core::models::{ResponseMode, SummarizationRequest, SummarizationResult};
use crate::errors::SummarizerError;
use crate::state::AppState;
use crate::views::PageContext;

pub use self::function_handler as handler;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Home,
    SummarizeApi,
    NotFound,
}

impl Route {
    fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "" => Route::Home,
            "/api/summarize" => Route::SummarizeApi,
            _ => Route::NotFound,
        }
    }
}

/// Lambda entrypoint. Request-level failures are answered with an error
/// response, never with `Err`.
///
/// # Errors
///
/// Never returns an error; the `Result` matches `lambda_runtime::service_fn`.
pub async fn function_handler(
    state: Arc<AppState>,
    event: LambdaEvent<Value>,
) -> Result<Value, Error> {
    Ok(handle_request(&state, &event.payload).await)
}

#[tracing::instrument(level = "info", skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn handle_request(state: &AppState, payload: &Value) -> Value {
    let method = parsing::request_method(payload);
    let path = parsing::request_path(payload);
    let route = Route::from_path(path);
    info!(method = %method, path = %path, "Request received");

    let response = match route {
        Route::Home if method == "POST" => {
            let mode = parsing::event_response_mode(payload);
            summarize_event(state, payload, mode).await
        }
        Route::Home => render_page(state, 200, &PageContext::default()),
        Route::SummarizeApi if method == "POST" => {
            summarize_event(state, payload, ResponseMode::Json).await
        }
        Route::SummarizeApi => {
            let err = SummarizerError::MethodNotAllowed;
            helpers::err_response(err.status_code(), &err.to_string())
        }
        Route::NotFound => {
            let err = SummarizerError::NotFound;
            helpers::err_response(err.status_code(), &err.to_string())
        }
    };

    info!(status = helpers::status_of(&response), "Request completed");
    response
}

async fn summarize_event(state: &AppState, payload: &Value, mode: ResponseMode) -> Value {
    info!(mode = mode.as_str(), "Summarization requested");

    let parsed = parsing::extract_body(payload).and_then(|body| match mode {
        ResponseMode::Json => parsing::parse_json_request(&body),
        ResponseMode::Form => Ok(parsing::parse_form_request(&body)),
    });

    let (request, outcome) = match parsed {
        Ok(request) => {
            let outcome = state.summarizer.summarize(&request).await;
            (request, outcome)
        }
        Err(e) => (SummarizationRequest::default(), Err(e)),
    };

    if let Err(e) = &outcome {
        warn!(status = e.status_code(), "Summarization failed: {}", e);
    }

    match mode {
        ResponseMode::Json => json_outcome(outcome),
        ResponseMode::Form => form_outcome(state, request, outcome),
    }
}

fn json_outcome(outcome: Result<SummarizationResult, SummarizerError>) -> Value {
    match outcome {
        Ok(result) => helpers::ok_summary(&result.summary),
        Err(e) => helpers::err_response(e.status_code(), &e.to_string()),
    }
}

fn form_outcome(
    state: &AppState,
    request: SummarizationRequest,
    outcome: Result<SummarizationResult, SummarizerError>,
) -> Value {
    let (status, summary, error) = match outcome {
        Ok(result) => (200, Some(result.summary), None),
        Err(e) => (e.status_code(), None, Some(e.to_string())),
    };

    let page = PageContext {
        summary,
        text: request.text,
        num_sentences: request.num_sentences,
        error,
    };
    render_page(state, status, &page)
}

fn render_page(state: &AppState, status: u16, page: &PageContext) -> Value {
    match state.pages.render(page) {
        Ok(html) => helpers::html_response(status, html),
        Err(e) => {
            error!("Failed to render page: {}", e);
            helpers::err_response(500, "Failed to render page")
        }
    }
}
