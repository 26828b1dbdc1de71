use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use nlp_summarizer::ai::{EngineHandle, SummarizationEngine};
use nlp_summarizer::api::handle_request;
use nlp_summarizer::core::models::LengthBounds;
use nlp_summarizer::errors::SummarizerError;
use nlp_summarizer::state::AppState;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

const THREE_SENTENCES: &str = "The quick brown fox jumps. It is very agile. The fox runs fast.";

#[derive(Debug, Clone, PartialEq)]
struct Call {
    text: String,
    bounds: LengthBounds,
    sampling: bool,
}

/// Deterministic engine returning a fixed summary and recording its calls.
struct FixedEngine {
    output: Result<String, String>,
    calls: Arc<Mutex<Vec<Call>>>,
}

#[async_trait]
impl SummarizationEngine for FixedEngine {
    async fn generate(
        &self,
        text: &str,
        bounds: LengthBounds,
        sampling: bool,
    ) -> Result<String, SummarizerError> {
        self.calls.lock().unwrap().push(Call {
            text: text.to_string(),
            bounds,
            sampling,
        });
        self.output.clone().map_err(SummarizerError::EngineError)
    }

    fn model_name(&self) -> &str {
        "fixed"
    }
}

fn state_with(output: Result<&str, &str>) -> (AppState, Arc<Mutex<Vec<Call>>>) {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let engine = FixedEngine {
        output: output.map(str::to_string).map_err(str::to_string),
        calls: Arc::clone(&calls),
    };
    let state = AppState::new(EngineHandle::ready(engine)).expect("state builds");
    (state, calls)
}

fn unavailable_state() -> AppState {
    AppState::new(EngineHandle::unavailable("HF_API_TOKEN is not set")).expect("state builds")
}

fn event(method: &str, path: &str, content_type: Option<&str>, body: Option<&str>) -> Value {
    let mut headers = json!({});
    if let Some(ct) = content_type {
        headers["content-type"] = json!(ct);
    }
    json!({
        "rawPath": path,
        "requestContext": { "http": { "method": method } },
        "headers": headers,
        "body": body,
        "isBase64Encoded": false
    })
}

fn json_post(path: &str, body: &str) -> Value {
    event("POST", path, Some("application/json"), Some(body))
}

fn form_post(body: &str) -> Value {
    event(
        "POST",
        "/",
        Some("application/x-www-form-urlencoded"),
        Some(body),
    )
}

fn body_json(response: &Value) -> Value {
    serde_json::from_str(response["body"].as_str().expect("string body")).expect("JSON body")
}

#[tokio::test]
async fn get_root_renders_idle_page() {
    let (state, calls) = state_with(Ok(THREE_SENTENCES));
    let response = handle_request(&state, &event("GET", "/", None, None)).await;

    assert_eq!(response["statusCode"], 200);
    assert_eq!(response["headers"]["Content-Type"], "text/html; charset=utf-8");
    let html = response["body"].as_str().unwrap();
    assert!(html.contains("<form"));
    assert!(html.contains(r#"value="3""#));
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn json_post_returns_requested_sentences() {
    let (state, calls) = state_with(Ok(THREE_SENTENCES));
    let body = json!({ "text": THREE_SENTENCES, "num_sentences": 2 }).to_string();

    let response = handle_request(&state, &json_post("/", &body)).await;

    assert_eq!(response["statusCode"], 200);
    assert_eq!(
        body_json(&response),
        json!({ "summary": "The quick brown fox jumps. It is very agile." })
    );

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].text, THREE_SENTENCES);
    assert_eq!(
        calls[0].bounds,
        LengthBounds {
            min_tokens: 40,
            max_tokens: 110
        }
    );
    assert!(!calls[0].sampling);
}

#[tokio::test]
async fn api_path_answers_json() {
    let (state, _) = state_with(Ok(THREE_SENTENCES));
    let body = json!({ "text": "Some article.", "num_sentences": 1 }).to_string();

    for path in ["/api/summarize/", "/api/summarize"] {
        let response = handle_request(&state, &json_post(path, &body)).await;
        assert_eq!(response["statusCode"], 200);
        assert_eq!(body_json(&response)["summary"], "The quick brown fox jumps.");
    }
}

#[tokio::test]
async fn short_summary_is_not_padded() {
    let (state, _) = state_with(Ok("Only one sentence."));
    let body = json!({ "text": "Some article.", "num_sentences": 5 }).to_string();

    let response = handle_request(&state, &json_post("/", &body)).await;

    assert_eq!(response["statusCode"], 200);
    assert_eq!(body_json(&response)["summary"], "Only one sentence.");
}

#[tokio::test]
async fn abbreviations_survive_sentence_trimming() {
    let (state, _) = state_with(Ok(
        "Mr. Obama met U.S. officials in Washington. The talks went well.",
    ));
    let body = json!({ "text": "Some article.", "num_sentences": 1 }).to_string();

    let response = handle_request(&state, &json_post("/", &body)).await;

    assert_eq!(response["statusCode"], 200);
    assert_eq!(
        body_json(&response)["summary"],
        "Mr. Obama met U.S. officials in Washington."
    );
}

#[tokio::test]
async fn empty_text_is_rejected_without_calling_engine() {
    let (state, calls) = state_with(Ok(THREE_SENTENCES));

    for text in ["", "   ", "\n\t"] {
        let body = json!({ "text": text, "num_sentences": 3 }).to_string();
        let response = handle_request(&state, &json_post("/", &body)).await;

        assert_eq!(response["statusCode"], 400);
        assert_eq!(body_json(&response), json!({ "error": "No text provided." }));
    }
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn non_positive_count_is_rejected() {
    let (state, calls) = state_with(Ok(THREE_SENTENCES));

    for n in [0, -1, -100] {
        let body = json!({ "text": "hello world", "num_sentences": n }).to_string();
        let response = handle_request(&state, &json_post("/", &body)).await;

        assert_eq!(response["statusCode"], 400);
        assert_eq!(
            body_json(&response),
            json!({ "error": "Number of sentences must be positive." })
        );
    }
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let (state, _) = state_with(Ok(THREE_SENTENCES));
    let response = handle_request(&state, &json_post("/", "{\"text\": ")).await;

    assert_eq!(response["statusCode"], 400);
    assert_eq!(
        body_json(&response),
        json!({ "error": "Invalid JSON format in request body." })
    );
}

#[tokio::test]
async fn api_path_parses_body_as_json_regardless_of_content_type() {
    let (state, _) = state_with(Ok(THREE_SENTENCES));
    let response = handle_request(
        &state,
        &event(
            "POST",
            "/api/summarize/",
            Some("application/x-www-form-urlencoded"),
            Some("text=hello"),
        ),
    )
    .await;

    assert_eq!(response["statusCode"], 400);
    assert_eq!(
        body_json(&response)["error"],
        "Invalid JSON format in request body."
    );
}

#[tokio::test]
async fn unavailable_engine_fails_every_valid_post() {
    let state = unavailable_state();
    let body = json!({ "text": "hello world", "num_sentences": 2 }).to_string();

    for path in ["/", "/api/summarize/"] {
        let response = handle_request(&state, &json_post(path, &body)).await;
        assert_eq!(response["statusCode"], 500);
        assert_eq!(
            body_json(&response),
            json!({ "error": "Summarization model not loaded." })
        );
    }

    let response = handle_request(&state, &form_post("text=hello+world&num_sentences=2")).await;
    assert_eq!(response["statusCode"], 500);
    assert!(
        response["body"]
            .as_str()
            .unwrap()
            .contains("Summarization model not loaded.")
    );
}

#[tokio::test]
async fn unavailable_engine_still_renders_page() {
    let state = unavailable_state();
    let response = handle_request(&state, &event("GET", "/", None, None)).await;
    assert_eq!(response["statusCode"], 200);
}

#[tokio::test]
async fn engine_failure_is_reported_with_description() {
    let (state, calls) = state_with(Err("CUDA out of memory"));
    let body = json!({ "text": "hello world", "num_sentences": 2 }).to_string();

    let response = handle_request(&state, &json_post("/", &body)).await;

    assert_eq!(response["statusCode"], 500);
    assert_eq!(
        body_json(&response)["error"],
        "An unexpected error occurred during summarization: \
         Summarization backend error: CUDA out of memory"
    );
    // Not retried
    assert_eq!(calls.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn api_path_rejects_other_methods() {
    let (state, _) = state_with(Ok(THREE_SENTENCES));

    for method in ["GET", "PUT", "DELETE"] {
        let response = handle_request(&state, &event(method, "/api/summarize/", None, None)).await;
        assert_eq!(response["statusCode"], 405);
        assert_eq!(body_json(&response), json!({ "error": "Method not allowed" }));
    }
}

#[tokio::test]
async fn unknown_path_is_not_found() {
    let (state, _) = state_with(Ok(THREE_SENTENCES));
    let response = handle_request(&state, &event("GET", "/admin/", None, None)).await;

    assert_eq!(response["statusCode"], 404);
    assert_eq!(body_json(&response), json!({ "error": "Not found" }));
}

#[tokio::test]
async fn form_post_renders_summary_page() {
    let (state, calls) = state_with(Ok(THREE_SENTENCES));
    let response = handle_request(
        &state,
        &form_post("text=The+quick+brown+fox+jumps.&num_sentences=2"),
    )
    .await;

    assert_eq!(response["statusCode"], 200);
    assert_eq!(response["headers"]["Content-Type"], "text/html; charset=utf-8");
    let html = response["body"].as_str().unwrap();
    assert!(html.contains("<p>The quick brown fox jumps. It is very agile.</p>"));
    assert!(html.contains(">The quick brown fox jumps.</textarea>"));
    assert!(html.contains(r#"value="2""#));
    assert_eq!(calls.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn form_post_defaults_invalid_count() {
    let (state, calls) = state_with(Ok(THREE_SENTENCES));
    let response = handle_request(&state, &form_post("text=Article.&num_sentences=abc")).await;

    assert_eq!(response["statusCode"], 200);
    assert_eq!(calls.lock().unwrap()[0].bounds, LengthBounds::derive(3));
}

#[tokio::test]
async fn form_post_errors_are_bound_into_page() {
    let (state, calls) = state_with(Ok(THREE_SENTENCES));

    let response = handle_request(&state, &form_post("text=&num_sentences=2")).await;
    assert_eq!(response["statusCode"], 400);
    assert!(
        response["body"]
            .as_str()
            .unwrap()
            .contains("Error: No text provided.")
    );

    let response = handle_request(&state, &form_post("text=hello&num_sentences=-3")).await;
    assert_eq!(response["statusCode"], 400);
    let html = response["body"].as_str().unwrap();
    assert!(html.contains("Error: Number of sentences must be positive."));
    assert!(html.contains(">hello</textarea>"));

    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn base64_form_body_is_decoded() {
    let (state, calls) = state_with(Ok(THREE_SENTENCES));
    let mut request = form_post("");
    request["body"] = json!(general_purpose::STANDARD.encode("text=Encoded+article.&num_sentences=1"));
    request["isBase64Encoded"] = json!(true);

    let response = handle_request(&state, &request).await;

    assert_eq!(response["statusCode"], 200);
    assert_eq!(calls.lock().unwrap()[0].text, "Encoded article.");
}

#[tokio::test]
async fn identical_requests_yield_identical_summaries() {
    let (state, _) = state_with(Ok(THREE_SENTENCES));
    let body = json!({ "text": THREE_SENTENCES, "num_sentences": 2 }).to_string();

    let first = handle_request(&state, &json_post("/", &body)).await;
    let second = handle_request(&state, &json_post("/", &body)).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn rest_api_v1_events_are_understood() {
    let (state, _) = state_with(Ok(THREE_SENTENCES));
    let request = json!({
        "path": "/api/summarize/",
        "httpMethod": "POST",
        "headers": { "Content-Type": "application/json" },
        "body": json!({ "text": "Article.", "num_sentences": 1 }).to_string()
    });

    let response = handle_request(&state, &request).await;

    assert_eq!(response["statusCode"], 200);
    assert_eq!(body_json(&response)["summary"], "The quick brown fox jumps.");
}
