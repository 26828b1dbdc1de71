//! Extraction of method, path, headers and summarization input from proxy
//! events (HTTP API v2 / function URL, with REST v1 fallbacks).

use base64::{Engine as _, engine::general_purpose};
use serde_json::Value;

use crate::core::models::{DEFAULT_SENTENCE_COUNT, ResponseMode, SummarizationRequest};
use crate::errors::{INVALID_INPUT, INVALID_JSON, SummarizerError};

pub fn v_path<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut cur = root;
    for key in path {
        cur = cur.get(*key)?;
    }
    Some(cur)
}

pub fn v_str<'a>(root: &'a Value, path: &[&str]) -> Option<&'a str> {
    v_path(root, path).and_then(|v| v.as_str())
}

/// HTTP method of the event, upper-cased. Defaults to `GET`.
#[must_use]
pub fn request_method(payload: &Value) -> String {
    v_str(payload, &["requestContext", "http", "method"])
        .or_else(|| v_str(payload, &["httpMethod"]))
        .unwrap_or("GET")
        .to_ascii_uppercase()
}

/// Request path of the event. Defaults to `/`.
#[must_use]
pub fn request_path(payload: &Value) -> &str {
    v_str(payload, &["rawPath"])
        .or_else(|| v_str(payload, &["path"]))
        .filter(|p| !p.is_empty())
        .unwrap_or("/")
}

pub fn get_header_value<'a>(headers: &'a Value, name: &str) -> Option<&'a str> {
    if let Some(v) = headers.get(name).and_then(|s| s.as_str()) {
        return Some(v);
    }
    headers.as_object().and_then(|map| {
        map.iter().find_map(|(k, v)| {
            if k.eq_ignore_ascii_case(name) {
                v.as_str()
            } else {
                None
            }
        })
    })
}

/// JSON for `application/json` and any `+json` media type, form otherwise.
#[must_use]
pub fn response_mode(content_type: Option<&str>) -> ResponseMode {
    let media_type = content_type
        .and_then(|ct| ct.split(';').next())
        .map(|ct| ct.trim().to_ascii_lowercase())
        .unwrap_or_default();

    if media_type == "application/json" || media_type.ends_with("+json") {
        ResponseMode::Json
    } else {
        ResponseMode::Form
    }
}

/// Response mode chosen from the event's `Content-Type` header.
#[must_use]
pub fn event_response_mode(payload: &Value) -> ResponseMode {
    let content_type = payload
        .get("headers")
        .and_then(|headers| get_header_value(headers, "Content-Type"));
    response_mode(content_type)
}

/// Request body as text, decoding base64 bodies.
///
/// A missing or `null` body is treated as empty.
pub fn extract_body(payload: &Value) -> Result<String, SummarizerError> {
    let body = match payload.get("body") {
        None | Some(Value::Null) => return Ok(String::new()),
        Some(Value::String(s)) => s.as_str(),
        Some(_) => return Err(SummarizerError::validation(INVALID_INPUT)),
    };

    let is_base64 = payload
        .get("isBase64Encoded")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    if !is_base64 {
        return Ok(body.to_string());
    }

    general_purpose::STANDARD
        .decode(body)
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .ok_or_else(|| SummarizerError::validation(INVALID_INPUT))
}

/// Parses a JSON body `{"text": string, "num_sentences": int}`.
///
/// # Errors
///
/// Malformed JSON yields the "Invalid JSON format" message; a non-object body
/// or wrongly typed fields yield "Invalid input format". An unparseable
/// `num_sentences` string is not a type error and falls back to the default.
pub fn parse_json_request(body: &str) -> Result<SummarizationRequest, SummarizerError> {
    let value: Value =
        serde_json::from_str(body).map_err(|_| SummarizerError::validation(INVALID_JSON))?;

    let Some(object) = value.as_object() else {
        return Err(SummarizerError::validation(INVALID_INPUT));
    };

    let text = match object.get("text") {
        None | Some(Value::Null) => "",
        Some(Value::String(s)) => s.as_str(),
        Some(_) => return Err(SummarizerError::validation(INVALID_INPUT)),
    };

    let num_sentences = json_sentence_count(object.get("num_sentences"))
        .ok_or_else(|| SummarizerError::validation(INVALID_INPUT))?;

    Ok(SummarizationRequest::new(text, num_sentences))
}

/// Sentence count from a JSON value.
///
/// Fractional numbers truncate toward zero and strings that do not hold an
/// integer fall back to the default. Booleans, arrays and objects are `None`.
#[allow(clippy::cast_possible_truncation)]
fn json_sentence_count(value: Option<&Value>) -> Option<i64> {
    match value {
        None | Some(Value::Null) => Some(DEFAULT_SENTENCE_COUNT),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|_| i64::MAX))
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Some(Value::String(s)) => Some(s.trim().parse::<i64>().unwrap_or(DEFAULT_SENTENCE_COUNT)),
        Some(_) => None,
    }
}

/// Parses a form-encoded body with `text` and `num_sentences` fields.
///
/// A missing or unparseable `num_sentences` falls back to the default.
#[must_use]
pub fn parse_form_request(body: &str) -> SummarizationRequest {
    let mut text = String::new();
    let mut num_sentences = DEFAULT_SENTENCE_COUNT;

    for (key, value) in url::form_urlencoded::parse(body.as_bytes()) {
        match key.as_ref() {
            "text" => text = value.into_owned(),
            "num_sentences" => {
                num_sentences = value.trim().parse::<i64>().unwrap_or(DEFAULT_SENTENCE_COUNT);
            }
            _ => {}
        }
    }

    SummarizationRequest::new(&text, num_sentences)
}
