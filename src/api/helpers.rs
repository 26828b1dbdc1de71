//! Response builders for API Gateway / function URL proxy responses.

use serde_json::{Value, json};

const JSON_CONTENT_TYPE: &str = "application/json";
const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Returns a response carrying `body` serialized as JSON.
#[must_use]
pub fn json_response(status_code: u16, body: &Value) -> Value {
    json!({
        "statusCode": status_code,
        "headers": { "Content-Type": JSON_CONTENT_TYPE },
        "body": body.to_string()
    })
}

/// Returns a 200 OK response with the trimmed summary.
#[must_use]
pub fn ok_summary(summary: &str) -> Value {
    json_response(200, &json!({ "summary": summary }))
}

/// Returns an error response with the given status code and message.
#[must_use]
pub fn err_response(status_code: u16, message: &str) -> Value {
    json_response(status_code, &json!({ "error": message }))
}

/// Returns a rendered HTML page.
#[must_use]
pub fn html_response(status_code: u16, html: String) -> Value {
    json!({
        "statusCode": status_code,
        "headers": { "Content-Type": HTML_CONTENT_TYPE },
        "body": html
    })
}

/// Reads the status code back out of a proxy response.
#[must_use]
pub fn status_of(response: &Value) -> u16 {
    response
        .get("statusCode")
        .and_then(Value::as_u64)
        .and_then(|s| u16::try_from(s).ok())
        .unwrap_or(500)
}
