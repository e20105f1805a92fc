//! Per-request access logging.
//!
//! One line per request/response pair:
//!
//! ```text
//! POST /api/persons 200 61 - 2.417 ms {"name":"Ann","number":"040-1234567"}
//! ```
//!
//! The request body is only included for `POST`. It is re-serialized from
//! parsed JSON so the line stays on one line; a non-JSON body logs as `{}`.

use axum::{
    body::{Body, Bytes, HttpBody},
    extract::{Request, State},
    http::{header, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::time::Instant;

use crate::http::request::RequestIdExt;
use crate::observability::metrics;

/// Settings for the access log middleware.
#[derive(Debug, Clone, Copy)]
pub struct AccessLogConfig {
    /// Largest request body buffered for logging.
    pub max_body_size: usize,
}

/// Fields of one access log line.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessRecord<'a> {
    pub method: &'a Method,
    pub path: &'a str,
    pub status: StatusCode,
    pub content_length: Option<u64>,
    pub latency_ms: f64,
    pub body: Option<&'a str>,
}

impl AccessRecord<'_> {
    /// Render the record as a single log line.
    pub fn line(&self) -> String {
        let length = self
            .content_length
            .map(|n| n.to_string())
            .unwrap_or_else(|| "-".to_string());
        let mut line = format!(
            "{} {} {} {} - {:.3} ms",
            self.method,
            self.path,
            self.status.as_u16(),
            length,
            self.latency_ms
        );
        if let Some(body) = self.body {
            line.push(' ');
            line.push_str(body);
        }
        line
    }
}

/// Whether the request body of `method` is logged.
pub fn logs_body(method: &Method) -> bool {
    method == Method::POST
}

/// Compact JSON form of a request body, or `{}` if it is not JSON.
pub fn render_body(bytes: &[u8]) -> String {
    serde_json::from_slice::<serde_json::Value>(bytes)
        .map(|v| v.to_string())
        .unwrap_or_else(|_| "{}".to_string())
}

fn content_length(response: &Response) -> Option<u64> {
    response
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .or_else(|| response.body().size_hint().exact())
}

pub async fn access_log_middleware(
    State(config): State<AccessLogConfig>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let request_id = request.request_id().unwrap_or("unknown").to_string();

    let (request, logged_body) = if logs_body(&method) {
        let (parts, body) = request.into_parts();
        let bytes: Bytes = match axum::body::to_bytes(body, config.max_body_size).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(request_id = %request_id, error = %e, "Failed to buffer request body");
                let response = StatusCode::PAYLOAD_TOO_LARGE.into_response();
                emit(&request_id, &method, &path, &response, start, None);
                return response;
            }
        };
        let rendered = render_body(&bytes);
        (Request::from_parts(parts, Body::from(bytes)), Some(rendered))
    } else {
        (request, None)
    };

    let response = next.run(request).await;
    emit(&request_id, &method, &path, &response, start, logged_body.as_deref());
    response
}

fn emit(request_id: &str, method: &Method, path: &str, response: &Response, start: Instant, body: Option<&str>) {
    let record = AccessRecord {
        method,
        path,
        status: response.status(),
        content_length: content_length(response),
        latency_ms: start.elapsed().as_secs_f64() * 1000.0,
        body,
    };

    tracing::info!(
        target: "phonebook::access",
        request_id = %request_id,
        method = %record.method,
        path = %record.path,
        status = record.status.as_u16(),
        latency_ms = record.latency_ms,
        "{}",
        record.line()
    );
    metrics::record_request(method.as_str(), record.status.as_u16(), start);
}
