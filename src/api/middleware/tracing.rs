//! HTTP request/response tracing middleware.

use axum::body::Body;
use axum::http::Request;
use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultOnFailure, DefaultOnResponse, TraceLayer};
use tracing::{Level, Span};

type MakeSpan = fn(&Request<Body>) -> Span;

/// Creates a tracing middleware for HTTP requests.
///
/// Every request gets an `INFO` span carrying the method, the path and the
/// module segment (the first path component after `/api`). Responses are
/// logged with status and latency in milliseconds; 5xx responses are logged
/// again at `ERROR`.
///
/// ```text
/// INFO http{method=POST path=/api/finance/currencies module=finance}: finished processing request latency=3 ms status=201
/// ```
pub fn layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>, MakeSpan> {
    TraceLayer::new_for_http()
        .make_span_with(make_span as MakeSpan)
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
        .on_failure(
            DefaultOnFailure::new()
                .level(Level::ERROR)
                .latency_unit(LatencyUnit::Millis),
        )
}

fn make_span(request: &Request<Body>) -> Span {
    let path = request.uri().path();
    tracing::info_span!(
        "http",
        method = %request.method(),
        path = %path,
        module = module_segment(path).unwrap_or("-"),
    )
}

/// `/api/finance/currencies/1` → `finance`.
fn module_segment(path: &str) -> Option<&str> {
    path.strip_prefix("/api/")?
        .split('/')
        .next()
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_segment() {
        assert_eq!(module_segment("/api/finance/currencies/1"), Some("finance"));
        assert_eq!(module_segment("/api/modules"), Some("modules"));
        assert_eq!(module_segment("/api/"), None);
        assert_eq!(module_segment("/health"), None);
    }
}
