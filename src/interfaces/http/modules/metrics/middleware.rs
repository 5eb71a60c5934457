//! Per-request HTTP metrics
//!
//! - `board_http_requests_total{method, path, status}` counter
//! - `board_http_request_duration_seconds{method, path}` histogram
//! - `board_http_requests_in_flight` gauge
//!
//! `path` is the matched route template (`/api/v1/posts/{post_id}`), so ids do
//! not explode label cardinality.

use std::time::Instant;

use axum::{body::Body, extract::MatchedPath, http::Request, middleware::Next, response::Response};

pub async fn http_metrics_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().as_str().to_owned();
    let path = match request.extensions().get::<MatchedPath>() {
        Some(matched) => matched.as_str().to_owned(),
        None => "unmatched".to_owned(),
    };

    let in_flight = metrics::gauge!("board_http_requests_in_flight");
    in_flight.increment(1.0);
    let start = Instant::now();

    let response = next.run(request).await;

    in_flight.decrement(1.0);
    let status = response.status().as_u16().to_string();
    metrics::histogram!(
        "board_http_request_duration_seconds",
        "method" => method.clone(),
        "path" => path.clone()
    )
    .record(start.elapsed().as_secs_f64());
    metrics::counter!(
        "board_http_requests_total",
        "method" => method,
        "path" => path,
        "status" => status
    )
    .increment(1);

    response
}
