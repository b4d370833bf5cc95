//! Prometheus metrics for the API server.

use axum::body::Body;
use axum::http::{Request, Response};
use axum::middleware::Next;
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::time::Instant;

/// Initialize the Prometheus metrics recorder.
pub fn init_metrics() -> PrometheusHandle {
    PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus recorder")
}

/// Metric names as constants for consistency.
pub mod names {
    pub const HTTP_REQUESTS_TOTAL: &str = "vismem_http_requests_total";
    pub const HTTP_REQUEST_DURATION_SECONDS: &str = "vismem_http_request_duration_seconds";
    pub const HTTP_REQUESTS_IN_FLIGHT: &str = "vismem_http_requests_in_flight";

    pub const ANALYSES_TOTAL: &str = "vismem_analyses_total";
    pub const ANALYSIS_DURATION_SECONDS: &str = "vismem_analysis_duration_seconds";
    pub const SHOTS_ANALYZED_TOTAL: &str = "vismem_shots_analyzed_total";

    pub const RATE_LIMIT_HITS_TOTAL: &str = "vismem_rate_limit_hits_total";
}

/// Record an HTTP request.
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let labels = [
        ("method", method.to_string()),
        ("path", sanitize_path(path)),
        ("status", status.to_string()),
    ];

    counter!(names::HTTP_REQUESTS_TOTAL, &labels).increment(1);
    histogram!(names::HTTP_REQUEST_DURATION_SECONDS, &labels).record(duration_secs);
}

/// Record one completed scene analysis.
pub fn record_analysis(source: &str, shots_analyzed: u32, duration_secs: f64) {
    let labels = [("source", source.to_string())];
    counter!(names::ANALYSES_TOTAL, &labels).increment(1);
    counter!(names::SHOTS_ANALYZED_TOTAL).increment(shots_analyzed as u64);
    histogram!(names::ANALYSIS_DURATION_SECONDS, &labels).record(duration_secs);
}

/// Record rate limit hit.
pub fn record_rate_limit_hit(endpoint: &str) {
    let labels = [("endpoint", endpoint.to_string())];
    counter!(names::RATE_LIMIT_HITS_TOTAL, &labels).increment(1);
}

/// Sanitize path for metrics labels: collapse scene and project identifiers.
fn sanitize_path(path: &str) -> String {
    let path = regex_lite::Regex::new(r"/scenes/[^/]+")
        .unwrap()
        .replace_all(path, "/scenes/:scene_id");
    let path = regex_lite::Regex::new(r"/projects/[^/]+")
        .unwrap()
        .replace_all(&path, "/projects/:project_id");
    path.to_string()
}

/// Metrics middleware for HTTP requests.
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response<Body> {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).increment(1.0);
    let response = next.run(request).await;
    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).decrement(1.0);

    record_http_request(
        &method,
        &path,
        response.status().as_u16(),
        start.elapsed().as_secs_f64(),
    );

    response
}
