use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use std::time::Instant;
use uuid::Uuid;
use crate::client::GenerationError;
use crate::logger::log_request;
use crate::models::{ChatRequest, ChatResponse, ErrorResponse};
use crate::prompt::build_prompt;
use crate::AppState;

// Every response carries these, error paths included. A missing
// header on any path makes browser cross-origin calls fail opaquely.
fn apply_cors(mut response: Response) -> Response {

    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*")
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("*")
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("OPTIONS,POST,GET")
    );
    response

}

fn error_response(status: StatusCode, message: String) -> Response {

    let body = Json(ErrorResponse { error: message });
    apply_cors((status, body).into_response())

}

pub async fn health_check() -> &'static str {

    "OK"

}

pub async fn metrics_handler(State(state): State<AppState>) -> Response {

    let snapshot = state.metrics.snapshot();
    let body = serde_json::json!({
        "preflights": snapshot.preflights,
        "generations": snapshot.generations,
        "malformed_requests": snapshot.malformed_requests,
        "upstream_failures": snapshot.upstream_failures,
        "total_requests": snapshot.total_requests,
        "success_rate": snapshot.success_rate(),
    });
    apply_cors(Json(body).into_response())

}

/// Browser cross-origin check. Answers immediately, never touches the
/// body or the upstream service.
pub async fn preflight_handler(State(state): State<AppState>) -> Response {

    state.metrics.record_preflight();
    apply_cors((StatusCode::OK, "Preflight OK").into_response())

}

pub async fn chat_handler(State(state): State<AppState>, body: Bytes) -> Response {

    let started = Instant::now();
    let request_id = Uuid::new_v4().to_string();

    // Decoding by hand instead of the Json extractor so a rejected
    // body still gets the CORS headers.
    let request: ChatRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            state.metrics.record_malformed();
            log_request(&request_id, "malformed", body.len(), 0, started.elapsed().as_millis());
            return error_response(
                StatusCode::BAD_REQUEST,
                format!("Invalid request body: {}", e)
            );
        }
    };

    let prompt = build_prompt(&request);

    let output = match state.generator.generate(&prompt).await {
        Ok(output) => output,
        Err(e) => {
            state.metrics.record_upstream_failure();
            log_request(&request_id, "upstream_failure", prompt.len(), 0, started.elapsed().as_millis());
            let status = match e {
                GenerationError::Throttled => StatusCode::TOO_MANY_REQUESTS,
                GenerationError::Upstream(_) => StatusCode::BAD_GATEWAY
            };
            return error_response(status, e.to_string());
        }
    };

    let response_body = match serde_json::to_string(&ChatResponse { response: output }) {
        Ok(response_body) => response_body,
        Err(e) => {
            log_request(&request_id, "fault", prompt.len(), 0, started.elapsed().as_millis());
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Internal error: {}", e)
            );
        }
    };

    state.metrics.record_generation();
    log_request(&request_id, "ok", prompt.len(), response_body.len(), started.elapsed().as_millis());

    apply_cors((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        response_body
    ).into_response())

}
