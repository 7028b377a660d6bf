use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::warn;

use crate::errors::JsonApiError;
use crate::state::AppState;

pub const API_KEY_HEADER: &str = "X-API-Key";

/// Middleware: the `X-API-Key` header must verify against the configured
/// hash/salt, otherwise 403.
pub async fn require_api_key(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let key = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_default();

    let ok = !key.is_empty() && state.credential.verify_blocking(key).await;
    if !ok {
        warn!(method = %req.method(), path = %req.uri().path(), "rejected request with invalid api key");
        return JsonApiError::new(StatusCode::FORBIDDEN, "Forbidden", None).into_response();
    }

    next.run(req).await
}
