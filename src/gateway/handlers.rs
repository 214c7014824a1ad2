use axum::{
    extract::{rejection::JsonRejection, ConnectInfo, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::Utc;
use serde::Deserialize;
use std::net::SocketAddr;

use crate::error::RewriteError;
use crate::tone::ToneSelection;

use super::AppState;

/// Wire shape of the rewrite request. The tone arrives as loose JSON so the
/// handler can distinguish "missing tone" from "unknown tone value" and keep
/// the original field-by-field validation order: text first, then tone.
#[derive(Deserialize)]
pub(super) struct AdjustToneBody {
    #[serde(default)]
    text: Option<String>,
    #[serde(default, rename = "toneConfig")]
    tone_config: Option<serde_json::Value>,
}

fn error_response(err: &RewriteError) -> (StatusCode, Json<serde_json::Value>) {
    let body = serde_json::json!({
        "error": err.label(),
        "message": err.to_string(),
    });
    (err.status_code(), Json(body))
}

/// POST /api/adjust-tone — the rewrite endpoint.
pub(super) async fn handle_adjust_tone(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    body: Result<Json<AdjustToneBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return error_response(&RewriteError::EmptyText),
    };

    let text = match body.text.as_deref().map(str::trim) {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => return error_response(&RewriteError::EmptyText),
    };

    let tone: ToneSelection = match body
        .tone_config
        .and_then(|v| serde_json::from_value(v).ok())
    {
        Some(tone) => tone,
        None => return error_response(&RewriteError::MissingTone),
    };

    let client_id = addr.ip().to_string();
    match state.service.rewrite(&text, tone, &client_id).await {
        Ok(adjusted) => {
            let body = serde_json::json!({ "adjustedText": adjusted });
            (StatusCode::OK, Json(body))
        }
        Err(err) => {
            tracing::warn!(client = %client_id, error = %err, "rewrite failed");
            error_response(&err)
        }
    }
}

/// GET /api/health — always public (no secrets leaked).
pub(super) async fn handle_health(State(state): State<AppState>) -> impl IntoResponse {
    let body = serde_json::json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339(),
        "uptime": state.started_at.elapsed().as_secs_f64(),
        "mistralApiConfigured": state.service.upstream_configured(),
    });
    Json(body)
}

/// GET /api/cache-stats — diagnostic view of the admission layer.
pub(super) async fn handle_cache_stats(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.service.stats())
}
