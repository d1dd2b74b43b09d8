use axum::extract::State;
use axum::Json;

use crate::models::InfoResponse;
use crate::theme::Theme;
use crate::AppState;

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// The footer facts: which program, mint and endpoint this dashboard is
/// talking to.
pub async fn info(State(state): State<AppState>) -> Json<InfoResponse> {
    let config = &state.client.config;
    Json(InfoResponse {
        program_id: config.program_id.to_string(),
        token_mint: config.token_mint.to_string(),
        rpc_url: config.rpc_url.clone(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn theme(State(state): State<AppState>) -> Json<Theme> {
    Json(state.theme.clone())
}
