use std::str::FromStr;

use axum::extract::State;
use axum::Json;
use solana_sdk::pubkey::Pubkey;

use super::vault::{invalid_address_response, prepare_action, validation_error};
use crate::models::{ActionResponse, InitializeRequest};
use crate::tx;
use crate::AppState;

/// One-time program initialization, triggered from the admin panel. The
/// mint field is free text there, so it is validated here; a malformed
/// address is answered inline and never reaches the network layer.
pub async fn tx_initialize(
    State(state): State<AppState>,
    Json(req): Json<InitializeRequest>,
) -> Json<ActionResponse> {
    let Ok(authority) = Pubkey::from_str(&req.authority) else {
        return Json(invalid_address_response());
    };
    let Ok(mint) = Pubkey::from_str(req.mint.trim()) else {
        return Json(validation_error(&state, &authority, "Invalid mint address").await);
    };

    let ix = tx::initialize(&state.client.config, &authority, &mint);
    Json(prepare_action(&state, &authority, ix, "Initializing vault...", "Initialized!").await)
}
