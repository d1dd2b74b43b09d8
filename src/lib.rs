pub mod amount;
pub mod config;
pub mod models;
pub mod pda;
pub mod routes;
pub mod session;
pub mod solana;
pub mod theme;
pub mod tx;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::session::Sessions;
use crate::solana::VaultClient;
use crate::theme::Theme;

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<VaultClient>,
    pub sessions: Sessions,
    pub theme: Theme,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health))
        .route("/info", get(routes::health::info))
        .route("/theme", get(routes::health::theme))
        .route("/vault/:owner", get(routes::vault::get_vault))
        .route("/tx/deposit", post(routes::vault::tx_deposit))
        .route("/tx/withdraw", post(routes::vault::tx_withdraw))
        .route("/tx/submit", post(routes::vault::tx_submit))
        .route("/tx/cancel", post(routes::vault::tx_cancel))
        .route("/tx/initialize", post(routes::admin::tx_initialize))
        .with_state(state)
}
