use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sentinel_backend::config::Config;
use sentinel_backend::session::Sessions;
use sentinel_backend::solana::VaultClient;
use sentinel_backend::theme::Theme;
use sentinel_backend::{app, AppState};
use solana_sdk::pubkey::Pubkey;
use tower::ServiceExt;

/// State wired to an endpoint nothing listens on: any handler that
/// touches the network fails loudly, so these tests prove the
/// validation paths answer before the RPC layer is ever involved.
fn test_state() -> AppState {
    let mut config = Config::devnet();
    config.rpc_url = "http://127.0.0.1:9".to_string();
    AppState {
        client: Arc::new(VaultClient::new(&config)),
        sessions: Sessions::default(),
        theme: Theme::cyber(),
    }
}

async fn get(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    read_json(response).await
}

async fn post_json(
    app: Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    read_json(response).await
}

async fn read_json(response: axum::response::Response) -> (StatusCode, serde_json::Value) {
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, value)
}

#[tokio::test]
async fn health_answers() {
    let (status, body) = get(app(test_state()), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn theme_is_served_as_data() {
    let (status, body) = get(app(test_state()), "/theme").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "cyber");
    assert_eq!(body["copy"]["title"], "SENTINEL VAULT");
    assert_eq!(body["colors"]["primary"], "#00ff41");
}

#[tokio::test]
async fn invalid_mint_never_reaches_the_network() {
    let authority = Pubkey::new_unique().to_string();
    let (status, body) = post_json(
        app(test_state()),
        "/tx/initialize",
        serde_json::json!({ "authority": authority, "mint": "definitely-not-a-mint" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], false);
    assert!(body["transaction_base64"].is_null());
    assert_eq!(body["status"]["kind"], "error");
    assert_eq!(body["status"]["message"], "Invalid mint address");
    assert_eq!(body["busy"], false);
}

#[tokio::test]
async fn non_positive_amounts_are_rejected_inline() {
    let owner = Pubkey::new_unique().to_string();
    for amount in ["0", "-3", "", "abc"] {
        let (status, body) = post_json(
            app(test_state()),
            "/tx/deposit",
            serde_json::json!({ "owner": owner, "amount": amount }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], false);
        assert_eq!(body["status"]["message"], "Enter a valid amount");
    }
}

#[tokio::test]
async fn actions_are_noops_while_one_is_in_flight() {
    let state = test_state();
    let owner = Pubkey::new_unique();

    assert!(
        state
            .sessions
            .try_begin(&owner, "Processing deposit...", "Deposited!")
            .await
    );

    // a second deposit, and a withdrawal, both refused without touching
    // the in-flight session
    for uri in ["/tx/deposit", "/tx/withdraw"] {
        let (status, body) = post_json(
            app(state.clone()),
            uri,
            serde_json::json!({ "owner": owner.to_string(), "amount": "1.5" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], false);
        assert!(body["transaction_base64"].is_null());
        assert_eq!(body["busy"], true);
    }

    let (_, busy) = state.sessions.snapshot(&owner).await;
    assert!(busy);
}

#[tokio::test]
async fn cancel_releases_the_latch() {
    let state = test_state();
    let owner = Pubkey::new_unique();
    assert!(
        state
            .sessions
            .try_begin(&owner, "Processing deposit...", "Deposited!")
            .await
    );

    let (status, body) = post_json(
        app(state.clone()),
        "/tx/cancel",
        serde_json::json!({ "owner": owner.to_string() }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert_eq!(body["busy"], false);
    assert_eq!(body["status"]["kind"], "error");

    let (_, busy) = state.sessions.snapshot(&owner).await;
    assert!(!busy);
}

#[tokio::test]
async fn malformed_owner_is_a_bad_request_on_reads() {
    let (status, _) = get(app(test_state()), "/vault/not-a-pubkey").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn info_reports_the_configured_deployment() {
    let (status, body) = get(app(test_state()), "/info").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["program_id"],
        Config::devnet().program_id.to_string()
    );
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
