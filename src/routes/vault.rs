use std::str::FromStr;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use solana_sdk::instruction::Instruction;
use solana_sdk::pubkey::Pubkey;

use crate::amount;
use crate::models::{
    ActionResponse, AmountRequest, BalancesResponse, CancelRequest, QuickAmounts, SubmitRequest,
    SubmitResponse,
};
use crate::pda;
use crate::session::{failure_message, StatusKind, StatusView};
use crate::tx;
use crate::AppState;

pub async fn get_vault(
    State(state): State<AppState>,
    Path(owner): Path<String>,
) -> Result<Json<BalancesResponse>, (StatusCode, String)> {
    let owner_pk = Pubkey::from_str(&owner)
        .map_err(|_| (StatusCode::BAD_REQUEST, "invalid owner address".to_string()))?;
    let (vault_pda, _) = pda::user_vault(&state.client.config.program_id, &owner_pk);

    let (stale_vault, stale_wallet) = state.sessions.cached_balances(&owner_pk).await;

    // A failed refresh is not an error to the dashboard: log it and keep
    // showing the last value we managed to read.
    let fresh_vault = match state.client.read_vault_balance(&owner_pk).await {
        Ok(raw) => Some(raw),
        Err(err) => {
            eprintln!("vault balance refresh failed for {}: {:#}", owner, err);
            None
        }
    };
    let fresh_wallet = match state.client.read_wallet_balance(&owner_pk).await {
        Ok(raw) => Some(raw),
        Err(err) => {
            eprintln!("wallet balance refresh failed for {}: {:#}", owner, err);
            None
        }
    };
    state
        .sessions
        .cache_balances(&owner_pk, fresh_vault, fresh_wallet)
        .await;

    let vault_raw = fresh_vault.or(stale_vault).unwrap_or(0);
    let wallet_raw = fresh_wallet.or(stale_wallet).unwrap_or(0);
    let vault_balance = amount::format_amount(vault_raw);
    let wallet_balance = amount::format_amount(wallet_raw);
    let (status, busy) = state.sessions.snapshot(&owner_pk).await;

    Ok(Json(BalancesResponse {
        owner,
        vault_pda: vault_pda.to_string(),
        quick_deposit: QuickAmounts::for_balance(&wallet_balance),
        quick_withdraw: QuickAmounts::for_balance(&vault_balance),
        vault_balance,
        wallet_balance,
        vault_raw,
        wallet_raw,
        status,
        busy,
    }))
}

pub async fn tx_deposit(
    State(state): State<AppState>,
    Json(req): Json<AmountRequest>,
) -> Json<ActionResponse> {
    let Ok(owner) = Pubkey::from_str(&req.owner) else {
        return Json(invalid_address_response());
    };
    let Some(raw) = amount::parse_amount(&req.amount).filter(|raw| *raw > 0) else {
        return Json(validation_error(&state, &owner, "Enter a valid amount").await);
    };

    let ix = tx::deposit(&state.client.config, &owner, raw);
    Json(prepare_action(&state, &owner, ix, "Processing deposit...", "Deposited!").await)
}

pub async fn tx_withdraw(
    State(state): State<AppState>,
    Json(req): Json<AmountRequest>,
) -> Json<ActionResponse> {
    let Ok(owner) = Pubkey::from_str(&req.owner) else {
        return Json(invalid_address_response());
    };
    let Some(raw) = amount::parse_amount(&req.amount).filter(|raw| *raw > 0) else {
        return Json(validation_error(&state, &owner, "Enter a valid amount").await);
    };

    let ix = tx::withdraw(&state.client.config, &owner, raw);
    Json(prepare_action(&state, &owner, ix, "Processing withdrawal...", "Withdrawn!").await)
}

/// Broadcast a wallet-signed transaction, then refresh balances before
/// answering so the dashboard repaints with post-action numbers.
pub async fn tx_submit(
    State(state): State<AppState>,
    Json(req): Json<SubmitRequest>,
) -> Json<SubmitResponse> {
    let Ok(owner) = Pubkey::from_str(&req.owner) else {
        return Json(SubmitResponse {
            ok: false,
            signature: None,
            status: Some(StatusView {
                kind: StatusKind::Error,
                message: "Invalid wallet address".to_string(),
            }),
            vault_balance: None,
            wallet_balance: None,
        });
    };

    match state.client.submit_signed(&req.transaction_base64).await {
        Ok(signature) => {
            let signature = signature.to_string();
            state.sessions.finish_success(&owner, &signature).await;

            let vault_raw = match state.client.read_vault_balance(&owner).await {
                Ok(raw) => Some(raw),
                Err(err) => {
                    eprintln!("post-submit vault refresh failed for {}: {:#}", owner, err);
                    None
                }
            };
            let wallet_raw = match state.client.read_wallet_balance(&owner).await {
                Ok(raw) => Some(raw),
                Err(err) => {
                    eprintln!("post-submit wallet refresh failed for {}: {:#}", owner, err);
                    None
                }
            };
            state
                .sessions
                .cache_balances(&owner, vault_raw, wallet_raw)
                .await;

            let (status, _) = state.sessions.snapshot(&owner).await;
            Json(SubmitResponse {
                ok: true,
                signature: Some(signature),
                status,
                vault_balance: vault_raw.map(amount::format_amount),
                wallet_balance: wallet_raw.map(amount::format_amount),
            })
        }
        Err(err) => {
            state
                .sessions
                .finish_error(&owner, failure_message(&format!("{:#}", err)))
                .await;
            let (status, _) = state.sessions.snapshot(&owner).await;
            Json(SubmitResponse {
                ok: false,
                signature: None,
                status,
                vault_balance: None,
                wallet_balance: None,
            })
        }
    }
}

/// The wallet declined to sign: release the latch and surface the error.
pub async fn tx_cancel(
    State(state): State<AppState>,
    Json(req): Json<CancelRequest>,
) -> Json<ActionResponse> {
    let Ok(owner) = Pubkey::from_str(&req.owner) else {
        return Json(invalid_address_response());
    };
    let reason = req.reason.as_deref().unwrap_or("Signing rejected by user");
    state
        .sessions
        .finish_error(&owner, failure_message(reason))
        .await;
    let (status, busy) = state.sessions.snapshot(&owner).await;
    Json(ActionResponse {
        ok: true,
        transaction_base64: None,
        status,
        busy,
    })
}

/// Latch the session and turn an instruction into an unsigned
/// transaction for the wallet. A session that is already submitting gets
/// a no-op answer; nothing about it changes.
pub(crate) async fn prepare_action(
    state: &AppState,
    owner: &Pubkey,
    ix: Instruction,
    info: &str,
    success: &str,
) -> ActionResponse {
    if !state.sessions.try_begin(owner, info, success).await {
        let (status, busy) = state.sessions.snapshot(owner).await;
        return ActionResponse {
            ok: false,
            transaction_base64: None,
            status,
            busy,
        };
    }

    match state.client.prepare_unsigned(&[ix], owner).await {
        Ok(transaction_base64) => {
            let (status, busy) = state.sessions.snapshot(owner).await;
            ActionResponse {
                ok: true,
                transaction_base64: Some(transaction_base64),
                status,
                busy,
            }
        }
        Err(err) => {
            state
                .sessions
                .finish_error(owner, failure_message(&format!("{:#}", err)))
                .await;
            let (status, busy) = state.sessions.snapshot(owner).await;
            ActionResponse {
                ok: false,
                transaction_base64: None,
                status,
                busy,
            }
        }
    }
}

pub(crate) async fn validation_error(
    state: &AppState,
    owner: &Pubkey,
    message: &str,
) -> ActionResponse {
    state.sessions.report_error(owner, message).await;
    let (status, busy) = state.sessions.snapshot(owner).await;
    ActionResponse {
        ok: false,
        transaction_base64: None,
        status,
        busy,
    }
}

pub(crate) fn invalid_address_response() -> ActionResponse {
    ActionResponse {
        ok: false,
        transaction_base64: None,
        status: Some(StatusView {
            kind: StatusKind::Error,
            message: "Invalid wallet address".to_string(),
        }),
        busy: false,
    }
}
