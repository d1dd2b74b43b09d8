use anyhow::{bail, Result};
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

use crate::amount;
use crate::session::StatusView;
use crate::tx;

/// Lifecycle of the vaulted token, as recorded on chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshDeserialize, BorshSerialize)]
pub enum MigrationStatus {
    NotStarted,
    Completed,
}

/// The program's singleton configuration account.
#[derive(Debug, BorshDeserialize, BorshSerialize)]
pub struct SentinelConfig {
    pub authority: Pubkey,
    pub old_token_mint: Pubkey,
    pub new_token_mint: Pubkey,
    pub vault_old_token_account: Pubkey,
    pub vault_new_token_account: Pubkey,
    pub total_old_deposited: u64,
    pub total_new_received: u64,
    pub migration_status: MigrationStatus,
    pub dex_program_id: Pubkey,
    pub migration_timestamp: i64,
    pub bump: u8,
}

/// One user's deposit record. Owned and mutated exclusively by the
/// program; this crate only reads it.
#[derive(Debug, BorshDeserialize, BorshSerialize)]
pub struct UserVault {
    pub user: Pubkey,
    pub old_token_deposited: u64,
    pub has_claimed: bool,
    pub deposit_timestamp: i64,
    pub bump: u8,
}

impl SentinelConfig {
    pub fn from_account_data(data: &[u8]) -> Result<Self> {
        decode_account("SentinelConfig", data)
    }
}

impl UserVault {
    pub fn from_account_data(data: &[u8]) -> Result<Self> {
        decode_account("UserVault", data)
    }
}

/// Decode an account: verify the 8-byte name tag, then read the borsh
/// payload. Accounts are allocated to the in-memory struct size, so
/// trailing padding bytes are expected and ignored.
fn decode_account<T: BorshDeserialize>(name: &str, data: &[u8]) -> Result<T> {
    if data.len() < 8 {
        bail!("account data too short for a {} account", name);
    }
    if data[..8] != tx::discriminator("account", name) {
        bail!("account is not a {} account", name);
    }
    let mut payload = &data[8..];
    Ok(T::deserialize(&mut payload)?)
}

// ---------------------------------------------------------------------------
// API types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct InfoResponse {
    pub program_id: String,
    pub token_mint: String,
    pub rpc_url: String,
    pub version: &'static str,
}

/// Prefilled values for the 25/50/75/MAX shortcut buttons; `null` when
/// the share would be nothing (button disabled).
#[derive(Debug, Serialize)]
pub struct QuickAmounts {
    pub p25: Option<String>,
    pub p50: Option<String>,
    pub p75: Option<String>,
    pub max: Option<String>,
}

impl QuickAmounts {
    pub fn for_balance(display: &str) -> Self {
        Self {
            p25: amount::percentage_amount(display, 25),
            p50: amount::percentage_amount(display, 50),
            p75: amount::percentage_amount(display, 75),
            max: amount::percentage_amount(display, 100),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BalancesResponse {
    pub owner: String,
    pub vault_pda: String,
    pub vault_balance: String,
    pub wallet_balance: String,
    pub vault_raw: u64,
    pub wallet_raw: u64,
    pub quick_deposit: QuickAmounts,
    pub quick_withdraw: QuickAmounts,
    pub status: Option<StatusView>,
    pub busy: bool,
}

#[derive(Debug, Deserialize)]
pub struct AmountRequest {
    pub owner: String,
    pub amount: String,
}

#[derive(Debug, Deserialize)]
pub struct InitializeRequest {
    pub authority: String,
    pub mint: String,
}

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub owner: String,
    pub transaction_base64: String,
}

#[derive(Debug, Deserialize)]
pub struct CancelRequest {
    pub owner: String,
    pub reason: Option<String>,
}

/// Outcome of a prepare-style action endpoint. `transaction_base64` is
/// present only when there is something for the wallet to sign.
#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub ok: bool,
    pub transaction_base64: Option<String>,
    pub status: Option<StatusView>,
    pub busy: bool,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub ok: bool,
    pub signature: Option<String>,
    pub status: Option<StatusView>,
    pub vault_balance: Option<String>,
    pub wallet_balance: Option<String>,
}
