//! The one instruction encoder for the vault program, used by the
//! dashboard routes and the admin binaries alike so selector bytes and
//! account ordering cannot drift between them.

use solana_sdk::hash::hash;
use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::system_program;

use crate::config::Config;
use crate::pda;

/// Anchor-style method selector: the first 8 bytes of
/// SHA-256("<namespace>:<name>").
pub fn discriminator(namespace: &str, name: &str) -> [u8; 8] {
    let digest = hash(format!("{}:{}", namespace, name).as_bytes());
    let mut out = [0u8; 8];
    out.copy_from_slice(&digest.to_bytes()[..8]);
    out
}

/// One-time program initialization. Records the vaulted mint and the
/// DEX program id in the config account.
pub fn initialize(config: &Config, authority: &Pubkey, old_token_mint: &Pubkey) -> Instruction {
    let (config_pda, _) = pda::config(&config.program_id);

    let mut data = discriminator("global", "initialize").to_vec();
    data.extend_from_slice(old_token_mint.as_ref());
    data.extend_from_slice(config.dex_program_id.as_ref());

    let accounts = vec![
        AccountMeta::new(*authority, true),
        AccountMeta::new(config_pda, false),
        AccountMeta::new_readonly(system_program::id(), false),
    ];

    Instruction::new_with_bytes(config.program_id, &data, accounts)
}

/// Move `amount` base units from the user's token account into the
/// vault. Creates the per-user vault record on first deposit (program
/// side), hence the system program at the end.
pub fn deposit(config: &Config, user: &Pubkey, amount: u64) -> Instruction {
    let (user_vault, _) = pda::user_vault(&config.program_id, user);
    let (config_pda, _) = pda::config(&config.program_id);
    let (vault_token, _) = pda::vault_token(&config.program_id, &config.token_mint);
    let user_token = pda::wallet_token(user, &config.token_mint);

    let mut data = discriminator("global", "deposit").to_vec();
    data.extend_from_slice(&amount.to_le_bytes());

    let accounts = vec![
        AccountMeta::new(*user, true),
        AccountMeta::new(user_vault, false),
        AccountMeta::new(config_pda, false),
        AccountMeta::new(user_token, false),
        AccountMeta::new(vault_token, false),
        AccountMeta::new_readonly(spl_token::id(), false),
        AccountMeta::new_readonly(system_program::id(), false),
    ];

    Instruction::new_with_bytes(config.program_id, &data, accounts)
}

/// Move `amount` base units back out of the vault; the vault authority
/// PDA signs the token transfer on the program side.
pub fn withdraw(config: &Config, user: &Pubkey, amount: u64) -> Instruction {
    let (user_vault, _) = pda::user_vault(&config.program_id, user);
    let (config_pda, _) = pda::config(&config.program_id);
    let (vault_authority, _) = pda::vault_authority(&config.program_id);
    let (vault_token, _) = pda::vault_token(&config.program_id, &config.token_mint);
    let user_token = pda::wallet_token(user, &config.token_mint);

    let mut data = discriminator("global", "withdraw").to_vec();
    data.extend_from_slice(&amount.to_le_bytes());

    let accounts = vec![
        AccountMeta::new(*user, true),
        AccountMeta::new(user_vault, false),
        AccountMeta::new(config_pda, false),
        AccountMeta::new_readonly(vault_authority, false),
        AccountMeta::new(vault_token, false),
        AccountMeta::new(user_token, false),
        AccountMeta::new_readonly(spl_token::id(), false),
    ];

    Instruction::new_with_bytes(config.program_id, &data, accounts)
}

/// Create the vault authority's associated token account. `payer` funds
/// the rent.
pub fn create_vault_token_account(config: &Config, payer: &Pubkey) -> Instruction {
    let (vault_authority, _) = pda::vault_authority(&config.program_id);
    spl_associated_token_account::instruction::create_associated_token_account(
        payer,
        &vault_authority,
        &config.token_mint,
        &spl_token::id(),
    )
}
