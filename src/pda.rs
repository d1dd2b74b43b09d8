//! Address derivation for the vault program. Every derivation is a pure
//! function of (seeds, program id) and returns the address together with
//! its bump nonce.

use solana_sdk::pubkey::Pubkey;

pub const CONFIG_SEED: &[u8] = b"sentinel_config";
pub const USER_VAULT_SEED: &[u8] = b"user_vault";
pub const VAULT_AUTHORITY_SEED: &[u8] = b"vault_authority";

/// The program's singleton configuration account.
pub fn config(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[CONFIG_SEED], program_id)
}

/// Per-user deposit bookkeeping account.
pub fn user_vault(program_id: &Pubkey, user: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[USER_VAULT_SEED, user.as_ref()], program_id)
}

/// Authority that signs vault-side token transfers.
pub fn vault_authority(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[VAULT_AUTHORITY_SEED], program_id)
}

/// The token account holding vaulted funds: the vault authority's
/// associated token account for the configured mint. Derived here so the
/// dashboard and the admin binaries agree on a single address.
pub fn vault_token(program_id: &Pubkey, mint: &Pubkey) -> (Pubkey, u8) {
    let (authority, _) = vault_authority(program_id);
    Pubkey::find_program_address(
        &[
            authority.as_ref(),
            spl_token::id().as_ref(),
            mint.as_ref(),
        ],
        &spl_associated_token_account::id(),
    )
}

/// A wallet's associated token account for the configured mint.
pub fn wallet_token(owner: &Pubkey, mint: &Pubkey) -> Pubkey {
    spl_associated_token_account::get_associated_token_address(owner, mint)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn program_id() -> Pubkey {
        crate::config::PROGRAM_ID
    }

    #[test]
    fn derivation_is_deterministic() {
        let user = Pubkey::new_unique();
        assert_eq!(config(&program_id()), config(&program_id()));
        assert_eq!(
            user_vault(&program_id(), &user),
            user_vault(&program_id(), &user)
        );
        assert_eq!(vault_authority(&program_id()), vault_authority(&program_id()));
    }

    #[test]
    fn user_vaults_differ_per_user() {
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();
        assert_ne!(
            user_vault(&program_id(), &a).0,
            user_vault(&program_id(), &b).0
        );
    }

    #[test]
    fn vault_token_is_the_authority_ata() {
        let mint = Pubkey::new_unique();
        let (authority, _) = vault_authority(&program_id());
        let (derived, _) = vault_token(&program_id(), &mint);
        assert_eq!(
            derived,
            spl_associated_token_account::get_associated_token_address(&authority, &mint)
        );
    }
}
