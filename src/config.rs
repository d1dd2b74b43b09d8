use std::env;
use std::str::FromStr;

use anyhow::{Context, Result};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::system_program;

/// Devnet deployment of the vault program.
pub const PROGRAM_ID: Pubkey =
    solana_sdk::pubkey!("FqtRBu34yQx6dSi1xKjZSMsuGvzEpviGjeu65xKYVdmW");
/// Mint of the token being vaulted.
pub const TOKEN_MINT: Pubkey =
    solana_sdk::pubkey!("3jbeJgMDBWz1zbDhqvpBwAu9CLD9o5FjWACZ6LRcq1n3");
pub const RPC_URL: &str = "https://api.devnet.solana.com";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_THEME: &str = "cyber";

/// Runtime configuration. Constructed once and passed to every component
/// so tests and alternate networks can swap endpoints without touching
/// module globals.
#[derive(Debug, Clone)]
pub struct Config {
    pub rpc_url: String,
    pub program_id: Pubkey,
    pub token_mint: Pubkey,
    /// Placeholder until a real DEX route is configured; the on-chain
    /// initialize instruction records it verbatim.
    pub dex_program_id: Pubkey,
    pub bind_addr: String,
    pub theme: String,
}

impl Config {
    pub fn devnet() -> Self {
        Self {
            rpc_url: RPC_URL.to_string(),
            program_id: PROGRAM_ID,
            token_mint: TOKEN_MINT,
            dex_program_id: system_program::id(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            theme: DEFAULT_THEME.to_string(),
        }
    }

    /// Devnet defaults, overridable through `SENTINEL_*` environment
    /// variables.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::devnet();
        if let Ok(url) = env::var("SENTINEL_RPC_URL") {
            config.rpc_url = url;
        }
        if let Ok(id) = env::var("SENTINEL_PROGRAM_ID") {
            config.program_id =
                Pubkey::from_str(&id).context("SENTINEL_PROGRAM_ID is not a valid pubkey")?;
        }
        if let Ok(mint) = env::var("SENTINEL_TOKEN_MINT") {
            config.token_mint =
                Pubkey::from_str(&mint).context("SENTINEL_TOKEN_MINT is not a valid pubkey")?;
        }
        if let Ok(dex) = env::var("SENTINEL_DEX_PROGRAM_ID") {
            config.dex_program_id =
                Pubkey::from_str(&dex).context("SENTINEL_DEX_PROGRAM_ID is not a valid pubkey")?;
        }
        if let Ok(addr) = env::var("SENTINEL_BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Ok(theme) = env::var("SENTINEL_THEME") {
            config.theme = theme;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn devnet_defaults_are_wired() {
        let config = Config::devnet();
        assert_eq!(config.program_id, PROGRAM_ID);
        assert_eq!(config.token_mint, TOKEN_MINT);
        assert_eq!(config.dex_program_id, system_program::id());
        assert_eq!(config.theme, "cyber");
    }
}
