//! One-shot admin script: create the vault authority's associated token
//! account, paid for by the operator's default CLI wallet.

use std::env;

use anyhow::{anyhow, Context, Result};
use sentinel_backend::config::Config;
use sentinel_backend::solana::{explorer_tx_url, VaultClient};
use sentinel_backend::{pda, tx};
use solana_sdk::signature::read_keypair_file;
use solana_sdk::signer::Signer;

#[tokio::main]
async fn main() -> Result<()> {
    println!("🚀 Vault token account creation");

    let home = env::var("HOME").context("HOME is not set")?;
    let keypair_path = format!("{}/.config/solana/id.json", home);
    let wallet = read_keypair_file(&keypair_path)
        .map_err(|err| anyhow!("failed to load wallet from {}: {}", keypair_path, err))?;
    println!("👤 Payer wallet: {}", wallet.pubkey());

    let config = Config::from_env()?;
    let client = VaultClient::new(&config);

    let (vault_authority, _) = pda::vault_authority(&config.program_id);
    let (vault_token, _) = pda::vault_token(&config.program_id, &config.token_mint);
    println!("🔐 Vault authority: {}", vault_authority);
    println!("🏦 Target token account: {}", vault_token);

    if client.account_exists(&vault_token).await? {
        println!("✅ Account already exists, no action needed");
        return Ok(());
    }

    println!("⚠️  Account missing, creating...");
    let ix = tx::create_vault_token_account(&config, &wallet.pubkey());
    let signature = client.submit_with_signer(&[ix], &wallet).await?;
    println!("✅ Token account created");
    println!("🔗 {}", explorer_tx_url(&signature));
    Ok(())
}
