//! One-shot admin script: initialize the vault program's config account
//! and make sure the vault token account exists. Safe to re-run; it
//! exits early when the vault is already initialized.

use anyhow::{anyhow, bail, Result};
use sentinel_backend::config::Config;
use sentinel_backend::solana::{explorer_tx_url, VaultClient};
use sentinel_backend::{pda, tx};
use solana_sdk::signature::read_keypair_file;
use solana_sdk::signer::Signer;

const KEYPAIR_PATH: &str = "sentinel_vault-keypair.json";
/// 0.01 SOL, enough for the config account rent plus fees.
const MIN_LAMPORTS: u64 = 10_000_000;

#[tokio::main]
async fn main() -> Result<()> {
    println!("🔐 Sentinel vault initialization");

    println!("📂 Loading keypair from {}", KEYPAIR_PATH);
    let authority = read_keypair_file(KEYPAIR_PATH)
        .map_err(|err| anyhow!("failed to load keypair from {}: {}", KEYPAIR_PATH, err))?;
    println!("✅ Authority wallet: {}", authority.pubkey());

    let config = Config::from_env()?;
    let client = VaultClient::new(&config);
    println!("🌐 Connecting to {}", config.rpc_url);

    let lamports = client.sol_balance(&authority.pubkey()).await?;
    println!("💰 Authority balance: {} SOL", lamports as f64 / 1e9);
    if lamports < MIN_LAMPORTS {
        bail!("insufficient balance, need at least 0.01 SOL (run: solana airdrop 1 --url devnet)");
    }

    let (config_pda, _) = pda::config(&config.program_id);
    let (vault_authority, _) = pda::vault_authority(&config.program_id);
    let (vault_token, _) = pda::vault_token(&config.program_id, &config.token_mint);
    println!("📍 Program addresses:");
    println!("   program id:      {}", config.program_id);
    println!("   config:          {}", config_pda);
    println!("   vault authority: {}", vault_authority);
    println!("   vault token:     {}", vault_token);
    println!("   token mint:      {}", config.token_mint);

    println!("🔍 Checking if the vault is already initialized...");
    if let Some(existing) = client.read_config().await? {
        println!("⚠️  Vault is already initialized");
        println!("   authority: {}", existing.authority);
        println!("   mint:      {}", existing.old_token_mint);
        return Ok(());
    }
    println!("✅ Not initialized yet, proceeding");

    println!("🚀 Initializing vault...");
    let ix = tx::initialize(&config, &authority.pubkey(), &config.token_mint);
    let signature = client.submit_with_signer(&[ix], &authority).await?;
    println!("✅ Vault initialized");
    println!("🔗 {}", explorer_tx_url(&signature));

    println!("🔍 Verifying...");
    match client.read_config().await? {
        Some(on_chain) => {
            println!("✅ Config verified:");
            println!("   authority: {}", on_chain.authority);
            println!("   mint:      {}", on_chain.old_token_mint);
            println!("   dex:       {}", on_chain.dex_program_id);
        }
        None => println!("⚠️  Config account not visible yet, check the explorer link above"),
    }

    println!("📦 Vault token account: {}", vault_token);
    if client.account_exists(&vault_token).await? {
        println!("✅ Vault token account already exists");
    } else {
        println!("   Creating associated token account...");
        let ix = tx::create_vault_token_account(&config, &authority.pubkey());
        let signature = client.submit_with_signer(&[ix], &authority).await?;
        println!("✅ Vault token account created");
        println!("🔗 {}", explorer_tx_url(&signature));
    }

    println!("🎉 Initialization complete");
    println!("Next: fund a wallet with the token and test deposit/withdraw from the dashboard.");
    Ok(())
}
