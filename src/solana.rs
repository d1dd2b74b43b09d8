//! RPC plumbing: transaction preparation and submission, plus the
//! balance reads the dashboard polls. All calls are async; nothing here
//! retries. A failure is returned to the caller and reported once.

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::account::Account;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::instruction::Instruction;
use solana_sdk::program_pack::Pack;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature};
use solana_sdk::signer::Signer;
use solana_sdk::transaction::Transaction;

use crate::config::Config;
use crate::models::{SentinelConfig, UserVault};
use crate::pda;

pub struct VaultClient {
    pub config: Config,
    rpc: RpcClient,
    commitment: CommitmentConfig,
}

impl VaultClient {
    pub fn new(config: &Config) -> Self {
        let commitment = CommitmentConfig::confirmed();
        Self {
            config: config.clone(),
            rpc: RpcClient::new_with_commitment(config.rpc_url.clone(), commitment),
            commitment,
        }
    }

    // -----------------------------------------------------------------------
    // Submission
    // -----------------------------------------------------------------------

    /// Assemble an unsigned transaction around `instructions` with a
    /// fresh blockhash, base64-encoded for the connected wallet to sign.
    pub async fn prepare_unsigned(
        &self,
        instructions: &[Instruction],
        fee_payer: &Pubkey,
    ) -> Result<String> {
        let blockhash = self
            .rpc
            .get_latest_blockhash()
            .await
            .context("failed to fetch a recent blockhash")?;
        let mut tx = Transaction::new_with_payer(instructions, Some(fee_payer));
        tx.message.recent_blockhash = blockhash;
        let bytes = bincode::serialize(&tx).context("failed to serialize transaction")?;
        Ok(BASE64.encode(bytes))
    }

    /// Broadcast a wallet-signed transaction and block until the network
    /// confirms it.
    pub async fn submit_signed(&self, transaction_base64: &str) -> Result<Signature> {
        let tx = decode_transaction(transaction_base64)?;
        self.rpc
            .send_and_confirm_transaction(&tx)
            .await
            .context("transaction failed")
    }

    /// Sign with a local keypair and submit. Used by the admin binaries.
    pub async fn submit_with_signer(
        &self,
        instructions: &[Instruction],
        payer: &Keypair,
    ) -> Result<Signature> {
        let blockhash = self
            .rpc
            .get_latest_blockhash()
            .await
            .context("failed to fetch a recent blockhash")?;
        let tx = Transaction::new_signed_with_payer(
            instructions,
            Some(&payer.pubkey()),
            &[payer],
            blockhash,
        );
        self.rpc
            .send_and_confirm_transaction(&tx)
            .await
            .context("transaction failed")
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// The program's configuration account, `None` until initialized.
    pub async fn read_config(&self) -> Result<Option<SentinelConfig>> {
        let (config_pda, _) = pda::config(&self.config.program_id);
        match self.fetch_optional(&config_pda).await? {
            Some(account) => Ok(Some(SentinelConfig::from_account_data(&account.data)?)),
            None => Ok(None),
        }
    }

    pub async fn read_user_vault(&self, user: &Pubkey) -> Result<Option<UserVault>> {
        let (vault_pda, _) = pda::user_vault(&self.config.program_id, user);
        match self.fetch_optional(&vault_pda).await? {
            Some(account) => Ok(Some(UserVault::from_account_data(&account.data)?)),
            None => Ok(None),
        }
    }

    /// Deposited amount for `user`. A vault record that does not exist
    /// yet reads as zero; only transport or decode failures are errors.
    pub async fn read_vault_balance(&self, user: &Pubkey) -> Result<u64> {
        Ok(self
            .read_user_vault(user)
            .await?
            .map(|vault| vault.old_token_deposited)
            .unwrap_or(0))
    }

    /// Balance of the wallet's token account for the configured mint,
    /// zero when the account has never been created.
    pub async fn read_wallet_balance(&self, owner: &Pubkey) -> Result<u64> {
        let ata = pda::wallet_token(owner, &self.config.token_mint);
        match self.fetch_optional(&ata).await? {
            Some(account) => {
                let token = spl_token::state::Account::unpack(&account.data)
                    .context("token account data is malformed")?;
                Ok(token.amount)
            }
            None => Ok(0),
        }
    }

    pub async fn account_exists(&self, address: &Pubkey) -> Result<bool> {
        Ok(self.fetch_optional(address).await?.is_some())
    }

    pub async fn sol_balance(&self, address: &Pubkey) -> Result<u64> {
        self.rpc
            .get_balance(address)
            .await
            .with_context(|| format!("failed to read balance of {}", address))
    }

    async fn fetch_optional(&self, address: &Pubkey) -> Result<Option<Account>> {
        let response = self
            .rpc
            .get_account_with_commitment(address, self.commitment)
            .await
            .with_context(|| format!("failed to read account {}", address))?;
        Ok(response.value)
    }
}

pub fn decode_transaction(transaction_base64: &str) -> Result<Transaction> {
    let bytes = BASE64
        .decode(transaction_base64)
        .context("transaction is not valid base64")?;
    bincode::deserialize(&bytes).context("transaction bytes are malformed")
}

pub fn explorer_tx_url(signature: &Signature) -> String {
    format!("https://explorer.solana.com/tx/{}?cluster=devnet", signature)
}
