//! Per-wallet dashboard state. Each connected wallet gets a transient
//! session holding the current status message, the in-flight latch, and
//! the last balances that were read successfully. Nothing here survives
//! a restart.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use solana_sdk::pubkey::Pubkey;
use tokio::sync::Mutex;

/// Status messages clear themselves this long after being set.
pub const STATUS_TTL: Duration = Duration::from_secs(5);
/// Program/network rejections are shown truncated to this many chars.
const ERROR_PREVIEW_CHARS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusView {
    pub kind: StatusKind,
    pub message: String,
}

#[derive(Default)]
struct Session {
    status: Option<(StatusView, Instant)>,
    busy: bool,
    /// Success message recorded when the action began, completed with
    /// the signature once the transaction confirms.
    pending_success: Option<String>,
    vault_raw: Option<u64>,
    wallet_raw: Option<u64>,
}

impl Session {
    fn status_at(&mut self, now: Instant) -> Option<StatusView> {
        if let Some((_, set_at)) = self.status {
            if now.duration_since(set_at) >= STATUS_TTL {
                self.status = None;
            }
        }
        self.status.as_ref().map(|(view, _)| view.clone())
    }

    fn set_status(&mut self, kind: StatusKind, message: String) {
        let view = StatusView { kind, message };
        self.status = Some((view, Instant::now()));
    }
}

#[derive(Clone, Default)]
pub struct Sessions(Arc<Mutex<HashMap<Pubkey, Session>>>);

impl Sessions {
    /// Try to start an action. Returns `false` (a no-op, per the
    /// disabled-controls rule) when another action for this wallet is
    /// already in flight; otherwise latches the session and posts the
    /// in-progress message.
    pub async fn try_begin(&self, owner: &Pubkey, info: &str, success: &str) -> bool {
        let mut sessions = self.0.lock().await;
        let session = sessions.entry(*owner).or_default();
        if session.busy {
            return false;
        }
        session.busy = true;
        session.pending_success = Some(success.to_string());
        session.set_status(StatusKind::Info, info.to_string());
        true
    }

    /// Complete the in-flight action with a confirmed signature.
    pub async fn finish_success(&self, owner: &Pubkey, signature: &str) {
        let mut sessions = self.0.lock().await;
        let session = sessions.entry(*owner).or_default();
        let base = session
            .pending_success
            .take()
            .unwrap_or_else(|| "Confirmed!".to_string());
        let preview: String = signature.chars().take(8).collect();
        session.busy = false;
        session.set_status(StatusKind::Success, format!("{} TX: {}...", base, preview));
    }

    /// Complete the in-flight action with an error, releasing the latch.
    pub async fn finish_error(&self, owner: &Pubkey, message: String) {
        let mut sessions = self.0.lock().await;
        let session = sessions.entry(*owner).or_default();
        session.busy = false;
        session.pending_success = None;
        session.set_status(StatusKind::Error, message);
    }

    /// Post a validation error without touching the latch (the action
    /// never started).
    pub async fn report_error(&self, owner: &Pubkey, message: &str) {
        let mut sessions = self.0.lock().await;
        let session = sessions.entry(*owner).or_default();
        session.set_status(StatusKind::Error, message.to_string());
    }

    /// Current (unexpired) status and latch state.
    pub async fn snapshot(&self, owner: &Pubkey) -> (Option<StatusView>, bool) {
        self.snapshot_at(owner, Instant::now()).await
    }

    /// Remember balances that were read successfully; `None` fields
    /// (failed reads) leave the previous value in place.
    pub async fn cache_balances(
        &self,
        owner: &Pubkey,
        vault_raw: Option<u64>,
        wallet_raw: Option<u64>,
    ) {
        let mut sessions = self.0.lock().await;
        let session = sessions.entry(*owner).or_default();
        if vault_raw.is_some() {
            session.vault_raw = vault_raw;
        }
        if wallet_raw.is_some() {
            session.wallet_raw = wallet_raw;
        }
    }

    /// Last balances read successfully, served when a refresh fails.
    pub async fn cached_balances(&self, owner: &Pubkey) -> (Option<u64>, Option<u64>) {
        let sessions = self.0.lock().await;
        match sessions.get(owner) {
            Some(session) => (session.vault_raw, session.wallet_raw),
            None => (None, None),
        }
    }

    async fn snapshot_at(&self, owner: &Pubkey, now: Instant) -> (Option<StatusView>, bool) {
        let mut sessions = self.0.lock().await;
        let session = sessions.entry(*owner).or_default();
        (session.status_at(now), session.busy)
    }
}

/// User-facing rendering of a submission failure, truncated the way the
/// dashboard toast expects it.
pub fn failure_message(err: &str) -> String {
    let preview: String = err.chars().take(ERROR_PREVIEW_CHARS).collect();
    format!("Failed: {}", preview)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn second_trigger_is_a_no_op_while_busy() {
        let sessions = Sessions::default();
        let owner = Pubkey::new_unique();

        assert!(
            sessions
                .try_begin(&owner, "Processing deposit...", "Deposited!")
                .await
        );
        // same action re-triggered
        assert!(!sessions.try_begin(&owner, "Processing deposit...", "Deposited!").await);
        // a different action is refused just the same
        assert!(!sessions.try_begin(&owner, "Processing withdrawal...", "Withdrawn!").await);

        let (_, busy) = sessions.snapshot(&owner).await;
        assert!(busy);
    }

    #[tokio::test]
    async fn controls_re_enable_after_completion() {
        let sessions = Sessions::default();
        let owner = Pubkey::new_unique();

        assert!(sessions.try_begin(&owner, "Processing deposit...", "Deposited!").await);
        sessions
            .finish_success(&owner, "5Kd8vK2qQjLmw7y9tGkRfAPcD1NnBvhXuZsE4rJ6MqWa")
            .await;

        let (status, busy) = sessions.snapshot(&owner).await;
        assert!(!busy);
        let status = status.unwrap();
        assert_eq!(status.kind, StatusKind::Success);
        assert_eq!(status.message, "Deposited! TX: 5Kd8vK2q...");

        // and the next action may start
        assert!(sessions.try_begin(&owner, "Processing withdrawal...", "Withdrawn!").await);
    }

    #[tokio::test]
    async fn status_clears_after_the_display_window() {
        let sessions = Sessions::default();
        let owner = Pubkey::new_unique();

        assert!(sessions.try_begin(&owner, "Initializing vault...", "Initialized!").await);
        sessions.finish_error(&owner, failure_message("simulation failed")).await;

        let now = Instant::now();
        let (status, _) = sessions.snapshot_at(&owner, now).await;
        assert!(status.is_some());

        let (status, busy) = sessions
            .snapshot_at(&owner, now + STATUS_TTL + Duration::from_millis(1))
            .await;
        assert!(status.is_none());
        assert!(!busy);
    }

    #[tokio::test]
    async fn failures_are_truncated_for_display() {
        let long = "x".repeat(200);
        let rendered = failure_message(&long);
        assert_eq!(rendered.len(), "Failed: ".len() + 50);

        let sessions = Sessions::default();
        let owner = Pubkey::new_unique();
        sessions.finish_error(&owner, failure_message(&long)).await;
        let (status, _) = sessions.snapshot(&owner).await;
        assert_eq!(status.unwrap().message, rendered);
    }

    #[tokio::test]
    async fn cached_balances_survive_failed_refreshes() {
        let sessions = Sessions::default();
        let owner = Pubkey::new_unique();

        assert_eq!(sessions.cached_balances(&owner).await, (None, None));
        sessions.cache_balances(&owner, Some(5), Some(7)).await;
        assert_eq!(sessions.cached_balances(&owner).await, (Some(5), Some(7)));

        // a failed wallet refresh keeps the last good value
        sessions.cache_balances(&owner, Some(9), None).await;
        assert_eq!(sessions.cached_balances(&owner).await, (Some(9), Some(7)));
    }
}
