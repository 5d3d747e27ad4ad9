// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Application state and user-triggered actions.
//!
//! Holds the UI state (session account and the in-memory wave list) and wires
//! the wallet session to the portal contract. Data flows one direction: user
//! action, provider/contract call, state update, render. Failures are caught
//! and logged here; state is left unchanged.

use alloy::primitives::Address;
use tokio::sync::mpsc;

use crate::portal::{PortalContract, Wave, WaveReceipt, MAX_MESSAGE_LEN};
use crate::session::{ConnectOutcome, SessionManager, WalletProvider};

/// Prompt shown when no wallet key is provisioned.
pub const INSTALL_PROMPT: &str = "No wallet key is configured. Set WAVE_PRIVATE_KEY or point \
--keystore (WAVE_KEYSTORE) at a key file, then try again.";

/// Result of a wave submission attempt.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The wave was mined.
    Submitted(WaveReceipt),
    /// Messages are required; nothing was written.
    EmptyMessage,
    /// Message exceeds [`MAX_MESSAGE_LEN`]; nothing was written.
    MessageTooLong,
    /// The write failed; logged, state unchanged.
    Failed,
}

/// UI state plus the injected wallet and contract capabilities.
pub struct App<W, C> {
    session: SessionManager<W>,
    portal: C,
    waves: Vec<Wave>,
}

impl<W: WalletProvider, C: PortalContract> App<W, C> {
    pub fn new(session: SessionManager<W>, portal: C) -> Self {
        Self {
            session,
            portal,
            waves: Vec::new(),
        }
    }

    /// The authorized account, if any.
    pub fn account(&self) -> Option<Address> {
        self.session.account()
    }

    /// The in-memory wave list, oldest first.
    pub fn waves(&self) -> &[Wave] {
        &self.waves
    }

    /// The injected portal contract.
    pub fn portal(&self) -> &C {
        &self.portal
    }

    /// Restore an existing session and, when an account is present, perform
    /// the initial history load.
    pub async fn restore_session(&mut self) -> Option<Address> {
        let account = self.session.check_existing().await;
        if account.is_some() {
            self.load_all_waves().await;
        }
        account
    }

    /// Explicitly connect the wallet.
    pub async fn connect(&mut self) -> ConnectOutcome {
        self.session.connect().await
    }

    /// Read the full history and replace the in-memory list wholesale.
    /// A failed read is logged and leaves the current list untouched.
    pub async fn load_all_waves(&mut self) {
        match self.portal.all_waves().await {
            Ok(waves) => {
                tracing::debug!(count = waves.len(), "Loaded wave history");
                self.waves = waves;
            }
            Err(e) => tracing::warn!(error = %e, "Failed to load wave history"),
        }
    }

    /// Submit one wave.
    ///
    /// The running total counter is re-read before and after purely for
    /// diagnostic logging. Empty and oversized messages perform no contract
    /// write.
    pub async fn submit_wave(&mut self, message: &str) -> SubmitOutcome {
        match self.portal.total_waves().await {
            Ok(total) => tracing::debug!(total, "Retrieved total wave count"),
            Err(e) => tracing::debug!(error = %e, "Total wave count read failed"),
        }

        if message.is_empty() {
            tracing::info!("Empty message, no wave submitted");
            return SubmitOutcome::EmptyMessage;
        }
        if message.chars().count() > MAX_MESSAGE_LEN {
            tracing::warn!(limit = MAX_MESSAGE_LEN, "Message too long, no wave submitted");
            return SubmitOutcome::MessageTooLong;
        }

        match self.portal.submit_wave(message).await {
            Ok(receipt) => {
                tracing::info!(
                    tx_hash = %receipt.tx_hash,
                    block_number = receipt.block_number,
                    success = receipt.success,
                    "Wave mined"
                );

                match self.portal.total_waves().await {
                    Ok(total) => tracing::debug!(total, "Got total wave count"),
                    Err(e) => tracing::debug!(error = %e, "Total wave count read failed"),
                }

                SubmitOutcome::Submitted(receipt)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Wave submission failed");
                SubmitOutcome::Failed
            }
        }
    }

    /// Append one wave received from the event feed.
    pub fn apply_wave(&mut self, wave: Wave) {
        self.waves.push(wave);
    }

    /// Consume the event feed until it closes, appending each wave in
    /// arrival order and handing it to `on_wave` for rendering.
    ///
    /// Returns when the feed is torn down (watcher cancelled or sender
    /// dropped); nothing is appended after that.
    pub async fn consume_feed(
        &mut self,
        feed: &mut mpsc::UnboundedReceiver<Wave>,
        mut on_wave: impl FnMut(&Wave),
    ) {
        while let Some(wave) = feed.recv().await {
            on_wave(&wave);
            self.apply_wave(wave);
        }
        tracing::debug!("Wave feed closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portal::PortalError;
    use crate::session::WalletError;
    use alloy::network::EthereumWallet;
    use chrono::DateTime;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn wave(n: u64) -> Wave {
        Wave {
            sender: format!("0x{:040x}", n),
            timestamp: DateTime::from_timestamp(1_700_000_000 + n as i64, 0).unwrap(),
            message: format!("wave {}", n),
            wave_height: n,
        }
    }

    fn receipt() -> WaveReceipt {
        WaveReceipt {
            tx_hash: "0xfeed".to_string(),
            block_number: 42,
            gas_used: 65_000,
            success: true,
            explorer_url: "https://sepolia.etherscan.io/tx/0xfeed".to_string(),
        }
    }

    struct StaticWallet(Vec<Address>);

    impl WalletProvider for StaticWallet {
        async fn accounts(&self) -> Result<Vec<Address>, WalletError> {
            Ok(self.0.clone())
        }

        async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
            Ok(self.0.clone())
        }

        fn ethereum_wallet(&self) -> Result<EthereumWallet, WalletError> {
            Err(WalletError::Provider("no signing key".into()))
        }
    }

    #[derive(Default)]
    struct FakePortal {
        history: Vec<Wave>,
        list_fails: bool,
        submit_fails: bool,
        list_calls: AtomicUsize,
        submitted: Mutex<Vec<String>>,
    }

    impl PortalContract for FakePortal {
        async fn total_waves(&self) -> Result<u64, PortalError> {
            Ok(self.history.len() as u64)
        }

        async fn all_waves(&self) -> Result<Vec<Wave>, PortalError> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            if self.list_fails {
                return Err(PortalError::Rpc("history unavailable".into()));
            }
            Ok(self.history.clone())
        }

        async fn submit_wave(&self, message: &str) -> Result<WaveReceipt, PortalError> {
            self.submitted.lock().unwrap().push(message.to_string());
            if self.submit_fails {
                return Err(PortalError::TransactionFailed("reverted".into()));
            }
            Ok(receipt())
        }
    }

    fn app_with(provider: Option<StaticWallet>, portal: FakePortal) -> App<StaticWallet, FakePortal> {
        App::new(SessionManager::new(provider), portal)
    }

    #[tokio::test]
    async fn restore_session_performs_initial_history_load() {
        let portal = FakePortal {
            history: vec![wave(1), wave(2)],
            ..Default::default()
        };
        let account = Address::repeat_byte(0xaa);
        let mut app = app_with(Some(StaticWallet(vec![account])), portal);

        assert_eq!(app.restore_session().await, Some(account));
        assert_eq!(app.account(), Some(account));
        assert_eq!(app.waves(), &[wave(1), wave(2)]);
    }

    #[tokio::test]
    async fn restore_session_without_account_skips_history_load() {
        let mut app = app_with(Some(StaticWallet(vec![])), FakePortal::default());

        assert_eq!(app.restore_session().await, None);
        assert_eq!(app.portal.list_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn load_replaces_list_wholesale() {
        let portal = FakePortal {
            history: vec![wave(7)],
            ..Default::default()
        };
        let mut app = app_with(None, portal);
        app.apply_wave(wave(1));
        app.apply_wave(wave(2));

        app.load_all_waves().await;

        assert_eq!(app.waves(), &[wave(7)]);
    }

    #[tokio::test]
    async fn load_failure_leaves_list_untouched() {
        let portal = FakePortal {
            list_fails: true,
            ..Default::default()
        };
        let mut app = app_with(None, portal);
        app.apply_wave(wave(1));

        app.load_all_waves().await;

        assert_eq!(app.waves(), &[wave(1)]);
    }

    #[tokio::test]
    async fn empty_message_performs_no_write() {
        let mut app = app_with(None, FakePortal::default());

        assert!(matches!(
            app.submit_wave("").await,
            SubmitOutcome::EmptyMessage
        ));
        assert!(app.portal.submitted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn oversized_message_performs_no_write() {
        let mut app = app_with(None, FakePortal::default());
        let long = "x".repeat(MAX_MESSAGE_LEN + 1);

        assert!(matches!(
            app.submit_wave(&long).await,
            SubmitOutcome::MessageTooLong
        ));
        assert!(app.portal.submitted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn submit_passes_message_through() {
        let mut app = app_with(None, FakePortal::default());

        let outcome = app.submit_wave("gm").await;

        assert!(matches!(outcome, SubmitOutcome::Submitted(_)));
        assert_eq!(*app.portal.submitted.lock().unwrap(), vec!["gm"]);
    }

    #[tokio::test]
    async fn submit_failure_leaves_state_unchanged() {
        let portal = FakePortal {
            submit_fails: true,
            ..Default::default()
        };
        let mut app = app_with(None, portal);
        app.apply_wave(wave(1));

        assert!(matches!(app.submit_wave("gm").await, SubmitOutcome::Failed));
        assert_eq!(app.waves(), &[wave(1)]);
    }

    #[tokio::test]
    async fn feed_appends_one_record_per_event_in_order() {
        let mut app = app_with(None, FakePortal::default());
        let (tx, mut rx) = mpsc::unbounded_channel();

        tx.send(wave(1)).unwrap();
        tx.send(wave(2)).unwrap();
        tx.send(wave(3)).unwrap();
        drop(tx);

        let mut rendered = 0;
        app.consume_feed(&mut rx, |_| rendered += 1).await;

        assert_eq!(rendered, 3);
        assert_eq!(app.waves(), &[wave(1), wave(2), wave(3)]);
    }

    #[tokio::test]
    async fn closed_feed_stops_appends() {
        let mut app = app_with(None, FakePortal::default());
        let (tx, mut rx) = mpsc::unbounded_channel();

        tx.send(wave(1)).unwrap();
        drop(tx);

        app.consume_feed(&mut rx, |_| {}).await;
        let after_teardown = app.waves().len();

        // The feed is closed; a second consume returns immediately.
        app.consume_feed(&mut rx, |_| {}).await;

        assert_eq!(app.waves().len(), after_teardown);
    }
}
