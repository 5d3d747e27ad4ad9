// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet session management.
//!
//! A session holds at most one authorized account for the life of the
//! process. It is restored from already-authorized accounts on startup, or
//! established through an explicit connect. Provider failures are caught and
//! logged; the session is simply left empty.

pub mod keystore;
pub mod provider;

use alloy::primitives::Address;

pub use provider::{KeySource, LocalKeyProvider, WalletProvider};

/// Errors that can occur during wallet operations.
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("Keystore error: {0}")]
    Keystore(String),

    #[error("Provider error: {0}")]
    Provider(String),
}

/// The wallet session: empty until a wallet authorizes, never cleared.
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// The single authorized account, once set.
    pub account: Option<Address>,
}

/// Result of an explicit connect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectOutcome {
    /// A wallet authorized this account.
    Connected(Address),
    /// No wallet is present; the UI surfaces a provisioning prompt.
    NoWallet,
    /// The wallet refused or errored; logged, session unchanged.
    Failed,
}

/// Session manager over an optional wallet provider.
pub struct SessionManager<W> {
    provider: Option<W>,
    session: Session,
}

impl<W: WalletProvider> SessionManager<W> {
    /// Create a manager; `None` models the no-wallet-present condition.
    pub fn new(provider: Option<W>) -> Self {
        Self {
            provider,
            session: Session::default(),
        }
    }

    /// The authorized account, if any.
    pub fn account(&self) -> Option<Address> {
        self.session.account
    }

    /// The wallet provider, if one is present.
    pub fn provider(&self) -> Option<&W> {
        self.provider.as_ref()
    }

    /// Restore an existing session: query already-authorized accounts and
    /// adopt the first one. Leaves the session empty when no provider is
    /// present, none is authorized, or the query fails.
    pub async fn check_existing(&mut self) -> Option<Address> {
        let Some(provider) = &self.provider else {
            tracing::debug!("No wallet provider configured");
            return None;
        };

        match provider.accounts().await {
            Ok(accounts) => match accounts.first() {
                Some(account) => {
                    tracing::info!(account = %account, "Found an authorized account");
                    self.session.account = Some(*account);
                }
                None => tracing::debug!("No authorized account found"),
            },
            Err(e) => tracing::warn!(error = %e, "Account enumeration failed"),
        }

        self.session.account
    }

    /// Explicitly request authorization and adopt the first granted account.
    /// Never panics and never propagates provider errors.
    pub async fn connect(&mut self) -> ConnectOutcome {
        let Some(provider) = &self.provider else {
            tracing::warn!("No wallet provider configured");
            return ConnectOutcome::NoWallet;
        };

        match provider.request_accounts().await {
            Ok(accounts) => match accounts.first() {
                Some(account) => {
                    tracing::info!(account = %account, "Wallet connected");
                    self.session.account = Some(*account);
                    ConnectOutcome::Connected(*account)
                }
                None => {
                    tracing::warn!("Authorization request granted no accounts");
                    ConnectOutcome::Failed
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "Wallet authorization failed");
                ConnectOutcome::Failed
            }
        }
    }
}
