// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet provider capability.
//!
//! The session layer talks to an abstract [`WalletProvider`] rather than a
//! concrete wallet, so the application can be exercised against fakes. The
//! shipped implementation is [`LocalKeyProvider`], backed by a locally
//! provisioned private key.

use std::path::Path;

use alloy::{network::EthereumWallet, primitives::Address, signers::local::PrivateKeySigner};

use super::{keystore, WalletError};

/// Account access brokered by a wallet.
///
/// Mirrors the two provider calls the session manager consumes: enumerate
/// already-authorized accounts, and explicitly request authorization. The
/// signing wallet is exposed for transaction submission.
#[allow(async_fn_in_trait)]
pub trait WalletProvider {
    /// Accounts that are already authorized, without user interaction.
    async fn accounts(&self) -> Result<Vec<Address>, WalletError>;

    /// Explicitly request authorization and return the granted accounts.
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError>;

    /// The signing wallet for transaction submission.
    fn ethereum_wallet(&self) -> Result<EthereumWallet, WalletError>;
}

/// Where the local key was provisioned from, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    /// `WAVE_PRIVATE_KEY` environment variable
    Environment,
    /// Key file on disk
    Keystore,
}

/// Wallet provider backed by a locally provisioned private key.
///
/// A provisioned key counts as standing authorization, so `accounts()`
/// reports its address without further interaction.
pub struct LocalKeyProvider {
    signer: PrivateKeySigner,
    source: KeySource,
}

impl LocalKeyProvider {
    /// Detect a locally provisioned key: a raw environment key first, then
    /// the configured keystore path.
    ///
    /// Returns `Ok(None)` when neither is configured - the "no wallet
    /// present" condition. Malformed key material is an error; the caller
    /// logs it and degrades to no wallet.
    pub fn detect(
        env_key: Option<&str>,
        keystore_path: Option<&Path>,
    ) -> Result<Option<Self>, WalletError> {
        if let Some(raw) = env_key {
            let signer = keystore::signer_from_hex(raw)?;
            return Ok(Some(Self {
                signer,
                source: KeySource::Environment,
            }));
        }

        if let Some(path) = keystore_path {
            let signer = keystore::load_signer(path)?;
            return Ok(Some(Self {
                signer,
                source: KeySource::Keystore,
            }));
        }

        Ok(None)
    }

    /// Address of the provisioned key.
    pub fn address(&self) -> Address {
        self.signer.address()
    }
}

impl WalletProvider for LocalKeyProvider {
    async fn accounts(&self) -> Result<Vec<Address>, WalletError> {
        Ok(vec![self.signer.address()])
    }

    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        tracing::info!(
            account = %self.signer.address(),
            source = ?self.source,
            "Wallet authorized"
        );
        Ok(vec![self.signer.address()])
    }

    fn ethereum_wallet(&self) -> Result<EthereumWallet, WalletError> {
        Ok(EthereumWallet::from(self.signer.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TEST_HEX: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const TEST_HEX_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

    #[tokio::test]
    async fn detect_from_keystore_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{}", TEST_HEX).unwrap();

        let provider = LocalKeyProvider::detect(None, Some(file.path()))
            .expect("detection succeeds")
            .expect("key found");

        assert_eq!(provider.address().to_string(), TEST_HEX_ADDRESS);
        assert_eq!(provider.source, KeySource::Keystore);

        let accounts = provider.accounts().await.unwrap();
        assert_eq!(accounts, vec![provider.address()]);

        let requested = provider.request_accounts().await.unwrap();
        assert_eq!(requested, accounts);

        assert!(provider.ethereum_wallet().is_ok());
    }

    #[test]
    fn detect_with_malformed_keystore_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not a key").unwrap();

        assert!(LocalKeyProvider::detect(None, Some(file.path())).is_err());
    }

    #[test]
    fn detect_prefers_environment_key() {
        let provider = LocalKeyProvider::detect(Some(TEST_HEX), None)
            .expect("detection succeeds")
            .expect("key found");

        assert_eq!(provider.source, KeySource::Environment);
        assert_eq!(provider.address().to_string(), TEST_HEX_ADDRESS);
    }

    #[test]
    fn detect_without_key_material_finds_no_wallet() {
        let provider = LocalKeyProvider::detect(None, None).expect("detection succeeds");
        assert!(provider.is_none());
    }
}
