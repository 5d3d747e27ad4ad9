// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! WavePortal client for contract reads and wave submission.

use std::str::FromStr;

use alloy::{
    network::{Ethereum, EthereumWallet},
    primitives::Address,
    providers::{
        fillers::{
            BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller,
            WalletFiller,
        },
        Identity, Provider, ProviderBuilder, RootProvider,
    },
};

use super::contract::WavePortal;
use super::types::{explorer_tx_url, NetworkConfig, Wave, WaveReceipt, WAVE_GAS_LIMIT};

/// HTTP provider type with signing support (all fillers + wallet).
pub type SignerHttpProvider = FillProvider<
    JoinFill<
        JoinFill<
            Identity,
            JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
        >,
        WalletFiller<EthereumWallet>,
    >,
    RootProvider<Ethereum>,
>;

/// Connect a signing HTTP provider for the given endpoint.
pub fn connect_signer_provider(
    rpc_url: &str,
    wallet: EthereumWallet,
) -> Result<SignerHttpProvider, PortalError> {
    let url: url::Url = rpc_url
        .parse()
        .map_err(|e: url::ParseError| PortalError::InvalidRpcUrl(e.to_string()))?;

    Ok(ProviderBuilder::new().wallet(wallet).connect_http(url))
}

/// The three contract operations consumed by the UI layer.
///
/// Kept narrow so the application can be exercised against a fake in tests.
#[allow(async_fn_in_trait)]
pub trait PortalContract {
    /// Read the running total wave counter.
    async fn total_waves(&self) -> Result<u64, PortalError>;

    /// Read the full wave history in one call, mapped to display shape.
    async fn all_waves(&self) -> Result<Vec<Wave>, PortalError>;

    /// Submit one wave and await its inclusion.
    async fn submit_wave(&self, message: &str) -> Result<WaveReceipt, PortalError>;
}

/// WavePortal contract wrapper.
pub struct PortalClient<P> {
    contract: WavePortal::WavePortalInstance<P>,
    network: NetworkConfig,
}

impl<P: Provider + Clone> PortalClient<P> {
    /// Create a new client against a deployed portal.
    pub fn new(
        provider: &P,
        network: NetworkConfig,
        contract_address: &str,
    ) -> Result<Self, PortalError> {
        let address = Address::from_str(contract_address)
            .map_err(|e| PortalError::InvalidAddress(e.to_string()))?;

        let contract = WavePortal::new(address, provider.clone());

        Ok(Self { contract, network })
    }

    /// The portal's contract address.
    pub fn address(&self) -> Address {
        *self.contract.address()
    }
}

impl<P: Provider + Clone> PortalContract for PortalClient<P> {
    async fn total_waves(&self) -> Result<u64, PortalError> {
        let total = self
            .contract
            .getTotalWaves()
            .call()
            .await
            .map_err(|e| PortalError::Contract(e.to_string()))?;

        Ok(u64::try_from(total).unwrap_or(u64::MAX))
    }

    async fn all_waves(&self) -> Result<Vec<Wave>, PortalError> {
        let records = self
            .contract
            .getAllWaves()
            .call()
            .await
            .map_err(|e| PortalError::Contract(e.to_string()))?;

        Ok(records.into_iter().map(Wave::from).collect())
    }

    async fn submit_wave(&self, message: &str) -> Result<WaveReceipt, PortalError> {
        let pending = self
            .contract
            .wave(message.to_string())
            .gas(WAVE_GAS_LIMIT)
            .send()
            .await
            .map_err(|e| PortalError::TransactionFailed(format!("Failed to send: {}", e)))?;

        let tx_hash = format!("{:?}", pending.tx_hash());
        tracing::info!(tx_hash = %tx_hash, "Wave submitted, awaiting inclusion");

        let receipt = pending
            .get_receipt()
            .await
            .map_err(|e| PortalError::TransactionFailed(format!("Failed to confirm: {}", e)))?;

        Ok(WaveReceipt {
            tx_hash: tx_hash.clone(),
            block_number: receipt.block_number.unwrap_or(0),
            gas_used: receipt.gas_used as u64,
            success: receipt.status(),
            explorer_url: explorer_tx_url(&self.network, &tx_hash),
        })
    }
}

/// Errors that can occur during portal operations.
#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    #[error("Invalid RPC URL: {0}")]
    InvalidRpcUrl(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("Contract error: {0}")]
    Contract(String),

    #[error("Transaction failed: {0}")]
    TransactionFailed(String),
}
