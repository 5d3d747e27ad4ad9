// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Portal types and constants.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ethereum network configuration.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Network name for display
    pub name: &'static str,
    /// Chain ID
    pub chain_id: u64,
    /// RPC endpoint URL
    pub rpc_url: &'static str,
    /// Block explorer URL
    pub explorer_url: &'static str,
}

/// Ethereum mainnet configuration.
pub const ETH_MAINNET: NetworkConfig = NetworkConfig {
    name: "Ethereum",
    chain_id: 1,
    rpc_url: "https://ethereum-rpc.publicnode.com",
    explorer_url: "https://etherscan.io",
};

/// Sepolia testnet configuration.
pub const ETH_SEPOLIA: NetworkConfig = NetworkConfig {
    name: "Sepolia Testnet",
    chain_id: 11155111,
    rpc_url: "https://ethereum-sepolia-rpc.publicnode.com",
    explorer_url: "https://sepolia.etherscan.io",
};

/// Gas ceiling applied to every `wave` transaction.
pub const WAVE_GAS_LIMIT: u64 = 300_000;

/// Maximum accepted wave message length, enforced before any write.
pub const MAX_MESSAGE_LEN: usize = 50;

/// A known WavePortal deployment.
#[derive(Debug, Clone)]
pub struct PortalDeployment {
    pub name: &'static str,
    /// Deployed contract address, when one is known for this interface.
    pub address: Option<&'static str>,
}

/// Canonical portal: accepts a message per wave and emits `NewWave`.
pub const PORTAL: PortalDeployment = PortalDeployment {
    name: "wave-portal",
    address: Some("0x656A6b40B0425C5F19a115819b769F40bDD6Dd8b"),
};

/// First-generation portal: messageless waves, no event feed. Retired; the
/// address is not carried here and this client does not speak its ABI.
#[allow(dead_code)]
pub const LEGACY_PORTAL: PortalDeployment = PortalDeployment {
    name: "wave-portal-legacy",
    address: None,
};

/// One recorded wave, in display shape.
///
/// Sourced entirely from the contract (history reads or the `NewWave` feed);
/// held only in transient memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wave {
    /// Sender address, checksummed `0x...` form
    pub sender: String,
    /// Block timestamp of the wave
    pub timestamp: DateTime<Utc>,
    /// Message carried by the wave
    pub message: String,
    /// Height attribute assigned by the contract, in feet
    pub wave_height: u64,
}

impl Wave {
    /// Shortened sender for display (`0x656A6b...`).
    pub fn short_sender(&self) -> String {
        let end = self.sender.len().min(8);
        format!("{}...", &self.sender[..end])
    }
}

impl std::fmt::Display for Wave {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{}  {}",
            self.short_sender(),
            self.timestamp.format("%m/%d/%Y")
        )?;
        writeln!(f, "  {}", self.message)?;
        write!(f, "  They surfed a {}ft wave!", self.wave_height)
    }
}

/// Confirmation handle for a submitted wave. Displayed once, then discarded.
#[derive(Debug, Clone)]
pub struct WaveReceipt {
    /// Transaction hash
    pub tx_hash: String,
    /// Block number where the transaction was included
    pub block_number: u64,
    /// Gas actually used
    pub gas_used: u64,
    /// Whether the transaction succeeded
    pub success: bool,
    /// Explorer URL for the transaction
    pub explorer_url: String,
}

/// Build the explorer URL for a transaction hash.
pub fn explorer_tx_url(network: &NetworkConfig, tx_hash: &str) -> String {
    format!("{}/tx/{}", network.explorer_url, tx_hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::Address;

    fn sample_wave() -> Wave {
        Wave {
            sender: "0x656A6b40B0425C5F19a115819b769F40bDD6Dd8b".to_string(),
            timestamp: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            message: "gm from the beach".to_string(),
            wave_height: 3,
        }
    }

    #[test]
    fn portal_address_parses() {
        let addr = PORTAL.address.expect("canonical portal has an address");
        assert!(addr.parse::<Address>().is_ok());
    }

    #[test]
    fn legacy_portal_has_no_address() {
        assert!(LEGACY_PORTAL.address.is_none());
    }

    #[test]
    fn short_sender_truncates() {
        assert_eq!(sample_wave().short_sender(), "0x656A6b...");
    }

    #[test]
    fn short_sender_handles_short_input() {
        let mut wave = sample_wave();
        wave.sender = "0x1".to_string();
        assert_eq!(wave.short_sender(), "0x1...");
    }

    #[test]
    fn display_includes_message_and_height() {
        let rendered = sample_wave().to_string();
        assert!(rendered.contains("0x656A6b..."));
        assert!(rendered.contains("gm from the beach"));
        assert!(rendered.contains("They surfed a 3ft wave!"));
    }

    #[test]
    fn explorer_url_joins_hash() {
        let url = explorer_tx_url(&ETH_SEPOLIA, "0xabc");
        assert_eq!(url, "https://sepolia.etherscan.io/tx/0xabc");
    }
}
