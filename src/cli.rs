// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Command-line surface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::portal::{NetworkConfig, ETH_MAINNET, ETH_SEPOLIA};

#[derive(Debug, Parser)]
#[command(
    name = "waveportal",
    version,
    about = "Wave at the WavePortal contract from the comfort of your command line."
)]
pub struct Opts {
    #[command(flatten)]
    pub eth: EthOpts,

    #[command(subcommand)]
    pub cmd: Subcommands,
}

/// Connection options shared by every subcommand.
#[derive(Debug, Args)]
pub struct EthOpts {
    /// JSON-RPC endpoint; defaults to the chain preset.
    #[arg(long, env = "WAVE_RPC_URL", global = true)]
    pub rpc_url: Option<String>,

    /// WavePortal contract address; defaults to the canonical deployment.
    #[arg(long, env = "WAVE_CONTRACT_ADDRESS", global = true)]
    pub contract: Option<String>,

    /// Path to a PEM or hex private key file.
    #[arg(long, env = "WAVE_KEYSTORE", global = true)]
    pub keystore: Option<PathBuf>,

    /// Target chain.
    #[arg(long, value_enum, default_value = "sepolia", global = true)]
    pub chain: Chain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Chain {
    Sepolia,
    Mainnet,
}

impl Chain {
    /// The network preset for this chain.
    pub fn network(self) -> NetworkConfig {
        match self {
            Chain::Sepolia => ETH_SEPOLIA,
            Chain::Mainnet => ETH_MAINNET,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Subcommands {
    #[command(about = "Connect the wallet and print the authorized account")]
    Connect,
    #[command(about = "List all recorded waves")]
    Waves {
        #[arg(long, short = 'j', help = "Emit the wave list as JSON")]
        json: bool,
    },
    #[command(about = "Submit a wave carrying a message")]
    Wave {
        #[arg(help = "Message to send along with the wave (50 characters max)")]
        message: String,
    },
    #[command(about = "Print the running total wave counter")]
    Count,
    #[command(about = "Stream newly recorded waves until Ctrl-C")]
    Watch,
}
