// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration Constants
//!
//! This module defines environment variable names used throughout the
//! application. Configuration is read from flags first, with environment
//! fallbacks, at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `WAVE_RPC_URL` | JSON-RPC endpoint override | chain preset RPC |
//! | `WAVE_CONTRACT_ADDRESS` | WavePortal contract address override | canonical deployment |
//! | `WAVE_KEYSTORE` | Path to a PEM or hex private key file | unset |
//! | `WAVE_PRIVATE_KEY` | Raw hex private key (takes precedence over the keystore) | unset |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info` |

use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable name for the raw hex private key.
///
/// When set, it takes precedence over any key file configured through
/// `WAVE_KEYSTORE`. Keys are never accepted on the command line.
pub const PRIVATE_KEY_ENV: &str = "WAVE_PRIVATE_KEY";

/// Environment variable name selecting the log output format.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Initialize the global tracing subscriber.
///
/// Respects `RUST_LOG` for filtering (default `info`) and `LOG_FORMAT` for
/// the output format. Logs go to stderr so stdout stays parseable.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let use_json = std::env::var(LOG_FORMAT_ENV)
        .map(|value| value.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if use_json {
        let _ = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .json()
            .with_writer(std::io::stderr)
            .try_init();
    } else {
        let _ = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .try_init();
    }
}
