// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! WavePortal Client - command-line client for the WavePortal contract
//!
//! This crate lets a user with a locally provisioned signing key connect a
//! wallet, submit "waves" (short messages) to the deployed WavePortal
//! contract, read the full wave history, and follow newly emitted waves live.
//!
//! ## Modules
//!
//! - `app` - UI state and user-triggered actions
//! - `cli` - Command-line surface (clap)
//! - `portal` - WavePortal contract binding, client, and event watcher
//! - `session` - Wallet session management and key loading

pub mod app;
pub mod cli;
pub mod config;
pub mod portal;
pub mod session;
