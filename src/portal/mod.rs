// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! WavePortal contract integration.
//!
//! This module provides functionality for:
//! - Reading the wave history and the running total counter
//! - Submitting waves with a fixed gas ceiling
//! - Following the `NewWave` event feed

pub mod client;
pub mod contract;
pub mod types;
pub mod watcher;

pub use client::{PortalClient, PortalContract, PortalError};
pub use types::*;
pub use watcher::WaveWatcher;
