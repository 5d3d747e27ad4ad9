// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # NewWave event watcher
//!
//! Long-lived poller that follows `NewWave` events from the portal contract
//! and delivers them, in arrival order, over a channel to the UI layer.
//!
//! ## Strategy
//!
//! Registration starts at the chain head: only waves emitted after the
//! watcher came up are delivered, the way a live page subscription behaves.
//! Each sweep queries `eth_getLogs` with the `NewWave` event signature from
//! the last seen block to the current head. Undecodable logs are logged and
//! skipped.
//!
//! ## Teardown
//!
//! Uses `tokio_util::sync::CancellationToken`: cancelling stops the poll loop
//! and drops the sender, which closes the feed on the consumer side. Dropping
//! the receiver likewise stops delivery on the next sweep.

use std::time::Duration;

use alloy::{
    primitives::Address,
    providers::Provider,
    rpc::types::Filter,
    sol_types::SolEvent,
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::client::PortalError;
use super::contract::{decode_new_wave, WavePortal};
use super::types::Wave;

/// Default interval between log sweeps.
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Event watcher that runs as a background tokio task.
pub struct WaveWatcher<P> {
    provider: P,
    contract_address: Address,
    poll_interval: Duration,
}

impl<P: Provider + Clone> WaveWatcher<P> {
    /// Create a new watcher for the given portal address.
    pub fn new(provider: P, contract_address: Address) -> Self {
        Self {
            provider,
            contract_address,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Run the watch loop until the cancellation token is triggered or the
    /// receiving side of `sink` goes away.
    ///
    /// Should be spawned as a background task:
    /// ```rust,ignore
    /// tokio::spawn(watcher.run(sink, shutdown.clone()));
    /// ```
    pub async fn run(self, sink: mpsc::UnboundedSender<Wave>, shutdown: CancellationToken) {
        tracing::info!(contract = %self.contract_address, "Wave watcher starting");

        // Resolved to head + 1 on the first successful sweep.
        let mut next_block: Option<u64> = None;

        loop {
            if shutdown.is_cancelled() {
                tracing::info!("Wave watcher shutting down");
                return;
            }

            if let Err(e) = self.watch_step(&sink, &mut next_block).await {
                tracing::warn!(error = %e, "Watcher sweep failed, will retry");
            }

            if sink.is_closed() {
                tracing::info!("Wave feed consumer gone, watcher stopping");
                return;
            }

            tokio::select! {
                _ = tokio::time::sleep(self.poll_interval) => {},
                _ = shutdown.cancelled() => {
                    tracing::info!("Wave watcher shutting down");
                    return;
                }
            }
        }
    }

    /// Execute one sweep: fetch `NewWave` logs from the last seen block to
    /// the current head and forward them in order.
    async fn watch_step(
        &self,
        sink: &mpsc::UnboundedSender<Wave>,
        next_block: &mut Option<u64>,
    ) -> Result<(), PortalError> {
        let head = self
            .provider
            .get_block_number()
            .await
            .map_err(|e| PortalError::Rpc(e.to_string()))?;

        let from = match *next_block {
            // First sweep establishes the starting point; history is not replayed.
            None => {
                *next_block = Some(head + 1);
                return Ok(());
            }
            Some(block) => block,
        };

        if from > head {
            return Ok(());
        }

        let filter = Filter::new()
            .address(self.contract_address)
            .event_signature(WavePortal::NewWave::SIGNATURE_HASH)
            .from_block(from)
            .to_block(head);

        let logs = self
            .provider
            .get_logs(&filter)
            .await
            .map_err(|e| PortalError::Rpc(e.to_string()))?;

        for log in &logs {
            match decode_new_wave(log.data()) {
                Ok(wave) => {
                    tracing::debug!(sender = %wave.sender, "NewWave received");
                    if sink.send(wave).is_err() {
                        // Receiver dropped: the subscription was released.
                        return Ok(());
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Undecodable NewWave log, skipping");
                }
            }
        }

        *next_block = Some(head + 1);
        Ok(())
    }
}
