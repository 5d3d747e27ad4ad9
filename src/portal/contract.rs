// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Generated WavePortal contract binding and raw-record mapping.

use alloy::{
    primitives::{LogData, U256},
    sol,
    sol_types::SolEvent,
};
use chrono::{DateTime, Utc};

use super::types;

// WavePortal interface as deployed. `getAllWaves` returns the full history;
// `wave` records one wave with its message; `NewWave` mirrors each append.
sol! {
    #[sol(rpc)]
    contract WavePortal {
        struct Wave {
            address waver;
            string message;
            uint256 timestamp;
            uint256 waveHeight;
        }

        event NewWave(address indexed from, uint256 timestamp, string message, uint256 waveHeight);

        function getTotalWaves() external view returns (uint256);
        function getAllWaves() external view returns (Wave[] memory);
        function wave(string memory _message) external;
    }
}

impl From<WavePortal::Wave> for types::Wave {
    fn from(raw: WavePortal::Wave) -> Self {
        Self {
            sender: raw.waver.to_string(),
            timestamp: timestamp_from_secs(raw.timestamp),
            message: raw.message,
            wave_height: u64::try_from(raw.waveHeight).unwrap_or(u64::MAX),
        }
    }
}

impl From<WavePortal::NewWave> for types::Wave {
    fn from(event: WavePortal::NewWave) -> Self {
        Self {
            sender: event.from.to_string(),
            timestamp: timestamp_from_secs(event.timestamp),
            message: event.message,
            wave_height: u64::try_from(event.waveHeight).unwrap_or(u64::MAX),
        }
    }
}

/// Decode a `NewWave` log payload into the display shape.
pub fn decode_new_wave(data: &LogData) -> Result<types::Wave, alloy::sol_types::Error> {
    WavePortal::NewWave::decode_log_data(data).map(types::Wave::from)
}

/// Contract timestamps are seconds since epoch; out-of-range values clamp to
/// the epoch rather than failing the whole history read.
fn timestamp_from_secs(secs: U256) -> DateTime<Utc> {
    let secs = i64::try_from(secs).unwrap_or(0);
    DateTime::from_timestamp(secs, 0).unwrap_or(DateTime::UNIX_EPOCH)
}
