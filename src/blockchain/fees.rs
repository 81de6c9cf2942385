// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Priority fee estimation from recent slots.

use tracing::debug;

use super::client::{ChainRpc, SolanaClientError};

/// Summary of recent prioritization fees, in micro-lamports per compute unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriorityFees {
    pub min: u64,
    pub median: u64,
    pub max: u64,
}

impl PriorityFees {
    /// Summarise raw samples. An empty sample set yields all zeros.
    pub fn from_samples(mut samples: Vec<u64>) -> Self {
        if samples.is_empty() {
            return Self::default();
        }
        samples.sort_unstable();

        let len = samples.len();
        let median = if len % 2 == 1 {
            samples[len / 2]
        } else {
            let (lo, hi) = (samples[len / 2 - 1], samples[len / 2]);
            lo / 2 + hi / 2 + (lo % 2 + hi % 2) / 2
        };

        Self {
            min: samples[0],
            median,
            max: samples[len - 1],
        }
    }
}

/// Fetch and summarise the node's recent prioritization fees.
pub async fn get_priority_fees(rpc: &dyn ChainRpc) -> Result<PriorityFees, SolanaClientError> {
    let samples = rpc.recent_prioritization_fees().await?;
    let sample_count = samples.len();
    let fees = PriorityFees::from_samples(samples);

    debug!(
        samples = sample_count,
        min = fees.min,
        median = fees.median,
        max = fees.max,
        "Estimated priority fees"
    );

    Ok(fees)
}
