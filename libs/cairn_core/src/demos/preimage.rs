//! Brute-force pre-image search against SHA3-256 digests.
//!
//! This exists to make the one-wayness of the hash function tangible: even a
//! generous attempt budget finds nothing for a full 256-bit target. The search
//! only "succeeds" in tests that target a digest of a known short input drawn
//! from the same candidate space.

use std::time::Instant;

use cairn_crypto::hashing::{DefaultHash, HashFunction};
use cairn_crypto::types::StdByteArray;
use rand::distr::Alphanumeric;
use rand::Rng;
use tracing::instrument;

use super::to_hex;

/// How candidate pre-images are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStrategy {
    /// Random alphanumeric strings of varying length.
    Random,
    /// Decimal enumeration: "0", "1", "2", ...
    Sequential,
}

/// A bounded brute-force search for a pre-image of a target digest.
#[derive(Debug, Clone)]
pub struct PreimageSearch {
    /// Maximum number of candidates to hash before giving up.
    pub max_attempts: u64,
    pub strategy: SearchStrategy,
}

/// Outcome of a [`PreimageSearch::search`] run.
#[derive(Debug, Clone)]
pub struct PreimageReport {
    /// Hex encoding of the digest being attacked.
    pub target_hash: String,
    /// The candidate that produced the target digest, if any.
    pub matching_input: Option<String>,
    /// Candidates hashed before finding a match or exhausting the budget.
    pub attempts: u64,
    pub elapsed_ms: u128,
}

impl PreimageReport {
    pub fn found(&self) -> bool {
        self.matching_input.is_some()
    }
}

impl PreimageSearch {
    pub fn new(max_attempts: u64, strategy: SearchStrategy) -> Self {
        PreimageSearch {
            max_attempts,
            strategy,
        }
    }

    /// Hashes candidates until one matches `target` or the budget runs out.
    #[instrument(skip(self, target), fields(max_attempts = self.max_attempts))]
    pub fn search(&self, target: &StdByteArray) -> PreimageReport {
        let started = Instant::now();
        let mut hasher = DefaultHash::new();
        let mut rng = rand::rng();
        let mut attempts: u64 = 0;
        let mut matching_input = None;

        while attempts < self.max_attempts {
            let candidate = match self.strategy {
                SearchStrategy::Random => {
                    // vary the length a little so the space is not a single stratum
                    let len = 4 + (attempts % 3) as usize;
                    (&mut rng)
                        .sample_iter(Alphanumeric)
                        .take(len)
                        .map(char::from)
                        .collect::<String>()
                }
                SearchStrategy::Sequential => attempts.to_string(),
            };
            attempts += 1;
            hasher.update(candidate.as_bytes());
            if let Ok(digest) = hasher.digest() {
                if digest == *target {
                    matching_input = Some(candidate);
                    break;
                }
            }
        }

        let report = PreimageReport {
            target_hash: to_hex(target),
            matching_input,
            attempts,
            elapsed_ms: started.elapsed().as_millis(),
        };
        tracing::info!(
            attempts = report.attempts,
            found = report.found(),
            "preimage search finished"
        );
        report
    }
}
