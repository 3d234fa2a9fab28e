//! Full-chain integrity validation.
//!
//! Recomputes every block hash, re-checks every link, and verifies
//! timestamp and sequence ordering. All findings are collected into one
//! report; the pass never stops early and never mutates the chain, so a
//! caller always gets the complete diagnostic picture.

use std::fmt::Display;

use cairn_crypto::{hashing::HashFunction, types::StdByteArray};
use tracing::instrument;

use super::chain::Chain;

/// One concrete integrity violation found at a specific block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    /// The stored hash does not match the hash recomputed from the fields.
    HashMismatch {
        block_id: u64,
        expected: StdByteArray,
        found: StdByteArray,
    },
    /// The block's previous-hash does not match its predecessor's hash.
    ChainLinkMismatch {
        block_id: u64,
        expected: StdByteArray,
        found: StdByteArray,
    },
    /// The block's timestamp precedes its predecessor's.
    TimestampOrderViolation {
        block_id: u64,
        timestamp: u64,
        previous: u64,
    },
    /// The block's id does not match its position in the chain.
    SequenceViolation { block_id: u64, expected_index: usize },
}

impl Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationIssue::HashMismatch { block_id, expected, found } => {
                write!(f, "Block {block_id}: hash mismatch: expected {expected:?}, found {found:?}")
            }
            ValidationIssue::ChainLinkMismatch { block_id, expected, found } => {
                write!(f, "Block {block_id}: previous hash mismatch: expected {expected:?}, found {found:?}")
            }
            ValidationIssue::TimestampOrderViolation { block_id, timestamp, previous } => {
                write!(f, "Block {block_id}: timestamp {timestamp} is before previous block timestamp {previous}")
            }
            ValidationIssue::SequenceViolation { block_id, expected_index } => {
                write!(f, "Block {block_id}: block id should be {expected_index}")
            }
        }
    }
}

/// Per-category rollup of the checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationDetails {
    pub hash_consistency: bool,
    pub chain_consistency: bool,
    pub timestamp_consistency: bool,
}

impl Default for ValidationDetails {
    fn default() -> Self {
        ValidationDetails {
            hash_consistency: true,
            chain_consistency: true,
            timestamp_consistency: true,
        }
    }
}

/// The complete result of one validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub blocks_validated: usize,
    /// Every issue found, in block order.
    pub errors: Vec<ValidationIssue>,
    pub details: ValidationDetails,
}

impl ValidationReport {
    /// The issues rendered as ordered diagnostic strings.
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(|issue| issue.to_string()).collect()
    }
}

/// Validates the whole chain, collecting every violation.
///
/// For each block: the identity hash is recomputed from the stored fields;
/// for each non-genesis block the previous-hash link and the non-decreasing
/// timestamp rule are checked; every block's id must equal its index.
#[instrument(skip_all, fields(blocks = chain.len()))]
pub fn validate(chain: &Chain, hasher: &mut impl HashFunction) -> ValidationReport {
    let mut errors = Vec::new();
    let mut details = ValidationDetails::default();

    let blocks = chain.blocks();
    for (index, block) in blocks.iter().enumerate() {
        let recomputed = block.compute_hash(hasher);
        if recomputed != block.current_hash {
            tracing::info!(block_id = block.block_id, "hash mismatch");
            details.hash_consistency = false;
            errors.push(ValidationIssue::HashMismatch {
                block_id: block.block_id,
                expected: recomputed,
                found: block.current_hash,
            });
        }

        if index > 0 {
            let previous = &blocks[index - 1];
            if block.previous_hash != previous.current_hash {
                tracing::info!(block_id = block.block_id, "chain link mismatch");
                details.chain_consistency = false;
                errors.push(ValidationIssue::ChainLinkMismatch {
                    block_id: block.block_id,
                    expected: previous.current_hash,
                    found: block.previous_hash,
                });
            }

            if block.timestamp < previous.timestamp {
                tracing::info!(block_id = block.block_id, "timestamp order violation");
                details.timestamp_consistency = false;
                errors.push(ValidationIssue::TimestampOrderViolation {
                    block_id: block.block_id,
                    timestamp: block.timestamp,
                    previous: previous.timestamp,
                });
            }
        }

        if block.block_id != index as u64 {
            tracing::info!(block_id = block.block_id, index, "sequence violation");
            errors.push(ValidationIssue::SequenceViolation {
                block_id: block.block_id,
                expected_index: index,
            });
        }
    }

    ValidationReport {
        is_valid: errors.is_empty(),
        blocks_validated: blocks.len(),
        errors,
        details,
    }
}
