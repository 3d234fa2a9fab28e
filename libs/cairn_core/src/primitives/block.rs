//! The block primitive: one link in the hash-linked chain.

use cairn_crypto::{
    hashing::{HashFunction, Hashable},
    serialization::WireSerialize,
    types::StdByteArray,
};
use serde::{Deserialize, Serialize};

use crate::clock::Clock;

/// A single block. Its identity hash binds the payload and the previous
/// block's hash, so any change to either is detectable downstream.
///
/// `timestamp_readable` and `block_size` are derived display metadata and
/// are excluded from the hash; the hash covers exactly
/// `block_id ‖ timestamp ‖ data ‖ previous_hash ‖ nonce` with integers in
/// little-endian byte order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Block {
    /// 0-based position of this block in its chain.
    pub block_id: u64,
    /// Creation time in unix milliseconds.
    pub timestamp: u64,
    /// RFC 3339 rendering of `timestamp`, for humans.
    pub timestamp_readable: String,
    /// The payload carried by this block.
    pub data: String,
    /// Hash of the previous block, or the all-zero genesis sentinel.
    pub previous_hash: StdByteArray,
    /// Hash of this block's identity fields.
    pub current_hash: StdByteArray,
    /// Illustrative nonce; not a proof-of-work.
    pub nonce: u64,
    /// Payload size in bytes.
    pub block_size: u64,
}

impl Hashable for Block {
    fn hash(&self, hasher: &mut impl HashFunction) -> Result<StdByteArray, std::io::Error> {
        hasher.update(self.block_id.to_le_bytes());
        hasher.update(self.timestamp.to_le_bytes());
        hasher.update(self.data.as_bytes());
        hasher.update(self.previous_hash);
        hasher.update(self.nonce.to_le_bytes());
        hasher.digest()
    }
}

impl WireSerialize for Block {}

impl Block {
    /// Creates a block, stamping it with the injected clock and computing
    /// its identity hash.
    pub fn new(
        block_id: u64,
        data: impl Into<String>,
        previous_hash: StdByteArray,
        nonce: u64,
        clock: &impl Clock,
        hasher: &mut impl HashFunction,
    ) -> Self {
        let data = data.into();
        let timestamp = clock.now_millis();
        let mut block = Block {
            block_id,
            timestamp,
            timestamp_readable: readable_timestamp(timestamp),
            block_size: data.len() as u64,
            data,
            previous_hash,
            current_hash: [0; 32],
            nonce,
        };
        block.current_hash = block.hash(hasher).expect("hashing failed");
        block
    }

    /// Recomputes the identity hash from the stored fields. Used by
    /// validation to detect tampering; does not modify the block.
    pub fn compute_hash(&self, hasher: &mut impl HashFunction) -> StdByteArray {
        self.hash(hasher).expect("hashing failed")
    }
}

fn readable_timestamp(millis: u64) -> String {
    chrono::DateTime::from_timestamp_millis(millis as i64)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_default()
}
