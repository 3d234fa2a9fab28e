//! The chain itself: an append-only sequence of hash-linked blocks.

use cairn_crypto::{
    hashing::HashFunction,
    serialization::WireSerialize,
    types::{GENESIS_PREVIOUS_HASH, StdByteArray},
};
use serde::{Deserialize, Serialize};

use crate::{clock::Clock, primitives::{block::Block, errors::ChainError}};

/// An ordered sequence of blocks, owned exclusively by this value.
///
/// The chain only grows, and only at the tail; appended blocks are never
/// mutated in place. There is no internal synchronization: each append
/// reads the current tail to link the new block, so concurrent appends to
/// the same chain must be serialized by the caller. Tamper experiments
/// operate on a `clone()` of the chain, never the live value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chain {
    blocks: Vec<Block>,
}

impl WireSerialize for Chain {}

impl Chain {
    pub fn new() -> Self {
        Chain { blocks: Vec::new() }
    }

    /// Appends a new block carrying `data` and returns a reference to it.
    ///
    /// The block id is the current length, and the previous hash is the
    /// tail's hash (or the genesis sentinel for the first block).
    pub fn append(
        &mut self,
        data: impl Into<String>,
        nonce: u64,
        clock: &impl Clock,
        hasher: &mut impl HashFunction,
    ) -> &Block {
        let previous_hash = self
            .blocks
            .last()
            .map(|block| block.current_hash)
            .unwrap_or(GENESIS_PREVIOUS_HASH);
        let block = Block::new(
            self.blocks.len() as u64,
            data,
            previous_hash,
            nonce,
            clock,
            hasher,
        );
        tracing::debug!(block_id = block.block_id, "appended block");
        self.blocks.push(block);
        self.blocks.last().expect("just pushed")
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Mutable access to the blocks. Intended for tamper simulation on a
    /// cloned chain; mutating a live chain invalidates it.
    pub fn blocks_mut(&mut self) -> &mut [Block] {
        &mut self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Hash of the first block. A derived view, not stored state.
    pub fn genesis_hash(&self) -> Result<StdByteArray, ChainError> {
        self.blocks
            .first()
            .map(|block| block.current_hash)
            .ok_or(ChainError::ChainEmpty)
    }

    /// Hash of the tail block. A derived view, not stored state.
    pub fn latest_hash(&self) -> Result<StdByteArray, ChainError> {
        self.blocks
            .last()
            .map(|block| block.current_hash)
            .ok_or(ChainError::ChainEmpty)
    }

    /// Mean gap between consecutive block timestamps, in milliseconds.
    /// Zero for chains with fewer than two blocks, or for tampered chains
    /// whose tail timestamp regressed below the genesis timestamp.
    pub fn average_block_time(&self) -> f64 {
        if self.blocks.len() < 2 {
            return 0.0;
        }
        let span = self
            .blocks
            .last()
            .unwrap()
            .timestamp
            .saturating_sub(self.blocks.first().unwrap().timestamp);
        span as f64 / (self.blocks.len() - 1) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SteppingClock;
    use cairn_crypto::hashing::DefaultHash;

    fn three_block_chain() -> Chain {
        let clock = SteppingClock::new(1_700_000_000_000, 1_000);
        let mut hasher = DefaultHash::new();
        let mut chain = Chain::new();
        chain.append("genesis: initial state", 0, &clock, &mut hasher);
        chain.append("block 1: alice pays bob", 1, &clock, &mut hasher);
        chain.append("block 2: bob pays carol", 2, &clock, &mut hasher);
        chain
    }

    #[test]
    fn test_genesis_block_uses_sentinel() {
        let chain = three_block_chain();
        assert_eq!(chain.blocks()[0].previous_hash, GENESIS_PREVIOUS_HASH);
        assert_eq!(chain.blocks()[0].block_id, 0);
    }

    #[test]
    fn test_blocks_link_to_predecessor() {
        let chain = three_block_chain();
        let blocks = chain.blocks();
        assert_eq!(blocks[1].previous_hash, blocks[0].current_hash);
        assert_eq!(blocks[2].previous_hash, blocks[1].current_hash);
    }

    #[test]
    fn test_derived_views() {
        let chain = three_block_chain();
        assert_eq!(chain.genesis_hash().unwrap(), chain.blocks()[0].current_hash);
        assert_eq!(chain.latest_hash().unwrap(), chain.blocks()[2].current_hash);

        let empty = Chain::new();
        assert_eq!(empty.genesis_hash().unwrap_err(), ChainError::ChainEmpty);
        assert_eq!(empty.latest_hash().unwrap_err(), ChainError::ChainEmpty);
    }

    #[test]
    fn test_average_block_time() {
        let chain = three_block_chain();
        // SteppingClock ticks 1000ms per reading
        assert_eq!(chain.average_block_time(), 1_000.0);
        assert_eq!(Chain::new().average_block_time(), 0.0);
    }

    #[test]
    fn test_average_block_time_total_under_regressed_tail() {
        let mut tampered = three_block_chain();
        // tail timestamp pushed below genesis, as a tamper clone would do
        tampered.blocks_mut()[2].timestamp = tampered.blocks()[0].timestamp - 10_000;
        assert_eq!(tampered.average_block_time(), 0.0);
    }

    #[test]
    fn test_timestamps_non_decreasing() {
        let chain = three_block_chain();
        let blocks = chain.blocks();
        assert!(blocks[1].timestamp >= blocks[0].timestamp);
        assert!(blocks[2].timestamp >= blocks[1].timestamp);
    }
}
