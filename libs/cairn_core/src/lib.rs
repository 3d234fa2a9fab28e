//! A single-process, in-memory model of the data structures behind
//! blockchain timestamping: hash-linked blocks, full-chain validation, and
//! the demo analyses (avalanche behavior, pre-image search, signatures)
//! that motivate them. Merkle trees and inclusion proofs live in
//! `cairn_crypto`.

pub mod blockchain;
pub mod clock;
pub mod demos;
pub mod primitives;
