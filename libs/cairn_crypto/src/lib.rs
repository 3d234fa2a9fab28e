//! Cryptographic primitives for the cairn chain demonstrations.
//!
//! This crate provides small, focused building blocks:
//! - Hashing traits and a SHA3-256 default hasher
//! - Merkle tree construction over an ordered item list
//! - Generation and pure verification of proofs of inclusion
//! - Signing/verification (ed25519) abstractions and defaults
//! - A schema-stable wire encoding for proofs and blocks
//!
//! None of the public APIs in this crate perform network or filesystem I/O.

/// Reusable hashing traits and a default SHA3-256 hasher.
pub mod hashing;
/// Binary Merkle tree utilities and node types.
pub mod merkle;
/// Generating and verifying Merkle proofs of inclusion.
pub mod proofs;
/// Wire serialization shared by proofs and blocks.
pub mod serialization;
/// Signature traits and default ed25519 signer/verifier.
pub mod signing;
/// Common type aliases and constants used by this crate.
pub mod types;
