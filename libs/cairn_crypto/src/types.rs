//! Common type aliases and constants used across cryptographic components.

/// Standard byte array length used for hashes and keys (32 bytes).
pub const STANDARD_ARRAY_LENGTH: usize = 32;

/// Fixed-size 32-byte array (commonly used for digests and public keys).
pub type StdByteArray = [u8; STANDARD_ARRAY_LENGTH];

/// Sentinel previous-hash carried by a genesis block. All zeroes by
/// convention, so the first link in a chain is unambiguous.
pub const GENESIS_PREVIOUS_HASH: StdByteArray = [0; STANDARD_ARRAY_LENGTH];
