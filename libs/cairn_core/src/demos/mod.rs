//! Demonstration analyses over the crypto primitives: hash avalanche
//! behavior, pre-image brute forcing, batch commitments with inclusion
//! proofs, and sign/verify round trips. These
//! are thin consumers of `cairn_crypto`; the data-structure work lives in
//! `blockchain` and `cairn_crypto::merkle`.

pub mod avalanche;
pub mod commitment;
pub mod preimage;
pub mod signatures;

/// Lowercase hex rendering of a digest, used by the report types.
pub(crate) fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
