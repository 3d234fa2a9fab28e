//! Signing demo: bind a message to an ed25519 key pair.
//!
//! Thin consumer of `cairn_crypto::signing`. The message is hashed, the
//! digest travels with the signature so a reader can see that the signature
//! covers content, and verification fails the moment either is tampered with.

use cairn_crypto::hashing::{DefaultHash, HashFunction};
use cairn_crypto::signing::{DefaultSigner, SigFunction, SigVerFunction, Signable};
use cairn_crypto::types::StdByteArray;
use chrono::Utc;

use super::to_hex;

/// A message together with its digest and detached ed25519 signature.
#[derive(Debug, Clone)]
pub struct SignedMessage {
    pub message: String,
    /// SHA3-256 digest of the message bytes.
    pub digest: StdByteArray,
    pub signature: Option<[u8; 64]>,
    /// RFC 3339 timestamp taken when the signature was produced.
    pub signed_at: Option<String>,
}

impl SignedMessage {
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        let mut hasher = DefaultHash::new();
        hasher.update(message.as_bytes());
        let digest = hasher.digest().unwrap_or_default();
        SignedMessage {
            message,
            digest,
            signature: None,
            signed_at: None,
        }
    }

    pub fn digest_hex(&self) -> String {
        to_hex(&self.digest)
    }

    /// Size of the detached signature in bytes, once one exists.
    pub fn signature_size(&self) -> Option<usize> {
        self.signature.map(|s| s.len())
    }
}

impl Signable<64> for SignedMessage {
    fn get_signing_bytes(&self) -> impl AsRef<[u8]> {
        // sign the digest rather than the raw text
        self.digest.to_vec()
    }

    fn sign<const K: usize, const P: usize>(
        &mut self,
        signing_function: &mut impl SigFunction<K, P, 64>,
    ) -> [u8; 64] {
        let signature = signing_function.sign(self);
        self.signature = Some(signature);
        self.signed_at = Some(Utc::now().to_rfc3339());
        signature
    }
}

/// Signs `message` with `signer`, stamping it in the process.
pub fn sign_message(message: impl Into<String>, signer: &mut DefaultSigner) -> SignedMessage {
    let mut signed = SignedMessage::new(message);
    signed.sign(signer);
    signed
}

/// Checks the signature on `message` against `verifying_key`.
///
/// Returns false when the message has never been signed, when the content no
/// longer matches its recorded digest, when the key bytes are not a valid
/// ed25519 point, or when the signature itself is bad.
pub fn verify_message(message: &SignedMessage, verifying_key: &StdByteArray) -> bool {
    let Some(signature) = message.signature else {
        return false;
    };
    let mut hasher = DefaultHash::new();
    hasher.update(message.message.as_bytes());
    if hasher.digest().map(|d| d != message.digest).unwrap_or(true) {
        return false;
    }
    let Some(verifier) = cairn_crypto::signing::DefaultVerifier::try_new(*verifying_key) else {
        return false;
    };
    verifier.verify(&signature, message)
}
