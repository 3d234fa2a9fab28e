//! Signature traits and a default ed25519 signer/verifier.
//!
//! The traits are the signature counterpart of `HashFunction`: a minimal
//! contract (generate a key pair, sign, verify) with the concrete scheme
//! injectable so tests and demos can swap it.

use ed25519::signature::SignerMut;
use ed25519_dalek::{SigningKey, VerifyingKey};
use rand_core::OsRng;

use crate::types::StdByteArray;

/// A trait for an object that can be signed and verified.
pub trait Signable<const S: usize> {
    fn get_signing_bytes(&self) -> impl AsRef<[u8]>;
    /// Behavior to be implemented by the object that will be signed
    fn sign<const K: usize, const P: usize>(
        &mut self,
        signing_function: &mut impl SigFunction<K, P, S>,
    ) -> [u8; S];
}

/// A trait for signing messages.
///
/// # Generics
///
/// * `K` - The size of the private key in bytes.
/// * `P` - The size of the public key in bytes.
/// * `S` - The size of the signature in bytes.
pub trait SigFunction<const K: usize, const P: usize, const S: usize> {
    /// Signs the given data using the held private key.
    fn sign(&mut self, data: &impl Signable<S>) -> [u8; S];

    /// Byte representation of the signing function, usually the private key.
    fn to_bytes(&self) -> [u8; K];

    /// The function that will verify signatures produced by this signer.
    fn get_verifying_function(&self) -> impl SigVerFunction<P, S>;

    /// Generates a fresh random key pair.
    fn generate_random() -> Self;
}

/// A trait for verifying signatures.
///
/// # Generics
///
/// * `K` - The size of the public key in bytes.
/// * `S` - The size of the signature in bytes.
pub trait SigVerFunction<const K: usize, const S: usize> {
    /// Checks `signature` over `target` against the held public key.
    fn verify(&self, signature: &[u8; S], target: &impl Signable<S>) -> bool;

    fn to_bytes(&self) -> [u8; K];

    fn from_bytes(bytes: &[u8; K]) -> Self;
}

/// Default signer is the ed25519 signing function
pub struct DefaultSigner {
    private_key: SigningKey,
}

/// Default verifier is the ed25519 verifying function
pub struct DefaultVerifier {
    public_key: VerifyingKey,
}

impl DefaultVerifier {
    pub fn new(public_key: StdByteArray) -> Self {
        Self::try_new(public_key).expect("Invalid public key")
    }

    /// Fallible construction for keys from untrusted sources: `None` when
    /// `public_key` is not a valid ed25519 point.
    pub fn try_new(public_key: StdByteArray) -> Option<Self> {
        VerifyingKey::from_bytes(&public_key)
            .ok()
            .map(|public_key| DefaultVerifier { public_key })
    }
}

impl DefaultSigner {
    pub fn new(private_key: StdByteArray) -> Self {
        DefaultSigner {
            private_key: SigningKey::from_bytes(&private_key),
        }
    }
}

impl SigFunction<32, 32, 64> for DefaultSigner {
    fn sign(&mut self, data: &impl Signable<64>) -> [u8; 64] {
        self.private_key.sign(data.get_signing_bytes().as_ref()).to_bytes()
    }

    fn to_bytes(&self) -> StdByteArray {
        self.private_key.to_bytes()
    }

    fn get_verifying_function(&self) -> impl SigVerFunction<32, 64> {
        DefaultVerifier::new(self.private_key.verifying_key().to_bytes())
    }

    fn generate_random() -> Self {
        let signing_key = SigningKey::generate(&mut OsRng);
        DefaultSigner {
            private_key: signing_key,
        }
    }
}

impl SigVerFunction<32, 64> for DefaultVerifier {
    fn verify(&self, signature: &[u8; 64], target: &impl Signable<64>) -> bool {
        let signature = ed25519::Signature::from_bytes(signature);

        self.public_key
            .verify_strict(target.get_signing_bytes().as_ref(), &signature)
            .is_ok()
    }

    fn to_bytes(&self) -> StdByteArray {
        self.public_key.to_bytes()
    }

    fn from_bytes(bytes: &StdByteArray) -> Self {
        DefaultVerifier::new(*bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Note {
        text: String,
        signature: Option<[u8; 64]>,
    }

    impl Signable<64> for Note {
        fn get_signing_bytes(&self) -> impl AsRef<[u8]> {
            self.text.as_bytes().to_vec()
        }

        fn sign<const K: usize, const P: usize>(
            &mut self,
            signing_function: &mut impl SigFunction<K, P, 64>,
        ) -> [u8; 64] {
            let signature = signing_function.sign(self);
            self.signature = Some(signature);
            signature
        }
    }

    #[test]
    fn test_sign_and_verify_round_trip() {
        let mut signer = DefaultSigner::generate_random();
        let mut note = Note { text: "timestamp this".into(), signature: None };
        let signature = note.sign(&mut signer);

        let verifier = signer.get_verifying_function();
        assert!(verifier.verify(&signature, &note));
    }

    #[test]
    fn test_tampered_message_fails_verification() {
        let mut signer = DefaultSigner::generate_random();
        let mut note = Note { text: "original".into(), signature: None };
        let signature = note.sign(&mut signer);

        note.text = "tampered".into();
        let verifier = signer.get_verifying_function();
        assert!(!verifier.verify(&signature, &note));
    }

    #[test]
    fn test_try_new_rejects_non_curve_bytes() {
        // y-coordinate out of field range, cannot be an ed25519 point
        assert!(DefaultVerifier::try_new([0xFF; 32]).is_none());
    }

    #[test]
    fn test_verifier_reconstructs_from_bytes() {
        let mut signer = DefaultSigner::generate_random();
        let mut note = Note { text: "portable key".into(), signature: None };
        let signature = note.sign(&mut signer);

        let bytes = signer.get_verifying_function().to_bytes();
        let verifier = DefaultVerifier::from_bytes(&bytes);
        assert!(verifier.verify(&signature, &note));
    }
}
