// ATTESTATION VERIFICATION
// Signature checking is a capability handed to the adjudicator, not something it owns.
//
// INVARIANTS:
// 1. verify is side-effect-free: same inputs, same answer
// 2. Malformed keys or signatures verify as false, never panic

use crate::bytes::{Ed25519Public, Ed25519Signature, Hash32};
use crate::types::ValidatorIndex;
use ed25519_dalek::{Signature, VerifyingKey};

/// Checks that `signature` by `key` covers `message`.
pub trait AttestationVerifier {
    fn verify(&self, signature: &Ed25519Signature, key: &Ed25519Public, message: &[u8]) -> bool;
}

impl<T: AttestationVerifier + ?Sized> AttestationVerifier for &T {
    fn verify(&self, signature: &Ed25519Signature, key: &Ed25519Public, message: &[u8]) -> bool {
        (**self).verify(signature, key, message)
    }
}

impl<T: AttestationVerifier + ?Sized> AttestationVerifier for Box<T> {
    fn verify(&self, signature: &Ed25519Signature, key: &Ed25519Public, message: &[u8]) -> bool {
        (**self).verify(signature, key, message)
    }
}

/// Strict Ed25519 verification.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Verifier;

impl AttestationVerifier for Ed25519Verifier {
    fn verify(&self, signature: &Ed25519Signature, key: &Ed25519Public, message: &[u8]) -> bool {
        let Ok(verifying_key) = VerifyingKey::from_bytes(key.as_bytes()) else {
            return false;
        };
        let signature = Signature::from_bytes(signature.as_bytes());
        verifying_key.verify_strict(message, &signature).is_ok()
    }
}

/// Accepts every signature. For replaying vectors signed under a different message layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAllVerifier;

impl AttestationVerifier for AcceptAllVerifier {
    fn verify(&self, _signature: &Ed25519Signature, _key: &Ed25519Public, _message: &[u8]) -> bool {
        true
    }
}

/// Message covered by a vote: the vote bit followed by the little-endian validator index.
pub fn vote_message(vote: bool, index: ValidatorIndex) -> Vec<u8> {
    let mut message = Vec::with_capacity(3);
    message.push(u8::from(vote));
    message.extend_from_slice(&index.to_le_bytes());
    message
}

/// Message covered by a culprit: the disputed report.
pub fn culprit_message(target: &Hash32) -> Vec<u8> {
    target.as_bytes().to_vec()
}

/// Message covered by a fault: the disputed report.
pub fn fault_message(target: &Hash32) -> Vec<u8> {
    target.as_bytes().to_vec()
}
