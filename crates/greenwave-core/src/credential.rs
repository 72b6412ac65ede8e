//! Credential verifier capability
//!
//! Account logic never touches a hashing primitive directly; it goes through
//! `CredentialVerifier`, which is injected into the engine the same way other
//! policy hooks are.

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Separator between the salt and the hex digest in a stored verifier
const SALT_SEPARATOR: char = '$';

/// One-way password hashing and verification
pub trait CredentialVerifier {
    /// Produce a stored digest for `secret`
    ///
    /// Two calls with the same secret may return different digests (salting).
    fn hash(&self, secret: &str) -> String;

    /// Check `secret` against a digest previously produced by `hash`
    ///
    /// Malformed digests never verify.
    fn verify(&self, secret: &str, digest: &str) -> bool;
}

/// Salted SHA-256 verifier
///
/// Digest format: `<salt>$<hex(sha256(salt || secret))>` with a random
/// 32-hex-char salt per call.
///
/// # Example
/// ```
/// use greenwave_core::credential::{CredentialVerifier, Sha256CredentialVerifier};
///
/// let verifier = Sha256CredentialVerifier;
/// let digest = verifier.hash("pw1");
/// assert!(verifier.verify("pw1", &digest));
/// assert!(!verifier.verify("pw2", &digest));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256CredentialVerifier;

impl Sha256CredentialVerifier {
    fn digest_with_salt(salt: &str, secret: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(salt.as_bytes());
        hasher.update(secret.as_bytes());
        hex::encode(hasher.finalize())
    }
}

impl CredentialVerifier for Sha256CredentialVerifier {
    fn hash(&self, secret: &str) -> String {
        let salt = Uuid::new_v4().simple().to_string();
        let digest = Self::digest_with_salt(&salt, secret);
        format!("{}{}{}", salt, SALT_SEPARATOR, digest)
    }

    fn verify(&self, secret: &str, digest: &str) -> bool {
        match digest.split_once(SALT_SEPARATOR) {
            Some((salt, expected)) if !salt.is_empty() && !expected.is_empty() => {
                Self::digest_with_salt(salt, secret) == expected
            }
            _ => false,
        }
    }
}
