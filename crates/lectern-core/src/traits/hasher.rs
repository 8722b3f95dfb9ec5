//! Credential hashing capability.

use crate::Result;

/// A slow, salted, one-way credential hashing capability.
///
/// The exact algorithm is a substitutable dependency; the catalog only
/// relies on `verify(p, hash(p))` holding and on hashes being opaque.
pub trait CredentialHasher: Send + Sync {
    /// Hash a plaintext credential.
    fn hash(&self, plaintext: &str) -> Result<String>;

    /// Verify a plaintext credential against a stored hash.
    fn verify(&self, plaintext: &str, hashed: &str) -> Result<bool>;
}
