//! Bcrypt-backed credential hashing.

use bcrypt::DEFAULT_COST;

use lectern_core::Result;
use lectern_core::error::Error;
use lectern_core::traits::CredentialHasher;

/// The default [`CredentialHasher`]: bcrypt with the library's default
/// cost.
#[derive(Debug, Clone)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    /// A hasher with an explicit cost. Tests use a low cost to stay
    /// fast; production callers should keep the default.
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self { cost: DEFAULT_COST }
    }
}

impl CredentialHasher for BcryptHasher {
    fn hash(&self, plaintext: &str) -> Result<String> {
        bcrypt::hash(plaintext, self.cost).map_err(|err| Error::Hashing {
            message: err.to_string(),
        })
    }

    fn verify(&self, plaintext: &str, hashed: &str) -> Result<bool> {
        bcrypt::verify(plaintext, hashed).map_err(|err| Error::Hashing {
            message: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_round_trip() {
        let hasher = BcryptHasher::with_cost(4);
        let hash = hasher.hash("secret1").unwrap();
        assert!(hasher.verify("secret1", &hash).unwrap());
        assert!(!hasher.verify("wrong", &hash).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let hasher = BcryptHasher::with_cost(4);
        assert_ne!(
            hasher.hash("secret1").unwrap(),
            hasher.hash("secret1").unwrap()
        );
    }
}
