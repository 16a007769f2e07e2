//! Password hashing utilities using Argon2

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher as Argon2PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use std::fmt::Debug;

use crate::domain::DomainError;

/// Trait for password hashing operations
pub trait PasswordHasher: Send + Sync + Debug {
    /// Hash a password into a self-describing PHC string
    fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Verify a password against a hash; mismatches and malformed hashes return false
    fn verify(&self, password: &str, hash: &str) -> bool;
}

/// Memory cost in KiB
pub const DEFAULT_MEMORY_KIB: u32 = Params::DEFAULT_M_COST;
/// Number of passes over memory
pub const DEFAULT_ITERATIONS: u32 = Params::DEFAULT_T_COST;
/// Degree of parallelism
pub const DEFAULT_PARALLELISM: u32 = Params::DEFAULT_P_COST;

/// Argon2id (v19) hasher with fixed cost parameters
///
/// The parameters only affect new hashes. Verification reads them back from
/// the stored PHC string, so raising the cost keeps old hashes valid.
#[derive(Debug, Clone)]
pub struct Argon2Hasher {
    params: Params,
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Argon2Hasher {
    pub fn new() -> Self {
        Self {
            params: Params::default(),
        }
    }

    /// Hasher with explicit costs; rejects values outside Argon2's limits
    pub fn with_costs(
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self, DomainError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| DomainError::internal(format!("Invalid Argon2 parameters: {}", e)))?;

        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| DomainError::internal(format!("Failed to hash password: {}", e)))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(hash) else {
            return false;
        };

        self.argon2()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = Argon2Hasher::new();
        let hash = hasher.hash("testpassword").unwrap();

        assert!(hasher.verify("testpassword", &hash));
        assert!(!hasher.verify("wrongpassword", &hash));
    }

    #[test]
    fn test_hash_embeds_algorithm_and_salt() {
        let hasher = Argon2Hasher::new();
        let hash = hasher.hash("testpassword").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(!hash.contains("testpassword"));
    }

    #[test]
    fn test_salt_makes_hashes_unique() {
        let hasher = Argon2Hasher::new();

        let first = hasher.hash("testpassword").unwrap();
        let second = hasher.hash("testpassword").unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify("testpassword", &first));
        assert!(hasher.verify("testpassword", &second));
    }

    #[test]
    fn test_default_costs_are_recorded_in_hash() {
        let hash = Argon2Hasher::new().hash("testpassword").unwrap();
        let expected = format!(
            "$argon2id$v=19$m={},t={},p={}$",
            DEFAULT_MEMORY_KIB, DEFAULT_ITERATIONS, DEFAULT_PARALLELISM
        );

        assert!(hash.starts_with(&expected));
    }

    #[test]
    fn test_custom_costs() {
        let cheap = Argon2Hasher::with_costs(8 * 1024, 1, 1).unwrap();
        let hash = cheap.hash("testpassword").unwrap();

        assert!(hash.starts_with("$argon2id$v=19$m=8192,t=1,p=1$"));
        // stored parameters win over the verifier's own
        assert!(Argon2Hasher::new().verify("testpassword", &hash));
    }

    #[test]
    fn test_invalid_costs_rejected() {
        assert!(Argon2Hasher::with_costs(8 * 1024, 0, 1).is_err());
        assert!(Argon2Hasher::with_costs(1, 1, 1).is_err());
    }

    #[test]
    fn test_verify_malformed_hash() {
        let hasher = Argon2Hasher::new();

        assert!(!hasher.verify("testpassword", "not-a-phc-string"));
        assert!(!hasher.verify("testpassword", ""));
    }
}
