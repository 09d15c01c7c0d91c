//! bcrypt-backed [`PasswordHasher`] adapter.
//!
//! bcrypt is CPU bound, so hashing and verification run on tokio's blocking
//! pool. Hashes use the `$2b$` format and verify existing `$2a$`/`$2b$`
//! hashes.

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Hashes passwords with bcrypt at a configurable cost.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Work factor used when none is configured.
    pub const DEFAULT_COST: u32 = bcrypt::DEFAULT_COST;

    /// Create a hasher with the given work factor (4..=31).
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Configured work factor.
    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(Self::DEFAULT_COST)
    }
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
        let cost = self.cost;
        let password = Zeroizing::new(password.to_owned());
        tokio::task::spawn_blocking(move || bcrypt::hash(password.as_str(), cost))
            .await
            .map_err(|err| PasswordHashError::hash(err.to_string()))?
            .map_err(|err| PasswordHashError::hash(err.to_string()))
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHashError> {
        let password = Zeroizing::new(password.to_owned());
        let hash = hash.to_owned();
        tokio::task::spawn_blocking(move || bcrypt::verify(password.as_str(), &hash))
            .await
            .map_err(|err| PasswordHashError::verify(err.to_string()))?
            .map_err(|err| PasswordHashError::verify(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn hasher() -> BcryptPasswordHasher {
        BcryptPasswordHasher::new(4)
    }

    #[rstest]
    #[tokio::test]
    async fn hashes_verify_against_their_password(hasher: BcryptPasswordHasher) {
        let hash = hasher.hash("correct horse").await.expect("hash");
        assert!(hash.starts_with("$2b$04$"));
        assert!(hasher.verify("correct horse", &hash).await.expect("verify"));
        assert!(!hasher.verify("battery staple", &hash).await.expect("verify"));
    }

    #[rstest]
    #[tokio::test]
    async fn malformed_hashes_are_errors(hasher: BcryptPasswordHasher) {
        let err = hasher
            .verify("secret", "not-a-bcrypt-hash")
            .await
            .expect_err("malformed hash");
        assert!(matches!(err, PasswordHashError::Verify { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn invalid_cost_is_a_hash_error() {
        let err = BcryptPasswordHasher::new(2)
            .hash("secret")
            .await
            .expect_err("cost below minimum");
        assert!(matches!(err, PasswordHashError::Hash { .. }));
    }

    #[test]
    fn default_uses_library_cost() {
        assert_eq!(BcryptPasswordHasher::default().cost(), bcrypt::DEFAULT_COST);
    }
}
