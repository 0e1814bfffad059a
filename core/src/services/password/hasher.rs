use tracing::debug;

use crate::errors::{DomainError, DomainResult};

/// One-way password hasher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordHasher {
    /// Create a hasher with the given bcrypt cost
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext password
    ///
    /// Fails only when bcrypt itself fails; input shape is validated upstream.
    pub fn hash_sync(&self, plaintext: &str) -> DomainResult<String> {
        bcrypt::hash(plaintext, self.cost).map_err(DomainError::Hashing)
    }

    /// Check a plaintext password against a stored hash
    ///
    /// A malformed stored hash is reported as a mismatch.
    pub fn verify_sync(&self, plaintext: &str, hashed: &str) -> bool {
        match bcrypt::verify(plaintext, hashed) {
            Ok(matches) => matches,
            Err(e) => {
                debug!(error = %e, "stored password hash could not be parsed");
                false
            }
        }
    }

    /// Hash on the blocking pool
    pub async fn hash(&self, plaintext: &str) -> DomainResult<String> {
        let hasher = *self;
        let plaintext = plaintext.to_owned();
        tokio::task::spawn_blocking(move || hasher.hash_sync(&plaintext)).await?
    }

    /// Verify on the blocking pool
    pub async fn verify(&self, plaintext: &str, hashed: &str) -> DomainResult<bool> {
        let hasher = *self;
        let plaintext = plaintext.to_owned();
        let hashed = hashed.to_owned();
        Ok(tokio::task::spawn_blocking(move || hasher.verify_sync(&plaintext, &hashed)).await?)
    }
}
