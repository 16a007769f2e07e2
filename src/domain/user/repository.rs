//! User repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{NewUser, User, UserId, UserProfile};
use crate::domain::DomainError;

/// Persistence gateway for user records
///
/// Implementations classify store failures: uniqueness violations become
/// `DomainError::Conflict` naming the colliding field, a missing row becomes
/// `DomainError::NotFound`, everything else is `DomainError::Storage`.
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Insert a user and return the store-assigned ID
    async fn create(&self, user: NewUser) -> Result<UserId, DomainError>;

    /// Get a user by ID, failing with `NotFound` when absent
    async fn get_by_id(&self, id: UserId) -> Result<User, DomainError>;

    /// Overwrite username and email of the given user
    async fn update(&self, profile: &UserProfile) -> Result<(), DomainError>;

    /// Delete a user; returns whether a row was removed
    async fn delete(&self, id: UserId) -> Result<bool, DomainError>;

    /// List all users in the store's natural order
    async fn list(&self) -> Result<Vec<UserProfile>, DomainError>;

    /// Check that the store is reachable
    async fn ping(&self) -> Result<(), DomainError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// Repository that fails every call with a storage error
    #[derive(Debug, Default)]
    pub struct FailingUserRepository {
        calls: Arc<RwLock<usize>>,
    }

    impl FailingUserRepository {
        pub fn new() -> Self {
            Self::default()
        }

        /// Number of calls received so far
        pub async fn calls(&self) -> usize {
            *self.calls.read().await
        }

        async fn fail<T>(&self) -> Result<T, DomainError> {
            *self.calls.write().await += 1;
            Err(DomainError::storage("Mock repository configured to fail"))
        }
    }

    #[async_trait]
    impl UserRepository for FailingUserRepository {
        async fn create(&self, _user: NewUser) -> Result<UserId, DomainError> {
            self.fail().await
        }

        async fn get_by_id(&self, _id: UserId) -> Result<User, DomainError> {
            self.fail().await
        }

        async fn update(&self, _profile: &UserProfile) -> Result<(), DomainError> {
            self.fail().await
        }

        async fn delete(&self, _id: UserId) -> Result<bool, DomainError> {
            self.fail().await
        }

        async fn list(&self) -> Result<Vec<UserProfile>, DomainError> {
            self.fail().await
        }

        async fn ping(&self) -> Result<(), DomainError> {
            self.fail().await
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_every_call_fails_and_is_counted() {
            let repo = FailingUserRepository::new();

            assert!(repo.get_by_id(UserId::new(1)).await.is_err());
            assert!(repo.list().await.is_err());
            assert!(repo.delete(UserId::new(1)).await.is_err());

            assert_eq!(repo.calls().await, 3);
        }
    }
}
