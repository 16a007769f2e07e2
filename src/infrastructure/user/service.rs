//! User service orchestrating hashing, merging and persistence

use std::sync::Arc;

use tracing::{debug, error};

use crate::domain::user::{NewUser, User, UserId, UserProfile, UserRepository, UserUpdate};
use crate::domain::DomainError;

use super::password::PasswordHasher;

/// Request for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// User service for record management
///
/// Holds no state between calls; every operation goes to the repository.
#[derive(Debug)]
pub struct UserService<R: UserRepository, H: PasswordHasher> {
    repository: Arc<R>,
    hasher: Arc<H>,
}

impl<R: UserRepository, H: PasswordHasher> UserService<R, H> {
    /// Create a new user service
    pub fn new(repository: Arc<R>, hasher: Arc<H>) -> Self {
        Self { repository, hasher }
    }

    /// Hash the password and insert the user, returning the assigned ID
    pub async fn create(&self, request: CreateUserRequest) -> Result<UserId, DomainError> {
        let password_hash = self.hasher.hash(&request.password).map_err(|e| {
            error!(error = %e, "Password hashing failed");
            e
        })?;

        self.repository
            .create(NewUser {
                username: request.username,
                email: request.email,
                password_hash,
            })
            .await
    }

    /// Get a user by ID
    pub async fn get(&self, id: UserId) -> Result<User, DomainError> {
        self.repository.get_by_id(id).await
    }

    /// Apply a partial update; omitted fields keep their stored values
    pub async fn update(&self, update: UserUpdate) -> Result<(), DomainError> {
        let existing = match self.repository.get_by_id(update.id).await {
            Ok(user) => user,
            Err(e) if e.is_not_found() => {
                return Err(DomainError::not_found("user not found"));
            }
            Err(e) => return Err(e),
        };

        let merged = update.merge(&existing);
        self.repository.update(&merged).await
    }

    /// Delete a user; deleting a missing user still succeeds
    pub async fn delete(&self, id: UserId) -> Result<(), DomainError> {
        let removed = self.repository.delete(id).await?;

        if !removed {
            debug!(id = %id, "Delete matched no user");
        }

        Ok(())
    }

    /// List all users
    pub async fn list(&self) -> Result<Vec<UserProfile>, DomainError> {
        self.repository.list().await
    }

    /// Check that the backing store is reachable
    pub async fn ping(&self) -> Result<(), DomainError> {
        self.repository.ping().await
    }
}
