//! Application state for shared services

use std::sync::Arc;

use crate::domain::user::{User, UserId, UserProfile, UserRepository, UserUpdate, UserValidator};
use crate::domain::DomainError;
use crate::infrastructure::user::{CreateUserRequest, PasswordHasher, UserService};

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub validator: UserValidator,
}

impl AppState {
    pub fn new(user_service: Arc<dyn UserServiceTrait>) -> Self {
        Self {
            user_service,
            validator: UserValidator::new(),
        }
    }
}

/// Trait for user service operations
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn create(&self, request: CreateUserRequest) -> Result<UserId, DomainError>;
    async fn get(&self, id: UserId) -> Result<User, DomainError>;
    async fn update(&self, update: UserUpdate) -> Result<(), DomainError>;
    async fn delete(&self, id: UserId) -> Result<(), DomainError>;
    async fn list(&self) -> Result<Vec<UserProfile>, DomainError>;
    async fn ping(&self) -> Result<(), DomainError>;
}

#[async_trait::async_trait]
impl<R, H> UserServiceTrait for UserService<R, H>
where
    R: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    async fn create(&self, request: CreateUserRequest) -> Result<UserId, DomainError> {
        UserService::create(self, request).await
    }

    async fn get(&self, id: UserId) -> Result<User, DomainError> {
        UserService::get(self, id).await
    }

    async fn update(&self, update: UserUpdate) -> Result<(), DomainError> {
        UserService::update(self, update).await
    }

    async fn delete(&self, id: UserId) -> Result<(), DomainError> {
        UserService::delete(self, id).await
    }

    async fn list(&self) -> Result<Vec<UserProfile>, DomainError> {
        UserService::list(self).await
    }

    async fn ping(&self) -> Result<(), DomainError> {
        UserService::ping(self).await
    }
}
