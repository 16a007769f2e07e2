//! User infrastructure module
//!
//! This module provides implementations for user management, including
//! password hashing with Argon2, the PostgreSQL and in-memory repositories,
//! driver error classification and the user service.

mod password;
mod postgres_repository;
mod repository;
mod service;
mod store_error;

pub use password::{Argon2Hasher, PasswordHasher};
pub use postgres_repository::PostgresUserRepository;
pub use repository::InMemoryUserRepository;
pub use service::{CreateUserRequest, UserService};
pub use store_error::{constraint_field, ClassifyStoreError, EMAIL_CONSTRAINT, USERNAME_CONSTRAINT};
