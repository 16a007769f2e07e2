//! User Registry API
//!
//! A small HTTP service for user records:
//! - Create, read, update, delete and list users over JSON
//! - Declarative input validation with readable messages
//! - Argon2 password hashing; hashes never leave the service
//! - PostgreSQL persistence with typed uniqueness conflicts

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use api::state::AppState;
use config::DatabaseConfig;
use infrastructure::storage;
use infrastructure::user::{Argon2Hasher, PostgresUserRepository, UserService};

/// Connect to PostgreSQL, apply migrations if enabled, and wire the services
pub async fn create_app_state(database: &DatabaseConfig) -> anyhow::Result<AppState> {
    let pool = storage::connect(database).await?;

    if database.run_migrations {
        storage::run_migrations(&pool).await?;
    }

    let repository = PostgresUserRepository::new(pool)
        .with_statement_timeout(Duration::from_secs(database.statement_timeout_secs));

    let user_service = UserService::new(Arc::new(repository), Arc::new(Argon2Hasher::new()));

    Ok(AppState::new(Arc::new(user_service)))
}
