//! Relational storage: connection pool and schema migrations

pub mod migrations;
mod postgres;

pub use migrations::run_migrations;
pub use postgres::{connect, PoolSettings};
