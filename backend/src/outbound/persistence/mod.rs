//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories are thin translators between Diesel rows (`models.rs`,
//! `schema.rs`, both private) and domain types. Connections come from a
//! `bb8` pool of `diesel-async` connections and every database failure is
//! mapped to the port's error type.
//!
//! # Example
//!
//! ```no_run
//! use open_tracker::outbound::persistence::{DbPool, DieselEmailLogRepository, PoolConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/tracker")).await?;
//! let repo = DieselEmailLogRepository::new(pool);
//! # let _ = repo;
//! # Ok(())
//! # }
//! ```

mod diesel_basic_error_mapping;
mod diesel_email_log_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_email_log_repository::DieselEmailLogRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
