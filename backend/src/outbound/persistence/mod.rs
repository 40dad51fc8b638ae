//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories here implement the driven ports in `domain::ports` on top of
//! `diesel-async` with a `bb8` pool. Row structs (`models.rs`) and the table
//! definitions (`schema.rs`) stay private; only domain types cross the
//! boundary.
//!
//! # Example
//!
//! ```ignore
//! use careers::outbound::persistence::{DbPool, DieselEoiRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/careers")).await?;
//! let repo = DieselEoiRepository::new(pool);
//! ```

mod diesel_eoi_repository;
mod diesel_error_mapping;
mod diesel_job_repository;
mod diesel_manager_repository;
mod models;
mod pool;
mod schema;

pub use diesel_eoi_repository::DieselEoiRepository;
pub use diesel_job_repository::DieselJobRepository;
pub use diesel_manager_repository::DieselManagerRepository;
pub use pool::{DbPool, MigrationError, PoolConfig, PoolError, run_migrations};
