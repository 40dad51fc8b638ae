//! In-process adapters used when no database is configured.
//!
//! They implement the same driven ports as the Diesel adapters, so the rest
//! of the server cannot tell which backend it runs on. Data lives for the
//! lifetime of the process only.

mod eoi_store;
mod fixtures;
mod job_store;
mod manager_store;

pub use eoi_store::InMemoryEoiRepository;
pub use fixtures::{
    DEMO_ADMIN_FULL_NAME, DEMO_ADMIN_PASSWORD, DEMO_ADMIN_USERNAME, SeedError, seed_demo_admin,
    seeded_job_postings,
};
pub use job_store::InMemoryJobRepository;
pub use manager_store::InMemoryManagerRepository;

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock `mutex`, recovering the data if a previous holder panicked.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
