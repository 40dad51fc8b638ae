//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`PasswordHasher`]) are implemented by
//! outbound adapters; driving ports are implemented by the domain services
//! and called by the HTTP handlers.

mod macros;
pub(crate) use macros::define_port_error;

mod eoi_dashboard;
mod eoi_intake;
mod eoi_repository;
mod job_board;
mod job_repository;
mod login_service;
mod manager_registration;
mod manager_repository;
mod password_hasher;

#[cfg(test)]
pub use eoi_dashboard::MockEoiDashboard;
pub use eoi_dashboard::{DashboardChange, EoiDashboard};
#[cfg(test)]
pub use eoi_intake::MockEoiIntake;
pub use eoi_intake::EoiIntake;
#[cfg(test)]
pub use eoi_repository::MockEoiRepository;
pub use eoi_repository::{EoiRepository, EoiRepositoryError};
#[cfg(test)]
pub use job_board::MockJobBoard;
pub use job_board::JobBoard;
#[cfg(test)]
pub use job_repository::MockJobRepository;
pub use job_repository::{JobRepository, JobRepositoryError};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use manager_registration::MockManagerRegistration;
pub use manager_registration::ManagerRegistration;
#[cfg(test)]
pub use manager_repository::MockManagerRepository;
pub use manager_repository::{ManagerRepository, ManagerRepositoryError};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
