//! HTTP inbound adapter: form-encoded requests in, JSON page views out.

pub mod applications;
pub mod auth;
pub mod dashboard;
pub mod error;
pub mod form;
pub mod health;
pub mod jobs;
pub mod page;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;
