//! Inbound adapters translating external requests into domain port calls.
//!
//! Only HTTP exists today; see [`http`].

pub mod http;
