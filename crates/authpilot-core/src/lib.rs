//! authpilot-core
//!
//! Pure domain types and bundled reference data.
//! No AWS SDK dependency. This is the shared vocabulary of the AuthPilot system.

pub mod error;
pub mod fixtures;
pub mod models;
