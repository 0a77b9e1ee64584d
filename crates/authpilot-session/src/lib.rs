//! authpilot-session
//!
//! State for one user working on one request: debounced re-evaluation,
//! file intake, and letter generation with a local fallback.

pub mod config;
pub mod debounce;
pub mod error;
pub mod intake;
pub mod sequence;
pub mod session;
pub mod strategy;
