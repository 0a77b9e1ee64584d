//! authpilot-scoring
//!
//! Rule engines over a [`FormSnapshot`](authpilot_core::models::snapshot::FormSnapshot).
//! Pure functions with no I/O or shared state. Every call recomputes from the
//! snapshot it is given.

pub mod appeal;
pub mod insights;
pub mod readiness;
pub mod recommend;
pub mod score;
pub mod validators;
