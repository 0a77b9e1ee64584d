//! authpilot-bedrock
//!
//! Remote letter drafting through the Bedrock Converse API.

pub mod client;
pub mod context;
pub mod error;
pub mod generate;
pub mod tokens;
