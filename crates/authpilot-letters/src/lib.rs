//! authpilot-letters
//!
//! Letter assembly from Tera templates, plus DOCX and print-ready HTML export.

pub mod assemble;
pub mod docx;
pub mod error;
pub mod print;
pub mod styles;
