//! Shared data model for Routebook guide content.

pub mod defs;
pub mod validate;

pub use defs::*;
pub use validate::{GuideIssue, validate_guide};
