//! Shared building blocks for the student registry crates: logging setup,
//! pagination parameters and small wire types.

pub mod types;
pub mod utils;
pub mod pagination;
