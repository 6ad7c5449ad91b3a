//! CLI command implementations.

pub mod common;
pub mod place;
pub mod project;
pub mod simulate;
