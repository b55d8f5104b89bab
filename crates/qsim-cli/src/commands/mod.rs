//! CLI command implementations.

pub mod build;
pub mod common;
pub mod run;
pub mod sample;
pub mod validate;
pub mod version;
