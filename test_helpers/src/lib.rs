//! Test helpers shared across crates.
//!
//! This crate provides temporary module trees for driving the generator
//! and a guard for tests that need a specific working directory.

pub mod cwd;
pub mod fixture;

pub use fixture::{EXAMPLE_OPTIONS, ModuleTree};
