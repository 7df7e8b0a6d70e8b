//! Test utilities
//!
//! Hand-written in-memory repository and fixtures for service tests, plus
//! helpers that open a throwaway in-memory SQLite database for repository
//! and HTTP tests.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
