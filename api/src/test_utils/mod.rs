//! Test utilities
//!
//! In-memory port implementations and fixtures for service and router tests.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
