//! Domain layer
//!
//! Contains pure business logic with no external dependencies.
//! - `entities`: Records, roles, the permission table and the subscription gate
//! - `ports`: Trait definitions for external dependencies
//! - `transform`: Untyped database row to typed record shaping

pub mod entities;
pub mod ports;
pub mod transform;
