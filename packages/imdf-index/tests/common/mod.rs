//! Common test utilities for imdf-index
//!
//! Dataset builders and a reference campus shared by the integration tests.

#![allow(dead_code)]

pub mod builders;
pub mod fixtures;

pub use builders::*;
pub use fixtures::*;
