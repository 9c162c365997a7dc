//! Shared test utilities for ssvlog integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. Everything renders with the [`ssvlog_core::Plain`]
//! painter so expected output is free of escape codes.

pub mod assertions;
pub mod builders;
pub mod fixtures;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
