//! Shared test utilities for the parameter-store crates.
//!
//! This crate provides:
//! - Proptest generators for parameter names and listings
//! - An in-memory, paginated Parameter Store
//! - Test fixtures with sample values

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod mocks;

pub use generators::*;
pub use mocks::{MockCall, MockParameterStore};
