//! Shared utilities for the integration tests
//!
//! Real repositories are created with `git` inside temporary directories; the binary
//! runs with its own cache and config directories per test.

pub mod assertions;
pub mod fixtures;
pub mod repository;
