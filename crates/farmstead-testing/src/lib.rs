//! Test utilities for Farmstead services.
//!
//! Provides `MockAuth` for minting bearer tokens and canned request bodies.
//! Import in `#[cfg(test)]` blocks and integration tests only.

pub mod auth;
pub mod fixture;
