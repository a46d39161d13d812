//! Auth types shared across Farmstead crates.
//!
//! Provides the bearer-token service, the access-control gate middleware, and the
//! `Identity` extractor handlers use to learn who is calling.

pub mod gate;
pub mod identity;
pub mod token;
