//! Foundation types for termfolio.
//!
//! Shared by every termfolio crate: the error type and the TOML-backed
//! terminal configuration.

pub mod config;
pub mod error;
