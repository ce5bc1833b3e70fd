//! Test utilities for Emporium services.
//!
//! Provides `TestIdentity` for minting bearer tokens in integration tests.
//! Import in `#[cfg(test)]` blocks and test targets only, never in
//! production code.

pub mod auth;
