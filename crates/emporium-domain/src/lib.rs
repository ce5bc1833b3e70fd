//! Domain types shared across the Emporium workspace.
//!
//! This crate contains only pure types with no framework dependencies.

pub mod pagination;
pub mod user;
