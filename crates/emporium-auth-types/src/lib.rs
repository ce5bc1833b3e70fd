//! Identity snapshot and access-token primitives shared by the store
//! service and its tests.

pub mod identity;
pub mod token;
