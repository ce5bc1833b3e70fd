//! sea-orm entities for the store database.

pub mod carts;
pub mod interactions;
pub mod products;
pub mod users;
