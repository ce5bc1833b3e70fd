pub mod auth;
pub mod carts;
pub mod interactions;
pub mod products;
pub mod users;
