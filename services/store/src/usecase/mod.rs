pub mod cart;
pub mod interaction;
pub mod product;
pub mod user;
pub mod views;
