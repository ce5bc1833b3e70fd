mod helpers;

mod cart_test;
mod router_test;
mod views_test;
