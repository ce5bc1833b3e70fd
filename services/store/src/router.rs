use axum::{
    Router, middleware,
    routing::{delete, get, patch, post},
};
use tower_http::trace::TraceLayer;

use emporium_core::health::{healthz, readyz};
use emporium_core::middleware::request_id_layer;

use crate::handlers::{
    auth::{login, register},
    carts::{buy_cart, create_cart, create_checkout_session, get_cart},
    interactions::{
        approve_interaction, create_interaction, delete_interaction, get_interaction,
    },
    products::{create_product, delete_product, get_product, search_products, update_product},
    users::{
        create_admin, delete_user, get_customer_purchases, get_seller_approved_sales,
        get_seller_pending_sales, get_user, get_user_cart, get_user_products, list_users,
        update_user,
    },
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Auth
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        // Users
        .route("/users", post(create_admin))
        .route("/users", get(list_users))
        .route("/users/{username}", get(get_user))
        .route("/users/{username}", patch(update_user))
        .route("/users/{username}", delete(delete_user))
        // Account views
        .route("/users/{username}/products", get(get_user_products))
        .route("/users/{username}/cart", get(get_user_cart))
        .route(
            "/users/{username}/interactions/customer",
            get(get_customer_purchases),
        )
        .route(
            "/users/{username}/interactions/seller",
            get(get_seller_pending_sales),
        )
        .route(
            "/users/{username}/interactions/seller/approved",
            get(get_seller_approved_sales),
        )
        // Products
        .route("/products", post(create_product))
        .route("/products", get(search_products))
        .route("/products/{id}", get(get_product))
        .route("/products/{id}", patch(update_product))
        .route("/products/{id}", delete(delete_product))
        // Carts
        .route("/carts", post(create_cart))
        .route("/carts/checkout-session", post(create_checkout_session))
        .route("/carts/{id}", get(get_cart))
        .route("/carts/{id}", patch(buy_cart))
        // Interactions
        .route("/interactions", post(create_interaction))
        .route("/interactions/{id}", get(get_interaction))
        .route("/interactions/{id}", patch(approve_interaction))
        .route("/interactions/{id}", delete(delete_interaction))
        .layer(middleware::from_fn_with_state(state.clone(), crate::middleware::authenticate))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
