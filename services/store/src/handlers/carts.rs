use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use emporium_auth_types::identity::MaybeIdentity;

use crate::domain::guard;
use crate::domain::types::{Cart, PaymentLineItem};
use crate::error::StoreError;
use crate::state::AppState;
use crate::usecase::cart::{
    BuyCartUseCase, CreateCartUseCase, CreateCheckoutSessionUseCase, GetCartUseCase,
};

#[derive(Serialize)]
pub struct CartResponse {
    pub id: String,
    pub customer_id: String,
    pub address: String,
    pub bought: bool,
    #[serde(serialize_with = "emporium_core::serde::opt_to_rfc3339_ms")]
    pub bought_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(serialize_with = "emporium_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        Self {
            id: cart.id.to_string(),
            customer_id: cart.customer_id.to_string(),
            address: cart.address,
            bought: cart.bought,
            bought_at: cart.bought_at,
            created_at: cart.created_at,
        }
    }
}

// ── POST /carts ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateCartRequest {
    pub address: String,
}

pub async fn create_cart(
    MaybeIdentity(identity): MaybeIdentity,
    State(state): State<AppState>,
    Json(body): Json<CreateCartRequest>,
) -> Result<(StatusCode, Json<CartResponse>), StoreError> {
    let identity = guard::logged_in(identity.as_ref())?;
    let usecase = CreateCartUseCase {
        carts: state.cart_repo(),
    };
    let cart = usecase.execute(identity.id, body.address).await?;
    Ok((StatusCode::CREATED, Json(cart.into())))
}

// ── GET /carts/{id} ──────────────────────────────────────────────────────────

pub async fn get_cart(
    MaybeIdentity(identity): MaybeIdentity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CartResponse>, StoreError> {
    let identity = guard::logged_in(identity.as_ref())?;
    guard::owner_of_cart_or_admin(identity, id, &state.cart_repo()).await?;
    let usecase = GetCartUseCase {
        carts: state.cart_repo(),
    };
    let cart = usecase.execute(id).await?;
    Ok(Json(cart.into()))
}

// ── PATCH /carts/{id} ────────────────────────────────────────────────────────

pub async fn buy_cart(
    MaybeIdentity(identity): MaybeIdentity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CartResponse>, StoreError> {
    let identity = guard::logged_in(identity.as_ref())?;
    guard::owner_of_cart_or_admin(identity, id, &state.cart_repo()).await?;
    let usecase = BuyCartUseCase {
        carts: state.cart_repo(),
    };
    let cart = usecase.execute(id).await?;
    Ok(Json(cart.into()))
}

// ── POST /carts/checkout-session ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CheckoutLineItem {
    pub name: String,
    pub image_url: String,
    pub price_cents: i64,
    pub quantity: i32,
}

#[derive(Deserialize)]
pub struct CheckoutSessionRequest {
    pub line_items: Vec<CheckoutLineItem>,
}

#[derive(Serialize)]
pub struct CheckoutSessionResponse {
    pub id: String,
}

pub async fn create_checkout_session(
    MaybeIdentity(identity): MaybeIdentity,
    State(state): State<AppState>,
    Json(body): Json<CheckoutSessionRequest>,
) -> Result<Json<CheckoutSessionResponse>, StoreError> {
    guard::logged_in(identity.as_ref())?;
    let usecase = CreateCheckoutSessionUseCase {
        payment: state.payment_port(),
    };
    let id = usecase
        .execute(
            body.line_items
                .into_iter()
                .map(|item| PaymentLineItem {
                    name: item.name,
                    image_url: item.image_url,
                    price_cents: item.price_cents,
                    quantity: item.quantity,
                })
                .collect(),
        )
        .await?;
    Ok(Json(CheckoutSessionResponse { id }))
}
