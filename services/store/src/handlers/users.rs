use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use emporium_auth_types::identity::MaybeIdentity;
use emporium_domain::pagination::PageRequest;

use crate::domain::guard;
use crate::domain::types::{PurchaseRow, SaleRow, User};
use crate::error::StoreError;
use crate::handlers::carts::CartResponse;
use crate::handlers::interactions::InteractionResponse;
use crate::handlers::products::ProductResponse;
use crate::state::AppState;
use crate::usecase::user::{
    CreateAdminUseCase, DeleteUserUseCase, GetUserUseCase, ListUsersUseCase, RegisterUserInput,
    UpdateUserInput, UpdateUserUseCase,
};
use crate::usecase::views::{
    ApprovedSalesUseCase, OpenCartUseCase, PendingSalesUseCase, PurchaseHistoryUseCase,
    SellerStockUseCase,
};

#[derive(Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub is_admin: bool,
    pub is_seller: bool,
    pub age: Option<i16>,
    pub address: Option<String>,
    #[serde(serialize_with = "emporium_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username,
            is_admin: user.role.is_admin,
            is_seller: user.role.is_seller,
            age: user.age,
            address: user.address,
            created_at: user.created_at,
        }
    }
}

// ── POST /users ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateAdminRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub is_seller: bool,
    pub age: Option<i16>,
    pub address: Option<String>,
}

pub async fn create_admin(
    MaybeIdentity(identity): MaybeIdentity,
    State(state): State<AppState>,
    Json(body): Json<CreateAdminRequest>,
) -> Result<(StatusCode, Json<UserResponse>), StoreError> {
    let identity = guard::logged_in(identity.as_ref())?;
    guard::admin(identity)?;
    let usecase = CreateAdminUseCase {
        repo: state.user_repo(),
    };
    let user = usecase
        .execute(RegisterUserInput {
            username: body.username,
            password: body.password,
            is_seller: body.is_seller,
            age: body.age,
            address: body.address,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

// ── GET /users ───────────────────────────────────────────────────────────────

pub async fn list_users(
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Vec<UserResponse>>, StoreError> {
    let usecase = ListUsersUseCase {
        repo: state.user_repo(),
    };
    let users = usecase.execute(page).await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

// ── GET /users/{username} ────────────────────────────────────────────────────

pub async fn get_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<UserResponse>, StoreError> {
    let usecase = GetUserUseCase {
        repo: state.user_repo(),
    };
    let user = usecase.execute(&username).await?;
    Ok(Json(user.into()))
}

// ── PATCH /users/{username} ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub is_seller: Option<bool>,
    pub age: Option<i16>,
    pub address: Option<String>,
}

pub async fn update_user(
    MaybeIdentity(identity): MaybeIdentity,
    State(state): State<AppState>,
    Path(username): Path<String>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, StoreError> {
    let identity = guard::logged_in(identity.as_ref())?;
    guard::correct_user_or_admin(identity, &username)?;
    let usecase = UpdateUserUseCase {
        repo: state.user_repo(),
    };
    let user = usecase
        .execute(
            &username,
            UpdateUserInput {
                username: body.username,
                password: body.password,
                is_seller: body.is_seller,
                age: body.age,
                address: body.address,
            },
        )
        .await?;
    Ok(Json(user.into()))
}

// ── DELETE /users/{username} ─────────────────────────────────────────────────

pub async fn delete_user(
    MaybeIdentity(identity): MaybeIdentity,
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<StatusCode, StoreError> {
    let identity = guard::logged_in(identity.as_ref())?;
    guard::correct_user_or_admin(identity, &username)?;
    let usecase = DeleteUserUseCase {
        repo: state.user_repo(),
    };
    usecase.execute(&username).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /users/{username}/products ───────────────────────────────────────────

pub async fn get_user_products(
    MaybeIdentity(identity): MaybeIdentity,
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Vec<ProductResponse>>, StoreError> {
    let identity = guard::logged_in(identity.as_ref())?;
    guard::seller(identity)?;
    guard::correct_user_or_admin(identity, &username)?;
    let usecase = SellerStockUseCase {
        users: state.user_repo(),
        views: state.view_repo(),
    };
    let products = usecase.execute(&username, page).await?;
    Ok(Json(products.into_iter().map(Into::into).collect()))
}

// ── GET /users/{username}/cart ───────────────────────────────────────────────

#[derive(Serialize)]
pub struct OpenCartResponse {
    pub cart: CartResponse,
    pub items: Vec<InteractionResponse>,
}

pub async fn get_user_cart(
    MaybeIdentity(identity): MaybeIdentity,
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<Option<OpenCartResponse>>, StoreError> {
    let identity = guard::logged_in(identity.as_ref())?;
    guard::correct_user_or_admin(identity, &username)?;
    let usecase = OpenCartUseCase {
        users: state.user_repo(),
        views: state.view_repo(),
    };
    let open = usecase.execute(&username).await?;
    Ok(Json(open.map(|(cart, items)| OpenCartResponse {
        cart: cart.into(),
        items: items.into_iter().map(Into::into).collect(),
    })))
}

// ── GET /users/{username}/interactions/customer ──────────────────────────────

#[derive(Serialize)]
pub struct PurchaseResponse {
    pub interaction_id: String,
    pub cart_id: String,
    pub product_id: String,
    pub name: String,
    pub price_cents: i64,
    pub image_url: String,
    pub shipping_days: i32,
    pub quantity_chosen: i32,
    pub seller_approval: bool,
    #[serde(serialize_with = "emporium_core::serde::opt_to_rfc3339_ms")]
    pub bought_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<PurchaseRow> for PurchaseResponse {
    fn from(row: PurchaseRow) -> Self {
        Self {
            interaction_id: row.interaction_id.to_string(),
            cart_id: row.cart_id.to_string(),
            product_id: row.product_id.to_string(),
            name: row.name,
            price_cents: row.price_cents,
            image_url: row.image_url,
            shipping_days: row.shipping_days,
            quantity_chosen: row.quantity_chosen,
            seller_approval: row.seller_approval,
            bought_at: row.bought_at,
        }
    }
}

pub async fn get_customer_purchases(
    MaybeIdentity(identity): MaybeIdentity,
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Vec<PurchaseResponse>>, StoreError> {
    let identity = guard::logged_in(identity.as_ref())?;
    guard::correct_user_or_admin(identity, &username)?;
    let usecase = PurchaseHistoryUseCase {
        users: state.user_repo(),
        views: state.view_repo(),
    };
    let rows = usecase.execute(&username, page).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

// ── GET /users/{username}/interactions/seller ────────────────────────────────

#[derive(Serialize)]
pub struct SaleResponse {
    pub interaction_id: String,
    pub cart_id: String,
    pub product_id: String,
    pub name: String,
    pub description: String,
    pub price_cents: i64,
    pub image_url: String,
    pub quantity_chosen: i32,
    pub address: String,
    #[serde(serialize_with = "emporium_core::serde::opt_to_rfc3339_ms")]
    pub bought_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<SaleRow> for SaleResponse {
    fn from(row: SaleRow) -> Self {
        Self {
            interaction_id: row.interaction_id.to_string(),
            cart_id: row.cart_id.to_string(),
            product_id: row.product_id.to_string(),
            name: row.name,
            description: row.description,
            price_cents: row.price_cents,
            image_url: row.image_url,
            quantity_chosen: row.quantity_chosen,
            address: row.address,
            bought_at: row.bought_at,
        }
    }
}

pub async fn get_seller_pending_sales(
    MaybeIdentity(identity): MaybeIdentity,
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Vec<SaleResponse>>, StoreError> {
    let identity = guard::logged_in(identity.as_ref())?;
    guard::correct_user_or_admin(identity, &username)?;
    let usecase = PendingSalesUseCase {
        users: state.user_repo(),
        views: state.view_repo(),
    };
    let rows = usecase.execute(&username, page).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

// ── GET /users/{username}/interactions/seller/approved ───────────────────────

pub async fn get_seller_approved_sales(
    MaybeIdentity(identity): MaybeIdentity,
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Vec<SaleResponse>>, StoreError> {
    let identity = guard::logged_in(identity.as_ref())?;
    guard::correct_user_or_admin(identity, &username)?;
    let usecase = ApprovedSalesUseCase {
        users: state.user_repo(),
        views: state.view_repo(),
    };
    let rows = usecase.execute(&username, page).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}
