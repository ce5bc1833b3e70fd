use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use emporium_auth_types::identity::MaybeIdentity;
use emporium_domain::pagination::PageRequest;

use crate::domain::guard;
use crate::domain::types::{Product, ProductFilter, ProductPatch};
use crate::error::StoreError;
use crate::state::AppState;
use crate::usecase::product::{
    CreateProductInput, CreateProductUseCase, DeleteProductUseCase, GetProductUseCase,
    SearchProductsUseCase, UpdateProductUseCase,
};

#[derive(Serialize)]
pub struct ProductResponse {
    pub id: String,
    pub seller_id: String,
    pub name: String,
    pub description: String,
    pub price_cents: i64,
    pub quantity: i32,
    pub category: String,
    pub image_url: String,
    pub shipping_days: i32,
    pub has_discount: bool,
    pub discount_rate: Option<i16>,
    pub average_rating: Option<f64>,
    pub num_ratings: i32,
    #[serde(serialize_with = "emporium_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.to_string(),
            seller_id: product.seller_id.to_string(),
            name: product.name,
            description: product.description,
            price_cents: product.price_cents,
            quantity: product.quantity,
            category: product.category,
            image_url: product.image_url,
            shipping_days: product.shipping_days,
            has_discount: product.has_discount,
            discount_rate: product.discount_rate,
            average_rating: product.average_rating,
            num_ratings: product.num_ratings,
            created_at: product.created_at,
        }
    }
}

// ── POST /products ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub description: String,
    pub price_cents: i64,
    pub quantity: i32,
    pub category: String,
    pub image_url: String,
    pub shipping_days: i32,
    #[serde(default)]
    pub has_discount: bool,
    pub discount_rate: Option<i16>,
}

pub async fn create_product(
    MaybeIdentity(identity): MaybeIdentity,
    State(state): State<AppState>,
    Json(body): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), StoreError> {
    let identity = guard::logged_in(identity.as_ref())?;
    guard::seller(identity)?;
    let usecase = CreateProductUseCase {
        repo: state.product_repo(),
    };
    let product = usecase
        .execute(CreateProductInput {
            seller_id: identity.id,
            name: body.name,
            description: body.description,
            price_cents: body.price_cents,
            quantity: body.quantity,
            category: body.category,
            image_url: body.image_url,
            shipping_days: body.shipping_days,
            has_discount: body.has_discount,
            discount_rate: body.discount_rate,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(product.into())))
}

// ── GET /products ────────────────────────────────────────────────────────────

// Flattening `PageRequest` into this struct would break `Query` extraction
// (serde_urlencoded buffers flattened values as strings), so the page fields
// are spelled out.
#[derive(Deserialize)]
pub struct SearchQuery {
    pub category: Option<String>,
    pub search: Option<String>,
    #[serde(default = "default_per_page", rename = "per-page")]
    pub per_page: u32,
    #[serde(default = "default_page")]
    pub page: u32,
}

fn default_per_page() -> u32 {
    20
}

fn default_page() -> u32 {
    1
}

pub async fn search_products(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<ProductResponse>>, StoreError> {
    let usecase = SearchProductsUseCase {
        repo: state.product_repo(),
    };
    let products = usecase
        .execute(
            ProductFilter {
                category: query.category,
                search: query.search,
            },
            PageRequest {
                per_page: query.per_page,
                page: query.page,
            },
        )
        .await?;
    Ok(Json(products.into_iter().map(Into::into).collect()))
}

// ── GET /products/{id} ───────────────────────────────────────────────────────

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProductResponse>, StoreError> {
    let usecase = GetProductUseCase {
        repo: state.product_repo(),
    };
    let product = usecase.execute(id).await?;
    Ok(Json(product.into()))
}

// ── PATCH /products/{id} ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price_cents: Option<i64>,
    pub quantity: Option<i32>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub shipping_days: Option<i32>,
    pub has_discount: Option<bool>,
    pub discount_rate: Option<i16>,
}

pub async fn update_product(
    MaybeIdentity(identity): MaybeIdentity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateProductRequest>,
) -> Result<Json<ProductResponse>, StoreError> {
    let identity = guard::logged_in(identity.as_ref())?;
    guard::correct_seller_or_admin(identity, id, &state.product_repo(), &state.user_repo())
        .await?;
    let usecase = UpdateProductUseCase {
        repo: state.product_repo(),
    };
    let product = usecase
        .execute(
            id,
            ProductPatch {
                name: body.name,
                description: body.description,
                price_cents: body.price_cents,
                quantity: body.quantity,
                category: body.category,
                image_url: body.image_url,
                shipping_days: body.shipping_days,
                has_discount: body.has_discount,
                discount_rate: body.discount_rate,
            },
        )
        .await?;
    Ok(Json(product.into()))
}

// ── DELETE /products/{id} ────────────────────────────────────────────────────

pub async fn delete_product(
    MaybeIdentity(identity): MaybeIdentity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, StoreError> {
    let identity = guard::logged_in(identity.as_ref())?;
    guard::seller_or_admin(identity)?;
    guard::correct_seller_or_admin(identity, id, &state.product_repo(), &state.user_repo())
        .await?;
    let usecase = DeleteProductUseCase {
        repo: state.product_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
