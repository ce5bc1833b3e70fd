use chrono::{DateTime, Utc};
use uuid::Uuid;

use emporium_domain::user::RoleFlags;

/// Account record owned by the store service.
///
/// `password_hash` is an argon2 PHC string and never leaves the service.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub role: RoleFlags,
    pub age: Option<i16>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A listed product. Prices are integer cents.
#[derive(Debug, Clone)]
pub struct Product {
    pub id: Uuid,
    pub seller_id: Uuid,
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
    pub created_at: DateTime<Utc>,
}

/// A customer's order container. `bought_at` stays unset until checkout.
#[derive(Debug, Clone)]
pub struct Cart {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub address: String,
    pub bought: bool,
    pub bought_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// A single product line item inside a cart.
///
/// `bought` mirrors the parent cart once the cart is bought; `seller_approval`
/// flips later, by seller action, independent of payment.
#[derive(Debug, Clone)]
pub struct Interaction {
    pub id: Uuid,
    pub cart_id: Uuid,
    pub product_id: Uuid,
    pub quantity_chosen: i32,
    pub bought: bool,
    pub seller_approval: bool,
    pub created_at: DateTime<Utc>,
}

/// Allow-listed partial update for a user. Absent fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub username: Option<String>,
    pub password_hash: Option<String>,
    pub is_seller: Option<bool>,
    pub age: Option<i16>,
    pub address: Option<String>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.password_hash.is_none()
            && self.is_seller.is_none()
            && self.age.is_none()
            && self.address.is_none()
    }
}

/// Allow-listed partial update for a product.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
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

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price_cents.is_none()
            && self.quantity.is_none()
            && self.category.is_none()
            && self.image_url.is_none()
            && self.shipping_days.is_none()
            && self.has_discount.is_none()
            && self.discount_rate.is_none()
    }
}

/// Catalog search filter. `search` matches product names case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub search: Option<String>,
}

/// One row of a customer's completed purchase history.
#[derive(Debug, Clone)]
pub struct PurchaseRow {
    pub interaction_id: Uuid,
    pub cart_id: Uuid,
    pub product_id: Uuid,
    pub name: String,
    pub price_cents: i64,
    pub image_url: String,
    pub shipping_days: i32,
    pub quantity_chosen: i32,
    pub seller_approval: bool,
    pub bought_at: Option<DateTime<Utc>>,
}

/// One row of a seller's sales view (pending or approved).
#[derive(Debug, Clone)]
pub struct SaleRow {
    pub interaction_id: Uuid,
    pub cart_id: Uuid,
    pub product_id: Uuid,
    pub name: String,
    pub description: String,
    pub price_cents: i64,
    pub image_url: String,
    pub quantity_chosen: i32,
    pub address: String,
    pub bought_at: Option<DateTime<Utc>>,
}

/// A line item sent to the payment session upstream.
#[derive(Debug, Clone)]
pub struct PaymentLineItem {
    pub name: String,
    pub image_url: String,
    pub price_cents: i64,
    pub quantity: i32,
}
