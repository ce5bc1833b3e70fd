#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use emporium_domain::pagination::PageRequest;

use crate::domain::types::{
    Cart, Interaction, PaymentLineItem, Product, ProductFilter, ProductPatch, PurchaseRow,
    SaleRow, User, UserPatch,
};
use crate::error::StoreError;

/// Repository for user accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;
    async fn list(&self, page: PageRequest) -> Result<Vec<User>, StoreError>;
    /// Insert a user. Fails with `DuplicateUser` if the username is taken.
    async fn create(&self, user: &User) -> Result<(), StoreError>;
    /// Apply a partial update. Returns the updated row, or `None` if absent.
    async fn update(&self, username: &str, patch: &UserPatch) -> Result<Option<User>, StoreError>;
    /// Delete by username. Returns `true` if a row was deleted.
    async fn delete(&self, username: &str) -> Result<bool, StoreError>;
}

/// Repository for the product catalog.
pub trait ProductRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, StoreError>;
    /// Whether `seller_id` already lists an in-stock product named `name`.
    /// Depleted products (quantity 0) do not count, their names may be reused.
    async fn has_in_stock_with_name(
        &self,
        seller_id: Uuid,
        name: &str,
    ) -> Result<bool, StoreError>;
    async fn create(&self, product: &Product) -> Result<(), StoreError>;
    async fn search(
        &self,
        filter: &ProductFilter,
        page: PageRequest,
    ) -> Result<Vec<Product>, StoreError>;
    async fn update(
        &self,
        id: Uuid,
        patch: &ProductPatch,
    ) -> Result<Option<Product>, StoreError>;
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;
}

/// Repository for carts.
pub trait CartRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Cart>, StoreError>;
    /// Insert a cart. Fails with `CartAlreadyOpen` if the customer already
    /// has an unbought cart (partial unique index on customer + unbought).
    async fn create(&self, cart: &Cart) -> Result<(), StoreError>;
    /// Mark the cart and every one of its interactions bought, in one
    /// transaction. Returns the updated cart, or `None` if absent.
    async fn buy(&self, id: Uuid, bought_at: DateTime<Utc>) -> Result<Option<Cart>, StoreError>;
}

/// Repository for cart line items.
pub trait InteractionRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Interaction>, StoreError>;
    async fn create(&self, interaction: &Interaction) -> Result<(), StoreError>;
    /// Set `seller_approval = true`. A second call is a no-op.
    async fn approve(&self, id: Uuid) -> Result<Option<Interaction>, StoreError>;
    /// Set `bought = true` on a single interaction.
    async fn mark_bought(&self, id: Uuid) -> Result<Option<Interaction>, StoreError>;
    /// Delete by id. Returns `true` if a row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;
}

/// Joined read views over products, carts, and interactions.
pub trait ViewRepository: Send + Sync {
    /// Seller's in-stock products (quantity > 0), newest first.
    async fn seller_stock(
        &self,
        seller_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<Product>, StoreError>;
    /// Customer's current open cart with its line items, if any.
    async fn open_cart(
        &self,
        customer_id: Uuid,
    ) -> Result<Option<(Cart, Vec<Interaction>)>, StoreError>;
    /// Customer's completed purchases, newest cart first.
    async fn purchase_history(
        &self,
        customer_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<PurchaseRow>, StoreError>;
    /// Seller's bought-but-unapproved sales, newest first.
    async fn pending_sales(
        &self,
        seller_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<SaleRow>, StoreError>;
    /// Seller's bought-and-approved sales, newest first.
    async fn approved_sales(
        &self,
        seller_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<SaleRow>, StoreError>;
}

/// Opaque payment session upstream.
pub trait PaymentPort: Send + Sync {
    /// Create a payment session for `items` and return its opaque id.
    async fn create_session(&self, items: &[PaymentLineItem]) -> Result<String, StoreError>;
}
