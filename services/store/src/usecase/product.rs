use chrono::Utc;
use uuid::Uuid;

use emporium_domain::pagination::PageRequest;

use crate::domain::repository::ProductRepository;
use crate::domain::types::{Product, ProductFilter, ProductPatch};
use crate::error::StoreError;

// ── CreateProduct ────────────────────────────────────────────────────────────

pub struct CreateProductInput {
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
}

pub struct CreateProductUseCase<R: ProductRepository> {
    pub repo: R,
}

impl<R: ProductRepository> CreateProductUseCase<R> {
    /// A seller may not list two in-stock products with the same name.
    /// Depleted names may be reused, so this is a soft guard, not a
    /// database unique constraint.
    pub async fn execute(&self, input: CreateProductInput) -> Result<Product, StoreError> {
        if input.name.trim().is_empty() {
            return Err(StoreError::Validation("name must not be empty".into()));
        }
        if input.price_cents <= 0 {
            return Err(StoreError::Validation("price must be positive".into()));
        }
        if input.quantity <= 0 {
            return Err(StoreError::Validation("quantity must be positive".into()));
        }
        if input.shipping_days <= 0 {
            return Err(StoreError::Validation("shipping days must be positive".into()));
        }
        if input.image_url.trim().is_empty() {
            return Err(StoreError::Validation("image url must not be empty".into()));
        }
        if self
            .repo
            .has_in_stock_with_name(input.seller_id, &input.name)
            .await?
        {
            return Err(StoreError::DuplicateProduct);
        }
        let product = Product {
            id: Uuid::now_v7(),
            seller_id: input.seller_id,
            name: input.name,
            description: input.description,
            price_cents: input.price_cents,
            quantity: input.quantity,
            category: input.category,
            image_url: input.image_url,
            shipping_days: input.shipping_days,
            has_discount: input.has_discount,
            discount_rate: input.discount_rate,
            average_rating: None,
            num_ratings: 0,
            created_at: Utc::now(),
        };
        self.repo.create(&product).await?;
        Ok(product)
    }
}

// ── GetProduct / SearchProducts ──────────────────────────────────────────────

pub struct GetProductUseCase<R: ProductRepository> {
    pub repo: R,
}

impl<R: ProductRepository> GetProductUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<Product, StoreError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(StoreError::ProductNotFound)
    }
}

pub struct SearchProductsUseCase<R: ProductRepository> {
    pub repo: R,
}

impl<R: ProductRepository> SearchProductsUseCase<R> {
    pub async fn execute(
        &self,
        filter: ProductFilter,
        page: PageRequest,
    ) -> Result<Vec<Product>, StoreError> {
        self.repo.search(&filter, page).await
    }
}

// ── UpdateProduct ────────────────────────────────────────────────────────────

pub struct UpdateProductUseCase<R: ProductRepository> {
    pub repo: R,
}

impl<R: ProductRepository> UpdateProductUseCase<R> {
    pub async fn execute(&self, id: Uuid, patch: ProductPatch) -> Result<Product, StoreError> {
        if patch.is_empty() {
            return Err(StoreError::Validation("no fields to update".into()));
        }
        if matches!(patch.price_cents, Some(p) if p <= 0) {
            return Err(StoreError::Validation("price must be positive".into()));
        }
        // Quantity may drop to zero to deplete a listing.
        if matches!(patch.quantity, Some(q) if q < 0) {
            return Err(StoreError::Validation("quantity must not be negative".into()));
        }
        if matches!(patch.shipping_days, Some(d) if d <= 0) {
            return Err(StoreError::Validation("shipping days must be positive".into()));
        }
        self.repo
            .update(id, &patch)
            .await?
            .ok_or(StoreError::ProductNotFound)
    }
}

// ── DeleteProduct ────────────────────────────────────────────────────────────

pub struct DeleteProductUseCase<R: ProductRepository> {
    pub repo: R,
}

impl<R: ProductRepository> DeleteProductUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<(), StoreError> {
        if self.repo.delete(id).await? {
            Ok(())
        } else {
            Err(StoreError::ProductNotFound)
        }
    }
}
