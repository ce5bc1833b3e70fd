//! Account-scoped read views. Each view resolves the path username first,
//! so a missing account surfaces as `UserNotFound` rather than an empty list.

use emporium_domain::pagination::PageRequest;

use crate::domain::repository::{UserRepository, ViewRepository};
use crate::domain::types::{Cart, Interaction, Product, PurchaseRow, SaleRow};
use crate::error::StoreError;

// ── SellerStock ──────────────────────────────────────────────────────────────

pub struct SellerStockUseCase<U: UserRepository, V: ViewRepository> {
    pub users: U,
    pub views: V,
}

impl<U: UserRepository, V: ViewRepository> SellerStockUseCase<U, V> {
    pub async fn execute(
        &self,
        username: &str,
        page: PageRequest,
    ) -> Result<Vec<Product>, StoreError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or(StoreError::UserNotFound)?;
        self.views.seller_stock(user.id, page).await
    }
}

// ── OpenCart ─────────────────────────────────────────────────────────────────

pub struct OpenCartUseCase<U: UserRepository, V: ViewRepository> {
    pub users: U,
    pub views: V,
}

impl<U: UserRepository, V: ViewRepository> OpenCartUseCase<U, V> {
    /// The current open cart with its line items. `None` when the customer
    /// has no open cart, which is not an error.
    pub async fn execute(
        &self,
        username: &str,
    ) -> Result<Option<(Cart, Vec<Interaction>)>, StoreError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or(StoreError::UserNotFound)?;
        self.views.open_cart(user.id).await
    }
}

// ── PurchaseHistory ──────────────────────────────────────────────────────────

pub struct PurchaseHistoryUseCase<U: UserRepository, V: ViewRepository> {
    pub users: U,
    pub views: V,
}

impl<U: UserRepository, V: ViewRepository> PurchaseHistoryUseCase<U, V> {
    pub async fn execute(
        &self,
        username: &str,
        page: PageRequest,
    ) -> Result<Vec<PurchaseRow>, StoreError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or(StoreError::UserNotFound)?;
        self.views.purchase_history(user.id, page).await
    }
}

// ── PendingSales / ApprovedSales ─────────────────────────────────────────────

pub struct PendingSalesUseCase<U: UserRepository, V: ViewRepository> {
    pub users: U,
    pub views: V,
}

impl<U: UserRepository, V: ViewRepository> PendingSalesUseCase<U, V> {
    pub async fn execute(
        &self,
        username: &str,
        page: PageRequest,
    ) -> Result<Vec<SaleRow>, StoreError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or(StoreError::UserNotFound)?;
        self.views.pending_sales(user.id, page).await
    }
}

pub struct ApprovedSalesUseCase<U: UserRepository, V: ViewRepository> {
    pub users: U,
    pub views: V,
}

impl<U: UserRepository, V: ViewRepository> ApprovedSalesUseCase<U, V> {
    pub async fn execute(
        &self,
        username: &str,
        page: PageRequest,
    ) -> Result<Vec<SaleRow>, StoreError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or(StoreError::UserNotFound)?;
        self.views.approved_sales(user.id, page).await
    }
}
