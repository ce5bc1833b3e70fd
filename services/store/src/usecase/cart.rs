use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{CartRepository, InteractionRepository, PaymentPort};
use crate::domain::types::{Cart, Interaction, PaymentLineItem};
use crate::error::StoreError;

// ── CreateCart ───────────────────────────────────────────────────────────────

pub struct CreateCartUseCase<C: CartRepository> {
    pub carts: C,
}

impl<C: CartRepository> CreateCartUseCase<C> {
    /// At most one open cart per customer. The repository surfaces
    /// `CartAlreadyOpen` off the partial unique index, so two concurrent
    /// creates cannot both succeed.
    pub async fn execute(&self, customer_id: Uuid, address: String) -> Result<Cart, StoreError> {
        if address.trim().is_empty() {
            return Err(StoreError::Validation("address must not be empty".into()));
        }
        let cart = Cart {
            id: Uuid::now_v7(),
            customer_id,
            address,
            bought: false,
            bought_at: None,
            created_at: Utc::now(),
        };
        self.carts.create(&cart).await?;
        Ok(cart)
    }
}

// ── GetCart ──────────────────────────────────────────────────────────────────

pub struct GetCartUseCase<C: CartRepository> {
    pub carts: C,
}

impl<C: CartRepository> GetCartUseCase<C> {
    pub async fn execute(&self, id: Uuid) -> Result<Cart, StoreError> {
        self.carts
            .find_by_id(id)
            .await?
            .ok_or(StoreError::CartNotFound)
    }
}

// ── BuyCart ──────────────────────────────────────────────────────────────────

pub struct BuyCartUseCase<C: CartRepository> {
    pub carts: C,
}

impl<C: CartRepository> BuyCartUseCase<C> {
    /// Flips the cart and all of its line items to bought. The repository
    /// runs both writes in one transaction so a partial buy is never
    /// observable.
    pub async fn execute(&self, id: Uuid) -> Result<Cart, StoreError> {
        self.carts
            .buy(id, Utc::now())
            .await?
            .ok_or(StoreError::CartNotFound)
    }
}

// ── CompleteInteraction ──────────────────────────────────────────────────────

/// Marks a single line item bought without touching its cart. Exists for
/// reconciliation tooling; the normal path is `BuyCartUseCase`.
pub struct CompleteInteractionUseCase<I: InteractionRepository> {
    pub interactions: I,
}

impl<I: InteractionRepository> CompleteInteractionUseCase<I> {
    pub async fn execute(&self, id: Uuid) -> Result<Interaction, StoreError> {
        self.interactions
            .mark_bought(id)
            .await?
            .ok_or(StoreError::InteractionNotFound)
    }
}

// ── CreateCheckoutSession ────────────────────────────────────────────────────

pub struct CreateCheckoutSessionUseCase<P: PaymentPort> {
    pub payment: P,
}

impl<P: PaymentPort> CreateCheckoutSessionUseCase<P> {
    pub async fn execute(&self, items: Vec<PaymentLineItem>) -> Result<String, StoreError> {
        if items.is_empty() {
            return Err(StoreError::Validation("line items must not be empty".into()));
        }
        self.payment.create_session(&items).await
    }
}
