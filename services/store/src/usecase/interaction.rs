use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{CartRepository, InteractionRepository};
use crate::domain::types::Interaction;
use crate::error::StoreError;

// ── AddInteraction ───────────────────────────────────────────────────────────

pub struct AddInteractionInput {
    pub cart_id: Uuid,
    pub product_id: Uuid,
    pub quantity_chosen: i32,
}

pub struct AddInteractionUseCase<C: CartRepository, I: InteractionRepository> {
    pub carts: C,
    pub interactions: I,
}

impl<C: CartRepository, I: InteractionRepository> AddInteractionUseCase<C, I> {
    /// A bought cart is closed; adding to it fails with `CartAlreadyBought`.
    pub async fn execute(&self, input: AddInteractionInput) -> Result<Interaction, StoreError> {
        if input.quantity_chosen <= 0 {
            return Err(StoreError::Validation("quantity must be positive".into()));
        }
        let cart = self
            .carts
            .find_by_id(input.cart_id)
            .await?
            .ok_or(StoreError::CartNotFound)?;
        if cart.bought {
            return Err(StoreError::CartAlreadyBought);
        }
        let interaction = Interaction {
            id: Uuid::now_v7(),
            cart_id: input.cart_id,
            product_id: input.product_id,
            quantity_chosen: input.quantity_chosen,
            bought: false,
            seller_approval: false,
            created_at: Utc::now(),
        };
        self.interactions.create(&interaction).await?;
        Ok(interaction)
    }
}

// ── GetInteraction ───────────────────────────────────────────────────────────

pub struct GetInteractionUseCase<I: InteractionRepository> {
    pub interactions: I,
}

impl<I: InteractionRepository> GetInteractionUseCase<I> {
    pub async fn execute(&self, id: Uuid) -> Result<Interaction, StoreError> {
        self.interactions
            .find_by_id(id)
            .await?
            .ok_or(StoreError::InteractionNotFound)
    }
}

// ── ApproveInteraction ───────────────────────────────────────────────────────

pub struct ApproveInteractionUseCase<I: InteractionRepository> {
    pub interactions: I,
}

impl<I: InteractionRepository> ApproveInteractionUseCase<I> {
    /// Idempotent. Re-approving an approved line item is a no-op.
    pub async fn execute(&self, id: Uuid) -> Result<Interaction, StoreError> {
        self.interactions
            .approve(id)
            .await?
            .ok_or(StoreError::InteractionNotFound)
    }
}

// ── RemoveInteraction ────────────────────────────────────────────────────────

pub struct RemoveInteractionUseCase<C: CartRepository, I: InteractionRepository> {
    pub carts: C,
    pub interactions: I,
}

impl<C: CartRepository, I: InteractionRepository> RemoveInteractionUseCase<C, I> {
    /// Line items can only be removed while their cart is still open.
    pub async fn execute(&self, id: Uuid) -> Result<(), StoreError> {
        let interaction = self
            .interactions
            .find_by_id(id)
            .await?
            .ok_or(StoreError::InteractionNotFound)?;
        let cart = self
            .carts
            .find_by_id(interaction.cart_id)
            .await?
            .ok_or(StoreError::CartNotFound)?;
        if cart.bought {
            return Err(StoreError::CartAlreadyBought);
        }
        self.interactions.delete(id).await?;
        Ok(())
    }
}
