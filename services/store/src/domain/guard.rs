//! Authorization predicates evaluated by handlers before ledger operations.
//!
//! Each route declares the predicates it needs, in order. Resource-scoped
//! predicates resolve the target through a repository first and surface
//! `*NotFound` when the resource is absent. That 404 reaches unauthorized
//! callers too, so resource existence is observable without ownership; the
//! alternative (masking as 403) was rejected to keep client error handling
//! simple.

use uuid::Uuid;

use emporium_auth_types::identity::Identity;

use crate::domain::repository::{
    CartRepository, InteractionRepository, ProductRepository, UserRepository,
};
use crate::error::StoreError;

/// An identity must be present at all. Anonymous callers get `Unauthorized`.
pub fn logged_in(identity: Option<&Identity>) -> Result<&Identity, StoreError> {
    identity.ok_or(StoreError::Unauthorized)
}

pub fn admin(identity: &Identity) -> Result<(), StoreError> {
    if identity.role.is_admin {
        Ok(())
    } else {
        Err(StoreError::Forbidden)
    }
}

pub fn seller(identity: &Identity) -> Result<(), StoreError> {
    if identity.role.is_seller {
        Ok(())
    } else {
        Err(StoreError::Forbidden)
    }
}

pub fn seller_or_admin(identity: &Identity) -> Result<(), StoreError> {
    if identity.role.is_seller || identity.role.is_admin {
        Ok(())
    } else {
        Err(StoreError::Forbidden)
    }
}

/// The caller is the user named in the path, or an admin.
pub fn correct_user_or_admin(identity: &Identity, username: &str) -> Result<(), StoreError> {
    if identity.role.is_admin || identity.username == username {
        Ok(())
    } else {
        Err(StoreError::Forbidden)
    }
}

/// The caller is the seller of the product, or an admin.
///
/// Resolves the product, then its seller account. Either lookup missing
/// surfaces the matching `*NotFound` before the authorization verdict.
pub async fn correct_seller_or_admin(
    identity: &Identity,
    product_id: Uuid,
    products: &impl ProductRepository,
    users: &impl UserRepository,
) -> Result<(), StoreError> {
    let product = products
        .find_by_id(product_id)
        .await?
        .ok_or(StoreError::ProductNotFound)?;
    let owner = users
        .find_by_id(product.seller_id)
        .await?
        .ok_or(StoreError::UserNotFound)?;
    if identity.role.is_admin || identity.username == owner.username {
        Ok(())
    } else {
        Err(StoreError::Forbidden)
    }
}

/// The caller owns the cart, or is an admin.
pub async fn owner_of_cart_or_admin(
    identity: &Identity,
    cart_id: Uuid,
    carts: &impl CartRepository,
) -> Result<(), StoreError> {
    let cart = carts
        .find_by_id(cart_id)
        .await?
        .ok_or(StoreError::CartNotFound)?;
    if identity.role.is_admin || identity.id == cart.customer_id {
        Ok(())
    } else {
        Err(StoreError::Forbidden)
    }
}

/// The caller owns the cart the interaction belongs to, or is an admin.
pub async fn owner_of_interaction_or_admin(
    identity: &Identity,
    interaction_id: Uuid,
    interactions: &impl InteractionRepository,
    carts: &impl CartRepository,
) -> Result<(), StoreError> {
    let interaction = interactions
        .find_by_id(interaction_id)
        .await?
        .ok_or(StoreError::InteractionNotFound)?;
    owner_of_cart_or_admin(identity, interaction.cart_id, carts).await
}
