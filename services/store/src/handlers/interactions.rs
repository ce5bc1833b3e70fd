use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use emporium_auth_types::identity::MaybeIdentity;

use crate::domain::guard;
use crate::domain::types::Interaction;
use crate::error::StoreError;
use crate::state::AppState;
use crate::usecase::interaction::{
    AddInteractionInput, AddInteractionUseCase, ApproveInteractionUseCase, GetInteractionUseCase,
    RemoveInteractionUseCase,
};

#[derive(Serialize)]
pub struct InteractionResponse {
    pub id: String,
    pub cart_id: String,
    pub product_id: String,
    pub quantity_chosen: i32,
    pub bought: bool,
    pub seller_approval: bool,
    #[serde(serialize_with = "emporium_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Interaction> for InteractionResponse {
    fn from(interaction: Interaction) -> Self {
        Self {
            id: interaction.id.to_string(),
            cart_id: interaction.cart_id.to_string(),
            product_id: interaction.product_id.to_string(),
            quantity_chosen: interaction.quantity_chosen,
            bought: interaction.bought,
            seller_approval: interaction.seller_approval,
            created_at: interaction.created_at,
        }
    }
}

// ── POST /interactions ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateInteractionRequest {
    pub cart_id: Uuid,
    pub product_id: Uuid,
    pub quantity_chosen: i32,
}

pub async fn create_interaction(
    MaybeIdentity(identity): MaybeIdentity,
    State(state): State<AppState>,
    Json(body): Json<CreateInteractionRequest>,
) -> Result<(StatusCode, Json<InteractionResponse>), StoreError> {
    let identity = guard::logged_in(identity.as_ref())?;
    guard::owner_of_cart_or_admin(identity, body.cart_id, &state.cart_repo()).await?;
    let usecase = AddInteractionUseCase {
        carts: state.cart_repo(),
        interactions: state.interaction_repo(),
    };
    let interaction = usecase
        .execute(AddInteractionInput {
            cart_id: body.cart_id,
            product_id: body.product_id,
            quantity_chosen: body.quantity_chosen,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(interaction.into())))
}

// ── GET /interactions/{id} ───────────────────────────────────────────────────

pub async fn get_interaction(
    MaybeIdentity(identity): MaybeIdentity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InteractionResponse>, StoreError> {
    let identity = guard::logged_in(identity.as_ref())?;
    guard::owner_of_interaction_or_admin(
        identity,
        id,
        &state.interaction_repo(),
        &state.cart_repo(),
    )
    .await?;
    let usecase = GetInteractionUseCase {
        interactions: state.interaction_repo(),
    };
    let interaction = usecase.execute(id).await?;
    Ok(Json(interaction.into()))
}

// ── PATCH /interactions/{id} ─────────────────────────────────────────────────

/// Seller approval. The seller of the referenced product (or an admin)
/// acknowledges the sold line item.
pub async fn approve_interaction(
    MaybeIdentity(identity): MaybeIdentity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InteractionResponse>, StoreError> {
    let identity = guard::logged_in(identity.as_ref())?;
    let interaction = GetInteractionUseCase {
        interactions: state.interaction_repo(),
    }
    .execute(id)
    .await?;
    guard::correct_seller_or_admin(
        identity,
        interaction.product_id,
        &state.product_repo(),
        &state.user_repo(),
    )
    .await?;
    let usecase = ApproveInteractionUseCase {
        interactions: state.interaction_repo(),
    };
    let interaction = usecase.execute(id).await?;
    Ok(Json(interaction.into()))
}

// ── DELETE /interactions/{id} ────────────────────────────────────────────────

pub async fn delete_interaction(
    MaybeIdentity(identity): MaybeIdentity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, StoreError> {
    let identity = guard::logged_in(identity.as_ref())?;
    guard::owner_of_interaction_or_admin(
        identity,
        id,
        &state.interaction_repo(),
        &state.cart_repo(),
    )
    .await?;
    let usecase = RemoveInteractionUseCase {
        carts: state.cart_repo(),
        interactions: state.interaction_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
