use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use emporium_auth_types::token::issue_access_token;

use crate::error::StoreError;
use crate::state::AppState;
use crate::usecase::user::{AuthenticateUseCase, RegisterUserInput, RegisterUserUseCase};

#[derive(Serialize)]
pub struct TokenResponse {
    pub token: String,
}

// ── POST /auth/register ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub is_seller: bool,
    pub age: Option<i16>,
    pub address: Option<String>,
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<TokenResponse>), StoreError> {
    let usecase = RegisterUserUseCase {
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
    let token = issue_access_token(user.id, &user.username, user.role, &state.jwt_secret)
        .map_err(|e| StoreError::Internal(anyhow::anyhow!("sign access token: {e}")))?;
    Ok((StatusCode::CREATED, Json(TokenResponse { token })))
}

// ── POST /auth/login ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, StoreError> {
    let usecase = AuthenticateUseCase {
        repo: state.user_repo(),
    };
    let user = usecase.execute(&body.username, &body.password).await?;
    let token = issue_access_token(user.id, &user.username, user.role, &state.jwt_secret)
        .map_err(|e| StoreError::Internal(anyhow::anyhow!("sign access token: {e}")))?;
    Ok(Json(TokenResponse { token }))
}
