use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Store service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    Validation(String),
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("user not found")]
    UserNotFound,
    #[error("product not found")]
    ProductNotFound,
    #[error("cart not found")]
    CartNotFound,
    #[error("interaction not found")]
    InteractionNotFound,
    #[error("username already taken")]
    DuplicateUser,
    #[error("seller already lists an in-stock product with this name")]
    DuplicateProduct,
    #[error("customer already has an open cart")]
    CartAlreadyOpen,
    #[error("cart is already bought")]
    CartAlreadyBought,
    #[error("payment upstream error")]
    PaymentUpstream,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl StoreError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::ProductNotFound => "PRODUCT_NOT_FOUND",
            Self::CartNotFound => "CART_NOT_FOUND",
            Self::InteractionNotFound => "INTERACTION_NOT_FOUND",
            Self::DuplicateUser => "DUPLICATE_USER",
            Self::DuplicateProduct => "DUPLICATE_PRODUCT",
            Self::CartAlreadyOpen => "CART_ALREADY_OPEN",
            Self::CartAlreadyBought => "CART_ALREADY_BOUGHT",
            Self::PaymentUpstream => "PAYMENT_UPSTREAM",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials | Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::UserNotFound
            | Self::ProductNotFound
            | Self::CartNotFound
            | Self::InteractionNotFound => StatusCode::NOT_FOUND,
            Self::DuplicateUser
            | Self::DuplicateProduct
            | Self::CartAlreadyOpen
            | Self::CartAlreadyBought => StatusCode::CONFLICT,
            Self::PaymentUpstream => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Only internal errors carry a cause that is lost at the boundary.
        // TraceLayer records method/uri/status for every request.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
