use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use emporium_auth_types::token::validate_access_token;

use crate::state::AppState;

/// Decode the bearer token, if any, and stash the identity in the request
/// extensions for the `Identity`/`MaybeIdentity` extractors.
///
/// An absent, expired, or otherwise invalid token leaves the request
/// anonymous; per-route guards decide whether anonymous is acceptable.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let bearer = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));
    if let Some(token) = bearer {
        match validate_access_token(token, &state.jwt_secret) {
            Ok(identity) => {
                request.extensions_mut().insert(identity);
            }
            Err(e) => {
                tracing::debug!(error = %e, "ignoring invalid bearer token");
            }
        }
    }
    next.run(request).await
}
