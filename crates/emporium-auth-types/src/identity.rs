//! Authenticated-identity extractors.
//!
//! The store service's authentication middleware validates the bearer token
//! and stores an [`Identity`] in the request extensions. Handlers pull it out
//! with one of the two extractors below.

use axum::extract::FromRequestParts;
use http::StatusCode;
use http::request::Parts;
use uuid::Uuid;

use emporium_domain::user::RoleFlags;

/// Identity decoded from a validated access token.
///
/// The role flags are a snapshot taken at token issuance; role changes made
/// after login are not visible until the user re-authenticates.
#[derive(Debug, Clone)]
pub struct Identity {
    pub id: Uuid,
    pub username: String,
    pub role: RoleFlags,
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // Extract synchronously, return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let identity = parts.extensions.get::<Identity>().cloned();
        async move { identity.ok_or(StatusCode::UNAUTHORIZED) }
    }
}

/// Like [`Identity`] but never rejects: anonymous requests yield `None`.
///
/// Use on routes where authentication is optional and the guard layer makes
/// the call.
#[derive(Debug, Clone)]
pub struct MaybeIdentity(pub Option<Identity>);

impl<S> FromRequestParts<S> for MaybeIdentity
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let identity = parts.extensions.get::<Identity>().cloned();
        async move { Ok(Self(identity)) }
    }
}
