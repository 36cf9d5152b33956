//! JWT-based authentication extractor for Axum handlers.

use aistagram_core::error::GenError;
use aistagram_core::types::EntityId;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a JWT Bearer token in the `Authorization` header.
///
/// Use this as an extractor parameter in any handler that requires authentication:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's id (from `claims.sub`).
    pub user_id: EntityId,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Gen(GenError::Unauthenticated))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AppError::Gen(GenError::Unauthenticated))?;

        let claims = validate_token(token, &state.config.jwt)
            .map_err(|_| AppError::Gen(GenError::Unauthenticated))?;

        Ok(AuthUser {
            user_id: claims.sub,
        })
    }
}
