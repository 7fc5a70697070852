//! Bearer-token extractor producing an org-scoped staff principal.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use sponsorops_core::error::CoreError;
use sponsorops_core::principal::Principal;
use sponsorops_db::repositories::UserRepo;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated staff member extracted from a JWT Bearer token in the
/// `Authorization` header.
///
/// The wrapped principal is always [`Principal::OrgStaff`]; the organization
/// scope is re-read from the user row on every request so business logic
/// receives it as an explicit value, never inferred from the token.
///
/// ```ignore
/// async fn my_handler(Staff(principal): Staff) -> AppResult<Json<()>> {
///     let org_id = principal.require_staff()?;
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Staff(pub Principal);

impl FromRequestParts<AppState> for Staff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        let user = UserRepo::find_by_id(&state.pool, claims.sub)
            .await?
            .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User not found".into())))?;

        Ok(Staff(Principal::OrgStaff {
            user_id: user.id,
            organization_id: user.organization_id,
            actor: user.email,
        }))
    }
}
