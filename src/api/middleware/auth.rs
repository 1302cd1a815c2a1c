//! JWT authentication middleware.
//!
//! Validates bearer tokens and exposes the caller as [`AuthAdmin`].

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::jwt::{Claims, validate_access_token};

/// Authenticated admin, inserted into request extensions by
/// [`auth_middleware`] and read in handlers with `Extension<AuthAdmin>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthAdmin {
    pub admin_id: i32,
    pub email: String,
    pub name: String,
}

impl TryFrom<Claims> for AuthAdmin {
    type Error = AppError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        Ok(Self {
            admin_id: claims.admin_id()?,
            email: claims.email,
            name: claims.name,
        })
    }
}

/// JWT authentication middleware
///
/// # Headers
/// Expects: `Authorization: Bearer <token>`
///
/// # Errors
/// Returns 401 Unauthorized if the header is missing or malformed, or the
/// token fails validation.
///
/// # Example
/// ```ignore
/// Router::new()
///     .route("/me", get(handler))
///     .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
/// ```
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized {
            message: "Missing authorization header".to_string(),
        })?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized {
            message: "Invalid authorization header format. Expected: Bearer <token>".to_string(),
        })?;

    let claims = validate_access_token(token, &state.settings.jwt.secret)?;
    let admin = AuthAdmin::try_from(claims)?;

    tracing::debug!(admin_id = admin.admin_id, "Request authenticated");
    request.extensions_mut().insert(admin);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::jwt::TokenType;

    fn claims(sub: &str) -> Claims {
        Claims {
            sub: sub.to_string(),
            email: "admin@example.com".to_string(),
            name: "Ada".to_string(),
            token_type: TokenType::Access,
            iat: 0,
            exp: 9999999999,
        }
    }

    #[test]
    fn test_auth_admin_from_claims() {
        let admin = AuthAdmin::try_from(claims("123")).unwrap();
        assert_eq!(admin.admin_id, 123);
        assert_eq!(admin.email, "admin@example.com");
        assert_eq!(admin.name, "Ada");
    }

    #[test]
    fn test_auth_admin_rejects_non_numeric_subject() {
        assert!(matches!(
            AuthAdmin::try_from(claims("invalid")),
            Err(AppError::Unauthorized { .. })
        ));
    }
}
