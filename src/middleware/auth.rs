use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::state::AppState;

pub const ADMIN_KEY_HEADER: &str = "x-admin-key";

/// Extractor guarding admin routes. The caller's `x-admin-key` header must
/// exactly equal the configured secret. A missing server-side secret is a
/// configuration error (500), never an authorization failure (401), so
/// operators can tell the two apart.
pub struct AdminKey;

impl FromRequestParts<AppState> for AdminKey {
    type Rejection = AppError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let expected = state.admin_key.clone();
        let provided = parts
            .headers
            .get(ADMIN_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        async move {
            let expected = expected.ok_or_else(|| {
                AppError::Config("Server misconfigured: ADMIN_KEY is not set.".to_string())
            })?;

            match provided {
                Some(key) if key == expected => Ok(AdminKey),
                _ => Err(AppError::Unauthorized(
                    "Admin key required or invalid.".to_string(),
                )),
            }
        }
    }
}
