use axum::{
    extract::Request,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{Json, Response},
};
use std::collections::HashSet;
use uuid::Uuid;

use crate::error::ApiError;
use crate::navigation::UserContext;

/// Authenticated user context forwarded by the upstream gateway. This service
/// does not mint or validate credentials; the gateway owns authentication and
/// passes identity down as trusted headers.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub is_super_admin: bool,
    pub permissions: HashSet<String>,
}

impl UserContext for AuthUser {
    fn is_super_admin(&self) -> bool {
        self.is_super_admin
    }

    fn has_any_permission(&self, required: &[String]) -> bool {
        required.iter().any(|p| self.permissions.contains(p))
    }
}

/// Middleware that builds the user context from gateway headers and injects
/// it into the request for handlers to consume
pub async fn identity_middleware(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, (StatusCode, Json<serde_json::Value>)> {
    let auth_user = auth_user_from_headers(&headers).map_err(|msg| {
        tracing::warn!("Identity rejected: {}", msg);
        let api_error = ApiError::unauthorized(msg);
        (
            StatusCode::from_u16(api_error.status_code()).unwrap_or(StatusCode::UNAUTHORIZED),
            Json(api_error.to_json()),
        )
    })?;

    tracing::debug!(
        "Identity accepted: {} ({} permissions, super_admin={})",
        auth_user.user_id,
        auth_user.permissions.len(),
        auth_user.is_super_admin
    );

    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

/// Parse the gateway identity headers: `x-auth-user-id` (required UUID),
/// `x-auth-permissions` (optional comma-separated tokens) and
/// `x-auth-super-admin` (optional bool, default false)
fn auth_user_from_headers(headers: &HeaderMap) -> Result<AuthUser, String> {
    let raw_id = headers
        .get("x-auth-user-id")
        .ok_or_else(|| "Missing x-auth-user-id header".to_string())?
        .to_str()
        .map_err(|_| "Invalid x-auth-user-id header format".to_string())?;

    let user_id = Uuid::parse_str(raw_id.trim())
        .map_err(|_| format!("Invalid user id '{}'", raw_id.trim()))?;

    let permissions: HashSet<String> = headers
        .get("x-auth-permissions")
        .and_then(|v| v.to_str().ok())
        .map(|s| {
            s.split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let is_super_admin = headers
        .get("x-auth-super-admin")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.trim().eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    Ok(AuthUser {
        user_id,
        is_super_admin,
        permissions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (k, v) in pairs {
            map.insert(
                axum::http::HeaderName::from_bytes(k.as_bytes()).unwrap(),
                HeaderValue::from_str(v).unwrap(),
            );
        }
        map
    }

    #[test]
    fn parses_full_identity() {
        let map = headers(&[
            ("x-auth-user-id", "11111111-1111-1111-1111-111111111111"),
            ("x-auth-permissions", "billing.manage, tickets.view"),
            ("x-auth-super-admin", "true"),
        ]);
        let user = auth_user_from_headers(&map).expect("valid identity");
        assert!(user.is_super_admin);
        assert_eq!(user.permissions.len(), 2);
        assert!(user.permissions.contains("billing.manage"));
    }

    #[test]
    fn missing_user_id_is_rejected() {
        let map = headers(&[("x-auth-permissions", "tickets.view")]);
        assert!(auth_user_from_headers(&map).is_err());
    }

    #[test]
    fn malformed_user_id_is_rejected() {
        let map = headers(&[("x-auth-user-id", "not-a-uuid")]);
        assert!(auth_user_from_headers(&map).is_err());
    }

    #[test]
    fn optional_headers_default_to_no_privileges() {
        let map = headers(&[("x-auth-user-id", "11111111-1111-1111-1111-111111111111")]);
        let user = auth_user_from_headers(&map).expect("valid identity");
        assert!(!user.is_super_admin);
        assert!(user.permissions.is_empty());
    }

    #[test]
    fn empty_permission_tokens_are_dropped() {
        let map = headers(&[
            ("x-auth-user-id", "11111111-1111-1111-1111-111111111111"),
            ("x-auth-permissions", " , tickets.view ,, "),
        ]);
        let user = auth_user_from_headers(&map).expect("valid identity");
        assert_eq!(user.permissions.len(), 1);
        assert!(user.permissions.contains("tickets.view"));
    }
}
