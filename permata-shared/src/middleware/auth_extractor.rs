use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use crate::errors::{AppError, ErrorCode};
use crate::types::auth::{AuthUser, Claims, UserRole};

const DEV_JWT_SECRET: &str = "development-secret-change-in-production";

/// HS256 secret shared with the identity provider that signs session tokens.
pub fn jwt_secret() -> String {
    std::env::var("JWT_SECRET").unwrap_or_else(|_| DEV_JWT_SECRET.to_string())
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = extract_bearer_token(&parts.headers)?;
        let claims = validate_jwt(token)?;

        if claims.is_expired() {
            return Err(AppError::new(ErrorCode::TokenExpired, "token has expired"));
        }

        Ok(AuthUser::from(claims))
    }
}

fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let auth_header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or_else(|| AppError::unauthorized("missing authorization header"))?
        .to_str()
        .map_err(|_| AppError::unauthorized("invalid authorization header"))?;

    auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::unauthorized("authorization header must use Bearer scheme"))
}

fn validate_jwt(token: &str) -> Result<Claims, AppError> {
    let secret = jwt_secret();

    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    let token_data = decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                AppError::new(ErrorCode::TokenExpired, "token has expired")
            }
            _ => AppError::new(ErrorCode::TokenInvalid, format!("invalid token: {e}")),
        })?;

    Ok(token_data.claims)
}

/// Require the admin role.
pub struct AdminUser(pub AuthUser);

#[axum::async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != UserRole::Admin {
            return Err(AppError::forbidden("admin access required"));
        }
        Ok(Self(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use uuid::Uuid;

    fn token_for(role: UserRole, ttl: i64) -> String {
        let claims = Claims::new(Uuid::new_v4(), role, ttl);
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(jwt_secret().as_bytes()),
        )
        .expect("encode token")
    }

    fn parts_with(auth: Option<String>) -> Parts {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = auth {
            builder = builder.header("Authorization", value);
        }
        builder.body(()).expect("request").into_parts().0
    }

    #[tokio::test]
    async fn missing_header_is_unauthorized() {
        let mut parts = parts_with(None);
        let err = AuthUser::from_request_parts(&mut parts, &()).await.unwrap_err();
        assert_eq!(err.error_code(), ErrorCode::Unauthorized);
    }

    #[tokio::test]
    async fn non_bearer_scheme_is_rejected() {
        let mut parts = parts_with(Some("Basic Zm9vOmJhcg==".into()));
        let err = AuthUser::from_request_parts(&mut parts, &()).await.unwrap_err();
        assert_eq!(err.error_code(), ErrorCode::Unauthorized);
    }

    #[tokio::test]
    async fn garbage_token_is_invalid() {
        let mut parts = parts_with(Some("Bearer not-a-jwt".into()));
        let err = AuthUser::from_request_parts(&mut parts, &()).await.unwrap_err();
        assert_eq!(err.error_code(), ErrorCode::TokenInvalid);
    }

    #[tokio::test]
    async fn expired_token_is_reported_as_expired() {
        let mut parts = parts_with(Some(format!("Bearer {}", token_for(UserRole::User, -3600))));
        let err = AuthUser::from_request_parts(&mut parts, &()).await.unwrap_err();
        assert_eq!(err.error_code(), ErrorCode::TokenExpired);
    }

    #[tokio::test]
    async fn admin_extractor_rejects_plain_users() {
        let mut parts = parts_with(Some(format!("Bearer {}", token_for(UserRole::User, 3600))));
        let err = AdminUser::from_request_parts(&mut parts, &()).await.err().expect("forbidden");
        assert_eq!(err.error_code(), ErrorCode::Forbidden);

        let mut parts = parts_with(Some(format!("Bearer {}", token_for(UserRole::Admin, 3600))));
        let AdminUser(user) = AdminUser::from_request_parts(&mut parts, &()).await.expect("admin");
        assert!(user.is_admin());
    }
}
