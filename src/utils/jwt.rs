// src/utils/jwt.rs

use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{
    auth::route_control::check_route_access,
    config::Config,
    error::AppError,
    models::user::UserRole,
};

/// JWT Claims structure.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Claims {
    /// Subject - the user ID.
    pub sub: String,
    /// User's role, e.g. 'ALUNO'.
    pub role: String,
    /// Expiration time as Unix timestamp.
    pub exp: usize,
}

impl Claims {
    pub fn user_role(&self) -> Option<UserRole> {
        self.role.parse().ok()
    }
}

/// Signs a token the way the session issuer does.
pub fn sign_jwt(
    user_id: &str,
    role: UserRole,
    secret: &str,
    expiration_seconds: u64,
) -> Result<String, AppError> {
    let expiration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .as_secs() as usize
        + expiration_seconds as usize;

    let claims = Claims {
        sub: user_id.to_owned(),
        role: role.as_str().to_owned(),
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(e.to_string()))
}

/// Verifies and decodes a JWT string.
pub fn verify_jwt(token: &str, secret: &str) -> Result<Claims, AppError> {
    let token_data = decode(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::AuthError("Token inválido".to_string()))?;

    Ok(token_data.claims)
}

/// Axum Middleware: authentication + route permission.
///
/// Validates the 'Authorization: Bearer <token>' header, then checks the
/// caller's role against the route table for the request path.
/// 401 without a valid token, 403 when the role may not open the path.
/// On success the `Claims` are injected into the request extensions.
pub async fn route_guard(
    State(config): State<Config>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::AuthError("Sessão não encontrada".to_string()))?;

    let claims = verify_jwt(token, &config.jwt_secret)?;

    let Some(role) = claims.user_role() else {
        tracing::warn!("Rejected token with unknown role '{}'", claims.role);
        return Err(AppError::Forbidden("Perfil de usuário desconhecido".to_string()));
    };

    let path = req.uri().path();
    if !check_route_access(path, role) {
        tracing::debug!("Role {} denied on {}", role, path);
        return Err(AppError::Forbidden("Acesso negado".to_string()));
    }

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_tokens_verify_with_the_same_secret() {
        let token = sign_jwt("aluno-1", UserRole::Aluno, "secret", 60).unwrap();
        let claims = verify_jwt(&token, "secret").unwrap();
        assert_eq!(claims.sub, "aluno-1");
        assert_eq!(claims.user_role(), Some(UserRole::Aluno));
    }

    #[test]
    fn tokens_signed_with_another_secret_are_rejected() {
        let token = sign_jwt("aluno-1", UserRole::Aluno, "secret", 60).unwrap();
        assert!(matches!(verify_jwt(&token, "other"), Err(AppError::AuthError(_))));
    }
}
