// src/handlers/permissions.rs

use axum::{
    Extension, Json,
    extract::Query,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    auth::{
        permissions::{Permission, check_permission, role_permissions},
        route_control::check_route_access,
    },
    error::AppError,
    models::user::UserRole,
    utils::jwt::Claims,
};

/// Query parameters for a route permission lookup.
#[derive(Debug, Deserialize, Validate)]
pub struct PermissionCheckParams {
    #[validate(length(min = 1, max = 2048), custom(function = validate_absolute_path))]
    pub path: String,

    /// Optional action to check alongside the route, e.g. `UPDATE`.
    pub permission: Option<Permission>,
}

fn validate_absolute_path(path: &str) -> Result<(), validator::ValidationError> {
    if !path.starts_with('/') {
        return Err(validator::ValidationError::new("path_must_be_absolute"));
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct PermissionCheckResponse {
    pub path: String,
    pub role: UserRole,
    pub allowed: bool,
    /// Every action the role is granted.
    pub permissions: &'static [Permission],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub granted: Option<bool>,
}

/// GET /api/permissions/check?path=/admin-page&permission=UPDATE
///
/// Lets the frontend ask whether the caller's role may open a page, and
/// which actions it may take there.
pub async fn check_route(
    Extension(claims): Extension<Claims>,
    Query(params): Query<PermissionCheckParams>,
) -> Result<impl IntoResponse, AppError> {
    params
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let role = claims
        .user_role()
        .ok_or(AppError::Forbidden("Perfil de usuário desconhecido".to_string()))?;

    let allowed = check_route_access(&params.path, role);
    let granted = params
        .permission
        .map(|permission| check_permission(role, &[permission]));

    Ok(Json(PermissionCheckResponse {
        path: params.path,
        role,
        allowed,
        permissions: role_permissions(role),
        granted,
    }))
}
