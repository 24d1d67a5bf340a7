// src/auth/permissions.rs

use serde::{Deserialize, Serialize};

use crate::models::user::UserRole;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
    Create,
    Read,
    Update,
    SoftDelete,
    HardDelete,
    SoftDeleteAll,
}

use Permission::*;

/// Actions granted to each role.
pub fn role_permissions(role: UserRole) -> &'static [Permission] {
    match role {
        UserRole::Member => &[Read, Create],
        UserRole::Manager | UserRole::Professor => &[Read, Create, Update, SoftDelete],
        UserRole::Admin => &[Read, Create, Update, SoftDelete, HardDelete, SoftDeleteAll],
        UserRole::Aluno => &[Read],
    }
}

/// True when the role holds at least one of `wanted`.
pub fn check_permission(role: UserRole, wanted: &[Permission]) -> bool {
    let granted = role_permissions(role);
    wanted.iter().any(|permission| granted.contains(permission))
}
