// src/auth/route_control.rs

use std::sync::LazyLock;

use regex::Regex;

use crate::models::user::UserRole;

use UserRole::{Admin, Aluno, Manager, Member, Professor};

const ALL_ALLOWED: &[UserRole] = &[Member, Manager, Admin];
const STAFF: &[UserRole] = &[Professor, Admin];
const STUDENT_VIEWERS: &[UserRole] = &[Aluno, Professor, Admin];
const ANY_ROLE: &[UserRole] = &[Admin, Manager, Member, Professor, Aluno];

/// Paths reachable without a session.
pub const PUBLIC_ROUTES: &[&str] = &[
    "/login",
    "/auth/verify-token",
    "/unauthorized",
    "/example",
    "/api/health",
];

/// A path pattern and the roles allowed to open it.
/// Dynamic segments are written in brackets: `/api/aluno/[alunoId]`.
#[derive(Debug, Clone, Copy)]
pub struct RoutePermission {
    pub path: &'static str,
    pub roles_allowed: &'static [UserRole],
}

/// Ordered table; the first matching entry decides.
pub const ROUTES_PERMISSIONS: &[RoutePermission] = &[
    RoutePermission { path: "/", roles_allowed: ALL_ALLOWED },
    RoutePermission { path: "/admin-page", roles_allowed: &[Admin] },
    RoutePermission { path: "/member-page", roles_allowed: &[Member] },
    RoutePermission { path: "/posts", roles_allowed: ALL_ALLOWED },
    RoutePermission { path: "/professor", roles_allowed: STAFF },
    RoutePermission { path: "/professor/turmas/[turmaId]", roles_allowed: STAFF },
    RoutePermission { path: "/aluno", roles_allowed: &[Aluno] },
    RoutePermission { path: "/api/aluno/[alunoId]/atividades", roles_allowed: STUDENT_VIEWERS },
    RoutePermission { path: "/api/aluno/[alunoId]/atividades/[listaId]", roles_allowed: STUDENT_VIEWERS },
    RoutePermission { path: "/api/aluno/[alunoId]/estatisticas", roles_allowed: STUDENT_VIEWERS },
    RoutePermission { path: "/api/aluno/[alunoId]/ranking", roles_allowed: STUDENT_VIEWERS },
    RoutePermission { path: "/api/turmas/[turmaId]/estatisticas", roles_allowed: STAFF },
    RoutePermission { path: "/api/permissions/check", roles_allowed: ANY_ROLE },
];

static COMPILED: LazyLock<Vec<(Regex, &'static RoutePermission)>> = LazyLock::new(|| {
    ROUTES_PERMISSIONS
        .iter()
        .filter_map(|route| match pattern_regex(route.path) {
            Ok(regex) => Some((regex, route)),
            Err(e) => {
                tracing::error!("Invalid route pattern {}: {}", route.path, e);
                None
            }
        })
        .collect()
});

/// Turns `/a/[id]/b` into `^/a/([^/]+)/b$`, escaping the literal segments.
fn pattern_regex(path: &str) -> Result<Regex, regex::Error> {
    let segments: Vec<String> = path
        .split('/')
        .map(|segment| {
            if segment.len() > 2 && segment.starts_with('[') && segment.ends_with(']') {
                "([^/]+)".to_string()
            } else {
                regex::escape(segment)
            }
        })
        .collect();

    Regex::new(&format!("^{}$", segments.join("/")))
}

pub fn is_public_route(path: &str) -> bool {
    PUBLIC_ROUTES.contains(&path)
}

/// Whether `role` may open `path`, per the first table entry that matches it.
/// Paths missing from the table are denied.
pub fn check_route_permission(path: &str, role: UserRole) -> bool {
    COMPILED
        .iter()
        .find(|(regex, route)| route.path == path || regex.is_match(path))
        .is_some_and(|(_, route)| route.roles_allowed.contains(&role))
}

/// Public routes are open to everyone; the rest go through the table.
pub fn check_route_access(path: &str, role: UserRole) -> bool {
    is_public_route(path) || check_route_permission(path, role)
}
