// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::get,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{activities, classes, health, permissions},
    state::AppState,
    utils::jwt::route_guard,
};

/// Assembles the main application router.
///
/// * Every route except the health check goes through `route_guard`, which
///   authenticates the caller and checks the route permission table.
/// * Applies global middleware (Trace, CORS).
pub fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let student_routes = Router::new()
        .route("/api/aluno/{aluno_id}/atividades", get(activities::list_activities))
        .route(
            "/api/aluno/{aluno_id}/atividades/{lista_id}",
            get(activities::get_activity),
        )
        .route(
            "/api/aluno/{aluno_id}/estatisticas",
            get(activities::get_student_stats),
        )
        .route("/api/aluno/{aluno_id}/ranking", get(activities::get_class_ranking));

    let guarded_routes = Router::new()
        .merge(student_routes)
        .route("/api/turmas/{turma_id}/estatisticas", get(classes::get_class_stats))
        .route("/api/permissions/check", get(permissions::check_route))
        // route_layer: unmatched paths still fall through to 404
        .route_layer(middleware::from_fn_with_state(state.clone(), route_guard));

    Router::new()
        .route("/api/health", get(health::health))
        .merge(guarded_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
