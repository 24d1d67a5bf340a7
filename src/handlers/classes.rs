// src/handlers/classes.rs

use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::{
    error::AppError,
    handlers::activities::class_standings,
    models::{class::ClassStats, user::UserRole},
    repository::DynRepository,
    services::progress,
    utils::jwt::Claims,
};

/// GET /api/turmas/{turma_id}/estatisticas
///
/// Dashboard counters of a class. Professors only see their own classes;
/// admins see any.
pub async fn get_class_stats(
    State(repo): State<DynRepository>,
    Extension(claims): Extension<Claims>,
    Path(turma_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let turma = repo
        .find_class(&turma_id)
        .await?
        .ok_or(AppError::NotFound("Turma não encontrada".to_string()))?;

    if claims.user_role() != Some(UserRole::Admin) && turma.professor_id != claims.sub {
        return Err(AppError::Forbidden(
            "Você só pode acessar suas próprias turmas".to_string(),
        ));
    }

    let total_alunos = repo.count_class_students(&turma.id).await?;
    let total_listas = repo.count_class_lists(&turma.id).await?;

    let stats: Vec<_> = class_standings(&repo, &turma.id)
        .await?
        .into_iter()
        .map(|(_, stats)| stats)
        .collect();
    let (exercicios_resolvidos, media_acertos) = progress::class_performance(&stats);

    Ok(Json(ClassStats {
        id: turma.id,
        nome: turma.nome,
        total_alunos,
        total_listas,
        exercicios_resolvidos,
        media_acertos,
    }))
}
