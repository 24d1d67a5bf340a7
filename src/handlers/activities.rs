// src/handlers/activities.rs

use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::{
    error::AppError,
    models::{
        activity::{ActivitySummary, StudentStats},
        user::{User, UserRole},
    },
    repository::DynRepository,
    services::progress,
    utils::jwt::Claims,
};

/// Loads the student a request is about.
///
/// A student may only read their own data (403). A missing user, or one that
/// is not a student, is reported as 404.
async fn load_student(
    repo: &DynRepository,
    claims: &Claims,
    aluno_id: &str,
) -> Result<User, AppError> {
    if claims.user_role() == Some(UserRole::Aluno) && claims.sub != aluno_id {
        return Err(AppError::Forbidden(
            "Você só pode acessar suas próprias atividades".to_string(),
        ));
    }

    repo.find_user(aluno_id)
        .await?
        .filter(User::is_student)
        .ok_or(AppError::NotFound("Aluno não encontrado".to_string()))
}

async fn student_class(repo: &DynRepository, aluno: &User) -> Result<String, AppError> {
    repo.find_student_class(&aluno.id)
        .await?
        .ok_or(AppError::BadRequest(
            "Aluno não está matriculado em uma turma".to_string(),
        ))
}

/// Published lists of a class, summarized with one student's progress.
async fn class_summaries(
    repo: &DynRepository,
    turma_id: &str,
    aluno_id: &str,
) -> Result<Vec<ActivitySummary>, AppError> {
    let listas = repo.list_published_lists(turma_id, aluno_id).await?;

    Ok(listas.iter().map(progress::summarize).collect())
}

/// Every student of a class with their totals over its published lists.
pub(crate) async fn class_standings(
    repo: &DynRepository,
    turma_id: &str,
) -> Result<Vec<(User, StudentStats)>, AppError> {
    let mut standings = Vec::new();
    for aluno in repo.list_class_students(turma_id).await? {
        let summaries = class_summaries(repo, turma_id, &aluno.id).await?;
        standings.push((aluno, progress::student_stats(&summaries)));
    }
    Ok(standings)
}

/// GET /api/aluno/{aluno_id}/atividades
///
/// Every published list of the student's class, newest first.
pub async fn list_activities(
    State(repo): State<DynRepository>,
    Extension(claims): Extension<Claims>,
    Path(aluno_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let aluno = load_student(&repo, &claims, &aluno_id).await?;
    let turma_id = student_class(&repo, &aluno).await?;
    let summaries = class_summaries(&repo, &turma_id, &aluno.id).await?;

    tracing::debug!("Listed {} activities for student {}", summaries.len(), aluno.id);

    Ok(Json(summaries))
}

/// GET /api/aluno/{aluno_id}/atividades/{lista_id}
///
/// 404 when the list does not exist, 400 while it is still a draft.
pub async fn get_activity(
    State(repo): State<DynRepository>,
    Extension(claims): Extension<Claims>,
    Path((aluno_id, lista_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let aluno = load_student(&repo, &claims, &aluno_id).await?;

    let lista = repo
        .find_list(&lista_id, &aluno.id)
        .await?
        .ok_or(AppError::NotFound(
            "Lista de exercícios não encontrada".to_string(),
        ))?;

    if !lista.is_published() {
        return Err(AppError::BadRequest(
            "Esta atividade ainda não está disponível".to_string(),
        ));
    }

    Ok(Json(progress::summarize(&lista)))
}

/// GET /api/aluno/{aluno_id}/estatisticas
///
/// Totals over every published list of the student's class.
pub async fn get_student_stats(
    State(repo): State<DynRepository>,
    Extension(claims): Extension<Claims>,
    Path(aluno_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let aluno = load_student(&repo, &claims, &aluno_id).await?;
    let turma_id = student_class(&repo, &aluno).await?;
    let summaries = class_summaries(&repo, &turma_id, &aluno.id).await?;

    Ok(Json(progress::student_stats(&summaries)))
}

/// GET /api/aluno/{aluno_id}/ranking
///
/// The student's class, ranked by correct answers.
pub async fn get_class_ranking(
    State(repo): State<DynRepository>,
    Extension(claims): Extension<Claims>,
    Path(aluno_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let aluno = load_student(&repo, &claims, &aluno_id).await?;
    let turma_id = student_class(&repo, &aluno).await?;
    let standings = class_standings(&repo, &turma_id).await?;

    tracing::debug!("Ranked {} students of class {}", standings.len(), turma_id);

    Ok(Json(progress::ranking(standings)))
}
