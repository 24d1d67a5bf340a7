// src/models/attempt.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'tentativas' table: one submitted answer.
/// Rows are never updated once written.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Attempt {
    pub id: String,
    pub questao_id: String,
    pub aluno_id: String,
    pub resposta: String,
    pub correta: bool,

    /// 1-based, per student per question.
    pub numero_tentativa: i32,

    /// Time spent answering, in seconds.
    pub tempo_resposta: i32,

    pub respondida_em: chrono::DateTime<chrono::Utc>,
}
