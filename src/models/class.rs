// src/models/class.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'turmas' table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Class {
    pub id: String,
    pub nome: String,

    /// School year, e.g. '6_ANO'.
    pub serie: Option<String>,

    pub professor_id: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Dashboard counters for one class.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClassStats {
    pub id: String,
    pub nome: String,
    pub total_alunos: i64,
    pub total_listas: i64,
    /// Questions answered by the class, summed over its students.
    pub exercicios_resolvidos: usize,
    /// Correct over answered, across the whole class.
    #[serde(serialize_with = "super::js_number")]
    pub media_acertos: f64,
}
