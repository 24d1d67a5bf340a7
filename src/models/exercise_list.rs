// src/models/exercise_list.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{null_as_empty, question::Question};

pub const STATUS_RASCUNHO: &str = "RASCUNHO";
pub const STATUS_PUBLICADO: &str = "PUBLICADO";

/// Represents the 'listas_exercicio' table.
///
/// `questoes` is filled by the store in list order (`lista_questoes.ordem`).
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ExerciseList {
    pub id: String,
    pub turma_id: String,
    pub titulo: String,
    pub descricao: Option<String>,

    /// 'RASCUNHO' (draft) or 'PUBLICADO'.
    pub status: String,

    pub data_liberacao: Option<chrono::DateTime<chrono::Utc>>,
    pub data_limite: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,

    #[sqlx(skip)]
    #[serde(default, deserialize_with = "null_as_empty")]
    pub questoes: Vec<Question>,
}

impl ExerciseList {
    pub fn is_published(&self) -> bool {
        self.status == STATUS_PUBLICADO
    }
}
