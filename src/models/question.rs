// src/models/question.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{attempt::Attempt, null_as_empty};

/// Represents the 'questoes' table, scoped to one student.
///
/// `tentativas` is not a column: the store fills it with the student's
/// attempts on this question, most recent first.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Question {
    pub id: String,

    /// Prompt text.
    pub enunciado: String,

    /// 'MULTIPLA_ESCOLHA', 'NUMERICA', 'VERDADEIRO_FALSO' or 'RESPOSTA_CURTA'.
    pub tipo: String,

    /// Serialized options, stored as JSONB.
    pub opcoes: Option<serde_json::Value>,

    /// Answer key.
    pub gabarito: String,

    pub explicacao: Option<String>,

    /// 1 (easy) to 5 (hard).
    pub dificuldade: i32,

    #[sqlx(skip)]
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tentativas: Vec<Attempt>,
}

/// A question row joined with its position inside an exercise list.
#[derive(Debug, FromRow)]
pub struct ListQuestionRow {
    pub lista_id: String,
    pub ordem: i32,
    #[sqlx(flatten)]
    pub questao: Question,
}
