// src/models/activity.rs
//
// Response shapes of the student activity endpoints. Field names are part of
// the public JSON contract consumed by the frontend.

use serde::{Deserialize, Serialize};

/// One attempt as shown to the student.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AttemptResponse {
    pub id: String,
    pub resposta: String,
    pub correta: bool,
    pub tentativa_numero: i32,
    pub tempo_resposta: i32,
    /// ISO-8601, UTC, millisecond precision.
    pub created_at: String,
}

/// A question of a list with the student's attempt history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuestionProgress {
    pub id: String,
    pub enunciado: String,
    pub tipo: String,
    pub opcoes: Option<serde_json::Value>,
    pub gabarito: String,
    pub explicacao: Option<String>,
    pub dificuldade: i32,
    pub tentativas: Vec<AttemptResponse>,
    /// True when any attempt was correct.
    pub acertou: bool,
    pub numero_tentativas: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub total: usize,
    pub respondidas: usize,
    pub corretas: usize,
    #[serde(serialize_with = "super::js_number")]
    pub percentual_acerto: f64,
}

/// An exercise list summarized for one student.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySummary {
    pub id: String,
    pub titulo: String,
    pub descricao: Option<String>,
    pub data_inicio: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_fim: Option<String>,
    pub ativa: bool,
    pub questoes: Vec<QuestionProgress>,
    pub progresso: Progress,
}

/// Totals across every published list of the student's class.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StudentStats {
    pub total_listas: usize,
    pub total_questoes: usize,
    pub questoes_respondidas: usize,
    pub total_acertos: usize,
    pub total_tentativas: usize,
    #[serde(serialize_with = "super::js_number")]
    pub percentual_acerto: f64,
    /// Achievements earned; none are awarded yet.
    pub medalhas: u32,
}

/// A classmate's place in the class ranking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RankingEntry {
    /// 1-based.
    pub posicao: usize,
    pub aluno: RankedStudent,
    pub estatisticas: RankingStats,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RankedStudent {
    pub id: String,
    pub nome: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RankingStats {
    pub total_acertos: usize,
    #[serde(serialize_with = "super::js_number")]
    pub percentual_acerto: f64,
    pub questoes_respondidas: usize,
    pub medalhas: u32,
}
