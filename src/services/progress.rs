// src/services/progress.rs

use chrono::{DateTime, SecondsFormat, Utc};

use crate::models::{
    activity::{
        ActivitySummary, AttemptResponse, Progress, QuestionProgress, RankedStudent,
        RankingEntry, RankingStats, StudentStats,
    },
    attempt::Attempt,
    exercise_list::ExerciseList,
    question::Question,
    user::User,
};

/// Summarizes one exercise list for the student whose attempts it carries.
///
/// * A question counts as answered when it has at least one attempt.
/// * It counts as correct when *any* attempt is correct, whatever the order.
/// * `percentual_acerto` is `corretas / respondidas * 100`, or 0 when nothing
///   was answered. It is not rounded.
///
/// Pure: the input is only read, and the same input always gives the same output.
pub fn summarize(list: &ExerciseList) -> ActivitySummary {
    let mut respondidas = 0;
    let mut corretas = 0;

    let questoes: Vec<QuestionProgress> = list
        .questoes
        .iter()
        .map(|questao| {
            let progress = question_progress(questao);
            if progress.numero_tentativas > 0 {
                respondidas += 1;
                if progress.acertou {
                    corretas += 1;
                }
            }
            progress
        })
        .collect();

    ActivitySummary {
        id: list.id.clone(),
        titulo: list.titulo.clone(),
        descricao: list.descricao.clone(),
        data_inicio: iso_timestamp(list.data_liberacao.unwrap_or(list.created_at)),
        data_fim: list.data_limite.map(iso_timestamp),
        ativa: list.is_published(),
        questoes,
        progresso: Progress {
            total: list.questoes.len(),
            respondidas,
            corretas,
            percentual_acerto: percentage(corretas, respondidas),
        },
    }
}

/// Folds list summaries into student-wide totals.
pub fn student_stats(summaries: &[ActivitySummary]) -> StudentStats {
    let mut stats = StudentStats {
        total_listas: summaries.len(),
        total_questoes: 0,
        questoes_respondidas: 0,
        total_acertos: 0,
        total_tentativas: 0,
        percentual_acerto: 0.0,
        medalhas: 0,
    };

    for summary in summaries {
        stats.total_questoes += summary.progresso.total;
        stats.questoes_respondidas += summary.progresso.respondidas;
        stats.total_acertos += summary.progresso.corretas;
        stats.total_tentativas += summary
            .questoes
            .iter()
            .map(|q| q.numero_tentativas)
            .sum::<usize>();
    }

    stats.percentual_acerto = percentage(stats.total_acertos, stats.questoes_respondidas);
    stats
}

/// Orders classmates by correct answers, then by hit rate, then by name.
/// Positions are 1-based and never shared.
pub fn ranking(mut standings: Vec<(User, StudentStats)>) -> Vec<RankingEntry> {
    standings.sort_by(|(a, a_stats), (b, b_stats)| {
        b_stats
            .total_acertos
            .cmp(&a_stats.total_acertos)
            .then(b_stats.percentual_acerto.total_cmp(&a_stats.percentual_acerto))
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.id.cmp(&b.id))
    });

    standings
        .into_iter()
        .enumerate()
        .map(|(i, (aluno, stats))| RankingEntry {
            posicao: i + 1,
            aluno: RankedStudent {
                id: aluno.id,
                nome: aluno.name.unwrap_or_default(),
            },
            estatisticas: RankingStats {
                total_acertos: stats.total_acertos,
                percentual_acerto: stats.percentual_acerto,
                questoes_respondidas: stats.questoes_respondidas,
                medalhas: stats.medalhas,
            },
        })
        .collect()
}

/// Questions answered by a whole class and its overall hit rate.
pub fn class_performance(stats: &[StudentStats]) -> (usize, f64) {
    let respondidas: usize = stats.iter().map(|s| s.questoes_respondidas).sum();
    let acertos: usize = stats.iter().map(|s| s.total_acertos).sum();
    (respondidas, percentage(acertos, respondidas))
}

fn question_progress(questao: &Question) -> QuestionProgress {
    let acertou = questao.tentativas.iter().any(|t| t.correta);

    QuestionProgress {
        id: questao.id.clone(),
        enunciado: questao.enunciado.clone(),
        tipo: questao.tipo.clone(),
        opcoes: questao.opcoes.clone(),
        gabarito: questao.gabarito.clone(),
        explicacao: questao.explicacao.clone(),
        dificuldade: questao.dificuldade,
        tentativas: questao.tentativas.iter().map(attempt_response).collect(),
        acertou,
        numero_tentativas: questao.tentativas.len(),
    }
}

fn attempt_response(tentativa: &Attempt) -> AttemptResponse {
    AttemptResponse {
        id: tentativa.id.clone(),
        resposta: tentativa.resposta.clone(),
        correta: tentativa.correta,
        tentativa_numero: tentativa.numero_tentativa,
        tempo_resposta: tentativa.tempo_resposta,
        created_at: iso_timestamp(tentativa.respondida_em),
    }
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    (part as f64 / whole as f64) * 100.0
}

/// `2024-03-01T12:00:00.000Z`
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
