// src/repository/postgres.rs

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;

use super::EscolaRepository;
use crate::{
    error::AppError,
    models::{
        attempt::Attempt,
        class::Class,
        exercise_list::{ExerciseList, STATUS_PUBLICADO},
        question::ListQuestionRow,
        user::User,
    },
};

const LIST_COLUMNS: &str = r#"
    id, turma_id, titulo, descricao, status,
    data_liberacao, data_limite, created_at
"#;

/// Postgres-backed store.
#[derive(Clone)]
pub struct PgRepository {
    pool: PgPool,
}

impl PgRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fills `questoes` of every list, in list order, with the student's attempts.
    async fn attach_questions(
        &self,
        lists: &mut [ExerciseList],
        aluno_id: &str,
    ) -> Result<(), AppError> {
        if lists.is_empty() {
            return Ok(());
        }

        let lista_ids: Vec<String> = lists.iter().map(|l| l.id.clone()).collect();

        let rows = sqlx::query_as::<_, ListQuestionRow>(
            r#"
            SELECT
                lq.lista_id, lq.ordem,
                q.id, q.enunciado, q.tipo, q.opcoes,
                q.gabarito, q.explicacao, q.dificuldade
            FROM lista_questoes lq
            JOIN questoes q ON q.id = lq.questao_id
            WHERE lq.lista_id = ANY($1)
            ORDER BY lq.lista_id, lq.ordem ASC
            "#,
        )
        .bind(&lista_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch list questions: {:?}", e);
            AppError::from(e)
        })?;

        let mut questao_ids: Vec<String> = rows.iter().map(|r| r.questao.id.clone()).collect();
        questao_ids.sort();
        questao_ids.dedup();

        let attempts = sqlx::query_as::<_, Attempt>(
            r#"
            SELECT
                id, questao_id, aluno_id, resposta, correta,
                numero_tentativa, tempo_resposta, respondida_em
            FROM tentativas
            WHERE aluno_id = $1 AND questao_id = ANY($2)
            ORDER BY respondida_em DESC
            "#,
        )
        .bind(aluno_id)
        .bind(&questao_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch attempts: {:?}", e);
            AppError::from(e)
        })?;

        let mut attempts_by_question: HashMap<String, Vec<Attempt>> = HashMap::new();
        for attempt in attempts {
            attempts_by_question
                .entry(attempt.questao_id.clone())
                .or_default()
                .push(attempt);
        }

        let mut index: HashMap<String, usize> = HashMap::new();
        for (i, list) in lists.iter().enumerate() {
            index.insert(list.id.clone(), i);
        }

        for row in rows {
            let Some(&i) = index.get(&row.lista_id) else {
                continue;
            };
            let mut questao = row.questao;
            questao.tentativas = attempts_by_question
                .get(&questao.id)
                .cloned()
                .unwrap_or_default();
            lists[i].questoes.push(questao);
        }

        Ok(())
    }
}

#[async_trait]
impl EscolaRepository for PgRepository {
    async fn find_user(&self, id: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, role, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_student_class(&self, aluno_id: &str) -> Result<Option<String>, AppError> {
        let turma_id = sqlx::query_scalar::<_, String>(
            r#"
            SELECT turma_id FROM turma_alunos
            WHERE aluno_id = $1
            ORDER BY created_at ASC
            LIMIT 1
            "#,
        )
        .bind(aluno_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(turma_id)
    }

    async fn list_published_lists(
        &self,
        turma_id: &str,
        aluno_id: &str,
    ) -> Result<Vec<ExerciseList>, AppError> {
        let sql = format!(
            "SELECT {} FROM listas_exercicio WHERE turma_id = $1 AND status = $2 ORDER BY created_at DESC",
            LIST_COLUMNS
        );

        let mut lists = sqlx::query_as::<_, ExerciseList>(&sql)
            .bind(turma_id)
            .bind(STATUS_PUBLICADO)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list exercise lists: {:?}", e);
                AppError::from(e)
            })?;

        self.attach_questions(&mut lists, aluno_id).await?;
        Ok(lists)
    }

    async fn find_list(
        &self,
        lista_id: &str,
        aluno_id: &str,
    ) -> Result<Option<ExerciseList>, AppError> {
        let sql = format!("SELECT {} FROM listas_exercicio WHERE id = $1", LIST_COLUMNS);

        let Some(list) = sqlx::query_as::<_, ExerciseList>(&sql)
            .bind(lista_id)
            .fetch_optional(&self.pool)
            .await?
        else {
            return Ok(None);
        };

        let mut lists = [list];
        self.attach_questions(&mut lists, aluno_id).await?;
        let [list] = lists;
        Ok(Some(list))
    }

    async fn find_class(&self, turma_id: &str) -> Result<Option<Class>, AppError> {
        let class = sqlx::query_as::<_, Class>(
            "SELECT id, nome, serie, professor_id, created_at FROM turmas WHERE id = $1",
        )
        .bind(turma_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(class)
    }

    async fn list_class_students(&self, turma_id: &str) -> Result<Vec<User>, AppError> {
        let students = sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.name, u.email, u.role, u.created_at
            FROM turma_alunos ta
            JOIN users u ON u.id = ta.aluno_id
            WHERE ta.turma_id = $1
            ORDER BY ta.created_at ASC, u.id ASC
            "#,
        )
        .bind(turma_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list class students: {:?}", e);
            AppError::from(e)
        })?;

        Ok(students)
    }

    async fn count_class_students(&self, turma_id: &str) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM turma_alunos WHERE turma_id = $1")
            .bind(turma_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn count_class_lists(&self, turma_id: &str) -> Result<i64, AppError> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM listas_exercicio WHERE turma_id = $1")
                .bind(turma_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }
}
