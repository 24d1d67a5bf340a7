// src/repository/memory.rs

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::EscolaRepository;
use crate::{
    error::AppError,
    models::{
        attempt::Attempt,
        class::Class,
        exercise_list::ExerciseList,
        question::Question,
        user::User,
    },
};

/// In-process store with the same ordering rules as the Postgres one.
/// Used when no `DATABASE_URL` is configured and by the integration tests.
#[derive(Default)]
pub struct MemoryRepository {
    data: RwLock<MemoryData>,
}

#[derive(Default)]
struct MemoryData {
    users: HashMap<String, User>,
    classes: HashMap<String, Class>,
    /// (turma_id, aluno_id) in enrollment order.
    enrollments: Vec<(String, String)>,
    /// Lists without questions; those live in `list_questions`.
    lists: HashMap<String, ExerciseList>,
    questions: HashMap<String, Question>,
    /// lista_id -> (ordem, questao_id)
    list_questions: HashMap<String, Vec<(i32, String)>>,
    attempts: Vec<Attempt>,
}

impl MemoryData {
    fn student_view(&self, list: &ExerciseList, aluno_id: &str) -> ExerciseList {
        let mut entries = self.list_questions.get(&list.id).cloned().unwrap_or_default();
        entries.sort_by_key(|(ordem, _)| *ordem);

        let questoes = entries
            .iter()
            .filter_map(|(_, questao_id)| self.questions.get(questao_id))
            .map(|questao| {
                let mut tentativas: Vec<Attempt> = self
                    .attempts
                    .iter()
                    .filter(|t| t.questao_id == questao.id && t.aluno_id == aluno_id)
                    .cloned()
                    .collect();
                tentativas.sort_by(|a, b| b.respondida_em.cmp(&a.respondida_em));

                Question {
                    tentativas,
                    ..questao.clone()
                }
            })
            .collect();

        ExerciseList {
            questoes,
            ..list.clone()
        }
    }
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_user(&self, user: User) {
        self.data.write().await.users.insert(user.id.clone(), user);
    }

    pub async fn insert_class(&self, class: Class) {
        self.data.write().await.classes.insert(class.id.clone(), class);
    }

    pub async fn enroll(&self, turma_id: &str, aluno_id: &str) {
        self.data
            .write()
            .await
            .enrollments
            .push((turma_id.to_string(), aluno_id.to_string()));
    }

    /// Stores the list header; any `questoes` it carries are ignored.
    pub async fn insert_list(&self, mut list: ExerciseList) {
        list.questoes.clear();
        self.data.write().await.lists.insert(list.id.clone(), list);
    }

    pub async fn insert_question(&self, mut question: Question) {
        question.tentativas.clear();
        self.data
            .write()
            .await
            .questions
            .insert(question.id.clone(), question);
    }

    pub async fn add_question_to_list(&self, lista_id: &str, questao_id: &str, ordem: i32) {
        self.data
            .write()
            .await
            .list_questions
            .entry(lista_id.to_string())
            .or_default()
            .push((ordem, questao_id.to_string()));
    }

    pub async fn insert_attempt(&self, attempt: Attempt) {
        self.data.write().await.attempts.push(attempt);
    }
}

#[async_trait]
impl EscolaRepository for MemoryRepository {
    async fn find_user(&self, id: &str) -> Result<Option<User>, AppError> {
        Ok(self.data.read().await.users.get(id).cloned())
    }

    async fn find_student_class(&self, aluno_id: &str) -> Result<Option<String>, AppError> {
        let data = self.data.read().await;
        Ok(data
            .enrollments
            .iter()
            .find(|(_, aluno)| aluno == aluno_id)
            .map(|(turma, _)| turma.clone()))
    }

    async fn list_published_lists(
        &self,
        turma_id: &str,
        aluno_id: &str,
    ) -> Result<Vec<ExerciseList>, AppError> {
        let data = self.data.read().await;

        let mut lists: Vec<&ExerciseList> = data
            .lists
            .values()
            .filter(|l| l.turma_id == turma_id && l.is_published())
            .collect();
        lists.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(lists
            .into_iter()
            .map(|l| data.student_view(l, aluno_id))
            .collect())
    }

    async fn find_list(
        &self,
        lista_id: &str,
        aluno_id: &str,
    ) -> Result<Option<ExerciseList>, AppError> {
        let data = self.data.read().await;
        Ok(data
            .lists
            .get(lista_id)
            .map(|l| data.student_view(l, aluno_id)))
    }

    async fn find_class(&self, turma_id: &str) -> Result<Option<Class>, AppError> {
        Ok(self.data.read().await.classes.get(turma_id).cloned())
    }

    async fn list_class_students(&self, turma_id: &str) -> Result<Vec<User>, AppError> {
        let data = self.data.read().await;
        Ok(data
            .enrollments
            .iter()
            .filter(|(turma, _)| turma == turma_id)
            .filter_map(|(_, aluno)| data.users.get(aluno).cloned())
            .collect())
    }

    async fn count_class_students(&self, turma_id: &str) -> Result<i64, AppError> {
        let data = self.data.read().await;
        Ok(data
            .enrollments
            .iter()
            .filter(|(turma, _)| turma == turma_id)
            .count() as i64)
    }

    async fn count_class_lists(&self, turma_id: &str) -> Result<i64, AppError> {
        let data = self.data.read().await;
        Ok(data
            .lists
            .values()
            .filter(|l| l.turma_id == turma_id)
            .count() as i64)
    }
}
