// src/repository/mod.rs

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    error::AppError,
    models::{class::Class, exercise_list::ExerciseList, user::User},
};

pub use memory::MemoryRepository;
pub use postgres::PgRepository;

/// Read access to classes, exercise lists and student attempts.
///
/// Lists come back with their questions in list order, each question
/// carrying only `aluno_id`'s attempts, most recent first.
#[async_trait]
pub trait EscolaRepository: Send + Sync {
    async fn find_user(&self, id: &str) -> Result<Option<User>, AppError>;

    /// The first class the student is enrolled in.
    async fn find_student_class(&self, aluno_id: &str) -> Result<Option<String>, AppError>;

    /// Published lists of a class, newest first.
    async fn list_published_lists(
        &self,
        turma_id: &str,
        aluno_id: &str,
    ) -> Result<Vec<ExerciseList>, AppError>;

    /// One list, whatever its status.
    async fn find_list(
        &self,
        lista_id: &str,
        aluno_id: &str,
    ) -> Result<Option<ExerciseList>, AppError>;

    async fn find_class(&self, turma_id: &str) -> Result<Option<Class>, AppError>;

    /// Students enrolled in a class, in enrollment order.
    async fn list_class_students(&self, turma_id: &str) -> Result<Vec<User>, AppError>;

    async fn count_class_students(&self, turma_id: &str) -> Result<i64, AppError>;

    /// Lists of a class in any status.
    async fn count_class_lists(&self, turma_id: &str) -> Result<i64, AppError>;
}

pub type DynRepository = Arc<dyn EscolaRepository>;
