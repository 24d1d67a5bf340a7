// tests/postgres_tests.rs
//
// Runs the Postgres store against a real database. Needs DATABASE_URL;
// without it every test returns early.

use chrono::{DateTime, TimeZone, Utc};
use edu_plus_backend::repository::{EscolaRepository, PgRepository};
use sqlx::{PgPool, postgres::PgPoolOptions};

async fn connect() -> Option<PgPool> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping Postgres tests");
        return None;
    };

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&database_url)
        .await
        .expect("Failed to connect to Postgres for testing. Make sure DATABASE_URL is set.");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate database");

    Some(pool)
}

fn unique_id(prefix: &str) -> String {
    format!("{}_{}", prefix, &uuid::Uuid::new_v4().to_string()[..8])
}

fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap()
}

async fn insert_user(pool: &PgPool, id: &str, role: &str) {
    sqlx::query("INSERT INTO users (id, name, role) VALUES ($1, $2, $3)")
        .bind(id)
        .bind(format!("User {}", id))
        .bind(role)
        .execute(pool)
        .await
        .unwrap();
}

async fn insert_list(pool: &PgPool, id: &str, turma_id: &str, status: &str, day: u32) {
    sqlx::query(
        "INSERT INTO listas_exercicio (id, turma_id, titulo, status, created_at) VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(id)
    .bind(turma_id)
    .bind(format!("Lista {}", id))
    .bind(status)
    .bind(at(day, 8))
    .execute(pool)
    .await
    .unwrap();
}

async fn insert_question(pool: &PgPool, id: &str) {
    sqlx::query(
        "INSERT INTO questoes (id, enunciado, tipo, gabarito, dificuldade) VALUES ($1, $2, 'NUMERICA', '4', 2)",
    )
    .bind(id)
    .bind(format!("Quanto é {}?", id))
    .execute(pool)
    .await
    .unwrap();
}

async fn link(pool: &PgPool, lista_id: &str, questao_id: &str, ordem: i32) {
    sqlx::query("INSERT INTO lista_questoes (lista_id, questao_id, ordem) VALUES ($1, $2, $3)")
        .bind(lista_id)
        .bind(questao_id)
        .bind(ordem)
        .execute(pool)
        .await
        .unwrap();
}

async fn insert_attempt(
    pool: &PgPool,
    questao_id: &str,
    aluno_id: &str,
    correta: bool,
    numero: i32,
    hour: u32,
) -> String {
    let id = unique_id("t");
    sqlx::query(
        r#"
        INSERT INTO tentativas
            (id, questao_id, aluno_id, resposta, correta, numero_tentativa, tempo_resposta, respondida_em)
        VALUES ($1, $2, $3, $4, $5, $6, 15, $7)
        "#,
    )
    .bind(&id)
    .bind(questao_id)
    .bind(aluno_id)
    .bind(if correta { "4" } else { "5" })
    .bind(correta)
    .bind(numero)
    .bind(at(2, hour))
    .execute(pool)
    .await
    .unwrap();
    id
}

struct Seeded {
    aluno_id: String,
    outro_id: String,
    turma_id: String,
    primeira: String,
    segunda: String,
    rascunho: String,
    q1: String,
    q2: String,
    shared: String,
    newest_attempt: String,
    oldest_attempt: String,
}

/// Two published lists sharing a question, plus a draft. Questions are linked
/// out of order so only `ordem` can put them right.
async fn seed(pool: &PgPool) -> Seeded {
    let aluno_id = unique_id("aluno");
    let outro_id = unique_id("aluno");
    let professor_id = unique_id("prof");
    let turma_id = unique_id("turma");

    insert_user(pool, &aluno_id, "ALUNO").await;
    insert_user(pool, &outro_id, "ALUNO").await;
    insert_user(pool, &professor_id, "PROFESSOR").await;

    sqlx::query("INSERT INTO turmas (id, nome, professor_id) VALUES ($1, '7º Ano B', $2)")
        .bind(&turma_id)
        .bind(&professor_id)
        .execute(pool)
        .await
        .unwrap();
    for aluno in [&aluno_id, &outro_id] {
        sqlx::query("INSERT INTO turma_alunos (turma_id, aluno_id) VALUES ($1, $2)")
            .bind(&turma_id)
            .bind(aluno)
            .execute(pool)
            .await
            .unwrap();
    }

    let (primeira, segunda, rascunho) = (unique_id("l1"), unique_id("l2"), unique_id("draft"));
    insert_list(pool, &primeira, &turma_id, "PUBLICADO", 2).await;
    insert_list(pool, &segunda, &turma_id, "PUBLICADO", 4).await;
    insert_list(pool, &rascunho, &turma_id, "RASCUNHO", 6).await;

    let (q1, q2, shared) = (unique_id("q1"), unique_id("q2"), unique_id("qs"));
    for id in [&q1, &q2, &shared] {
        insert_question(pool, id).await;
    }
    link(pool, &primeira, &shared, 3).await;
    link(pool, &primeira, &q2, 2).await;
    link(pool, &primeira, &q1, 1).await;
    link(pool, &segunda, &shared, 1).await;

    let oldest_attempt = insert_attempt(pool, &shared, &aluno_id, false, 1, 9).await;
    let newest_attempt = insert_attempt(pool, &shared, &aluno_id, true, 2, 11).await;
    insert_attempt(pool, &q1, &aluno_id, true, 1, 10).await;
    insert_attempt(pool, &q1, &outro_id, false, 1, 12).await;

    Seeded {
        aluno_id,
        outro_id,
        turma_id,
        primeira,
        segunda,
        rascunho,
        q1,
        q2,
        shared,
        newest_attempt,
        oldest_attempt,
    }
}

#[tokio::test]
async fn lists_carry_ordered_questions_with_the_students_attempts() {
    let Some(pool) = connect().await else { return };
    let s = seed(&pool).await;
    let repo = PgRepository::new(pool);

    let lista = repo.find_list(&s.primeira, &s.aluno_id).await.unwrap().unwrap();

    let order: Vec<&str> = lista.questoes.iter().map(|q| q.id.as_str()).collect();
    assert_eq!(order, vec![s.q1.as_str(), s.q2.as_str(), s.shared.as_str()]);

    let q1 = &lista.questoes[0];
    assert_eq!(q1.tentativas.len(), 1, "only the student's own attempts");
    assert!(q1.tentativas.iter().all(|t| t.aluno_id == s.aluno_id));
    assert!(lista.questoes[1].tentativas.is_empty());

    let shared: Vec<&str> = lista.questoes[2].tentativas.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(shared, vec![s.newest_attempt.as_str(), s.oldest_attempt.as_str()]);
    assert_eq!(lista.questoes[2].dificuldade, 2);
}

#[tokio::test]
async fn shared_questions_get_attempts_in_every_list() {
    let Some(pool) = connect().await else { return };
    let s = seed(&pool).await;
    let repo = PgRepository::new(pool);

    let listas = repo.list_published_lists(&s.turma_id, &s.aluno_id).await.unwrap();

    let ids: Vec<&str> = listas.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, vec![s.segunda.as_str(), s.primeira.as_str()], "newest first, no drafts");
    assert!(!ids.contains(&s.rascunho.as_str()));

    assert_eq!(listas[0].questoes.len(), 1);
    assert_eq!(listas[0].questoes[0].id, s.shared);
    assert_eq!(listas[0].questoes[0].tentativas.len(), 2);
    assert_eq!(listas[1].questoes[2].tentativas.len(), 2);
}

#[tokio::test]
async fn other_students_see_only_their_attempts() {
    let Some(pool) = connect().await else { return };
    let s = seed(&pool).await;
    let repo = PgRepository::new(pool);

    let lista = repo.find_list(&s.primeira, &s.outro_id).await.unwrap().unwrap();

    assert_eq!(lista.questoes[0].tentativas.len(), 1);
    assert!(!lista.questoes[0].tentativas[0].correta);
    assert!(lista.questoes[2].tentativas.is_empty());
}

#[tokio::test]
async fn missing_rows_come_back_as_none() {
    let Some(pool) = connect().await else { return };
    let s = seed(&pool).await;
    let repo = PgRepository::new(pool);

    assert!(repo.find_list("no-such-list", &s.aluno_id).await.unwrap().is_none());
    assert!(repo.find_user("no-such-user").await.unwrap().is_none());
    assert!(repo.find_class("no-such-class").await.unwrap().is_none());
    assert!(repo.find_student_class("no-such-user").await.unwrap().is_none());
}

#[tokio::test]
async fn class_queries_count_and_list_enrollments() {
    let Some(pool) = connect().await else { return };
    let s = seed(&pool).await;
    let repo = PgRepository::new(pool);

    assert_eq!(repo.find_student_class(&s.aluno_id).await.unwrap(), Some(s.turma_id.clone()));
    assert_eq!(repo.count_class_students(&s.turma_id).await.unwrap(), 2);
    assert_eq!(repo.count_class_lists(&s.turma_id).await.unwrap(), 3);

    let alunos = repo.list_class_students(&s.turma_id).await.unwrap();
    let mut ids: Vec<&str> = alunos.iter().map(|u| u.id.as_str()).collect();
    ids.sort();
    let mut expected = vec![s.aluno_id.as_str(), s.outro_id.as_str()];
    expected.sort();
    assert_eq!(ids, expected);
}
