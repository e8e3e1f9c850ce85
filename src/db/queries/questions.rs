use serde::{Deserialize, Serialize};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: String,
    pub difficulty: i64,
}

#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub category: String,
    pub difficulty: i64,
}

const SELECT_QUESTIONS: &str = "SELECT id, question, answer, category, difficulty FROM questions";

pub async fn get_all_questions(pool: &SqlitePool) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(&format!("{SELECT_QUESTIONS} ORDER BY id"))
        .fetch_all(pool)
        .await
}

pub async fn count_questions(pool: &SqlitePool) -> sqlx::Result<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM questions")
        .fetch_one(pool)
        .await
}

pub async fn get_question_by_id(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<Question>> {
    sqlx::query_as::<_, Question>(&format!("{SELECT_QUESTIONS} WHERE id = ?1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn get_questions_for_category(
    pool: &SqlitePool,
    category: &str,
) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(&format!("{SELECT_QUESTIONS} WHERE category = ?1 ORDER BY id"))
        .bind(category)
        .fetch_all(pool)
        .await
}

/// Case-insensitive substring match on the question text. Case is folded in Rust
/// since SQLite's `lower()` only folds ASCII.
pub async fn search_questions(pool: &SqlitePool, term: &str) -> sqlx::Result<Vec<Question>> {
    let needle = term.to_lowercase();
    Ok(get_all_questions(pool)
        .await?
        .into_iter()
        .filter(|q| q.question.to_lowercase().contains(&needle))
        .collect())
}

/// Questions not listed in `excluded`, restricted to `category` when given.
pub async fn get_remaining_questions(
    pool: &SqlitePool,
    category: Option<&str>,
    excluded: &[i64],
) -> sqlx::Result<Vec<Question>> {
    let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(SELECT_QUESTIONS);
    query.push(" WHERE 1 = 1");
    if let Some(category) = category {
        query.push(" AND category = ").push_bind(category);
    }
    if !excluded.is_empty() {
        query.push(" AND id NOT IN (");
        let mut ids = query.separated(", ");
        for id in excluded {
            ids.push_bind(*id);
        }
        ids.push_unseparated(")");
    }
    query.push(" ORDER BY id");
    query.build_query_as::<Question>().fetch_all(pool).await
}

pub async fn create_question(pool: &SqlitePool, question: &NewQuestion) -> sqlx::Result<i64> {
    let id = sqlx::query(
        r#"
INSERT INTO questions (question, answer, category, difficulty) VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(&question.question)
    .bind(&question.answer)
    .bind(&question.category)
    .bind(question.difficulty)
    .execute(pool)
    .await?
    .last_insert_rowid();

    Ok(id)
}

/// Returns the number of deleted rows.
pub async fn delete_question(pool: &SqlitePool, id: i64) -> sqlx::Result<u64> {
    let result = sqlx::query("DELETE FROM questions WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn import_questions(pool: &SqlitePool, questions: Vec<Question>) -> sqlx::Result<()> {
    let mut tx = pool.begin().await?;
    for question in questions {
        sqlx::query(
            r#"
INSERT OR REPLACE INTO questions (id, question, answer, category, difficulty)
VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(question.id)
        .bind(question.question)
        .bind(question.answer)
        .bind(question.category)
        .bind(question.difficulty)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    fn new_question(question: &str, category: &str) -> NewQuestion {
        NewQuestion {
            question: question.to_owned(),
            answer: "answer".to_owned(),
            category: category.to_owned(),
            difficulty: 1,
        }
    }

    #[tokio::test]
    async fn created_ids_increase() {
        let pool = test_pool().await;
        let first = create_question(&pool, &new_question("a?", "1")).await.unwrap();
        let second = create_question(&pool, &new_question("b?", "1")).await.unwrap();
        delete_question(&pool, second).await.unwrap();
        let third = create_question(&pool, &new_question("c?", "1")).await.unwrap();
        assert!(first < second);
        assert!(second < third);
    }

    #[tokio::test]
    async fn search_ignores_case() {
        let pool = test_pool().await;
        create_question(&pool, &new_question("What is the Title of the film?", "5"))
            .await
            .unwrap();
        create_question(&pool, &new_question("Who painted it?", "2"))
            .await
            .unwrap();

        let found = search_questions(&pool, "tITLe").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].question, "What is the Title of the film?");
        assert!(search_questions(&pool, "nothing like this").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn search_folds_non_ascii_case() {
        let pool = test_pool().await;
        create_question(&pool, &new_question("Who wrote ÉMILE?", "4"))
            .await
            .unwrap();

        let found = search_questions(&pool, "émile").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].question, "Who wrote ÉMILE?");
    }

    #[tokio::test]
    async fn search_treats_wildcards_literally() {
        let pool = test_pool().await;
        create_question(&pool, &new_question("plain", "1")).await.unwrap();
        assert!(search_questions(&pool, "%").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn remaining_questions_skip_excluded_ids() {
        let pool = test_pool().await;
        let a = create_question(&pool, &new_question("a?", "1")).await.unwrap();
        let b = create_question(&pool, &new_question("b?", "1")).await.unwrap();
        let c = create_question(&pool, &new_question("c?", "2")).await.unwrap();

        let all: Vec<i64> = get_remaining_questions(&pool, None, &[a])
            .await
            .unwrap()
            .into_iter()
            .map(|q| q.id)
            .collect();
        assert_eq!(all, vec![b, c]);

        let science: Vec<i64> = get_remaining_questions(&pool, Some("1"), &[])
            .await
            .unwrap()
            .into_iter()
            .map(|q| q.id)
            .collect();
        assert_eq!(science, vec![a, b]);

        assert!(get_remaining_questions(&pool, Some("1"), &[a, b])
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn delete_reports_missing_rows() {
        let pool = test_pool().await;
        let id = create_question(&pool, &new_question("a?", "1")).await.unwrap();
        assert_eq!(delete_question(&pool, id).await.unwrap(), 1);
        assert_eq!(delete_question(&pool, id).await.unwrap(), 0);
        assert_eq!(get_question_by_id(&pool, id).await.unwrap(), None);
        assert_eq!(count_questions(&pool).await.unwrap(), 0);
    }
}
