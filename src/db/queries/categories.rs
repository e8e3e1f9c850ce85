use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i64,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
}

pub async fn get_all_categories(pool: &SqlitePool) -> sqlx::Result<Vec<Category>> {
    sqlx::query_as::<_, Category>(
        r#"
SELECT id, type
FROM categories
ORDER BY type
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn create_category(pool: &SqlitePool, kind: &str) -> sqlx::Result<i64> {
    let id = sqlx::query(
        r#"
INSERT INTO categories (type) VALUES (?1)
        "#,
    )
    .bind(kind)
    .execute(pool)
    .await?
    .last_insert_rowid();

    Ok(id)
}

/// Inserts categories keeping their ids, replacing rows that already use them.
pub async fn import_categories(pool: &SqlitePool, categories: Vec<Category>) -> sqlx::Result<()> {
    let mut tx = pool.begin().await?;
    for category in categories {
        sqlx::query(
            r#"
INSERT OR REPLACE INTO categories (id, type) VALUES (?1, ?2)
            "#,
        )
        .bind(category.id)
        .bind(category.kind)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await
}

pub async fn delete_all_categories(pool: &SqlitePool) -> sqlx::Result<()> {
    sqlx::query("DELETE FROM categories").execute(pool).await?;
    Ok(())
}
