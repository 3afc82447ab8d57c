//! Category Repository

use super::{RepoError, RepoResult};
use shared::models::{Category, CategoryCreate, CategoryUpdate};
use shared::util::now_millis;
use sqlx::SqlitePool;

const COLUMNS: &str = "id, name, created_at, updated_at";

pub async fn find_all(pool: &SqlitePool, skip: i64, limit: i64) -> RepoResult<Vec<Category>> {
    let sql = format!("SELECT {COLUMNS} FROM categories ORDER BY id LIMIT ? OFFSET ?");
    let categories = sqlx::query_as::<_, Category>(&sql)
        .bind(limit)
        .bind(skip)
        .fetch_all(pool)
        .await?;
    Ok(categories)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Category>> {
    let sql = format!("SELECT {COLUMNS} FROM categories WHERE id = ?");
    let category = sqlx::query_as::<_, Category>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(category)
}

pub async fn find_by_name(pool: &SqlitePool, name: &str) -> RepoResult<Option<Category>> {
    let sql = format!("SELECT {COLUMNS} FROM categories WHERE name = ? LIMIT 1");
    let category = sqlx::query_as::<_, Category>(&sql)
        .bind(name)
        .fetch_optional(pool)
        .await?;
    Ok(category)
}

pub async fn create(pool: &SqlitePool, data: CategoryCreate) -> RepoResult<Category> {
    let now = now_millis();
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO categories (name, created_at, updated_at) VALUES (?1, ?2, ?2) RETURNING id",
    )
    .bind(&data.name)
    .bind(now)
    .fetch_one(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create category".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: CategoryUpdate) -> RepoResult<Category> {
    let now = now_millis();
    let rows = sqlx::query(
        "UPDATE categories SET name = COALESCE(?1, name), updated_at = ?2 WHERE id = ?3",
    )
    .bind(data.name)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Category {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Category {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM categories WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
