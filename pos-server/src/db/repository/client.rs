//! Client Repository

use super::{RepoError, RepoResult};
use shared::models::{Client, ClientCreate, ClientUpdate};
use shared::util::now_millis;
use sqlx::SqlitePool;

const COLUMNS: &str = "id, name, contact_number, address, created_at, updated_at";

pub async fn find_all(pool: &SqlitePool, skip: i64, limit: i64) -> RepoResult<Vec<Client>> {
    let sql = format!("SELECT {COLUMNS} FROM clients ORDER BY id LIMIT ? OFFSET ?");
    let clients = sqlx::query_as::<_, Client>(&sql)
        .bind(limit)
        .bind(skip)
        .fetch_all(pool)
        .await?;
    Ok(clients)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Client>> {
    let sql = format!("SELECT {COLUMNS} FROM clients WHERE id = ?");
    let client = sqlx::query_as::<_, Client>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(client)
}

/// First client with the given contact number, oldest first.
///
/// Contact numbers are not unique in the store; `ORDER BY id` keeps the
/// lookup deterministic if duplicates ever exist.
pub async fn find_by_contact_number(
    pool: &SqlitePool,
    contact_number: &str,
) -> RepoResult<Option<Client>> {
    let sql = format!("SELECT {COLUMNS} FROM clients WHERE contact_number = ? ORDER BY id LIMIT 1");
    let client = sqlx::query_as::<_, Client>(&sql)
        .bind(contact_number)
        .fetch_optional(pool)
        .await?;
    Ok(client)
}

pub async fn count(pool: &SqlitePool) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM clients")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub async fn create(pool: &SqlitePool, data: ClientCreate) -> RepoResult<Client> {
    let now = now_millis();
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO clients (name, contact_number, address, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?4) RETURNING id",
    )
    .bind(&data.name)
    .bind(&data.contact_number)
    .bind(&data.address)
    .bind(now)
    .fetch_one(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create client".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: ClientUpdate) -> RepoResult<Client> {
    let now = now_millis();
    let rows = sqlx::query(
        "UPDATE clients SET name = COALESCE(?1, name), contact_number = COALESCE(?2, contact_number), address = COALESCE(?3, address), updated_at = ?4 WHERE id = ?5",
    )
    .bind(data.name)
    .bind(data.contact_number)
    .bind(data.address)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Client {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Client {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM clients WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
