//! Price Repository
//!
//! Weight-range candidate searches keep the store-side semantics of the
//! pricing rules: ranges are inclusive at both ends, rows whose type contains
//! "custom" bypass the `weight_min` bound (custom rules are range-less), and
//! every search orders by `id` so first-match selection is deterministic.
//! SQLite `LIKE` is ASCII case-insensitive, which is what the substring
//! filters rely on.

use super::{RepoError, RepoResult};
use shared::models::{Price, PriceCreate, PriceUpdate};
use shared::util::now_millis;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

const COLUMNS: &str = "id, type, weight_min, weight_max, amount, category_id, created_at, updated_at";

pub async fn find_all(
    pool: &SqlitePool,
    skip: i64,
    limit: i64,
    category_id: Option<i64>,
    type_filter: Option<&str>,
) -> RepoResult<Vec<Price>> {
    let mut qb: QueryBuilder<Sqlite> =
        QueryBuilder::new(format!("SELECT {COLUMNS} FROM prices WHERE 1 = 1"));
    if let Some(category_id) = category_id {
        qb.push(" AND category_id = ").push_bind(category_id);
    }
    if let Some(type_filter) = type_filter {
        qb.push(" AND type LIKE ").push_bind(format!("%{type_filter}%"));
    }
    qb.push(" ORDER BY id LIMIT ").push_bind(limit);
    qb.push(" OFFSET ").push_bind(skip);

    let prices = qb.build_query_as::<Price>().fetch_all(pool).await?;
    Ok(prices)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Price>> {
    let sql = format!("SELECT {COLUMNS} FROM prices WHERE id = ?");
    let price = sqlx::query_as::<_, Price>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(price)
}

pub async fn find_by_category(pool: &SqlitePool, category_id: i64) -> RepoResult<Vec<Price>> {
    let sql = format!("SELECT {COLUMNS} FROM prices WHERE category_id = ? ORDER BY id");
    let prices = sqlx::query_as::<_, Price>(&sql)
        .bind(category_id)
        .fetch_all(pool)
        .await?;
    Ok(prices)
}

/// Exact-type candidate search: `type` equals `type_name` and the weight
/// falls in the rule's inclusive range (custom-typed rows skip the lower
/// bound).
pub async fn find_by_type_and_weight(
    pool: &SqlitePool,
    category_id: i64,
    type_name: &str,
    weight: f64,
) -> RepoResult<Option<Price>> {
    let sql = format!(
        "SELECT {COLUMNS} FROM prices \
         WHERE category_id = ?1 AND type = ?2 AND weight_max >= ?3 \
         AND (type LIKE '%custom%' OR weight_min <= ?3) \
         ORDER BY id LIMIT 1"
    );
    let price = sqlx::query_as::<_, Price>(&sql)
        .bind(category_id)
        .bind(type_name)
        .bind(weight)
        .fetch_optional(pool)
        .await?;
    Ok(price)
}

/// Weight-range candidate search with an optional case-insensitive substring
/// type filter (the fallback pass of price resolution, and the `calculate`
/// endpoint).
pub async fn find_by_weight_range(
    pool: &SqlitePool,
    category_id: i64,
    weight: f64,
    type_filter: Option<&str>,
) -> RepoResult<Option<Price>> {
    let mut qb: QueryBuilder<Sqlite> =
        QueryBuilder::new(format!("SELECT {COLUMNS} FROM prices WHERE category_id = "));
    qb.push_bind(category_id);
    qb.push(" AND weight_max >= ").push_bind(weight);
    qb.push(" AND (type LIKE '%custom%' OR weight_min <= ");
    qb.push_bind(weight);
    qb.push(")");
    if let Some(type_filter) = type_filter {
        qb.push(" AND type LIKE ").push_bind(format!("%{type_filter}%"));
    }
    qb.push(" ORDER BY id LIMIT 1");

    let price = qb.build_query_as::<Price>().fetch_optional(pool).await?;
    Ok(price)
}

/// The category's custom rule, if any (optionally excluding one row — used
/// when updating a price in place).
pub async fn find_custom_in_category(
    pool: &SqlitePool,
    category_id: i64,
    exclude_id: Option<i64>,
) -> RepoResult<Option<Price>> {
    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
        "SELECT {COLUMNS} FROM prices WHERE category_id = "
    ));
    qb.push_bind(category_id);
    qb.push(" AND type LIKE '%custom%'");
    if let Some(exclude_id) = exclude_id {
        qb.push(" AND id != ").push_bind(exclude_id);
    }
    qb.push(" ORDER BY id LIMIT 1");

    let price = qb.build_query_as::<Price>().fetch_optional(pool).await?;
    Ok(price)
}

pub async fn create(pool: &SqlitePool, data: PriceCreate) -> RepoResult<Price> {
    let now = now_millis();
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO prices (type, weight_min, weight_max, amount, category_id, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6) RETURNING id",
    )
    .bind(&data.service_type)
    .bind(data.weight_min)
    .bind(data.weight_max)
    .bind(data.amount)
    .bind(data.category_id)
    .bind(now)
    .fetch_one(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create price".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: PriceUpdate) -> RepoResult<Price> {
    let now = now_millis();
    let rows = sqlx::query(
        "UPDATE prices SET type = COALESCE(?1, type), weight_min = COALESCE(?2, weight_min), weight_max = COALESCE(?3, weight_max), amount = COALESCE(?4, amount), category_id = COALESCE(?5, category_id), updated_at = ?6 WHERE id = ?7",
    )
    .bind(data.service_type)
    .bind(data.weight_min)
    .bind(data.weight_max)
    .bind(data.amount)
    .bind(data.category_id)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Price {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Price {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM prices WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
