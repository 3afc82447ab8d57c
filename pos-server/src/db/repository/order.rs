//! Order Repository

use super::{RepoError, RepoResult};
use shared::models::{
    Category, Client, Order, OrderCreate, OrderStatus, OrderUpdate, OrderWithDetails,
};
use shared::util::now_millis;
use sqlx::SqlitePool;

const COLUMNS: &str =
    "id, client_id, category_id, status, total_amount, notes, created_at, updated_at";

/// Flattened row for the joined "with details" reads
#[derive(sqlx::FromRow)]
struct OrderDetailsRow {
    id: i64,
    client_id: i64,
    category_id: i64,
    status: OrderStatus,
    total_amount: Option<f64>,
    notes: Option<String>,
    created_at: i64,
    updated_at: i64,
    c_name: String,
    c_contact_number: String,
    c_address: String,
    c_created_at: i64,
    c_updated_at: i64,
    g_name: String,
    g_created_at: i64,
    g_updated_at: i64,
}

impl From<OrderDetailsRow> for OrderWithDetails {
    fn from(row: OrderDetailsRow) -> Self {
        OrderWithDetails {
            order: Order {
                id: row.id,
                client_id: row.client_id,
                category_id: row.category_id,
                status: row.status,
                total_amount: row.total_amount,
                notes: row.notes,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            client: Client {
                id: row.client_id,
                name: row.c_name,
                contact_number: row.c_contact_number,
                address: row.c_address,
                created_at: row.c_created_at,
                updated_at: row.c_updated_at,
            },
            category: Category {
                id: row.category_id,
                name: row.g_name,
                created_at: row.g_created_at,
                updated_at: row.g_updated_at,
            },
        }
    }
}

const DETAILS_SELECT: &str = "SELECT o.id, o.client_id, o.category_id, o.status, o.total_amount, o.notes, o.created_at, o.updated_at, \
 c.name AS c_name, c.contact_number AS c_contact_number, c.address AS c_address, c.created_at AS c_created_at, c.updated_at AS c_updated_at, \
 g.name AS g_name, g.created_at AS g_created_at, g.updated_at AS g_updated_at \
 FROM orders o \
 JOIN clients c ON o.client_id = c.id \
 JOIN categories g ON o.category_id = g.id";

pub async fn find_all(pool: &SqlitePool, skip: i64, limit: i64) -> RepoResult<Vec<Order>> {
    let sql = format!("SELECT {COLUMNS} FROM orders ORDER BY id LIMIT ? OFFSET ?");
    let orders = sqlx::query_as::<_, Order>(&sql)
        .bind(limit)
        .bind(skip)
        .fetch_all(pool)
        .await?;
    Ok(orders)
}

pub async fn find_by_client(
    pool: &SqlitePool,
    client_id: i64,
    skip: i64,
    limit: i64,
) -> RepoResult<Vec<Order>> {
    let sql = format!("SELECT {COLUMNS} FROM orders WHERE client_id = ? ORDER BY id LIMIT ? OFFSET ?");
    let orders = sqlx::query_as::<_, Order>(&sql)
        .bind(client_id)
        .bind(limit)
        .bind(skip)
        .fetch_all(pool)
        .await?;
    Ok(orders)
}

pub async fn find_by_category(
    pool: &SqlitePool,
    category_id: i64,
    skip: i64,
    limit: i64,
) -> RepoResult<Vec<Order>> {
    let sql =
        format!("SELECT {COLUMNS} FROM orders WHERE category_id = ? ORDER BY id LIMIT ? OFFSET ?");
    let orders = sqlx::query_as::<_, Order>(&sql)
        .bind(category_id)
        .bind(limit)
        .bind(skip)
        .fetch_all(pool)
        .await?;
    Ok(orders)
}

pub async fn find_by_status(
    pool: &SqlitePool,
    status: OrderStatus,
    skip: i64,
    limit: i64,
) -> RepoResult<Vec<Order>> {
    let sql = format!("SELECT {COLUMNS} FROM orders WHERE status = ? ORDER BY id LIMIT ? OFFSET ?");
    let orders = sqlx::query_as::<_, Order>(&sql)
        .bind(status)
        .bind(limit)
        .bind(skip)
        .fetch_all(pool)
        .await?;
    Ok(orders)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    let sql = format!("SELECT {COLUMNS} FROM orders WHERE id = ?");
    let order = sqlx::query_as::<_, Order>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(order)
}

pub async fn find_with_details(
    pool: &SqlitePool,
    id: i64,
) -> RepoResult<Option<OrderWithDetails>> {
    let sql = format!("{DETAILS_SELECT} WHERE o.id = ?");
    let row = sqlx::query_as::<_, OrderDetailsRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Into::into))
}

pub async fn find_all_with_details(
    pool: &SqlitePool,
    skip: i64,
    limit: i64,
) -> RepoResult<Vec<OrderWithDetails>> {
    let sql = format!("{DETAILS_SELECT} ORDER BY o.id LIMIT ? OFFSET ?");
    let rows = sqlx::query_as::<_, OrderDetailsRow>(&sql)
        .bind(limit)
        .bind(skip)
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

pub async fn create(pool: &SqlitePool, data: OrderCreate) -> RepoResult<Order> {
    let now = now_millis();
    let status = data.status.unwrap_or_default();
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO orders (client_id, category_id, status, total_amount, notes, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6) RETURNING id",
    )
    .bind(data.client_id)
    .bind(data.category_id)
    .bind(status)
    .bind(data.total_amount)
    .bind(data.notes)
    .bind(now)
    .fetch_one(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create order".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: OrderUpdate) -> RepoResult<Order> {
    let now = now_millis();
    let rows = sqlx::query(
        "UPDATE orders SET client_id = COALESCE(?1, client_id), category_id = COALESCE(?2, category_id), status = COALESCE(?3, status), total_amount = COALESCE(?4, total_amount), notes = COALESCE(?5, notes), updated_at = ?6 WHERE id = ?7",
    )
    .bind(data.client_id)
    .bind(data.category_id)
    .bind(data.status)
    .bind(data.total_amount)
    .bind(data.notes)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Order {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Order {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM orders WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
