//! Order Composer — the integrated order workflow
//!
//! Validate category → reconcile client → resolve price → persist order →
//! assemble the denormalized response. The four store interactions are
//! separate calls, not one transaction: a later failure does not roll back
//! earlier steps (a client created in step 2 survives a price-resolution
//! failure in step 3). Callers are told as much in the API docs.

use sqlx::SqlitePool;

use crate::db::repository::{category, order};
use crate::orders::reconciler;
use crate::pricing;
use shared::models::{IntegratedOrderCreate, IntegratedOrderResponse, OrderCreate};
use shared::{AppError, AppResult, ErrorCode};

/// Create an order, creating or reusing the client and computing the price
/// in one call.
///
/// The category check comes first: a request against a nonexistent category
/// must not create a client as a side effect.
pub async fn create_integrated(
    pool: &SqlitePool,
    payload: IntegratedOrderCreate,
) -> AppResult<IntegratedOrderResponse> {
    // 1. Category gate
    let category = category::find_by_id(pool, payload.category_id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::CategoryNotFound,
                format!("Category with ID {} not found", payload.category_id),
            )
        })?;

    // 2. Reconcile client (at most one insert)
    let client = reconciler::find_or_create(
        pool,
        &payload.client_name,
        &payload.client_contact,
        &payload.client_address,
    )
    .await?;

    // 3. Resolve price; a failure here leaves the client from step 2 in place
    let resolved = pricing::resolve(
        pool,
        payload.category_id,
        &payload.type_name,
        payload.weight,
        payload.custom_amount,
    )
    .await?;

    // 4. Persist the order
    let created = order::create(
        pool,
        OrderCreate {
            client_id: client.id,
            category_id: category.id,
            status: payload.status,
            total_amount: Some(resolved.amount),
            notes: payload.notes.clone(),
        },
    )
    .await?;

    tracing::info!(
        order_id = created.id,
        client_id = client.id,
        category_id = category.id,
        total_amount = resolved.amount,
        "Integrated order created"
    );

    // 5. Assemble the denormalized response
    Ok(IntegratedOrderResponse {
        order_id: created.id,
        status: created.status,
        total_amount: resolved.amount,
        notes: created.notes,
        created_at: created.created_at,
        client_id: client.id,
        client_name: client.name,
        client_contact: client.contact_number,
        client_address: client.address,
        category_id: category.id,
        category_name: category.name,
        type_name: payload.type_name,
        weight: payload.weight,
        price_id: resolved.price_id(),
    })
}
