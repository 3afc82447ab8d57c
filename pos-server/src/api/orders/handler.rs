//! Order API Handlers
//!
//! The direct create/update paths validate referenced clients and categories
//! before writing (400 on a missing reference, 404 on a path lookup). The
//! integrated endpoint delegates to the order composer; note that a failure
//! partway through the composite workflow does not undo completed steps, so
//! a client may exist even when the request as a whole failed.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::api::Pagination;
use crate::core::ServerState;
use crate::db::repository::{category, client, order};
use crate::orders::composer;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_CLIENT_NAME_LEN, MAX_NOTE_LEN, normalize_contact_number,
    validate_optional_text, validate_required_text,
};
use shared::models::{
    IntegratedOrderCreate, IntegratedOrderResponse, Order, OrderCreate, OrderStatus, OrderUpdate,
    OrderWithDetails,
};
use shared::{AppError, AppResult, ErrorCode};

fn not_found(id: i64) -> AppError {
    AppError::with_message(
        ErrorCode::OrderNotFound,
        format!("Order with ID {id} not found"),
    )
}

async fn ensure_client_exists(state: &ServerState, client_id: i64) -> AppResult<()> {
    client::find_by_id(&state.pool, client_id)
        .await?
        .ok_or_else(|| AppError::with_message(ErrorCode::OrderClientMissing, "Client not found"))?;
    Ok(())
}

async fn ensure_category_exists(state: &ServerState, category_id: i64) -> AppResult<()> {
    category::find_by_id(&state.pool, category_id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::OrderCategoryMissing, "Category not found")
        })?;
    Ok(())
}

fn validate_amount_and_notes(
    total_amount: Option<f64>,
    notes: &Option<String>,
) -> AppResult<()> {
    if let Some(amount) = total_amount
        && amount < 0.0
    {
        return Err(AppError::validation("total_amount must be non-negative"));
    }
    validate_optional_text(notes, "notes", MAX_NOTE_LEN)?;
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct OrderListQuery {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
    pub client_id: Option<i64>,
    pub category_id: Option<i64>,
    pub status: Option<OrderStatus>,
}

fn default_limit() -> i64 {
    100
}

/// POST /api/v1/orders
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<(StatusCode, Json<Order>)> {
    ensure_client_exists(&state, payload.client_id).await?;
    ensure_category_exists(&state, payload.category_id).await?;
    validate_amount_and_notes(payload.total_amount, &payload.notes)?;

    let order = order::create(&state.pool, payload).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /api/v1/orders
///
/// At most one filter applies, in precedence order:
/// client_id, then category_id, then status.
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let orders = if let Some(client_id) = query.client_id {
        order::find_by_client(&state.pool, client_id, query.skip, query.limit).await?
    } else if let Some(category_id) = query.category_id {
        order::find_by_category(&state.pool, category_id, query.skip, query.limit).await?
    } else if let Some(status) = query.status {
        order::find_by_status(&state.pool, status, query.skip, query.limit).await?
    } else {
        order::find_all(&state.pool, query.skip, query.limit).await?
    };
    Ok(Json(orders))
}

/// GET /api/v1/orders/details
pub async fn list_details(
    State(state): State<ServerState>,
    Query(page): Query<Pagination>,
) -> AppResult<Json<Vec<OrderWithDetails>>> {
    let orders = order::find_all_with_details(&state.pool, page.skip, page.limit).await?;
    Ok(Json(orders))
}

/// GET /api/v1/orders/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Order>> {
    let order = order::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(order))
}

/// GET /api/v1/orders/:id/details
pub async fn get_details(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<OrderWithDetails>> {
    let order = order::find_with_details(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(order))
}

/// PUT /api/v1/orders/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<OrderUpdate>,
) -> AppResult<Json<Order>> {
    order::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    if let Some(client_id) = payload.client_id {
        ensure_client_exists(&state, client_id).await?;
    }
    if let Some(category_id) = payload.category_id {
        ensure_category_exists(&state, category_id).await?;
    }
    validate_amount_and_notes(payload.total_amount, &payload.notes)?;

    let order = order::update(&state.pool, id, payload).await?;
    Ok(Json(order))
}

/// DELETE /api/v1/orders/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    if !order::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/orders/integrated
pub async fn create_integrated(
    State(state): State<ServerState>,
    Json(mut payload): Json<IntegratedOrderCreate>,
) -> AppResult<(StatusCode, Json<IntegratedOrderResponse>)> {
    validate_required_text(&payload.client_name, "client_name", MAX_CLIENT_NAME_LEN)?;
    validate_required_text(&payload.client_address, "client_address", MAX_ADDRESS_LEN)?;
    payload.client_contact = normalize_contact_number(&payload.client_contact)?;
    if payload.weight <= 0.0 {
        return Err(AppError::validation("weight must be positive"));
    }
    if let Some(amount) = payload.custom_amount
        && amount <= 0.0
    {
        return Err(AppError::validation("custom_amount must be positive"));
    }
    validate_optional_text(&payload.notes, "notes", MAX_NOTE_LEN)?;

    let response = composer::create_integrated(&state.pool, payload).await?;
    Ok((StatusCode::CREATED, Json(response)))
}
