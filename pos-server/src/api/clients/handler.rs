//! Client API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::api::Pagination;
use crate::core::ServerState;
use crate::db::repository::client;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_CLIENT_NAME_LEN, normalize_contact_number, validate_required_text,
};
use shared::models::{Client, ClientCreate, ClientUpdate};
use shared::{AppError, AppResult, ErrorCode};

fn not_found(id: i64) -> AppError {
    AppError::with_message(
        ErrorCode::ClientNotFound,
        format!("Client with ID {id} not found"),
    )
}

/// GET /api/v1/clients
pub async fn list(
    State(state): State<ServerState>,
    Query(page): Query<Pagination>,
) -> AppResult<Json<Vec<Client>>> {
    let clients = client::find_all(&state.pool, page.skip, page.limit).await?;
    Ok(Json(clients))
}

/// GET /api/v1/clients/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Client>> {
    let client = client::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(client))
}

/// POST /api/v1/clients
pub async fn create(
    State(state): State<ServerState>,
    Json(mut payload): Json<ClientCreate>,
) -> AppResult<(StatusCode, Json<Client>)> {
    validate_required_text(&payload.name, "name", MAX_CLIENT_NAME_LEN)?;
    validate_required_text(&payload.address, "address", MAX_ADDRESS_LEN)?;
    payload.contact_number = normalize_contact_number(&payload.contact_number)?;

    let client = client::create(&state.pool, payload).await?;
    Ok((StatusCode::CREATED, Json(client)))
}

/// PUT /api/v1/clients/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(mut payload): Json<ClientUpdate>,
) -> AppResult<Json<Client>> {
    client::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_CLIENT_NAME_LEN)?;
    }
    if let Some(address) = &payload.address {
        validate_required_text(address, "address", MAX_ADDRESS_LEN)?;
    }
    if let Some(contact) = payload.contact_number.take() {
        payload.contact_number = Some(normalize_contact_number(&contact)?);
    }

    let client = client::update(&state.pool, id, payload).await?;
    Ok(Json(client))
}

/// DELETE /api/v1/clients/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    if !client::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    Ok(StatusCode::NO_CONTENT)
}
