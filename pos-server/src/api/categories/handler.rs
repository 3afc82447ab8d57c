//! Category API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::api::Pagination;
use crate::core::ServerState;
use crate::db::repository::category;
use crate::utils::validation::{MAX_CATEGORY_NAME_LEN, validate_required_text};
use shared::models::{Category, CategoryCreate, CategoryUpdate};
use shared::{AppError, AppResult, ErrorCode};

fn not_found(id: i64) -> AppError {
    AppError::with_message(
        ErrorCode::CategoryNotFound,
        format!("Category with ID {id} not found"),
    )
}

fn name_taken(name: &str) -> AppError {
    AppError::with_message(
        ErrorCode::CategoryNameExists,
        format!("Category with name '{name}' already exists"),
    )
}

/// GET /api/v1/categories
pub async fn list(
    State(state): State<ServerState>,
    Query(page): Query<Pagination>,
) -> AppResult<Json<Vec<Category>>> {
    let categories = category::find_all(&state.pool, page.skip, page.limit).await?;
    Ok(Json(categories))
}

/// GET /api/v1/categories/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Category>> {
    let category = category::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(category))
}

/// POST /api/v1/categories
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CategoryCreate>,
) -> AppResult<(StatusCode, Json<Category>)> {
    validate_required_text(&payload.name, "name", MAX_CATEGORY_NAME_LEN)?;

    if category::find_by_name(&state.pool, &payload.name)
        .await?
        .is_some()
    {
        return Err(name_taken(&payload.name));
    }

    let category = category::create(&state.pool, payload).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// PUT /api/v1/categories/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<CategoryUpdate>,
) -> AppResult<Json<Category>> {
    let existing = category::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_CATEGORY_NAME_LEN)?;
        if *name != existing.name
            && category::find_by_name(&state.pool, name).await?.is_some()
        {
            return Err(name_taken(name));
        }
    }

    let category = category::update(&state.pool, id, payload).await?;
    Ok(Json(category))
}

/// DELETE /api/v1/categories/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    if !category::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    Ok(StatusCode::NO_CONTENT)
}
