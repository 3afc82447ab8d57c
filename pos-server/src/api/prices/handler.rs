//! Price API Handlers
//!
//! Create and update enforce the pricing invariants: a category holds at
//! most one custom rule, and non-custom rules of the same type must not
//! overlap in weight (probed at the midpoint of the submitted range, the
//! same candidate search the resolver uses).

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::repository::{category, price};
use crate::pricing::ServiceType;
use crate::utils::validation::{MAX_SERVICE_TYPE_LEN, validate_required_text};
use shared::models::{Price, PriceCreate, PriceUpdate, PriceWithCategory};
use shared::{AppError, AppResult, ErrorCode};

fn price_not_found(id: i64) -> AppError {
    AppError::with_message(
        ErrorCode::PriceNotFound,
        format!("Price with ID {id} not found"),
    )
}

fn category_not_found(id: i64) -> AppError {
    AppError::with_message(
        ErrorCode::CategoryNotFound,
        format!("Category with ID {id} not found"),
    )
}

fn custom_exists() -> AppError {
    AppError::with_message(
        ErrorCode::CustomPriceExists,
        "Custom price already exists for this category",
    )
}

fn range_overlap(service_type: &str) -> AppError {
    AppError::with_message(
        ErrorCode::PriceRangeOverlap,
        format!(
            "Price already exists for type '{service_type}' in this weight range for the selected category"
        ),
    )
}

/// Shared field checks for create/update; returns the validated weight_min
/// for non-custom rules.
fn validate_rule_fields(
    service_type: &str,
    weight_min: Option<f64>,
    weight_max: f64,
    amount: f64,
) -> AppResult<Option<f64>> {
    validate_required_text(service_type, "type", MAX_SERVICE_TYPE_LEN)?;
    if weight_max <= 0.0 {
        return Err(AppError::validation("weight_max must be positive"));
    }
    if amount <= 0.0 {
        return Err(AppError::validation("amount must be positive"));
    }
    match ServiceType::parse(service_type) {
        ServiceType::Custom => {
            // Custom rules are range-less, but an explicit range must still
            // be coherent
            if let Some(min) = weight_min
                && weight_max <= min
            {
                return Err(AppError::validation(
                    "weight_max must be greater than weight_min",
                ));
            }
            Ok(None)
        }
        ServiceType::Named(_) => {
            let min = weight_min.ok_or_else(|| {
                AppError::validation("weight_min is required for non-custom types")
            })?;
            if min <= 0.0 {
                return Err(AppError::validation("weight_min must be positive"));
            }
            if weight_max <= min {
                return Err(AppError::validation(
                    "weight_max must be greater than weight_min",
                ));
            }
            Ok(Some(min))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PriceListQuery {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
    pub category_id: Option<i64>,
    pub type_filter: Option<String>,
}

fn default_limit() -> i64 {
    100
}

#[derive(Debug, Deserialize)]
pub struct CalculateQuery {
    pub category_id: i64,
    pub weight: f64,
    pub type_name: Option<String>,
}

/// POST /api/v1/prices
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<PriceCreate>,
) -> AppResult<(StatusCode, Json<Price>)> {
    let weight_min = validate_rule_fields(
        &payload.service_type,
        payload.weight_min,
        payload.weight_max,
        payload.amount,
    )?;

    category::find_by_id(&state.pool, payload.category_id)
        .await?
        .ok_or_else(|| category_not_found(payload.category_id))?;

    match weight_min {
        // Custom rule: only one per category
        None => {
            if price::find_custom_in_category(&state.pool, payload.category_id, None)
                .await?
                .is_some()
            {
                return Err(custom_exists());
            }
        }
        // Named rule: probe the middle of the submitted range for overlap
        Some(min) => {
            let midpoint = (min + payload.weight_max) / 2.0;
            if price::find_by_type_and_weight(
                &state.pool,
                payload.category_id,
                &payload.service_type,
                midpoint,
            )
            .await?
            .is_some()
            {
                return Err(range_overlap(&payload.service_type));
            }
        }
    }

    let price = price::create(&state.pool, payload).await?;
    Ok((StatusCode::CREATED, Json(price)))
}

/// GET /api/v1/prices
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<PriceListQuery>,
) -> AppResult<Json<Vec<Price>>> {
    let limit = query.limit.clamp(1, 1000);
    let skip = query.skip.max(0);
    let prices = price::find_all(
        &state.pool,
        skip,
        limit,
        query.category_id,
        query.type_filter.as_deref(),
    )
    .await?;
    Ok(Json(prices))
}

/// GET /api/v1/prices/category/:id
pub async fn by_category(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<Price>>> {
    category::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| category_not_found(id))?;

    let prices = price::find_by_category(&state.pool, id).await?;
    Ok(Json(prices))
}

/// GET /api/v1/prices/calculate?category_id&weight&type_name
pub async fn calculate(
    State(state): State<ServerState>,
    Query(query): Query<CalculateQuery>,
) -> AppResult<Json<Price>> {
    if query.weight <= 0.0 {
        return Err(AppError::validation("weight must be positive"));
    }

    let category = category::find_by_id(&state.pool, query.category_id)
        .await?
        .ok_or_else(|| category_not_found(query.category_id))?;

    let price = price::find_by_weight_range(
        &state.pool,
        query.category_id,
        query.weight,
        query.type_name.as_deref(),
    )
    .await?
    .ok_or_else(|| {
        AppError::with_message(
            ErrorCode::PriceNotFound,
            format!(
                "No price found for weight {}kg in category '{}'",
                query.weight, category.name
            ),
        )
    })?;

    Ok(Json(price))
}

/// GET /api/v1/prices/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<PriceWithCategory>> {
    let price = price::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| price_not_found(id))?;

    // FK guarantees the category row exists
    let category = category::find_by_id(&state.pool, price.category_id)
        .await?
        .ok_or_else(|| {
            AppError::internal(format!("Category {} missing for price {id}", price.category_id))
        })?;

    Ok(Json(PriceWithCategory { price, category }))
}

/// PUT /api/v1/prices/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<PriceUpdate>,
) -> AppResult<Json<Price>> {
    let existing = price::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| price_not_found(id))?;

    if let Some(category_id) = payload.category_id {
        category::find_by_id(&state.pool, category_id)
            .await?
            .ok_or_else(|| category_not_found(category_id))?;
    }

    // Re-validate the rule as it will look after the merge
    let service_type = payload
        .service_type
        .clone()
        .unwrap_or_else(|| existing.service_type.clone());
    let weight_min = payload.weight_min.or(existing.weight_min);
    let weight_max = payload.weight_max.unwrap_or(existing.weight_max);
    let amount = payload.amount.unwrap_or(existing.amount);
    let category_id = payload.category_id.unwrap_or(existing.category_id);

    let weight_min = validate_rule_fields(&service_type, weight_min, weight_max, amount)?;

    match weight_min {
        None => {
            if price::find_custom_in_category(&state.pool, category_id, Some(id))
                .await?
                .is_some()
            {
                return Err(custom_exists());
            }
        }
        Some(min) => {
            let midpoint = (min + weight_max) / 2.0;
            if let Some(overlapping) =
                price::find_by_type_and_weight(&state.pool, category_id, &service_type, midpoint)
                    .await?
                && overlapping.id != id
            {
                return Err(range_overlap(&service_type));
            }
        }
    }

    let price = price::update(&state.pool, id, payload).await?;
    Ok(Json(price))
}

/// DELETE /api/v1/prices/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    if !price::delete(&state.pool, id).await? {
        return Err(price_not_found(id));
    }
    Ok(StatusCode::NO_CONTENT)
}
