//! Price Resolver
//!
//! Pure read-then-decide: two candidate searches against the price table,
//! no mutation. The "custom" service type bypasses the table entirely and
//! uses the caller-provided override amount.

use sqlx::SqlitePool;

use crate::db::repository::price;
use shared::models::Price;
use shared::{AppError, AppResult, ErrorCode};

/// Service type, resolved once from the free-text label.
///
/// "custom" (case-insensitive) is a reserved label selecting the override
/// path; anything else is an ordinary named service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceType {
    Custom,
    Named(String),
}

impl ServiceType {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("custom") {
            Self::Custom
        } else {
            Self::Named(trimmed.to_string())
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom)
    }
}

/// Outcome of price resolution: the matched rule (none on the custom path)
/// and the amount to charge.
#[derive(Debug, Clone)]
pub struct ResolvedPrice {
    pub price: Option<Price>,
    pub amount: f64,
}

impl ResolvedPrice {
    pub fn price_id(&self) -> Option<i64> {
        self.price.as_ref().map(|p| p.id)
    }
}

/// Resolve the price for `type_name` at `weight` in `category_id`.
///
/// Custom path: `custom_amount` is mandatory and positive; the weight is
/// ignored and no rule is matched.
///
/// Named path: first an exact-type search, then a substring fallback, both
/// with the inclusive weight-range predicate and lowest-id tie-break.
pub async fn resolve(
    pool: &SqlitePool,
    category_id: i64,
    type_name: &str,
    weight: f64,
    custom_amount: Option<f64>,
) -> AppResult<ResolvedPrice> {
    match ServiceType::parse(type_name) {
        ServiceType::Custom => {
            let amount = custom_amount.ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::CustomAmountRequired,
                    "custom_amount is required for custom type",
                )
            })?;
            if amount <= 0.0 {
                return Err(AppError::validation("custom_amount must be positive"));
            }
            tracing::debug!(category_id, amount, "Resolved custom price override");
            Ok(ResolvedPrice {
                price: None,
                amount,
            })
        }
        ServiceType::Named(name) => {
            let exact = price::find_by_type_and_weight(pool, category_id, &name, weight).await?;
            let matched = match exact {
                Some(p) => Some(p),
                None => price::find_by_weight_range(pool, category_id, weight, Some(&name)).await?,
            };
            let matched = matched.ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::PriceNotFound,
                    format!(
                        "No price found for type '{name}' with weight {weight}kg in category {category_id}"
                    ),
                )
            })?;
            tracing::debug!(
                category_id,
                price_id = matched.id,
                amount = matched.amount,
                "Resolved price rule"
            );
            Ok(ResolvedPrice {
                amount: matched.amount,
                price: Some(matched),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::category;
    use crate::db::test_pool;
    use shared::models::{CategoryCreate, PriceCreate};

    async fn seed_category(pool: &SqlitePool, name: &str) -> i64 {
        category::create(pool, CategoryCreate { name: name.into() })
            .await
            .unwrap()
            .id
    }

    async fn seed_price(
        pool: &SqlitePool,
        category_id: i64,
        service_type: &str,
        min: Option<f64>,
        max: f64,
        amount: f64,
    ) -> i64 {
        price::create(
            pool,
            PriceCreate {
                service_type: service_type.into(),
                weight_min: min,
                weight_max: max,
                amount,
                category_id,
            },
        )
        .await
        .unwrap()
        .id
    }

    #[test]
    fn test_service_type_parse() {
        assert!(ServiceType::parse("custom").is_custom());
        assert!(ServiceType::parse("CUSTOM").is_custom());
        assert!(ServiceType::parse("  Custom ").is_custom());
        assert_eq!(
            ServiceType::parse("Regular"),
            ServiceType::Named("Regular".into())
        );
        // "customized" is a named type, not the reserved label
        assert_eq!(
            ServiceType::parse("customized"),
            ServiceType::Named("customized".into())
        );
    }

    #[tokio::test]
    async fn test_custom_requires_amount() {
        let pool = test_pool().await;
        let cat = seed_category(&pool, "Wash&Fold").await;

        let err = resolve(&pool, cat, "custom", 3.0, None).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::CustomAmountRequired);
        assert_eq!(err.message, "custom_amount is required for custom type");
    }

    #[tokio::test]
    async fn test_custom_returns_override_regardless_of_weight() {
        let pool = test_pool().await;
        let cat = seed_category(&pool, "Wash&Fold").await;

        for weight in [0.1, 3.0, 500.0] {
            let resolved = resolve(&pool, cat, "custom", weight, Some(50.0)).await.unwrap();
            assert!(resolved.price.is_none());
            assert_eq!(resolved.amount, 50.0);
            assert_eq!(resolved.price_id(), None);
        }
    }

    #[tokio::test]
    async fn test_custom_rejects_non_positive_amount() {
        let pool = test_pool().await;
        let cat = seed_category(&pool, "Wash&Fold").await;

        let err = resolve(&pool, cat, "custom", 3.0, Some(0.0)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn test_exact_match() {
        let pool = test_pool().await;
        let cat = seed_category(&pool, "Wash&Fold").await;
        let id = seed_price(&pool, cat, "Regular", Some(0.5), 5.0, 100.0).await;

        let resolved = resolve(&pool, cat, "Regular", 3.0, None).await.unwrap();
        assert_eq!(resolved.price_id(), Some(id));
        assert_eq!(resolved.amount, 100.0);
    }

    #[tokio::test]
    async fn test_deterministic_across_calls() {
        let pool = test_pool().await;
        let cat = seed_category(&pool, "Wash&Fold").await;
        seed_price(&pool, cat, "Regular", Some(0.5), 5.0, 100.0).await;
        seed_price(&pool, cat, "Regular", Some(0.5), 5.0, 120.0).await;

        let first = resolve(&pool, cat, "Regular", 3.0, None).await.unwrap();
        let second = resolve(&pool, cat, "Regular", 3.0, None).await.unwrap();
        assert_eq!(first.price_id(), second.price_id());
    }

    #[tokio::test]
    async fn test_weight_boundaries_inclusive() {
        let pool = test_pool().await;
        let cat = seed_category(&pool, "Wash&Fold").await;
        let id = seed_price(&pool, cat, "Regular", Some(5.0), 10.0, 150.0).await;

        for weight in [5.0, 10.0] {
            let resolved = resolve(&pool, cat, "Regular", weight, None).await.unwrap();
            assert_eq!(resolved.price_id(), Some(id), "weight {weight} must match");
        }
        for weight in [4.999, 10.001] {
            let err = resolve(&pool, cat, "Regular", weight, None).await.unwrap_err();
            assert_eq!(err.code, ErrorCode::PriceNotFound, "weight {weight} must miss");
        }
    }

    #[tokio::test]
    async fn test_fallback_substring_match() {
        let pool = test_pool().await;
        let cat = seed_category(&pool, "Wash&Fold").await;
        let id = seed_price(&pool, cat, "Regular Wash", Some(0.5), 5.0, 100.0).await;

        // No exact "regular" row; the fallback pass matches by substring,
        // case-insensitively.
        let resolved = resolve(&pool, cat, "regular", 3.0, None).await.unwrap();
        assert_eq!(resolved.price_id(), Some(id));
    }

    #[tokio::test]
    async fn test_not_found_message() {
        let pool = test_pool().await;
        let cat = seed_category(&pool, "Wash&Fold").await;
        seed_price(&pool, cat, "Regular", Some(0.5), 5.0, 100.0).await;

        let err = resolve(&pool, cat, "Regular", 20.0, None).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::PriceNotFound);
        assert_eq!(
            err.message,
            format!("No price found for type 'Regular' with weight 20kg in category {cat}")
        );
    }

    #[tokio::test]
    async fn test_scoped_to_category() {
        let pool = test_pool().await;
        let cat_a = seed_category(&pool, "Wash&Fold").await;
        let cat_b = seed_category(&pool, "Dry Clean").await;
        seed_price(&pool, cat_a, "Regular", Some(0.5), 5.0, 100.0).await;

        let err = resolve(&pool, cat_b, "Regular", 3.0, None).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::PriceNotFound);
    }
}
