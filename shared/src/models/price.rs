//! Price Model

use serde::{Deserialize, Serialize};

use super::Category;

/// Weight-tiered price rule scoped to a category
///
/// A rule either covers an inclusive weight range `[weight_min, weight_max]`
/// for a named service type, or is the category's single range-less "custom"
/// rule (`weight_min` null, type matching "custom" case-insensitively).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Price {
    pub id: i64,
    /// Free-text service label (e.g. "Regular", "Delicates", "custom")
    #[serde(rename = "type")]
    #[cfg_attr(feature = "db", sqlx(rename = "type"))]
    pub service_type: String,
    /// Minimum weight in kg, inclusive (null for custom rules)
    pub weight_min: Option<f64>,
    /// Maximum weight in kg, inclusive
    pub weight_max: f64,
    pub amount: f64,
    pub category_id: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create price payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceCreate {
    #[serde(rename = "type")]
    pub service_type: String,
    pub weight_min: Option<f64>,
    pub weight_max: f64,
    pub amount: f64,
    pub category_id: i64,
}

/// Update price payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceUpdate {
    #[serde(rename = "type")]
    pub service_type: Option<String>,
    pub weight_min: Option<f64>,
    pub weight_max: Option<f64>,
    pub amount: Option<f64>,
    pub category_id: Option<i64>,
}

/// Price with its owning category embedded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceWithCategory {
    #[serde(flatten)]
    pub price: Price,
    pub category: Category,
}
