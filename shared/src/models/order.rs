//! Order Model

use serde::{Deserialize, Serialize};

use super::{Category, Client};

/// Order lifecycle status
///
/// Canonical vocabulary for the whole backend; stored as TEXT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl Default for OrderStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl OrderStatus {
    /// Stable string form, matching the serialized / persisted representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub client_id: i64,
    pub category_id: i64,
    pub status: OrderStatus,
    /// Nullable; >= 0 when present
    pub total_amount: Option<f64>,
    /// Nullable; <= 500 chars
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create order payload (direct path; references must already exist)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub client_id: i64,
    pub category_id: i64,
    #[serde(default)]
    pub status: Option<OrderStatus>,
    pub total_amount: Option<f64>,
    pub notes: Option<String>,
}

/// Update order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderUpdate {
    pub client_id: Option<i64>,
    pub category_id: Option<i64>,
    pub status: Option<OrderStatus>,
    pub total_amount: Option<f64>,
    pub notes: Option<String>,
}

/// Order with client and category embedded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderWithDetails {
    #[serde(flatten)]
    pub order: Order,
    pub client: Client,
    pub category: Category,
}

/// Request body for the integrated order workflow
///
/// Creates (or reuses) a client by contact number, resolves the price for
/// `type_name` at `weight`, and persists the order in one call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegratedOrderCreate {
    pub client_name: String,
    /// Exactly 11 digits after normalization
    pub client_contact: String,
    pub client_address: String,
    pub category_id: i64,
    pub type_name: String,
    /// Weight in kg, > 0
    pub weight: f64,
    /// Required iff `type_name` is "custom" (case-insensitive); > 0
    pub custom_amount: Option<f64>,
    pub notes: Option<String>,
    #[serde(default)]
    pub status: Option<OrderStatus>,
}

/// Denormalized response of the integrated order workflow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegratedOrderResponse {
    pub order_id: i64,
    pub status: OrderStatus,
    pub total_amount: f64,
    pub notes: Option<String>,
    pub created_at: i64,
    pub client_id: i64,
    pub client_name: String,
    pub client_contact: String,
    pub client_address: String,
    pub category_id: i64,
    pub category_name: String,
    pub type_name: String,
    pub weight: f64,
    /// Matched price rule id; null when the custom path was taken
    pub price_id: Option<i64>,
}
