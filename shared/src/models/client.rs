//! Client Model

use serde::{Deserialize, Serialize};

/// Client entity
///
/// `contact_number` is normalized to exactly 11 digits at the input boundary.
/// It is not unique in the store but serves as the de-duplication key for the
/// integrated order workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Client {
    pub id: i64,
    pub name: String,
    pub contact_number: String,
    pub address: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create client payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientCreate {
    pub name: String,
    pub contact_number: String,
    pub address: String,
}

/// Update client payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientUpdate {
    pub name: Option<String>,
    pub contact_number: Option<String>,
    pub address: Option<String>,
}
