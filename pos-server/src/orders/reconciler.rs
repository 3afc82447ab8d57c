//! Client Reconciler
//!
//! Find-or-create by contact number. The contact number must already be
//! normalized (exactly 11 digits) by the input layer; this module does no
//! normalization of its own.

use sqlx::SqlitePool;

use crate::db::repository::{RepoResult, client};
use shared::models::{Client, ClientCreate};

/// Return the existing client with this contact number, or create one.
///
/// On a hit the stored record is returned unchanged — the provided name and
/// address are ignored, there is no update-on-match. At most one insert.
///
/// Lookup and insert are two separate store calls: concurrent calls with the
/// same new number can both miss and both insert (the store does not enforce
/// uniqueness on contact_number). Known gap, not a guarantee.
pub async fn find_or_create(
    pool: &SqlitePool,
    name: &str,
    contact_number: &str,
    address: &str,
) -> RepoResult<Client> {
    if let Some(existing) = client::find_by_contact_number(pool, contact_number).await? {
        tracing::debug!(client_id = existing.id, "Reusing existing client");
        return Ok(existing);
    }

    let created = client::create(
        pool,
        ClientCreate {
            name: name.to_string(),
            contact_number: contact_number.to_string(),
            address: address.to_string(),
        },
    )
    .await?;
    tracing::info!(client_id = created.id, "Created client during reconciliation");
    Ok(created)
}
