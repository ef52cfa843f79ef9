//! Translation of SQLx errors into store errors.

use crate::domain::repositories::StoreError;

/// PostgreSQL `insufficient_privilege`.
const INSUFFICIENT_PRIVILEGE: &str = "42501";

/// Maps a SQLx error to a [`StoreError`].
///
/// `key` names the record involved and is reported for unique violations.
pub fn map_sqlx_error(e: sqlx::Error, key: &str) -> StoreError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return StoreError::AlreadyExists(key.to_string());
        }

        if db_err.code().as_deref() == Some(INSUFFICIENT_PRIVILEGE) {
            return StoreError::PermissionDenied(db_err.message().to_string());
        }
    }

    StoreError::Unavailable(e.to_string())
}
