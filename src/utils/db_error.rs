use crate::domain::errors::StoreError;

/// Maps a write error, turning unique violations into [`StoreError::Conflict`].
pub fn map_write_error(e: sqlx::Error) -> StoreError {
    if let Some(db_err) = e.as_database_error()
        && db_err.is_unique_violation()
    {
        let constraint = db_err.constraint().unwrap_or("unique").to_owned();
        return StoreError::Conflict(constraint);
    }

    StoreError::Database(e)
}
