//! Database error type

/// Failure of a gateway operation.
///
/// Lookups that find nothing return `Ok(None)`; this type is only for
/// real failures.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("conflict: a {resource} with this {field} already exists")]
    Conflict {
        resource: &'static str,
        field: &'static str,
    },
}

impl DbError {
    /// Map an INSERT failure, turning unique violations into `Conflict`.
    pub(crate) fn from_insert(err: sqlx::Error, resource: &'static str, field: &'static str) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                tracing::warn!(
                    resource,
                    field,
                    constraint = db_err.constraint().unwrap_or("unknown"),
                    "unique violation on insert"
                );
                return Self::Conflict { resource, field };
            }
        }
        Self::Sqlx(err)
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}
