use crudkit_core::DomainError;

/// Errors surfaced by store implementations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A uniqueness rule was violated (e.g. duplicate drink title).
    #[error("conflict: {0}")]
    Conflict(String),

    /// A write referenced a row that does not exist.
    #[error("missing reference: {0}")]
    MissingReference(String),

    /// Applying a patch produced an invalid record.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Connection, pool or decoding failure.
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Map a `sqlx` error raised during `operation`.
    ///
    /// | PostgreSQL code | StoreError |
    /// |-----------------|------------|
    /// | `23505` unique violation | `Conflict` |
    /// | `23503` foreign key violation | `MissingReference` |
    /// | anything else | `Backend` |
    pub(crate) fn from_sqlx(operation: &str, err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let msg = format!("{operation}: {}", db_err.message());
            match db_err.code().as_deref() {
                Some("23505") => return StoreError::Conflict(msg),
                Some("23503") => return StoreError::MissingReference(msg),
                _ => {}
            }
        }
        StoreError::Backend(format!("{operation}: {err}"))
    }
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some("23505"),
        _ => false,
    }
}
