use thiserror::Error;

/// Faults surfaced by the catalog store layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An update targeted an id with no matching row.
    #[error("no {table} row with id {id}")]
    RowNotFound { table: &'static str, id: i64 },

    /// A staged insert was redeemed before the unit of work committed it.
    #[error("staged insert has not been committed yet")]
    NotCommitted,

    /// A parent-column filter was used on an entity without a navigation.
    #[error("{table} has no parent navigation to filter on")]
    NoNavigation { table: &'static str },

    #[error("catalog database is at schema version {found}, expected {expected}")]
    UnsupportedSchemaVersion { found: i64, expected: i64 },

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}
