use async_trait::async_trait;
use chrono::NaiveDate;

use crate::cursor::Cursor;
use crate::models::Shift;

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use postgres::PgWorkerRepository;

/// Read side for shifts a worker is eligible to pick up.
///
/// Implementations return only unassigned, non-deleted shifts of active
/// facilities whose profession matches the active worker and whose required
/// documents are all on file for the worker. When both `start` and `end` are
/// given, the calendar day of each shift boundary must fall inside the range.
///
/// Paging is by shift id: no cursor reads ascending from the beginning,
/// `after` reads `id > reference` ascending and `before` reads
/// `id < reference` descending (nearest first), each capped at `limit` rows.
#[async_trait]
pub trait WorkerRepository: Send + Sync {
    async fn get_available_shifts(
        &self,
        cursor: Option<&Cursor>,
        limit: i64,
        worker_id: i64,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<Shift>, RepositoryError>;
}

#[async_trait]
pub trait DatabaseHealth: Send + Sync {
    async fn ping(&self) -> Result<(), RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("invalid cursor reference: {0}")]
    InvalidCursorReference(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Shift ids are carried as decimal strings inside cursors
pub(crate) fn parse_reference(cursor: &Cursor) -> Result<i64, RepositoryError> {
    cursor
        .reference
        .parse()
        .map_err(|_| RepositoryError::InvalidCursorReference(cursor.reference.clone()))
}
