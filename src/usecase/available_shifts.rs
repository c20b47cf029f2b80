use chrono::NaiveDate;
use std::sync::Arc;

use crate::cursor::Cursor;
use crate::models::Shift;
use crate::repository::{RepositoryError, WorkerRepository};

pub const DEFAULT_LIMIT: i64 = 20;
pub const MAX_LIMIT: i64 = 200;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetAvailableShiftsRequest {
    pub cursor: Option<Cursor>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub limit: i64,
    pub worker_id: i64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetAvailableShiftsResponse {
    /// Ascending by id
    pub shifts: Vec<Shift>,
    pub next_cursor: Option<Cursor>,
}

#[derive(Debug, thiserror::Error)]
pub enum AvailableShiftsError {
    #[error("a worker_id is required to get available shifts from a worker")]
    MissingWorkerId,

    #[error("end is required when start is provided")]
    MissingEnd,

    #[error("start is required when end is provided")]
    MissingStart,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

#[derive(Clone)]
pub struct AvailableShifts {
    worker_repository: Arc<dyn WorkerRepository>,
}

impl AvailableShifts {
    pub fn new(worker_repository: Arc<dyn WorkerRepository>) -> Self {
        Self { worker_repository }
    }

    /// List one page of shifts the worker can pick up.
    ///
    /// Out-of-range limits fall back to [`DEFAULT_LIMIT`]. The page is always
    /// returned ascending by id and the next cursor always points `after` the
    /// last shift, whichever direction the request paged in.
    pub async fn get_available_shifts(
        &self,
        mut req: GetAvailableShiftsRequest,
    ) -> Result<GetAvailableShiftsResponse, AvailableShiftsError> {
        if req.limit <= 0 || req.limit > MAX_LIMIT {
            tracing::debug!(requested = req.limit, "limit out of range, using default");
            req.limit = DEFAULT_LIMIT;
        }

        if req.worker_id == 0 {
            return Err(AvailableShiftsError::MissingWorkerId);
        }

        match (req.start, req.end) {
            (Some(_), None) => return Err(AvailableShiftsError::MissingEnd),
            (None, Some(_)) => return Err(AvailableShiftsError::MissingStart),
            _ => {}
        }

        let mut shifts = self
            .worker_repository
            .get_available_shifts(
                req.cursor.as_ref(),
                req.limit,
                req.worker_id,
                req.start,
                req.end,
            )
            .await?;

        if shifts.is_empty() {
            return Ok(GetAvailableShiftsResponse::default());
        }

        shifts.sort_by_key(|s| s.id);

        let next_cursor = shifts.last().map(|s| Cursor::after(s.id.to_string()));

        tracing::debug!(
            worker_id = req.worker_id,
            count = shifts.len(),
            "resolved available shifts page"
        );

        Ok(GetAvailableShiftsResponse {
            shifts,
            next_cursor,
        })
    }
}
