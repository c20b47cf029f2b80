use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use std::sync::Mutex;

use super::{parse_reference, DatabaseHealth, RepositoryError, WorkerRepository};
use crate::cursor::{Cursor, Direction};
use crate::models::{Facility, Shift};

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub cursor: Option<Cursor>,
    pub limit: i64,
    pub worker_id: i64,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// Shift store for tests. Applies the same id windowing as the Postgres
/// repository but skips eligibility rules: every stored shift is available.
#[derive(Default)]
pub struct InMemoryWorkerRepository {
    shifts: Vec<Shift>,
    verbatim: bool,
    fail: bool,
    healthy: bool,
    calls: Mutex<Vec<RecordedCall>>,
}

impl InMemoryWorkerRepository {
    pub fn new(shifts: Vec<Shift>) -> Self {
        Self {
            shifts,
            healthy: true,
            ..Default::default()
        }
    }

    /// Returns `shifts` as given on every call, ignoring paging and filters
    pub fn returning(shifts: Vec<Shift>) -> Self {
        Self {
            verbatim: true,
            ..Self::new(shifts)
        }
    }

    /// Every query fails with a database error
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl WorkerRepository for InMemoryWorkerRepository {
    async fn get_available_shifts(
        &self,
        cursor: Option<&Cursor>,
        limit: i64,
        worker_id: i64,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<Shift>, RepositoryError> {
        self.calls.lock().unwrap().push(RecordedCall {
            cursor: cursor.cloned(),
            limit,
            worker_id,
            start,
            end,
        });

        if self.fail {
            return Err(sqlx::Error::PoolTimedOut.into());
        }

        if self.verbatim {
            return Ok(self.shifts.clone());
        }

        let mut shifts: Vec<Shift> = self
            .shifts
            .iter()
            .filter(|s| match (start, end) {
                (Some(start), Some(end)) => {
                    let days = start..=end;
                    days.contains(&s.start.date_naive()) && days.contains(&s.end.date_naive())
                }
                _ => true,
            })
            .cloned()
            .collect();

        match cursor {
            None => shifts.sort_by_key(|s| s.id),
            Some(c) => {
                let reference = parse_reference(c)?;
                match c.direction {
                    Direction::After => {
                        shifts.retain(|s| s.id > reference);
                        shifts.sort_by_key(|s| s.id);
                    }
                    Direction::Before => {
                        shifts.retain(|s| s.id < reference);
                        shifts.sort_by_key(|s| std::cmp::Reverse(s.id));
                    }
                }
            }
        }

        shifts.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(shifts)
    }
}

#[async_trait]
impl DatabaseHealth for InMemoryWorkerRepository {
    async fn ping(&self) -> Result<(), RepositoryError> {
        if self.healthy {
            Ok(())
        } else {
            Err(sqlx::Error::PoolClosed.into())
        }
    }
}

/// Shift at facility 1 starting at `hour` on `day`, lasting `hours`
pub fn shift(id: i64, day: (i32, u32, u32), hour: u32, hours: u32) -> Shift {
    let start = Utc
        .with_ymd_and_hms(day.0, day.1, day.2, hour, 0, 0)
        .unwrap();

    Shift {
        id,
        start,
        end: start + chrono::Duration::hours(i64::from(hours)),
        facility: Facility {
            id: 1,
            name: "Facility 1".to_string(),
        },
    }
}
