use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{postgres::PgRow, FromRow, PgPool, Postgres, QueryBuilder};

use super::{parse_reference, DatabaseHealth, RepositoryError, WorkerRepository};
use crate::cursor::{Cursor, Direction};
use crate::models::{Shift, ShiftRow};

#[derive(Clone)]
pub struct PgWorkerRepository {
    pool: PgPool,
}

impl PgWorkerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Build the available-shifts query.
///
/// `rounded_shifts` is ordered by `(start, end, facility_id)`; the outer
/// select pages over it by `shift_id`.
fn available_shifts_query(
    cursor: Option<&Cursor>,
    limit: i64,
    worker_id: i64,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<QueryBuilder<'static, Postgres>, RepositoryError> {
    let mut qb = QueryBuilder::new(
        r#"
        WITH facility_documents AS (
            SELECT facility_id, ARRAY_AGG(document_id) AS required_documents
            FROM "FacilityRequirement"
            GROUP BY facility_id
        ),
        worker_documents AS (
            SELECT worker_id, ARRAY_AGG(document_id) AS worker_documents
            FROM "DocumentWorker"
            WHERE worker_id = "#,
    );
    qb.push_bind(worker_id);
    qb.push(
        r#"
            GROUP BY worker_id
        ),
        rounded_shifts AS (
            SELECT
                s.start AS rounded_start,
                s."end" AS rounded_end,
                s.id::BIGINT AS shift_id,
                f.id::BIGINT AS facility_id,
                f.name AS facility_name
            FROM "Shift" s
            INNER JOIN "Facility" f ON f.id = s.facility_id
            INNER JOIN "Worker" w ON w.profession = s.profession
            INNER JOIN facility_documents fd ON fd.facility_id = f.id
            INNER JOIN worker_documents wd
                ON wd.worker_id = w.id AND wd.worker_documents @> fd.required_documents
            WHERE f.is_active = TRUE
              AND s.is_deleted = FALSE
              AND w.is_active = TRUE
              AND s.worker_id IS NULL
              AND w.id = "#,
    );
    qb.push_bind(worker_id);

    if let (Some(start), Some(end)) = (start, end) {
        qb.push(" AND DATE_TRUNC('day', s.start) BETWEEN ");
        qb.push_bind(start);
        qb.push(" AND ");
        qb.push_bind(end);
        qb.push(r#" AND DATE_TRUNC('day', s."end") BETWEEN "#);
        qb.push_bind(start);
        qb.push(" AND ");
        qb.push_bind(end);
    }

    qb.push(
        r#"
            ORDER BY rounded_start, rounded_end, facility_id
        )
        SELECT facility_id, facility_name, shift_id, rounded_start, rounded_end
        FROM rounded_shifts"#,
    );

    match cursor {
        None => {
            qb.push(" ORDER BY shift_id ASC");
        }
        Some(c) if c.direction == Direction::After => {
            qb.push(" WHERE shift_id > ");
            qb.push_bind(parse_reference(c)?);
            qb.push(" ORDER BY shift_id ASC");
        }
        Some(c) => {
            qb.push(" WHERE shift_id < ");
            qb.push_bind(parse_reference(c)?);
            qb.push(" ORDER BY shift_id DESC");
        }
    }

    qb.push(" LIMIT ");
    qb.push_bind(limit);

    Ok(qb)
}

fn deserialize_shifts(rows: Vec<PgRow>) -> Result<Vec<Shift>, RepositoryError> {
    let mut shifts = Vec::with_capacity(rows.len());

    for row in &rows {
        match ShiftRow::from_row(row) {
            Ok(shift) => shifts.push(shift.into()),
            Err(sqlx::Error::RowNotFound) => continue,
            Err(e) => return Err(e.into()),
        }
    }

    Ok(shifts)
}

#[async_trait]
impl WorkerRepository for PgWorkerRepository {
    async fn get_available_shifts(
        &self,
        cursor: Option<&Cursor>,
        limit: i64,
        worker_id: i64,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<Shift>, RepositoryError> {
        let mut qb = available_shifts_query(cursor, limit, worker_id, start, end)?;

        let rows = qb.build().fetch_all(&self.pool).await?;
        let shifts = deserialize_shifts(rows)?;

        tracing::debug!(worker_id, limit, rows = shifts.len(), "fetched available shifts");

        Ok(shifts)
    }
}

#[async_trait]
impl DatabaseHealth for PgWorkerRepository {
    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
