use axum::{
    extract::{Path, Query, State},
    http::Uri,
    Json,
};
use chrono::NaiveDate;
use std::sync::Arc;
use utoipa::IntoParams;

use crate::{
    cursor::Cursor,
    models::{AvailableShift, AvailableShiftsResponse},
    usecase::GetAvailableShiftsRequest,
    AppError, AppResult, AppState,
};

/// Raw query string; every field is parsed by hand so failures map to our
/// own 400 messages. Empty values count as absent and a repeated key keeps
/// its first value.
#[derive(Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AvailableShiftsQuery {
    /// Opaque cursor from a previous `next_cursor`
    pub cursor: Option<String>,
    /// First calendar day, `YYYY-MM-DD`. Requires `end`.
    pub start: Option<String>,
    /// Last calendar day, `YYYY-MM-DD`. Requires `start`.
    pub end: Option<String>,
    /// Page size, 1..=200. Anything else falls back to 20.
    pub limit: Option<String>,
}

impl AvailableShiftsQuery {
    fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();

        for (key, value) in pairs {
            let slot = match key.as_str() {
                "cursor" => &mut query.cursor,
                "start" => &mut query.start,
                "end" => &mut query.end,
                "limit" => &mut query.limit,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }

        query
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Strict `YYYY-MM-DD`: chrono alone also takes unpadded or space-led fields
fn is_calendar_date(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

fn parse_date(value: &Option<String>, field: &str) -> AppResult<Option<NaiveDate>> {
    let Some(raw) = non_empty(value) else {
        return Ok(None);
    };

    let parsed = if is_calendar_date(raw) {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
    } else {
        None
    };

    parsed.map(Some).ok_or_else(|| {
        tracing::warn!(raw, field, "rejected date query param");
        AppError::BadRequest(format!("{} date query param is invalid", field))
    })
}

fn parse_limit(value: &Option<String>) -> AppResult<i64> {
    match non_empty(value) {
        Some(raw) => raw.parse().map_err(|e| {
            tracing::warn!(error = %e, raw, "rejected limit query param");
            AppError::BadRequest("limit query param is invalid".to_string())
        }),
        None => Ok(0),
    }
}

fn parse_worker_id(raw: &str) -> AppResult<i64> {
    raw.parse().map_err(|e| {
        tracing::warn!(error = %e, raw, "rejected worker id");
        AppError::BadRequest("worker id is invalid".to_string())
    })
}

/// GET /v1/workers/{id}/available_shifts?cursor=&start=&end=&limit=
#[utoipa::path(
    get,
    path = "/v1/workers/{id}/available_shifts",
    params(
        ("id" = i64, Path, description = "Worker id"),
        AvailableShiftsQuery
    ),
    responses(
        (status = 200, description = "One page of available shifts, ascending by id", body = AvailableShiftsResponse),
        (status = 400, description = "Malformed worker id, cursor, date or limit"),
        (status = 500, description = "Failed to get available shifts")
    ),
    tag = "workers"
)]
pub async fn get_available_shifts(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    uri: Uri,
) -> AppResult<Json<AvailableShiftsResponse>> {
    let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&uri).map_err(|e| {
        tracing::warn!(error = %e, "rejected query string");
        AppError::BadRequest("query string is invalid".to_string())
    })?;
    let query = AvailableShiftsQuery::from_pairs(pairs);

    let cursor = Cursor::decode(query.cursor.as_deref().unwrap_or_default()).map_err(|e| {
        tracing::warn!(error = %e, "rejected cursor query param");
        AppError::BadRequest("cursor query param is invalid".to_string())
    })?;
    let start = parse_date(&query.start, "start")?;
    let end = parse_date(&query.end, "end")?;
    let limit = parse_limit(&query.limit)?;
    let worker_id = parse_worker_id(&id)?;

    tracing::debug!(worker_id, ?cursor, ?start, ?end, limit, "get_available_shifts called");

    let page = state
        .available_shifts
        .get_available_shifts(GetAvailableShiftsRequest {
            cursor,
            start,
            end,
            limit,
            worker_id,
        })
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, worker_id, "failed to get available shifts");
            AppError::Internal("failed to get available shifts".to_string())
        })?;

    Ok(Json(AvailableShiftsResponse {
        data: page.shifts.into_iter().map(AvailableShift::from).collect(),
        next_cursor: page.next_cursor,
    }))
}
