use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::shift::Shift;
use crate::cursor::Cursor;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FacilityView {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AvailableShift {
    pub id: i64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub facility: FacilityView,
}

impl From<Shift> for AvailableShift {
    fn from(shift: Shift) -> Self {
        Self {
            id: shift.id,
            start: shift.start,
            end: shift.end,
            facility: FacilityView {
                id: shift.facility.id,
                name: shift.facility.name,
            },
        }
    }
}

/// Body of `GET /v1/workers/{id}/available_shifts`.
/// `next_cursor` is `null` when the page is empty.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AvailableShiftsResponse {
    pub data: Vec<AvailableShift>,
    #[schema(value_type = Option<String>)]
    pub next_cursor: Option<Cursor>,
}
