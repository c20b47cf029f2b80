use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Facility {
    pub id: i64,
    pub name: String,
}

/// An unassigned shift as returned by the worker repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shift {
    pub id: i64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub facility: Facility,
}

/// Flat row read from the `rounded_shifts` query.
/// Timestamps are stored without a zone and are UTC.
#[derive(Debug, Clone, FromRow)]
pub struct ShiftRow {
    pub facility_id: i64,
    pub facility_name: String,
    pub shift_id: i64,
    pub rounded_start: NaiveDateTime,
    pub rounded_end: NaiveDateTime,
}

impl From<ShiftRow> for Shift {
    fn from(row: ShiftRow) -> Self {
        Self {
            id: row.shift_id,
            start: DateTime::<Utc>::from_naive_utc_and_offset(row.rounded_start, Utc),
            end: DateTime::<Utc>::from_naive_utc_and_offset(row.rounded_end, Utc),
            facility: Facility {
                id: row.facility_id,
                name: row.facility_name,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_row_into_shift() {
        let start = NaiveDate::from_ymd_opt(2023, 6, 4)
            .unwrap()
            .and_hms_opt(5, 0, 0)
            .unwrap();
        let end = NaiveDate::from_ymd_opt(2023, 6, 4)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();

        let shift = Shift::from(ShiftRow {
            facility_id: 3,
            facility_name: "Facility 3".to_string(),
            shift_id: 99,
            rounded_start: start,
            rounded_end: end,
        });

        assert_eq!(shift.id, 99);
        assert_eq!(shift.facility, Facility { id: 3, name: "Facility 3".to_string() });
        assert_eq!(shift.start.to_rfc3339(), "2023-06-04T05:00:00+00:00");
        assert_eq!(shift.end.naive_utc(), end);
    }
}
