pub mod available_shifts;
pub mod shift;

pub use available_shifts::{AvailableShift, AvailableShiftsResponse, FacilityView};
pub use shift::{Facility, Shift, ShiftRow};
