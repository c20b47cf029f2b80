pub mod available_shifts;

pub use available_shifts::{AvailableShifts, GetAvailableShiftsRequest};
