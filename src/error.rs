//! Error types for problem construction and solver setup.
//!
//! Every variant here is fatal at setup time; the annealing loop itself never raises,
//! it simply rejects degenerate moves.

use std::fmt;

use crate::io::IOError;

#[derive(Debug)]
pub enum ScheduleError {
    DuplicateMachineId(u32),
    UnknownShiftPattern(String),
    DuplicateProductAssignment(u32, String),
    ForecastNotInterpolated,
    EmptyProductSet(u32),
    MalformedForecast(String),
    InvalidShiftDay(u8),
    Io(IOError),
    Csv(csv::Error),
    Json(serde_json::Error),
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleError::DuplicateMachineId(id) => {
                write!(f, "machine id {id} already specified")
            }
            ScheduleError::UnknownShiftPattern(name) => {
                write!(f, "shift pattern '{name}' not recognised")
            }
            ScheduleError::DuplicateProductAssignment(machine_id, product) => {
                write!(f, "product '{product}' already added to machine {machine_id}")
            }
            ScheduleError::ForecastNotInterpolated => {
                write!(f, "forecast must be interpolated before it can be attached to a problem")
            }
            ScheduleError::EmptyProductSet(machine_id) => {
                write!(f, "machine {machine_id} has no assigned products")
            }
            ScheduleError::MalformedForecast(why) => {
                write!(f, "malformed forecast: {why}")
            }
            ScheduleError::InvalidShiftDay(day) => {
                write!(f, "shift-pattern day {day} is not a valid weekday index (0..=6)")
            }
            ScheduleError::Io(why) => write!(f, "{why}"),
            ScheduleError::Csv(why) => write!(f, "csv error: {why}"),
            ScheduleError::Json(why) => write!(f, "json error: {why}"),
        }
    }
}

impl std::error::Error for ScheduleError {}

impl From<IOError> for ScheduleError {
    fn from(why: IOError) -> Self {
        ScheduleError::Io(why)
    }
}

impl From<csv::Error> for ScheduleError {
    fn from(why: csv::Error) -> Self {
        ScheduleError::Csv(why)
    }
}

impl From<serde_json::Error> for ScheduleError {
    fn from(why: serde_json::Error) -> Self {
        ScheduleError::Json(why)
    }
}

/// Exit codes for the CLI binary, per the external interface contract.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const INVALID_INPUT: i32 = 2;
    pub const UNKNOWN_SHIFT_PATTERN: i32 = 3;
    pub const DUPLICATE_MACHINE_ID: i32 = 4;
}

impl ScheduleError {
    /// Maps an error to the exit code a CLI front-end should report.
    pub fn exit_code(&self) -> i32 {
        match self {
            ScheduleError::DuplicateMachineId(_) => exit_code::DUPLICATE_MACHINE_ID,
            ScheduleError::UnknownShiftPattern(_) => exit_code::UNKNOWN_SHIFT_PATTERN,
            _ => exit_code::INVALID_INPUT,
        }
    }
}
