//! Shared data structures for the petrophysical pipeline
//!
//! - `LogTable` / `WellLogSample`: depth-indexed input curves
//! - `CalibrationTable` / `WellCalibration`: per-well temperature and Rmf constants
//! - `DerivedTable` / `DerivedSample`: input curves plus computed columns

mod calibration;
mod derived;
mod well_log;

pub use calibration::*;
pub use derived::*;
pub use well_log::*;
