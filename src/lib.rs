//! petrolog: Petrophysical Well-Log Calculations
//!
//! Deterministic formation-evaluation pipeline over depth-indexed well logs.
//!
//! ## Architecture
//!
//! - **Types**: Columnar log table, per-well calibration, derived table
//! - **Physics Engine**: Temperature correction, Archie saturation, shale volume
//! - **Config**: Archie, formation-water, flushed-zone and shale parameters (TOML)
//! - **Log I/O**: CSV ingestion and export

pub mod config;
pub mod log_io;
pub mod physics_engine;
pub mod types;

// Re-export parameters
pub use config::{ConfigError, PipelineParams};

// Re-export commonly used types
pub use types::{
    CalibrationTable, DerivedSample, DerivedTable, LogTable, WellCalibration, WellLogSample,
};

// Re-export the pipeline entry points
pub use physics_engine::{compute, compute_per_well, InvasionDepth, PipelineError, SxoPolicy};

pub use log_io::LogIoError;
