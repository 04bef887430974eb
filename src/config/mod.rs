//! Pipeline Parameters Module
//!
//! Scalar inputs of a pipeline run (Archie constants, formation water,
//! flushed-zone policy inputs, shale calibration) loaded from TOML.
//!
//! ## Loading Order
//!
//! 1. `PETROLOG_PARAMS` environment variable (path to TOML file)
//! 2. `petrolog.toml` in the current working directory
//! 3. Parameter-panel defaults, chosen by the caller
//!
//! Parameters are passed explicitly to `physics_engine::compute`; there is
//! no process-wide instance.

mod pipeline_params;
pub mod defaults;
pub mod validation;

pub use pipeline_params::*;
