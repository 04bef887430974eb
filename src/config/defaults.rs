//! Fixed physical constants and parameter defaults.
//!
//! Centralises the numbers the pipeline and its loaders share.
//! Grouped by subsystem for easy discovery.

// ============================================================================
// Physical Constants
// ============================================================================

/// Arps temperature offset (°F) used in resistivity temperature correction.
///
/// `R2 = R1 × (T1 + 6.77) / (T2 + 6.77)`
pub const ARPS_OFFSET_F: f64 = 6.77;

/// Null sentinel written by LAS exporters for missing samples.
pub const LAS_NULL_VALUE: f64 = -999.25;

/// Fractional invasion depth for each recognised invasion category.
///
/// Ordered from deepest to shallowest invasion.
pub const INVASION_DEPTHS: [(&str, f64); 5] = [
    ("very deep", 0.025),
    ("deep", 0.035),
    ("average", 0.05),
    ("shallow", 0.075),
    ("very shallow", 0.1),
];

// ============================================================================
// Archie Parameters
// ============================================================================

/// Tortuosity factor `a`.
pub const ARCHIE_A: f64 = 1.0;

/// Cementation exponent `m`.
pub const ARCHIE_M: f64 = 2.0;

/// Saturation exponent `n`.
pub const ARCHIE_N: f64 = 2.0;

// ============================================================================
// Formation Water
// ============================================================================

/// Formation water resistivity at `TEMP_RW_F` (ohm·m).
pub const RW_OHMM: f64 = 0.05;

/// Temperature at which `RW_OHMM` was measured (°F).
pub const TEMP_RW_F: f64 = 78.0;

// ============================================================================
// Shale Indicators
// ============================================================================

/// Clean-sand gamma ray reading (API).
pub const GR_MIN_API: f64 = 15.0;

/// Shale gamma ray reading (API).
pub const GR_MAX_API: f64 = 150.0;

/// SP curve shift (mV).
pub const SP_SHIFT_MV: f64 = 0.0;

// ============================================================================
// Interactive Defaults
// ============================================================================
//
// Starting values of the parameter panel. The pipeline itself requires these
// to be supplied; only the CLI falls back to them.

/// Static spontaneous potential (mV).
pub const PANEL_SSP_MV: f64 = -100.0;

/// SP shale baseline (mV).
pub const PANEL_SP_BASELINE_MV: f64 = 0.0;

/// Shale density porosity (v/v).
pub const PANEL_SHALE_DENSITY_POROSITY: f64 = 0.2;

/// Shale neutron porosity (v/v).
pub const PANEL_SHALE_NEUTRON_POROSITY: f64 = 0.3;

// ============================================================================
// Configuration Discovery
// ============================================================================

/// Environment variable naming a parameter TOML file.
pub const PARAMS_ENV_VAR: &str = "PETROLOG_PARAMS";

/// Parameter file looked up in the working directory.
pub const PARAMS_LOCAL_FILE: &str = "petrolog.toml";
