//! Pipeline Parameters - Archie, formation-water, flushed-zone and shale
//! inputs as operator-tunable TOML values
//!
//! Optional inputs carry `#[serde(default)]` values matching the parameter
//! panel; the shale section has four mandatory fields with no default.

use super::defaults;
use crate::physics_engine::PipelineError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

// ============================================================================
// Top-Level Params
// ============================================================================

/// Scalar parameters of one pipeline run.
///
/// Load with `PipelineParams::load()` which searches:
/// 1. `$PETROLOG_PARAMS` env var
/// 2. `./petrolog.toml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineParams {
    /// Archie constants
    #[serde(default)]
    pub archie: ArchieParams,

    /// Formation water resistivity reference
    #[serde(default)]
    pub formation_water: FormationWaterParams,

    /// Optional inputs selecting the Sxo policy
    #[serde(default)]
    pub flushed_zone: FlushedZoneParams,

    /// Shale indicator calibration
    pub shale: ShaleParams,
}

impl PipelineParams {
    /// Parameters with every optional input at its default.
    pub fn new(
        ssp_mv: f64,
        sp_baseline_mv: f64,
        shale_density_porosity: f64,
        shale_neutron_porosity: f64,
    ) -> Self {
        Self {
            archie: ArchieParams::default(),
            formation_water: FormationWaterParams::default(),
            flushed_zone: FlushedZoneParams::default(),
            shale: ShaleParams {
                ssp_mv,
                sp_baseline_mv,
                sp_shift_mv: defaults::SP_SHIFT_MV,
                gr_min_api: defaults::GR_MIN_API,
                gr_max_api: defaults::GR_MAX_API,
                density_porosity: shale_density_porosity,
                neutron_porosity: shale_neutron_porosity,
            },
        }
    }

    /// Starting values of the interactive parameter panel.
    pub fn panel_defaults() -> Self {
        Self::new(
            defaults::PANEL_SSP_MV,
            defaults::PANEL_SP_BASELINE_MV,
            defaults::PANEL_SHALE_DENSITY_POROSITY,
            defaults::PANEL_SHALE_NEUTRON_POROSITY,
        )
    }

    pub fn with_invasion_category(mut self, category: impl Into<String>) -> Self {
        self.flushed_zone.invasion_category = Some(category.into());
        self
    }

    pub fn with_fixed_flushed_resistivity(mut self, rza_ohmm: f64) -> Self {
        self.flushed_zone.fixed_resistivity_ohmm = Some(rza_ohmm);
        self
    }

    /// Load parameters using the standard search order:
    /// 1. `$PETROLOG_PARAMS` environment variable
    /// 2. `./petrolog.toml` in the current working directory
    ///
    /// Returns `None` when neither exists or loading fails; failures are logged.
    pub fn load() -> Option<Self> {
        if let Ok(path) = std::env::var(defaults::PARAMS_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(params) => {
                        info!(path = %p.display(), "Loaded pipeline params from PETROLOG_PARAMS");
                        return Some(params);
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load params from PETROLOG_PARAMS, falling back");
                    }
                }
            } else {
                warn!(path = %path, "PETROLOG_PARAMS points to non-existent file, falling back");
            }
        }

        let local = PathBuf::from(defaults::PARAMS_LOCAL_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(params) => {
                    info!("Loaded pipeline params from ./petrolog.toml");
                    return Some(params);
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./petrolog.toml");
                }
            }
        }

        info!("No pipeline parameter file found");
        None
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, inner) => ConfigError::Parse(path.to_path_buf(), inner),
            other => other,
        })
    }

    /// Parse and validate a TOML document.
    ///
    /// Unknown keys are warned about, never rejected.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let params: Self =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(PathBuf::new(), e))?;

        let (mut errors, warnings) = super::validation::validate_physical_ranges(&params);
        for w in &warnings {
            warn!("{}", w);
        }
        if let Err(e) = crate::physics_engine::SxoPolicy::resolve(&params.flushed_zone) {
            errors.push(e.to_string());
        }

        if errors.is_empty() {
            Ok(params)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Serialize the parameters to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Save parameters to a file.
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = self.to_toml()?;
        std::fs::write(path, contents).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        info!(path = %path.display(), "Pipeline params saved");
        Ok(())
    }

    /// Reject parameter sets the formulas cannot evaluate.
    ///
    /// Rules:
    /// - a, m, n must be > 0
    /// - gr_max must be > gr_min
    /// - shale neutron and density porosity must differ
    /// - ssp must be non-zero
    /// - rw and a supplied rza must be > 0
    /// - every value must be finite
    pub fn validate(&self) -> Result<(), PipelineError> {
        let (errors, _) = super::validation::validate_physical_ranges(self);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(PipelineError::InvalidParameter(errors))
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
    Serialize(toml::ser::Error),
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "Params I/O error ({}): {}", path.display(), e),
            ConfigError::Parse(path, e) => {
                write!(f, "Params parse error ({}): {}", path.display(), e)
            }
            ConfigError::Serialize(e) => write!(f, "Params serialization error: {}", e),
            ConfigError::Validation(errors) => {
                writeln!(f, "Params validation failed:")?;
                for e in errors {
                    writeln!(f, "  - {}", e)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Archie
// ============================================================================

/// Archie equation constants, shared by every row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchieParams {
    /// Tortuosity factor
    #[serde(default = "default_a")]
    pub a: f64,

    /// Cementation exponent
    #[serde(default = "default_m")]
    pub m: f64,

    /// Saturation exponent
    #[serde(default = "default_n")]
    pub n: f64,
}

fn default_a() -> f64 { defaults::ARCHIE_A }
fn default_m() -> f64 { defaults::ARCHIE_M }
fn default_n() -> f64 { defaults::ARCHIE_N }

impl Default for ArchieParams {
    fn default() -> Self {
        Self {
            a: default_a(),
            m: default_m(),
            n: default_n(),
        }
    }
}

// ============================================================================
// Formation Water
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormationWaterParams {
    /// Formation water resistivity at `temp_rw_f` (ohm·m)
    #[serde(default = "default_rw")]
    pub rw_ohmm: f64,

    /// Temperature of the Rw measurement (°F)
    #[serde(default = "default_temp_rw")]
    pub temp_rw_f: f64,
}

fn default_rw() -> f64 { defaults::RW_OHMM }
fn default_temp_rw() -> f64 { defaults::TEMP_RW_F }

impl Default for FormationWaterParams {
    fn default() -> Self {
        Self {
            rw_ohmm: default_rw(),
            temp_rw_f: default_temp_rw(),
        }
    }
}

// ============================================================================
// Flushed Zone
// ============================================================================

/// Optional inputs; which ones are present selects the Sxo formula.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlushedZoneParams {
    /// One of: very deep, deep, average, shallow, very shallow
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invasion_category: Option<String>,

    /// Fixed flushed-zone water resistivity, rza (ohm·m). Overrides invasion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_resistivity_ohmm: Option<f64>,
}

// ============================================================================
// Shale
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShaleParams {
    /// Static spontaneous potential (mV)
    pub ssp_mv: f64,

    /// SP shale baseline (mV)
    pub sp_baseline_mv: f64,

    /// Shift applied to the SP curve before use (mV)
    #[serde(default = "default_sp_shift")]
    pub sp_shift_mv: f64,

    /// Clean-sand gamma ray (API)
    #[serde(default = "default_gr_min")]
    pub gr_min_api: f64,

    /// Shale gamma ray (API)
    #[serde(default = "default_gr_max")]
    pub gr_max_api: f64,

    /// Density porosity read in shale (v/v)
    pub density_porosity: f64,

    /// Neutron porosity read in shale (v/v)
    pub neutron_porosity: f64,
}

fn default_sp_shift() -> f64 { defaults::SP_SHIFT_MV }
fn default_gr_min() -> f64 { defaults::GR_MIN_API }
fn default_gr_max() -> f64 { defaults::GR_MAX_API }
