//! Per-well calibration constants for temperature and mud-filtrate correction

use crate::physics_engine::PipelineError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raster-log header data for one well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellCalibration {
    /// Well identifier (unique key)
    pub well: String,
    /// True vertical depth of the logged interval (ft)
    pub tvd: f64,
    /// Surface temperature (°F)
    pub surface_temperature: f64,
    /// Maximum recorded bottom-hole temperature (°F)
    pub max_temperature: f64,
    /// Mud-filtrate resistivity (ohm·m)
    pub rmf: f64,
    /// Temperature at which `rmf` was measured (°F)
    pub rmf_temperature: f64,
}

impl WellCalibration {
    /// Geothermal gradient in °F per 100 ft.
    ///
    /// Formula: (T_max − T_surface) × 100 / TVD
    pub fn geothermal_gradient(&self) -> f64 {
        (self.max_temperature - self.surface_temperature) * 100.0 / self.tvd
    }
}

/// Calibration records keyed by well identifier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalibrationTable {
    records: BTreeMap<String, WellCalibration>,
}

impl CalibrationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from records, rejecting a well that appears twice.
    pub fn from_records<I>(records: I) -> Result<Self, PipelineError>
    where
        I: IntoIterator<Item = WellCalibration>,
    {
        let mut table = Self::new();
        for record in records {
            if table.records.contains_key(&record.well) {
                return Err(PipelineError::DuplicateCalibration(record.well));
            }
            table.records.insert(record.well.clone(), record);
        }
        Ok(table)
    }

    /// Insert or replace the record for a well, returning the previous one.
    pub fn insert(&mut self, record: WellCalibration) -> Option<WellCalibration> {
        self.records.insert(record.well.clone(), record)
    }

    pub fn get(&self, well: &str) -> Option<&WellCalibration> {
        self.records.get(well)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in well-identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &WellCalibration> {
        self.records.values()
    }
}
