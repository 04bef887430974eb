//! Per-well calibration precomputation
//!
//! Each well in the log table is joined to its calibration record once;
//! rows then reach their constants through the table's interned well index.

use super::error::{CalibrationFault, PipelineError};
use super::models;
use crate::types::{CalibrationTable, LogTable, WellCalibration};

/// Scalars a row needs from its well's calibration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WellConstants {
    /// Geothermal gradient (°F per 100 ft)
    pub gradient: f64,
    /// Surface temperature (°F)
    pub surface_temperature: f64,
    /// Mud-filtrate resistivity (ohm·m)
    pub rmf: f64,
    /// Rmf measurement temperature (°F)
    pub rmf_temperature: f64,
}

impl WellConstants {
    pub fn from_calibration(cal: &WellCalibration) -> Result<Self, CalibrationFault> {
        let fields = [
            ("tvd", cal.tvd),
            ("surface_temperature", cal.surface_temperature),
            ("max_temperature", cal.max_temperature),
            ("rmf", cal.rmf),
            ("rmf_temperature", cal.rmf_temperature),
        ];
        if let Some(&(name, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(CalibrationFault::NonFinite(name));
        }
        if cal.tvd <= 0.0 {
            return Err(CalibrationFault::NonPositiveTvd(cal.tvd));
        }

        Ok(Self {
            gradient: cal.geothermal_gradient(),
            surface_temperature: cal.surface_temperature,
            rmf: cal.rmf,
            rmf_temperature: cal.rmf_temperature,
        })
    }

    /// Formation temperature at `depth` (°F).
    pub fn formation_temperature(&self, depth: f64) -> f64 {
        models::formation_temperature(self.gradient, depth, self.surface_temperature)
    }

    /// Rmf corrected to `temperature` (ohm·m).
    pub fn rmf_at(&self, temperature: f64) -> f64 {
        models::arps_correction(self.rmf, self.rmf_temperature, temperature)
    }
}

/// Constants for every well of one log table, indexed like `LogTable::wells()`.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationLookup {
    constants: Vec<WellConstants>,
}

impl CalibrationLookup {
    /// Join every well present in `logs` to its calibration.
    ///
    /// Fails on the first well (in first-appearance order) that has no
    /// usable record.
    pub fn build(logs: &LogTable, calibrations: &CalibrationTable) -> Result<Self, PipelineError> {
        let constants = logs
            .wells()
            .iter()
            .map(|well| {
                calibrations
                    .get(well)
                    .ok_or(CalibrationFault::NoRecord)
                    .and_then(WellConstants::from_calibration)
                    .map_err(|reason| PipelineError::MissingCalibration {
                        well: well.clone(),
                        reason,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { constants })
    }

    /// Constants of the `index`-th well of the source table.
    pub fn well(&self, index: usize) -> Option<&WellConstants> {
        self.constants.get(index)
    }

    /// Constants for each row of `logs`, in row order.
    ///
    /// Rows whose well index is unknown to this lookup yield `None`; that only
    /// happens when `logs` is not the table the lookup was built from.
    pub fn per_row<'a>(
        &'a self,
        logs: &'a LogTable,
    ) -> impl Iterator<Item = Option<&'a WellConstants>> + 'a {
        logs.well_indices().iter().map(move |&i| self.constants.get(i))
    }
}
