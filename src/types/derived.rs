//! Pipeline output: the input log table augmented with derived curves

use super::well_log::{LogTable, WellLogSample};
use serde::{Deserialize, Serialize};

/// Derived curves in output order.
pub const DERIVED_COLUMN_NAMES: [&str; 14] = [
    "phi_avg",
    "phi_avg_filtered",
    "temperature",
    "rmf_corrected",
    "rw_corrected",
    "rwa",
    "sw",
    "sxo",
    "mhi",
    "bvw",
    "delta_bvw",
    "vsh_gamma_ray",
    "vsh_sp",
    "vsh_porosity",
];

/// One output row: the measured sample plus every derived value.
///
/// Undefined values are `f64::NAN` (serialized as `null` in JSON).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedSample {
    #[serde(flatten)]
    pub sample: WellLogSample,
    /// RMS of neutron and density porosity
    pub phi_avg: f64,
    /// `phi_avg` with negative values undefined
    pub phi_avg_filtered: f64,
    /// Formation temperature at depth (°F)
    pub temperature: f64,
    /// Mud-filtrate resistivity at formation temperature (ohm·m)
    pub rmf_corrected: f64,
    /// Formation-water resistivity at formation temperature (ohm·m)
    pub rw_corrected: f64,
    /// Apparent water resistivity (ohm·m)
    pub rwa: f64,
    /// Undisturbed-zone water saturation
    pub sw: f64,
    /// Flushed-zone water saturation
    pub sxo: f64,
    /// Moved hydrocarbon index, Sw / Sxo
    pub mhi: f64,
    /// Bulk volume water
    pub bvw: f64,
    /// First difference of `bvw` in row order
    pub delta_bvw: f64,
    pub vsh_gamma_ray: f64,
    pub vsh_sp: f64,
    pub vsh_porosity: f64,
}

/// Derived curves, each aligned row-for-row with the source table.
#[derive(Debug, Clone, Default)]
pub struct DerivedColumns {
    pub phi_avg: Vec<f64>,
    pub phi_avg_filtered: Vec<f64>,
    pub temperature: Vec<f64>,
    pub rmf_corrected: Vec<f64>,
    pub rw_corrected: Vec<f64>,
    pub rwa: Vec<f64>,
    pub sw: Vec<f64>,
    pub sxo: Vec<f64>,
    pub mhi: Vec<f64>,
    pub bvw: Vec<f64>,
    pub delta_bvw: Vec<f64>,
    pub vsh_gamma_ray: Vec<f64>,
    pub vsh_sp: Vec<f64>,
    pub vsh_porosity: Vec<f64>,
}

impl DerivedColumns {
    fn column(&self, name: &str) -> Option<&[f64]> {
        let column = match name {
            "phi_avg" => &self.phi_avg,
            "phi_avg_filtered" => &self.phi_avg_filtered,
            "temperature" => &self.temperature,
            "rmf_corrected" => &self.rmf_corrected,
            "rw_corrected" => &self.rw_corrected,
            "rwa" => &self.rwa,
            "sw" => &self.sw,
            "sxo" => &self.sxo,
            "mhi" => &self.mhi,
            "bvw" => &self.bvw,
            "delta_bvw" => &self.delta_bvw,
            "vsh_gamma_ray" => &self.vsh_gamma_ray,
            "vsh_sp" => &self.vsh_sp,
            "vsh_porosity" => &self.vsh_porosity,
            _ => return None,
        };
        Some(column)
    }

    fn all_have_len(&self, len: usize) -> bool {
        DERIVED_COLUMN_NAMES
            .iter()
            .all(|name| self.column(name).map_or(false, |c| c.len() == len))
    }

    fn select_rows(&self, rows: &[usize]) -> Self {
        let pick = |column: &[f64]| rows.iter().map(|&r| column[r]).collect::<Vec<f64>>();
        Self {
            phi_avg: pick(&self.phi_avg),
            phi_avg_filtered: pick(&self.phi_avg_filtered),
            temperature: pick(&self.temperature),
            rmf_corrected: pick(&self.rmf_corrected),
            rw_corrected: pick(&self.rw_corrected),
            rwa: pick(&self.rwa),
            sw: pick(&self.sw),
            sxo: pick(&self.sxo),
            mhi: pick(&self.mhi),
            bvw: pick(&self.bvw),
            delta_bvw: pick(&self.delta_bvw),
            vsh_gamma_ray: pick(&self.vsh_gamma_ray),
            vsh_sp: pick(&self.vsh_sp),
            vsh_porosity: pick(&self.vsh_porosity),
        }
    }
}

/// Augmented table returned by the pipeline.
///
/// Owns a copy of the input curves; consumers read it, never mutate it.
#[derive(Debug, Clone)]
pub struct DerivedTable {
    log: LogTable,
    columns: DerivedColumns,
}

impl DerivedTable {
    pub(crate) fn new(log: LogTable, columns: DerivedColumns) -> Self {
        debug_assert!(columns.all_have_len(log.len()));
        Self { log, columns }
    }

    /// The measured curves this table was computed from.
    pub fn log(&self) -> &LogTable {
        &self.log
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    pub fn depth(&self) -> &[f64] {
        self.log.depth()
    }

    pub fn phi_avg(&self) -> &[f64] {
        &self.columns.phi_avg
    }

    pub fn phi_avg_filtered(&self) -> &[f64] {
        &self.columns.phi_avg_filtered
    }

    pub fn temperature(&self) -> &[f64] {
        &self.columns.temperature
    }

    pub fn rmf_corrected(&self) -> &[f64] {
        &self.columns.rmf_corrected
    }

    pub fn rw_corrected(&self) -> &[f64] {
        &self.columns.rw_corrected
    }

    pub fn rwa(&self) -> &[f64] {
        &self.columns.rwa
    }

    pub fn sw(&self) -> &[f64] {
        &self.columns.sw
    }

    pub fn sxo(&self) -> &[f64] {
        &self.columns.sxo
    }

    pub fn mhi(&self) -> &[f64] {
        &self.columns.mhi
    }

    pub fn bvw(&self) -> &[f64] {
        &self.columns.bvw
    }

    pub fn delta_bvw(&self) -> &[f64] {
        &self.columns.delta_bvw
    }

    pub fn vsh_gamma_ray(&self) -> &[f64] {
        &self.columns.vsh_gamma_ray
    }

    pub fn vsh_sp(&self) -> &[f64] {
        &self.columns.vsh_sp
    }

    pub fn vsh_porosity(&self) -> &[f64] {
        &self.columns.vsh_porosity
    }

    /// Look up any input or derived curve by name.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns.column(name).or_else(|| self.log.curve(name))
    }

    /// Materialise one output row.
    pub fn row(&self, row: usize) -> Option<DerivedSample> {
        let sample = self.log.sample(row)?;
        let c = &self.columns;
        Some(DerivedSample {
            sample,
            phi_avg: c.phi_avg[row],
            phi_avg_filtered: c.phi_avg_filtered[row],
            temperature: c.temperature[row],
            rmf_corrected: c.rmf_corrected[row],
            rw_corrected: c.rw_corrected[row],
            rwa: c.rwa[row],
            sw: c.sw[row],
            sxo: c.sxo[row],
            mhi: c.mhi[row],
            bvw: c.bvw[row],
            delta_bvw: c.delta_bvw[row],
            vsh_gamma_ray: c.vsh_gamma_ray[row],
            vsh_sp: c.vsh_sp[row],
            vsh_porosity: c.vsh_porosity[row],
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = DerivedSample> + '_ {
        (0..self.len()).filter_map(move |row| self.row(row))
    }

    /// Rows whose depth lies within the inclusive bounds; `None` leaves a side open.
    ///
    /// Derived values are copied as computed, including `delta_bvw`.
    pub fn depth_window(&self, min_depth: Option<f64>, max_depth: Option<f64>) -> Self {
        let rows: Vec<usize> = self
            .depth()
            .iter()
            .enumerate()
            .filter(|&(_, &d)| min_depth.map_or(true, |min| d >= min))
            .filter(|&(_, &d)| max_depth.map_or(true, |max| d <= max))
            .map(|(row, _)| row)
            .collect();

        Self {
            log: self.log.select_rows(&rows),
            columns: self.columns.select_rows(&rows),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(depths: &[f64]) -> DerivedTable {
        let log: LogTable = depths
            .iter()
            .map(|&d| WellLogSample::new("A-1", d))
            .collect();
        let ramp: Vec<f64> = (0..depths.len()).map(|i| i as f64).collect();
        let columns = DerivedColumns {
            phi_avg: ramp.clone(),
            phi_avg_filtered: ramp.clone(),
            temperature: ramp.clone(),
            rmf_corrected: ramp.clone(),
            rw_corrected: ramp.clone(),
            rwa: ramp.clone(),
            sw: ramp.clone(),
            sxo: ramp.clone(),
            mhi: ramp.clone(),
            bvw: ramp.clone(),
            delta_bvw: ramp.clone(),
            vsh_gamma_ray: ramp.clone(),
            vsh_sp: ramp.clone(),
            vsh_porosity: ramp,
        };
        DerivedTable::new(log, columns)
    }

    #[test]
    fn test_depth_window_inclusive_bounds() {
        let t = table(&[100.0, 110.0, 120.0, 130.0]);
        let w = t.depth_window(Some(110.0), Some(120.0));
        assert_eq!(w.depth(), &[110.0, 120.0]);
        assert_eq!(w.sw(), &[1.0, 2.0]);
    }

    #[test]
    fn test_depth_window_open_ended() {
        let t = table(&[100.0, 110.0, 120.0]);
        assert_eq!(t.depth_window(None, Some(105.0)).len(), 1);
        assert_eq!(t.depth_window(Some(105.0), None).len(), 2);
        assert_eq!(t.depth_window(None, None).len(), 3);
    }

    #[test]
    fn test_column_resolves_input_and_derived() {
        let t = table(&[100.0, 200.0]);
        for name in DERIVED_COLUMN_NAMES {
            assert!(t.column(name).is_some(), "derived column {name} missing");
        }
        assert_eq!(t.column("depth"), Some(&[100.0, 200.0][..]));
        assert!(t.column("unknown").is_none());
    }

    #[test]
    fn test_row_materialises_sample() {
        let t = table(&[100.0, 200.0]);
        let row = t.row(1).unwrap();
        assert_eq!(row.sample.depth, 200.0);
        assert_eq!(row.mhi, 1.0);
        assert!(t.row(2).is_none());
    }
}
