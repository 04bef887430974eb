//! Depth-indexed well-log measurements.
//!
//! `LogTable` stores curves column-wise so the pipeline can run each formula
//! as a single pass over contiguous slices. Well identifiers are interned:
//! every row carries an index into `wells()`, assigned in first-appearance
//! order.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Numeric input curves in table order.
pub const LOG_CURVE_NAMES: [&str; 13] = [
    "depth",
    "gamma_ray",
    "neutron_porosity",
    "density_porosity",
    "deep_resistivity",
    "shallow_resistivity",
    "medium_resistivity",
    "caliper",
    "bit_size",
    "sp",
    "density_correction",
    "micro_normal",
    "micro_lateral",
];

/// One depth-indexed measurement row.
///
/// Undefined readings are `f64::NAN`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellLogSample {
    /// Well identifier
    pub well: String,
    /// Measured depth (ft)
    pub depth: f64,
    /// Gamma ray (API)
    pub gamma_ray: f64,
    /// Neutron porosity (v/v)
    pub neutron_porosity: f64,
    /// Density porosity (v/v)
    pub density_porosity: f64,
    /// Deep resistivity, Rt (ohm·m)
    pub deep_resistivity: f64,
    /// Shallow resistivity, Rxo (ohm·m)
    pub shallow_resistivity: f64,
    /// Medium resistivity (ohm·m)
    pub medium_resistivity: f64,
    /// Caliper (in)
    pub caliper: f64,
    /// Bit size (in)
    pub bit_size: f64,
    /// Spontaneous potential (mV)
    pub sp: f64,
    /// Bulk density correction (g/cc)
    pub density_correction: f64,
    /// Micro-normal resistivity (ohm·m)
    pub micro_normal: f64,
    /// Micro-lateral resistivity (ohm·m)
    pub micro_lateral: f64,
}

impl WellLogSample {
    /// A sample at `depth` with every curve undefined.
    pub fn new(well: impl Into<String>, depth: f64) -> Self {
        Self {
            well: well.into(),
            depth,
            gamma_ray: f64::NAN,
            neutron_porosity: f64::NAN,
            density_porosity: f64::NAN,
            deep_resistivity: f64::NAN,
            shallow_resistivity: f64::NAN,
            medium_resistivity: f64::NAN,
            caliper: f64::NAN,
            bit_size: f64::NAN,
            sp: f64::NAN,
            density_correction: f64::NAN,
            micro_normal: f64::NAN,
            micro_lateral: f64::NAN,
        }
    }
}

/// Column-oriented well-log table.
///
/// Rows keep insertion order; depth ordering within a well is assumed, never
/// enforced.
#[derive(Debug, Clone, Default)]
pub struct LogTable {
    well_names: Vec<String>,
    well_lookup: HashMap<String, usize>,
    well_index: Vec<usize>,
    depth: Vec<f64>,
    gamma_ray: Vec<f64>,
    neutron_porosity: Vec<f64>,
    density_porosity: Vec<f64>,
    deep_resistivity: Vec<f64>,
    shallow_resistivity: Vec<f64>,
    medium_resistivity: Vec<f64>,
    caliper: Vec<f64>,
    bit_size: Vec<f64>,
    sp: Vec<f64>,
    density_correction: Vec<f64>,
    micro_normal: Vec<f64>,
    micro_lateral: Vec<f64>,
}

impl LogTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one row, interning its well identifier.
    pub fn push(&mut self, sample: WellLogSample) {
        let WellLogSample {
            well,
            depth,
            gamma_ray,
            neutron_porosity,
            density_porosity,
            deep_resistivity,
            shallow_resistivity,
            medium_resistivity,
            caliper,
            bit_size,
            sp,
            density_correction,
            micro_normal,
            micro_lateral,
        } = sample;

        let index = match self.well_lookup.get(&well) {
            Some(&i) => i,
            None => {
                let i = self.well_names.len();
                self.well_names.push(well.clone());
                self.well_lookup.insert(well, i);
                i
            }
        };

        self.well_index.push(index);
        self.depth.push(depth);
        self.gamma_ray.push(gamma_ray);
        self.neutron_porosity.push(neutron_porosity);
        self.density_porosity.push(density_porosity);
        self.deep_resistivity.push(deep_resistivity);
        self.shallow_resistivity.push(shallow_resistivity);
        self.medium_resistivity.push(medium_resistivity);
        self.caliper.push(caliper);
        self.bit_size.push(bit_size);
        self.sp.push(sp);
        self.density_correction.push(density_correction);
        self.micro_normal.push(micro_normal);
        self.micro_lateral.push(micro_lateral);
    }

    pub fn len(&self) -> usize {
        self.depth.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depth.is_empty()
    }

    /// Distinct well identifiers in first-appearance order.
    pub fn wells(&self) -> &[String] {
        &self.well_names
    }

    /// Per-row index into `wells()`.
    pub fn well_indices(&self) -> &[usize] {
        &self.well_index
    }

    /// Well identifier of a row.
    pub fn well_at(&self, row: usize) -> Option<&str> {
        self.well_index
            .get(row)
            .map(|&i| self.well_names[i].as_str())
    }

    pub fn depth(&self) -> &[f64] {
        &self.depth
    }

    pub fn gamma_ray(&self) -> &[f64] {
        &self.gamma_ray
    }

    pub fn neutron_porosity(&self) -> &[f64] {
        &self.neutron_porosity
    }

    pub fn density_porosity(&self) -> &[f64] {
        &self.density_porosity
    }

    pub fn deep_resistivity(&self) -> &[f64] {
        &self.deep_resistivity
    }

    pub fn shallow_resistivity(&self) -> &[f64] {
        &self.shallow_resistivity
    }

    pub fn medium_resistivity(&self) -> &[f64] {
        &self.medium_resistivity
    }

    pub fn caliper(&self) -> &[f64] {
        &self.caliper
    }

    pub fn bit_size(&self) -> &[f64] {
        &self.bit_size
    }

    pub fn sp(&self) -> &[f64] {
        &self.sp
    }

    pub fn density_correction(&self) -> &[f64] {
        &self.density_correction
    }

    pub fn micro_normal(&self) -> &[f64] {
        &self.micro_normal
    }

    pub fn micro_lateral(&self) -> &[f64] {
        &self.micro_lateral
    }

    /// Look up a numeric curve by its name in `LOG_CURVE_NAMES`.
    pub fn curve(&self, name: &str) -> Option<&[f64]> {
        let column = match name {
            "depth" => &self.depth,
            "gamma_ray" => &self.gamma_ray,
            "neutron_porosity" => &self.neutron_porosity,
            "density_porosity" => &self.density_porosity,
            "deep_resistivity" => &self.deep_resistivity,
            "shallow_resistivity" => &self.shallow_resistivity,
            "medium_resistivity" => &self.medium_resistivity,
            "caliper" => &self.caliper,
            "bit_size" => &self.bit_size,
            "sp" => &self.sp,
            "density_correction" => &self.density_correction,
            "micro_normal" => &self.micro_normal,
            "micro_lateral" => &self.micro_lateral,
            _ => return None,
        };
        Some(column)
    }

    /// Materialise one row.
    pub fn sample(&self, row: usize) -> Option<WellLogSample> {
        let well = self.well_at(row)?;
        Some(WellLogSample {
            well: well.to_string(),
            depth: self.depth[row],
            gamma_ray: self.gamma_ray[row],
            neutron_porosity: self.neutron_porosity[row],
            density_porosity: self.density_porosity[row],
            deep_resistivity: self.deep_resistivity[row],
            shallow_resistivity: self.shallow_resistivity[row],
            medium_resistivity: self.medium_resistivity[row],
            caliper: self.caliper[row],
            bit_size: self.bit_size[row],
            sp: self.sp[row],
            density_correction: self.density_correction[row],
            micro_normal: self.micro_normal[row],
            micro_lateral: self.micro_lateral[row],
        })
    }

    pub fn samples(&self) -> impl Iterator<Item = WellLogSample> + '_ {
        (0..self.len()).filter_map(move |row| self.sample(row))
    }

    /// Rows belonging to a single well, in table order.
    pub fn for_well(&self, well: &str) -> Self {
        match self.well_lookup.get(well) {
            Some(&index) => {
                let rows: Vec<usize> = self
                    .well_index
                    .iter()
                    .enumerate()
                    .filter(|&(_, &w)| w == index)
                    .map(|(row, _)| row)
                    .collect();
                self.select_rows(&rows)
            }
            None => Self::new(),
        }
    }

    /// Split into one table per well, in first-appearance order.
    pub fn partition_by_well(&self) -> Vec<(String, Self)> {
        let mut rows_per_well: Vec<Vec<usize>> = vec![Vec::new(); self.well_names.len()];
        for (row, &w) in self.well_index.iter().enumerate() {
            rows_per_well[w].push(row);
        }
        self.well_names
            .iter()
            .zip(rows_per_well)
            .map(|(name, rows)| (name.clone(), self.select_rows(&rows)))
            .collect()
    }

    /// Copy the given rows, in the given order, into a new table.
    pub(crate) fn select_rows(&self, rows: &[usize]) -> Self {
        rows.iter().filter_map(|&row| self.sample(row)).collect()
    }
}

impl FromIterator<WellLogSample> for LogTable {
    fn from_iter<I: IntoIterator<Item = WellLogSample>>(iter: I) -> Self {
        let mut table = Self::new();
        for sample in iter {
            table.push(sample);
        }
        table
    }
}
