//! CSV adapter for log, calibration and derived tables
//!
//! Reads well-log exports and per-well calibration sheets into the pipeline
//! types, and writes augmented tables back out. Headers are matched
//! case-insensitively against a list of aliases, so both the spreadsheet
//! names (`Well_Name`, `PHIN`, `Deep_Resistivity`) and LAS mnemonics
//! (`NPHI`, `ILD`, `BS`) are accepted.
//!
//! # Usage
//!
//! ```ignore
//! use petrolog::log_io;
//!
//! let logs = log_io::load_log_table("logs.csv")?;
//! let calibrations = log_io::load_calibration_table("calibration.csv")?;
//! let derived = petrolog::compute(&logs, &calibrations, &params)?;
//! log_io::save_derived_tables("derived.csv", &[derived])?;
//! ```

use crate::config::defaults::LAS_NULL_VALUE;
use crate::physics_engine::PipelineError;
use crate::types::{
    CalibrationTable, DerivedTable, LogTable, WellCalibration, WellLogSample,
    DERIVED_COLUMN_NAMES, LOG_CURVE_NAMES,
};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum LogIoError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{table} table has no '{column}' column")]
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },

    #[error("Line {line}: column '{column}' has non-numeric value '{value}'")]
    InvalidNumber {
        line: u64,
        column: &'static str,
        value: String,
    },

    #[error("Line {line}: empty well identifier")]
    EmptyWellId { line: u64 },

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

// ============================================================================
// Header Aliases
// ============================================================================

/// Canonical column, accepted header spellings, and whether it must exist.
struct ColumnSpec {
    name: &'static str,
    aliases: &'static [&'static str],
    required: bool,
}

const fn column(
    name: &'static str,
    aliases: &'static [&'static str],
    required: bool,
) -> ColumnSpec {
    ColumnSpec {
        name,
        aliases,
        required,
    }
}

/// Log table columns; the well identifier comes first, then `LOG_CURVE_NAMES` order.
static LOG_COLUMNS: [ColumnSpec; 14] = [
    column("well", &["well", "well_name", "well_id", "wellname"], true),
    column("depth", &["depth", "dept", "md"], true),
    column("gamma_ray", &["gamma_ray", "gr"], true),
    column("neutron_porosity", &["neutron_porosity", "phin", "nphi"], true),
    column("density_porosity", &["density_porosity", "phid", "dphi"], true),
    column(
        "deep_resistivity",
        &["deep_resistivity", "ild", "lld", "rt", "rdeep"],
        true,
    ),
    column(
        "shallow_resistivity",
        &["shallow_resistivity", "sfl", "lls", "msfl", "rxo"],
        true,
    ),
    column(
        "medium_resistivity",
        &["medium_resistivity", "ilm", "rmed"],
        false,
    ),
    column("caliper", &["caliper", "cali"], false),
    column("bit_size", &["bit_size", "bit", "bs"], false),
    column("sp", &["sp"], true),
    column("density_correction", &["density_correction", "corr", "drho"], false),
    column("micro_normal", &["micro_normal", "rnml", "mnor"], false),
    column("micro_lateral", &["micro_lateral", "rlml", "minv"], false),
];

static CALIBRATION_COLUMNS: [ColumnSpec; 6] = [
    column("well", &["well", "well_name", "well_id"], true),
    column("tvd", &["tvd"], true),
    column(
        "surface_temperature",
        &["surface_temperature", "t_values", "t_surface"],
        true,
    ),
    column("max_temperature", &["max_temperature", "t_max", "bht"], true),
    column("rmf", &["rmf"], true),
    column(
        "rmf_temperature",
        &["rmf_temperature", "rmf_temp", "t_rmf"],
        false,
    ),
];

/// Map each spec to its position in `headers`, failing on a missing required column.
fn resolve_columns<const N: usize>(
    table: &'static str,
    specs: &[ColumnSpec; N],
    headers: &csv::StringRecord,
) -> Result<[Option<usize>; N], LogIoError> {
    let normalized: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();

    let mut positions = [None; N];
    for (slot, spec) in positions.iter_mut().zip(specs) {
        *slot = normalized
            .iter()
            .position(|h| spec.aliases.contains(&h.as_str()));
        if slot.is_none() && spec.required {
            return Err(LogIoError::MissingColumn {
                table,
                column: spec.name,
            });
        }
    }
    Ok(positions)
}

/// Parse a numeric cell. Blank, `nan`, `na`, `null` and the LAS null read as undefined.
fn parse_value(raw: &str, line: u64, column: &'static str) -> Result<f64, LogIoError> {
    let cell = raw.trim();
    if cell.is_empty()
        || ["nan", "na", "null", "n/a"]
            .iter()
            .any(|token| cell.eq_ignore_ascii_case(token))
    {
        return Ok(f64::NAN);
    }

    let value: f64 = cell.parse().map_err(|_| LogIoError::InvalidNumber {
        line,
        column,
        value: cell.to_string(),
    })?;
    if value == LAS_NULL_VALUE || !value.is_finite() {
        Ok(f64::NAN)
    } else {
        Ok(value)
    }
}

fn record_line(record: &csv::StringRecord) -> u64 {
    record.position().map_or(0, csv::Position::line)
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
}

// ============================================================================
// Readers
// ============================================================================

/// Read a well-log table from CSV.
///
/// Optional curves that are absent from the header read as undefined.
pub fn read_log_table<R: Read>(reader: R) -> Result<LogTable, LogIoError> {
    let mut csv_reader = csv_reader(reader);
    let positions = resolve_columns("log", &LOG_COLUMNS, csv_reader.headers()?)?;

    let mut table = LogTable::new();
    for record in csv_reader.records() {
        let record = record?;
        let line = record_line(&record);

        let well = positions[0]
            .and_then(|i| record.get(i))
            .unwrap_or_default()
            .trim();
        if well.is_empty() {
            return Err(LogIoError::EmptyWellId { line });
        }

        let mut values = [f64::NAN; 13];
        for ((value, spec), position) in values
            .iter_mut()
            .zip(&LOG_COLUMNS[1..])
            .zip(&positions[1..])
        {
            if let Some(cell) = position.and_then(|i| record.get(i)) {
                *value = parse_value(cell, line, spec.name)?;
            }
        }

        let [
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
        ] = values;
        table.push(WellLogSample {
            well: well.to_string(),
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
        });
    }

    debug!(rows = table.len(), wells = table.wells().len(), "Parsed log table");
    Ok(table)
}

/// Read per-well calibration records from CSV.
///
/// A missing or blank Rmf temperature falls back to the surface temperature.
/// Two records for the same well are rejected.
pub fn read_calibration_table<R: Read>(reader: R) -> Result<CalibrationTable, LogIoError> {
    let mut csv_reader = csv_reader(reader);
    let positions = resolve_columns("calibration", &CALIBRATION_COLUMNS, csv_reader.headers()?)?;

    let mut records = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let line = record_line(&record);

        let well = positions[0]
            .and_then(|i| record.get(i))
            .unwrap_or_default()
            .trim();
        if well.is_empty() {
            return Err(LogIoError::EmptyWellId { line });
        }

        let mut values = [f64::NAN; 5];
        for ((value, spec), position) in values
            .iter_mut()
            .zip(&CALIBRATION_COLUMNS[1..])
            .zip(&positions[1..])
        {
            if let Some(cell) = position.and_then(|i| record.get(i)) {
                *value = parse_value(cell, line, spec.name)?;
            }
        }

        let [tvd, surface_temperature, max_temperature, rmf, rmf_temperature] = values;
        records.push(WellCalibration {
            well: well.to_string(),
            tvd,
            surface_temperature,
            max_temperature,
            rmf,
            rmf_temperature: if rmf_temperature.is_nan() {
                surface_temperature
            } else {
                rmf_temperature
            },
        });
    }

    Ok(CalibrationTable::from_records(records)?)
}

pub fn load_log_table(path: impl AsRef<Path>) -> Result<LogTable, LogIoError> {
    let path = path.as_ref();
    let table = read_log_table(File::open(path)?)?;
    info!(
        path = %path.display(),
        rows = table.len(),
        wells = table.wells().len(),
        "Loaded well logs"
    );
    Ok(table)
}

pub fn load_calibration_table(path: impl AsRef<Path>) -> Result<CalibrationTable, LogIoError> {
    let path = path.as_ref();
    let table = read_calibration_table(File::open(path)?)?;
    info!(path = %path.display(), wells = table.len(), "Loaded calibration table");
    Ok(table)
}

// ============================================================================
// Writers
// ============================================================================

/// Header of an exported table: well, input curves, then derived columns.
pub fn derived_header() -> Vec<&'static str> {
    std::iter::once("well")
        .chain(LOG_CURVE_NAMES)
        .chain(DERIVED_COLUMN_NAMES)
        .collect()
}

fn format_value(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        value.to_string()
    }
}

/// Write several tables under a single header, in the order given.
///
/// Undefined values become empty cells.
pub fn write_derived_tables<W: Write>(
    writer: W,
    tables: &[DerivedTable],
) -> Result<(), LogIoError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(derived_header())?;

    for table in tables {
        let log = table.log();
        let columns: Vec<&[f64]> = LOG_CURVE_NAMES
            .iter()
            .chain(&DERIVED_COLUMN_NAMES)
            .filter_map(|name| table.column(name))
            .collect();

        for row in 0..table.len() {
            let well = log.well_at(row).unwrap_or_default();
            let record = std::iter::once(well.to_string())
                .chain(columns.iter().map(|col| format_value(col[row])));
            csv_writer.write_record(record)?;
        }
    }

    csv_writer.flush()?;
    Ok(())
}

pub fn write_derived_table<W: Write>(writer: W, table: &DerivedTable) -> Result<(), LogIoError> {
    write_derived_tables(writer, std::slice::from_ref(table))
}

pub fn save_derived_tables(
    path: impl AsRef<Path>,
    tables: &[DerivedTable],
) -> Result<(), LogIoError> {
    let path = path.as_ref();
    write_derived_tables(File::create(path)?, tables)?;
    info!(
        path = %path.display(),
        rows = tables.iter().map(DerivedTable::len).sum::<usize>(),
        "Wrote derived table"
    );
    Ok(())
}
