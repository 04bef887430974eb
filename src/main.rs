//! petrolog - Petrophysical well-log calculation pipeline
//!
//! Reads a well-log CSV and a per-well calibration CSV, derives porosity,
//! temperature-corrected resistivities, Archie saturations, bulk volume
//! water and shale volume, and writes the augmented table.
//!
//! # Usage
//!
//! ```bash
//! # Whole table, parameters from ./petrolog.toml or panel defaults
//! petrolog --logs logs.csv --calibration calibration.csv --out derived.csv
//!
//! # One well, deep invasion, JSON rows on stdout
//! petrolog --logs logs.csv --calibration calibration.csv --well A-1 --invasion deep --format json
//!
//! # Write the effective parameters as a starting petrolog.toml
//! petrolog --print-params > petrolog.toml
//! ```
//!
//! # Environment Variables
//!
//! - `PETROLOG_PARAMS`: Path to a parameter TOML file
//! - `RUST_LOG`: Logging level (default: info)

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use petrolog::{log_io, physics_engine, DerivedSample, DerivedTable, PipelineParams};
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, warn};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "petrolog")]
#[command(about = "Petrophysical well-log calculations (Archie saturation, Rmf/Rw correction, Vsh)")]
#[command(version)]
struct CliArgs {
    /// Well-log CSV (Well_Name, DEPTH, GR, PHIN, PHID, Deep_Resistivity, Shallow_Resistivity, SP, ...)
    #[arg(long, value_name = "CSV", required_unless_present = "print_params")]
    logs: Option<PathBuf>,

    /// Calibration CSV (Well, TVD, T_values, T_max, Rmf[, Rmf_temperature])
    #[arg(long, value_name = "CSV", required_unless_present = "print_params")]
    calibration: Option<PathBuf>,

    /// Parameter TOML file. Without it, $PETROLOG_PARAMS then ./petrolog.toml
    /// are tried before falling back to the parameter-panel defaults.
    #[arg(long, value_name = "TOML")]
    params: Option<PathBuf>,

    /// Restrict the run to one well
    #[arg(long)]
    well: Option<String>,

    /// Invasion category: very deep, deep, average, shallow, very shallow
    #[arg(long)]
    invasion: Option<String>,

    /// Fixed flushed-zone water resistivity (ohm·m). Takes precedence over --invasion.
    #[arg(long, value_name = "OHMM")]
    rza: Option<f64>,

    /// Compute each well separately (ΔBvw restarts per well), in parallel
    #[arg(long)]
    per_well: bool,

    /// Keep only rows at or below this depth
    #[arg(long, value_name = "FT")]
    min_depth: Option<f64>,

    /// Keep only rows at or above this depth
    #[arg(long, value_name = "FT")]
    max_depth: Option<f64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "PATH")]
    out: Option<PathBuf>,

    /// Print the effective parameters as TOML and exit
    #[arg(long)]
    print_params: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
}

// ============================================================================
// Parameters
// ============================================================================

/// Resolve parameters: explicit file, then the standard search, then panel
/// defaults; command-line overrides are applied last.
fn resolve_params(args: &CliArgs) -> Result<PipelineParams> {
    let mut params = match &args.params {
        Some(path) => PipelineParams::load_from_file(path)
            .with_context(|| format!("Failed to load parameters from {}", path.display()))?,
        None => PipelineParams::load().unwrap_or_else(|| {
            info!("Using parameter-panel defaults");
            PipelineParams::panel_defaults()
        }),
    };

    if let Some(category) = &args.invasion {
        params = params.with_invasion_category(category.as_str());
    }
    if let Some(rza) = args.rza {
        params = params.with_fixed_flushed_resistivity(rza);
    }
    Ok(params)
}

// ============================================================================
// Output
// ============================================================================

fn write_output(args: &CliArgs, tables: &[DerivedTable]) -> Result<()> {
    let writer: Box<dyn Write> = match &args.out {
        Some(path) => Box::new(std::io::BufWriter::new(
            std::fs::File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(std::io::stdout().lock()),
    };

    match args.format {
        OutputFormat::Csv => {
            log_io::write_derived_tables(writer, tables).context("Failed to write CSV output")?;
        }
        OutputFormat::Json => {
            let rows: Vec<DerivedSample> = tables.iter().flat_map(DerivedTable::rows).collect();
            let mut writer = writer;
            serde_json::to_writer_pretty(&mut writer, &rows)
                .context("Failed to write JSON output")?;
            writeln!(writer)?;
            writer.flush()?;
        }
    }

    if let Some(path) = &args.out {
        info!(path = %path.display(), format = ?args.format, "Output written");
    }
    Ok(())
}

// ============================================================================
// Main
// ============================================================================

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    let params = resolve_params(&args)?;

    if args.print_params {
        print!("{}", params.to_toml().context("Failed to serialize parameters")?);
        return Ok(());
    }

    let (Some(logs_path), Some(calibration_path)) = (&args.logs, &args.calibration) else {
        bail!("--logs and --calibration are required");
    };

    let mut logs = log_io::load_log_table(logs_path)
        .with_context(|| format!("Failed to read well logs from {}", logs_path.display()))?;
    let calibrations = log_io::load_calibration_table(calibration_path).with_context(|| {
        format!(
            "Failed to read calibration table from {}",
            calibration_path.display()
        )
    })?;

    if let Some(well) = &args.well {
        logs = logs.for_well(well);
        if logs.is_empty() {
            bail!("Well '{}' has no rows in {}", well, logs_path.display());
        }
    }

    let tables: Vec<DerivedTable> = if args.per_well {
        physics_engine::compute_per_well(&logs, &calibrations, &params)?
            .into_iter()
            .map(|(_, table)| table)
            .collect()
    } else {
        vec![physics_engine::compute(&logs, &calibrations, &params)?]
    };

    let tables: Vec<DerivedTable> = if args.min_depth.is_some() || args.max_depth.is_some() {
        tables
            .iter()
            .map(|t| t.depth_window(args.min_depth, args.max_depth))
            .collect()
    } else {
        tables
    };

    let rows: usize = tables.iter().map(DerivedTable::len).sum();
    let undefined_sw: usize = tables
        .iter()
        .map(|t| t.sw().iter().filter(|v| v.is_nan()).count())
        .sum();
    if rows > 0 && undefined_sw == rows {
        warn!(rows, "Water saturation is undefined on every row; check porosity and resistivity curves");
    }
    info!(rows, undefined_sw, tables = tables.len(), "Pipeline complete");

    write_output(&args, &tables)
}
