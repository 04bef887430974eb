//! Physics Engine Module
//!
//! Deterministic petrophysical calculations over a well-log table.
//! All math here is closed-form physics - no fitting, no state.
//!
//! ## Pipeline (single forward pass)
//! 1. Per-well calibration lookup (geothermal gradient, Rmf reference)
//! 2. Porosity averaging and negative-porosity filtering
//! 3. Formation temperature and Arps correction of Rmf and Rw
//! 4. Archie saturation: Rwa, Sw, Sxo (policy resolved once), MHI, Bvw, ΔBvw
//! 5. Shale volume: gamma ray, SP, neutron-density
//!
//! Every formula runs as a columnar pass over the table's curves. The input
//! table is never modified; the result is a new `DerivedTable`.

mod error;
pub mod lookup;
pub mod models;
pub mod policy;
pub mod shale;

pub use error::{CalibrationFault, PipelineError};
pub use lookup::{CalibrationLookup, WellConstants};
pub use policy::{InvasionDepth, SxoPolicy};

use crate::config::PipelineParams;
use crate::types::{CalibrationTable, DerivedColumns, DerivedTable, LogTable};
use rayon::prelude::*;
use tracing::{info, warn};

/// Compute the augmented table for `logs`.
///
/// Fails before touching any row if the parameters are invalid, the invasion
/// category is unknown, or a well in `logs` lacks a usable calibration.
/// Row-level numeric problems only make that row's derived values NaN.
///
/// `delta_bvw` is differenced in table row order, across well boundaries
/// if wells are interleaved; use `compute_per_well` to restart it per well.
pub fn compute(
    logs: &LogTable,
    calibrations: &CalibrationTable,
    params: &PipelineParams,
) -> Result<DerivedTable, PipelineError> {
    params.validate()?;
    let policy = SxoPolicy::resolve(&params.flushed_zone)?;
    let lookup = CalibrationLookup::build(logs, calibrations)?;

    let archie = &params.archie;
    let water = &params.formation_water;

    // Porosity
    let phi_avg: Vec<f64> = logs
        .neutron_porosity()
        .iter()
        .zip(logs.density_porosity())
        .map(|(&phin, &phid)| models::average_porosity(phin, phid))
        .collect();
    let phi_avg_filtered: Vec<f64> = phi_avg.iter().map(|&p| models::filter_negative(p)).collect();

    // Temperature and resistivity correction
    let temperature: Vec<f64> = lookup
        .per_row(logs)
        .zip(logs.depth())
        .map(|(well, &depth)| well.map_or(f64::NAN, |w| w.formation_temperature(depth)))
        .collect();
    let rmf_corrected: Vec<f64> = lookup
        .per_row(logs)
        .zip(&temperature)
        .map(|(well, &t)| well.map_or(f64::NAN, |w| w.rmf_at(t)))
        .collect();
    let rw_corrected: Vec<f64> = temperature
        .iter()
        .map(|&t| models::arps_correction(water.rw_ohmm, water.temp_rw_f, t))
        .collect();

    // Saturation
    let deep = logs.deep_resistivity();
    let shallow = logs.shallow_resistivity();

    let rwa: Vec<f64> = deep
        .iter()
        .zip(&phi_avg)
        .map(|(&rt, &phi)| models::apparent_water_resistivity(rt, phi, archie.a, archie.m))
        .collect();
    let sw: Vec<f64> = rw_corrected
        .iter()
        .zip(deep)
        .zip(&phi_avg_filtered)
        .map(|((&rw, &rt), &phi)| {
            models::archie_saturation(rw, rt, phi, archie.a, archie.m, archie.n)
        })
        .collect();
    let sxo: Vec<f64> = (0..logs.len())
        .map(|i| {
            let flushed_water =
                policy.flushed_water_resistivity(rw_corrected[i], rmf_corrected[i]);
            models::archie_saturation(
                flushed_water,
                shallow[i],
                phi_avg_filtered[i],
                archie.a,
                archie.m,
                archie.n,
            )
        })
        .collect();
    let mhi: Vec<f64> = sw
        .iter()
        .zip(&sxo)
        .map(|(&sw, &sxo)| models::moved_hydrocarbon_index(sw, sxo))
        .collect();
    let bvw: Vec<f64> = phi_avg_filtered
        .iter()
        .zip(&sw)
        .map(|(&phi, &sw)| models::bulk_volume_water(phi, sw))
        .collect();
    let delta_bvw = models::first_difference(&bvw);

    // Shale volume
    let vsh = shale::estimate(logs, &params.shale);

    let undefined_sw = sw.iter().filter(|v| v.is_nan()).count();
    if undefined_sw > 0 {
        warn!(
            undefined_sw,
            rows = logs.len(),
            "Water saturation undefined on some rows"
        );
    }
    info!(
        rows = logs.len(),
        wells = logs.wells().len(),
        policy = %policy,
        "Computed petrophysical table"
    );

    let columns = DerivedColumns {
        phi_avg,
        phi_avg_filtered,
        temperature,
        rmf_corrected,
        rw_corrected,
        rwa,
        sw,
        sxo,
        mhi,
        bvw,
        delta_bvw,
        vsh_gamma_ray: vsh.gamma_ray,
        vsh_sp: vsh.sp,
        vsh_porosity: vsh.porosity,
    };
    Ok(DerivedTable::new(logs.clone(), columns))
}

/// Compute each well separately on the rayon pool.
///
/// Returns `(well, table)` pairs in first-appearance order. Each well's
/// `delta_bvw` starts at zero. The first error encountered aborts the run.
pub fn compute_per_well(
    logs: &LogTable,
    calibrations: &CalibrationTable,
    params: &PipelineParams,
) -> Result<Vec<(String, DerivedTable)>, PipelineError> {
    logs.partition_by_well()
        .into_par_iter()
        .map(|(well, table)| compute(&table, calibrations, params).map(|derived| (well, derived)))
        .collect()
}
