//! Shale volume estimators
//!
//! Three independent indicators, never reconciled and never clamped:
//! values outside [0, 1] are returned as computed.

use super::models::defined;
use crate::config::ShaleParams;
use crate::types::LogTable;

/// Gamma ray index
///
/// Formula: Vsh = (GR − GR_min) / (GR_max − GR_min)
pub fn vsh_gamma_ray(gr: f64, gr_min: f64, gr_max: f64) -> f64 {
    defined((gr - gr_min) / (gr_max - gr_min))
}

/// SP deflection
///
/// Formula: Vsh = 1 − ((SP + shift) − SP_baseline) / SSP
pub fn vsh_sp(sp: f64, sp_shift: f64, sp_baseline: f64, ssp: f64) -> f64 {
    defined(1.0 - ((sp + sp_shift) - sp_baseline) / ssp)
}

/// Neutron-density separation
///
/// Formula: Vsh = (φN − φD) / (φN_shale − φD_shale)
pub fn vsh_porosity(
    neutron_porosity: f64,
    density_porosity: f64,
    shale_neutron_porosity: f64,
    shale_density_porosity: f64,
) -> f64 {
    defined(
        (neutron_porosity - density_porosity) / (shale_neutron_porosity - shale_density_porosity),
    )
}

/// The three shale-volume curves of a table.
#[derive(Debug, Clone, Default)]
pub struct ShaleVolumes {
    pub gamma_ray: Vec<f64>,
    pub sp: Vec<f64>,
    pub porosity: Vec<f64>,
}

pub fn estimate(logs: &LogTable, params: &ShaleParams) -> ShaleVolumes {
    let gamma_ray = logs
        .gamma_ray()
        .iter()
        .map(|&gr| vsh_gamma_ray(gr, params.gr_min_api, params.gr_max_api))
        .collect();

    let sp = logs
        .sp()
        .iter()
        .map(|&sp| vsh_sp(sp, params.sp_shift_mv, params.sp_baseline_mv, params.ssp_mv))
        .collect();

    let porosity = logs
        .neutron_porosity()
        .iter()
        .zip(logs.density_porosity())
        .map(|(&phin, &phid)| {
            vsh_porosity(
                phin,
                phid,
                params.neutron_porosity,
                params.density_porosity,
            )
        })
        .collect();

    ShaleVolumes {
        gamma_ray,
        sp,
        porosity,
    }
}
