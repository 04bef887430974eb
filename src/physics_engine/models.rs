//! Closed-form petrophysical models
//!
//! Key calculations for formation evaluation:
//! - Formation temperature from a linear geothermal gradient
//! - Arps resistivity temperature correction
//! - Neutron-density porosity averaging
//! - Archie saturation family (Sw, Sxo, Rwa)
//! - Moved hydrocarbons and bulk volume water
//!
//! Every function returns either a finite value or NaN: a zero divisor or a
//! negative base under a fractional exponent yields NaN for that sample.

use crate::config::defaults::ARPS_OFFSET_F;

/// Map infinities to NaN so undefined results share one representation.
#[inline]
pub fn defined(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        f64::NAN
    }
}

// ============================================================================
// Temperature
// ============================================================================

/// Formation temperature at depth (°F)
///
/// Formula: T = gradient × depth / 100 + T_surface
///
/// Where gradient is in °F per 100 ft.
pub fn formation_temperature(gradient: f64, depth: f64, surface_temperature: f64) -> f64 {
    defined(gradient * depth / 100.0 + surface_temperature)
}

/// Arps temperature correction of a resistivity
///
/// Formula: R₂ = R₁ × (T₁ + 6.77) / (T₂ + 6.77)
///
/// Where:
/// - R₁ = resistivity measured at T₁ (°F)
/// - T₂ = target temperature (°F)
pub fn arps_correction(resistivity: f64, reference_temperature: f64, temperature: f64) -> f64 {
    defined(
        resistivity * (reference_temperature + ARPS_OFFSET_F) / (temperature + ARPS_OFFSET_F),
    )
}

// ============================================================================
// Porosity
// ============================================================================

/// Root-mean-square of neutron and density porosity
///
/// Formula: φ = √((φN² + φD²) / 2)
pub fn average_porosity(neutron_porosity: f64, density_porosity: f64) -> f64 {
    defined(
        ((neutron_porosity * neutron_porosity + density_porosity * density_porosity) / 2.0).sqrt(),
    )
}

/// Negative porosity is undefined; the row is kept.
pub fn filter_negative(porosity: f64) -> f64 {
    if porosity >= 0.0 {
        porosity
    } else {
        f64::NAN
    }
}

// ============================================================================
// Archie Saturation
// ============================================================================

/// Apparent water resistivity (ohm·m)
///
/// Formula: Rwa = Rt × φ^m / a
pub fn apparent_water_resistivity(rt: f64, porosity: f64, a: f64, m: f64) -> f64 {
    defined(rt * porosity.powf(m) / a)
}

/// Archie water saturation
///
/// Formula: S = (a × Rwater / (R × φ^m))^(1/n)
///
/// Used for both zones:
/// - Sw: Rwater = Rw at formation temperature, R = deep resistivity
/// - Sxo: Rwater = flushed-zone water resistivity, R = shallow resistivity
pub fn archie_saturation(
    water_resistivity: f64,
    resistivity: f64,
    porosity: f64,
    a: f64,
    m: f64,
    n: f64,
) -> f64 {
    let ratio = defined(a * water_resistivity / (resistivity * porosity.powf(m)));
    defined(ratio.powf(1.0 / n))
}

/// Harmonic mixture of formation water and mud filtrate (ohm·m)
///
/// Formula: R = 1 / (z / Rw + (1 − z) / Rmf)
///
/// Where z = fractional invasion depth.
pub fn harmonic_mixture(z: f64, rw: f64, rmf: f64) -> f64 {
    defined(1.0 / (z / rw + (1.0 - z) / rmf))
}

/// Moved hydrocarbon index, Sw / Sxo
pub fn moved_hydrocarbon_index(sw: f64, sxo: f64) -> f64 {
    if sxo == 0.0 {
        return f64::NAN;
    }
    defined(sw / sxo)
}

/// Bulk volume water, φ × Sw
pub fn bulk_volume_water(porosity: f64, sw: f64) -> f64 {
    defined(porosity * sw)
}

/// First difference in slice order; the first element is 0.
///
/// An undefined neighbour makes that difference undefined. Only the first
/// element is zero: gaps are not zero-filled.
pub fn first_difference(values: &[f64]) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }
    std::iter::once(0.0)
        .chain(values.windows(2).map(|w| defined(w[1] - w[0])))
        .collect()
}
