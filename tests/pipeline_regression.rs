//! Pipeline Regression Tests
//!
//! Exercises `compute` end to end on a small two-well table with hand-checked
//! values: temperature and resistivity correction, the three Sxo policies,
//! shale volume, and the run-level failure modes.

use petrolog::physics_engine::{compute, compute_per_well, CalibrationFault, PipelineError};
use petrolog::{CalibrationTable, LogTable, PipelineParams, WellCalibration, WellLogSample};

const TOL: f64 = 1e-4;

fn assert_close(actual: f64, expected: f64, what: &str) {
    assert!(
        (actual - expected).abs() < TOL,
        "{what}: expected {expected}, got {actual}"
    );
}

fn calibration(well: &str, tvd: f64) -> WellCalibration {
    WellCalibration {
        well: well.to_string(),
        tvd,
        surface_temperature: 78.0,
        max_temperature: 178.0,
        rmf: 0.3,
        rmf_temperature: 78.0,
    }
}

fn calibrations() -> CalibrationTable {
    CalibrationTable::from_records(vec![calibration("A-1", 2000.0), calibration("B-2", 1000.0)])
        .unwrap()
}

/// The reference sample: T = 128 °F at 1000 ft on a 5 °F/100 ft gradient.
fn reference_sample(well: &str, depth: f64) -> WellLogSample {
    WellLogSample {
        gamma_ray: 60.0,
        neutron_porosity: 0.25,
        density_porosity: 0.20,
        deep_resistivity: 20.0,
        shallow_resistivity: 15.0,
        sp: -40.0,
        ..WellLogSample::new(well, depth)
    }
}

fn single_row() -> LogTable {
    std::iter::once(reference_sample("A-1", 1000.0)).collect()
}

fn params() -> PipelineParams {
    PipelineParams::new(-100.0, 0.0, 0.2, 0.3)
}

// ============================================================================
// Reference values
// ============================================================================

#[test]
fn reference_row_matches_hand_calculation() {
    let out = compute(&single_row(), &calibrations(), &params()).unwrap();
    assert_eq!(out.len(), 1);

    let phi = 0.05125f64.sqrt();
    assert_close(out.phi_avg()[0], phi, "phi_avg");
    assert_close(out.phi_avg_filtered()[0], phi, "phi_avg_filtered");
    assert_close(out.temperature()[0], 128.0, "temperature");
    assert_close(out.rmf_corrected()[0], 0.18870, "Rmf_corrected");
    assert_close(out.rw_corrected()[0], 0.031450, "Rw_corrected");
    assert_close(out.rwa()[0], 1.025, "Rwa");
    assert_close(out.sw()[0], 0.175165, "Sw");
    assert_close(out.sxo()[0], 0.495441, "Sxo");
    assert_close(out.mhi()[0], 0.125f64.sqrt(), "MHI");
    assert_close(out.bvw()[0], 0.039655, "Bvw");
    assert_eq!(out.delta_bvw()[0], 0.0);
    assert_close(out.vsh_gamma_ray()[0], 1.0 / 3.0, "Vsh_gamma_ray");
    assert_close(out.vsh_sp()[0], 0.6, "Vsh_sp");
    assert_close(out.vsh_porosity()[0], 0.5, "Vsh_porosity");
}

#[test]
fn input_columns_are_carried_through() {
    let logs = single_row();
    let out = compute(&logs, &calibrations(), &params()).unwrap();
    let row = out.row(0).unwrap();
    assert_eq!(row.sample.well, "A-1");
    assert_eq!(row.sample.depth, 1000.0);
    assert_eq!(row.sample.gamma_ray, 60.0);
    assert_eq!(row.sample.shallow_resistivity, 15.0);
    assert!(row.sample.caliper.is_nan(), "absent curve stays undefined");
    assert_eq!(out.log().wells(), logs.wells());
}

// ============================================================================
// Sxo policies
// ============================================================================

#[test]
fn fixed_rza_takes_precedence_over_invasion() {
    let logs = single_row();
    let with_both = params()
        .with_fixed_flushed_resistivity(0.4)
        .with_invasion_category("deep");
    let rza_only = params().with_fixed_flushed_resistivity(0.4);

    let a = compute(&logs, &calibrations(), &with_both).unwrap();
    let b = compute(&logs, &calibrations(), &rza_only).unwrap();

    assert_eq!(a.sxo()[0].to_bits(), b.sxo()[0].to_bits());
    assert_close(a.sxo()[0], (0.4f64 / (15.0 * 0.05125)).sqrt(), "Sxo with rza");
}

#[test]
fn invasion_category_mixes_formation_water_and_filtrate() {
    let out = compute(&single_row(), &calibrations(), &params().with_invasion_category("deep"))
        .unwrap();

    let rw = out.rw_corrected()[0];
    let rmf = out.rmf_corrected()[0];
    let z = 0.035;
    let mixed = 1.0 / (z / rw + (1.0 - z) / rmf);
    let expected = (mixed / (15.0 * 0.05125)).sqrt();
    assert_close(out.sxo()[0], expected, "Sxo with deep invasion");
    assert!(out.sxo()[0] < 0.495441, "mixing in formation water lowers Sxo");
}

#[test]
fn invasion_category_is_case_and_space_insensitive() {
    let a = compute(&single_row(), &calibrations(), &params().with_invasion_category(" Very Shallow "))
        .unwrap();
    let b = compute(&single_row(), &calibrations(), &params().with_invasion_category("very shallow"))
        .unwrap();
    assert_eq!(a.sxo()[0].to_bits(), b.sxo()[0].to_bits());
}

#[test]
fn unknown_invasion_category_is_rejected() {
    let result = compute(&single_row(), &calibrations(), &params().with_invasion_category("medium"));
    assert_eq!(
        result.err(),
        Some(PipelineError::InvalidInvasionCategory("medium".to_string()))
    );
}

#[test]
fn unknown_invasion_category_is_rejected_even_with_rza() {
    let p = params()
        .with_fixed_flushed_resistivity(0.4)
        .with_invasion_category("medium");
    assert!(matches!(
        compute(&single_row(), &calibrations(), &p),
        Err(PipelineError::InvalidInvasionCategory(_))
    ));
}

// ============================================================================
// Run-level failures
// ============================================================================

#[test]
fn well_without_calibration_fails_the_run() {
    let logs: LogTable = vec![
        reference_sample("A-1", 1000.0),
        reference_sample("C-3", 1000.0),
    ]
    .into_iter()
    .collect();

    assert_eq!(
        compute(&logs, &calibrations(), &params()).err(),
        Some(PipelineError::MissingCalibration {
            well: "C-3".to_string(),
            reason: CalibrationFault::NoRecord,
        })
    );
}

#[test]
fn zero_tvd_is_a_calibration_error() {
    let cals = CalibrationTable::from_records(vec![calibration("A-1", 0.0)]).unwrap();
    assert_eq!(
        compute(&single_row(), &cals, &params()).err(),
        Some(PipelineError::MissingCalibration {
            well: "A-1".to_string(),
            reason: CalibrationFault::NonPositiveTvd(0.0),
        })
    );
}

#[test]
fn unused_calibration_records_are_ignored() {
    let mut cals = calibrations();
    cals.insert(calibration("Z-9", -5.0));
    assert!(compute(&single_row(), &cals, &params()).is_ok());
}

#[test]
fn invalid_parameters_are_rejected() {
    let cases: [(&str, fn(&mut PipelineParams)); 7] = [
        ("archie.a", |p: &mut PipelineParams| p.archie.a = 0.0),
        ("archie.m", |p: &mut PipelineParams| p.archie.m = -2.0),
        ("archie.n", |p: &mut PipelineParams| p.archie.n = 0.0),
        ("gr_max_api", |p: &mut PipelineParams| p.shale.gr_max_api = p.shale.gr_min_api),
        ("neutron_porosity", |p: &mut PipelineParams| {
            p.shale.neutron_porosity = p.shale.density_porosity;
        }),
        ("ssp_mv", |p: &mut PipelineParams| p.shale.ssp_mv = 0.0),
        ("rw_ohmm", |p: &mut PipelineParams| p.formation_water.rw_ohmm = 0.0),
    ];

    for (field, mutate) in cases {
        let mut p = params();
        mutate(&mut p);
        match compute(&single_row(), &calibrations(), &p) {
            Err(PipelineError::InvalidParameter(errors)) => {
                assert!(
                    errors.iter().any(|e| e.contains(field)),
                    "{field}: {errors:?}"
                );
            }
            other => panic!("{field}: expected InvalidParameter, got {other:?}"),
        }
    }
}

// ============================================================================
// Row-level behaviour
// ============================================================================

#[test]
fn negative_porosity_inputs_still_average_positive() {
    let mut bad = reference_sample("A-1", 1001.0);
    bad.neutron_porosity = -0.05;
    bad.density_porosity = -0.05;
    let logs: LogTable = vec![reference_sample("A-1", 1000.0), bad].into_iter().collect();

    let out = compute(&logs, &calibrations(), &params()).unwrap();
    assert_eq!(out.len(), 2);
    // RMS averaging squares the inputs
    assert_close(out.phi_avg()[1], 0.05, "phi_avg");
    assert_eq!(out.phi_avg_filtered()[1], out.phi_avg()[1]);
    assert!(out.sw()[1].is_finite());
}

#[test]
fn missing_resistivity_leaves_row_undefined() {
    let mut gap = reference_sample("A-1", 1001.0);
    gap.deep_resistivity = f64::NAN;
    let logs: LogTable = vec![
        reference_sample("A-1", 1000.0),
        gap,
        reference_sample("A-1", 1002.0),
    ]
    .into_iter()
    .collect();

    let out = compute(&logs, &calibrations(), &params()).unwrap();
    assert_eq!(out.len(), 3);
    assert!(out.sw()[1].is_nan());
    assert!(out.mhi()[1].is_nan());
    assert!(out.bvw()[1].is_nan());
    assert!(out.delta_bvw()[1].is_nan());
    assert!(out.delta_bvw()[2].is_nan());
    assert!(out.sxo()[1].is_finite(), "Sxo uses the shallow curve");
    assert!(out.sw()[2].is_finite());
}

#[test]
fn shale_volumes_are_not_clamped() {
    let mut hot = reference_sample("A-1", 1000.0);
    hot.gamma_ray = 200.0;
    hot.sp = 20.0;
    let logs: LogTable = std::iter::once(hot).collect();
    let out = compute(&logs, &calibrations(), &params()).unwrap();
    assert!(out.vsh_gamma_ray()[0] > 1.0);
    assert!(out.vsh_sp()[0] > 1.0);
}

#[test]
fn delta_bvw_follows_row_order() {
    let mut second = reference_sample("A-1", 1001.0);
    second.deep_resistivity = 40.0;
    let logs: LogTable = vec![reference_sample("A-1", 1000.0), second].into_iter().collect();

    let out = compute(&logs, &calibrations(), &params()).unwrap();
    assert_eq!(out.delta_bvw()[0], 0.0);
    assert_close(out.delta_bvw()[1], out.bvw()[1] - out.bvw()[0], "delta_bvw");
    assert!(out.delta_bvw()[1] < 0.0, "higher Rt means less water");
}

#[test]
fn per_well_temperatures_use_each_wells_gradient() {
    let logs: LogTable = vec![
        reference_sample("A-1", 1000.0),
        reference_sample("B-2", 1000.0),
    ]
    .into_iter()
    .collect();

    let out = compute(&logs, &calibrations(), &params()).unwrap();
    assert_close(out.temperature()[0], 128.0, "A-1 at 5 °F/100 ft");
    assert_close(out.temperature()[1], 178.0, "B-2 at 10 °F/100 ft");

    let per_well = compute_per_well(&logs, &calibrations(), &params()).unwrap();
    assert_eq!(per_well.len(), 2);
    assert_eq!(per_well[1].0, "B-2");
    assert_eq!(per_well[1].1.temperature()[0].to_bits(), out.temperature()[1].to_bits());
    assert_eq!(per_well[1].1.delta_bvw(), &[0.0]);
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn repeated_runs_are_bit_identical() {
    let logs: LogTable = (0..50)
        .map(|i| {
            let mut s = reference_sample(if i % 2 == 0 { "A-1" } else { "B-2" }, 900.0 + i as f64);
            s.deep_resistivity = 5.0 + i as f64;
            s.neutron_porosity = 0.1 + 0.004 * i as f64;
            s
        })
        .collect();
    let p = params().with_invasion_category("average");

    let first = compute(&logs, &calibrations(), &p).unwrap();
    let second = compute(&logs, &calibrations(), &p).unwrap();

    for name in petrolog::types::DERIVED_COLUMN_NAMES {
        let a = first.column(name).unwrap();
        let b = second.column(name).unwrap();
        let a_bits: Vec<u64> = a.iter().map(|v| v.to_bits()).collect();
        let b_bits: Vec<u64> = b.iter().map(|v| v.to_bits()).collect();
        assert_eq!(a_bits, b_bits, "{name}");
    }
}

#[test]
fn input_table_is_not_modified() {
    let logs: LogTable = vec![
        reference_sample("A-1", 1000.0),
        reference_sample("B-2", 1200.0),
    ]
    .into_iter()
    .collect();
    let before: Vec<WellLogSample> = logs.samples().collect();

    compute(&logs, &calibrations(), &params()).unwrap();

    let after: Vec<WellLogSample> = logs.samples().collect();
    assert_eq!(before.len(), after.len());
    for (b, a) in before.iter().zip(&after) {
        assert_eq!(b.well, a.well);
        assert_eq!(b.depth, a.depth);
        assert_eq!(b.gamma_ray, a.gamma_ray);
        assert_eq!(b.deep_resistivity, a.deep_resistivity);
        assert_eq!(b.neutron_porosity, a.neutron_porosity);
    }
}
