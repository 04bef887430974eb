//! Params validation: unknown-key detection with edit-distance suggestions
//! and physical range checks.
//!
//! Unknown keys are found by walking the raw `toml::Value` tree before serde
//! sees it; they only ever produce warnings. Range checks split into hard
//! errors (the formulas cannot be evaluated) and warnings (outside the
//! ranges the parameter panel offers).

use super::PipelineParams;
use std::collections::HashSet;

/// A non-fatal params warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " (did you mean '{s}'?)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Keys
// ============================================================================

/// Every valid dotted key path of `PipelineParams`.
///
/// Must be kept in step with the structs in pipeline_params.rs.
pub fn known_param_keys() -> HashSet<&'static str> {
    [
        "archie",
        "archie.a",
        "archie.m",
        "archie.n",
        "formation_water",
        "formation_water.rw_ohmm",
        "formation_water.temp_rw_f",
        "flushed_zone",
        "flushed_zone.invasion_category",
        "flushed_zone.fixed_resistivity_ohmm",
        "shale",
        "shale.ssp_mv",
        "shale.sp_baseline_mv",
        "shale.sp_shift_mv",
        "shale.gr_min_api",
        "shale.gr_max_api",
        "shale.density_porosity",
        "shale.neutron_porosity",
    ]
    .into_iter()
    .collect()
}

/// Collect the dotted path of every key in a TOML tree, tables included.
///
/// `{ a = { b = 1 } }` yields `["a", "a.b"]`.
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let Some(table) = value.as_table() else {
        return Vec::new();
    };

    table
        .iter()
        .flat_map(|(key, child)| {
            let path = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{prefix}.{key}")
            };
            let nested = walk_toml_keys(child, &path);
            std::iter::once(path).chain(nested)
        })
        .collect()
}

/// Levenshtein edit distance over Unicode scalar values.
fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.iter().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = diagonal + usize::from(ca != cb);
            diagonal = row[j + 1];
            row[j + 1] = substitution.min(row[j] + 1).min(row[j + 1] + 1);
        }
    }
    row[b.len()]
}

/// Closest known key within edit distance 3, ties broken alphabetically.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|k| (edit_distance(unknown, k), *k))
        .filter(|&(d, _)| d <= 3)
        .min()
        .map(|(_, k)| k.to_string())
}

/// Warn about every key in `raw_toml` that `PipelineParams` does not know.
///
/// Unparseable TOML yields no warnings; serde reports it afterwards.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let Ok(value) = raw_toml.parse::<toml::Value>() else {
        return Vec::new();
    };

    let known = known_param_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| ValidationWarning {
            suggestion: suggest_correction(&key, &known),
            message: format!("Unknown params key '{key}'"),
            field: key,
        })
        .collect()
}

// ============================================================================
// Physical Range Validation
// ============================================================================

/// Validate physical ranges on parsed parameters.
///
/// Returns (errors, warnings): errors are values the formulas cannot use;
/// warnings are legal but outside the usual calibration ranges.
pub fn validate_physical_ranges(params: &PipelineParams) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let archie = &params.archie;
    let water = &params.formation_water;
    let shale = &params.shale;

    let mut numeric: Vec<(&str, f64)> = vec![
        ("archie.a", archie.a),
        ("archie.m", archie.m),
        ("archie.n", archie.n),
        ("formation_water.rw_ohmm", water.rw_ohmm),
        ("formation_water.temp_rw_f", water.temp_rw_f),
        ("shale.ssp_mv", shale.ssp_mv),
        ("shale.sp_baseline_mv", shale.sp_baseline_mv),
        ("shale.sp_shift_mv", shale.sp_shift_mv),
        ("shale.gr_min_api", shale.gr_min_api),
        ("shale.gr_max_api", shale.gr_max_api),
        ("shale.density_porosity", shale.density_porosity),
        ("shale.neutron_porosity", shale.neutron_porosity),
    ];
    if let Some(rza) = params.flushed_zone.fixed_resistivity_ohmm {
        numeric.push(("flushed_zone.fixed_resistivity_ohmm", rza));
    }

    // NaN/Inf compare false against every bound, so reject them up front
    let non_finite: Vec<&str> = numeric
        .iter()
        .filter(|(_, v)| !v.is_finite())
        .map(|&(name, _)| name)
        .collect();
    if !non_finite.is_empty() {
        for name in non_finite {
            errors.push(format!("{name} must be a finite number"));
        }
        return (errors, warnings);
    }

    // Archie constants appear as divisor and exponents
    for (name, value) in [("archie.a", archie.a), ("archie.m", archie.m), ("archie.n", archie.n)] {
        if value <= 0.0 {
            errors.push(format!("{name} = {value} must be > 0"));
        }
    }

    if water.rw_ohmm <= 0.0 {
        errors.push(format!(
            "formation_water.rw_ohmm = {} must be > 0",
            water.rw_ohmm
        ));
    }
    if let Some(rza) = params.flushed_zone.fixed_resistivity_ohmm {
        if rza <= 0.0 {
            errors.push(format!(
                "flushed_zone.fixed_resistivity_ohmm = {rza} must be > 0"
            ));
        }
    }

    // Shale indicator denominators
    if shale.gr_max_api <= shale.gr_min_api {
        errors.push(format!(
            "shale.gr_max_api ({:.1}) must be > gr_min_api ({:.1})",
            shale.gr_max_api, shale.gr_min_api
        ));
    }
    if shale.ssp_mv == 0.0 {
        errors.push("shale.ssp_mv must be non-zero (used as divisor)".to_string());
    }
    if shale.neutron_porosity == shale.density_porosity {
        errors.push(format!(
            "shale.neutron_porosity and shale.density_porosity are both {} (used as divisor)",
            shale.neutron_porosity
        ));
    }

    // Panel ranges
    let mut suspicious = |field: &str, value: f64, lo: f64, hi: f64, unit: &str| {
        if value < lo || value > hi {
            warnings.push(ValidationWarning {
                field: field.to_string(),
                message: format!("{field} = {value} is outside typical range ({lo} to {hi}{unit})"),
                suggestion: None,
            });
        }
    };
    suspicious("archie.a", archie.a, 0.3, 2.0, "");
    suspicious("archie.m", archie.m, 1.0, 3.0, "");
    suspicious("archie.n", archie.n, 1.0, 3.0, "");
    suspicious("shale.ssp_mv", shale.ssp_mv, -110.0, -10.0, " mV");
    suspicious("shale.sp_shift_mv", shale.sp_shift_mv, -100.0, 100.0, " mV");
    suspicious("shale.density_porosity", shale.density_porosity, 0.0, 0.5, " v/v");
    suspicious("shale.neutron_porosity", shale.neutron_porosity, 0.0, 0.5, " v/v");

    (errors, warnings)
}
