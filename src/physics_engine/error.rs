use thiserror::Error;

/// Why a well's calibration could not be used.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalibrationFault {
    #[error("no calibration record")]
    NoRecord,

    #[error("TVD must be positive, got {0}")]
    NonPositiveTvd(f64),

    #[error("{0} is not a finite number")]
    NonFinite(&'static str),
}

/// Errors that abort a pipeline run. Row-level numeric problems never do:
/// they surface as undefined (NaN) values in the affected row.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    #[error("Missing calibration for well '{well}': {reason}")]
    MissingCalibration { well: String, reason: CalibrationFault },

    #[error(
        "Invalid invasion category '{0}' (expected one of: very deep, deep, average, shallow, very shallow)"
    )]
    InvalidInvasionCategory(String),

    #[error("Invalid pipeline parameters: {}", .0.join("; "))]
    InvalidParameter(Vec<String>),

    #[error("Duplicate calibration record for well '{0}'")]
    DuplicateCalibration(String),
}
