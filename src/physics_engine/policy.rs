//! Flushed-zone saturation policy
//!
//! Which Sxo formula applies is decided once per run from the optional
//! flushed-zone parameters, in this precedence:
//!
//! 1. a fixed flushed-zone resistivity (`rza`)
//! 2. no invasion category: mud filtrate alone
//! 3. an invasion category: harmonic mixture of Rw and Rmf

use super::error::PipelineError;
use super::models;
use crate::config::{defaults::INVASION_DEPTHS, FlushedZoneParams};
use std::fmt;
use std::str::FromStr;

/// Qualitative depth of mud-filtrate invasion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvasionDepth {
    VeryDeep,
    Deep,
    Average,
    Shallow,
    VeryShallow,
}

impl InvasionDepth {
    /// All categories, in the same order as `INVASION_DEPTHS`.
    pub const ALL: [Self; 5] = [
        Self::VeryDeep,
        Self::Deep,
        Self::Average,
        Self::Shallow,
        Self::VeryShallow,
    ];

    pub fn label(self) -> &'static str {
        INVASION_DEPTHS[self as usize].0
    }

    /// Fractional invasion depth `z`.
    pub fn fraction(self) -> f64 {
        INVASION_DEPTHS[self as usize].1
    }
}

impl FromStr for InvasionDepth {
    type Err = PipelineError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        INVASION_DEPTHS
            .iter()
            .position(|(label, _)| *label == wanted)
            .map(|i| Self::ALL[i])
            .ok_or_else(|| PipelineError::InvalidInvasionCategory(s.to_string()))
    }
}

impl fmt::Display for InvasionDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sxo formula selected for a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SxoPolicy {
    /// Flushed zone saturated with water of a known resistivity.
    FixedResistivity { rza: f64 },
    /// Flushed zone saturated with mud filtrate at formation temperature.
    MudFiltrate,
    /// Flushed-zone water is a mix of formation water and filtrate.
    Invaded { depth: InvasionDepth },
}

impl SxoPolicy {
    /// Resolve the policy from the optional flushed-zone parameters.
    ///
    /// A supplied invasion category is always checked, even when `rza` wins.
    pub fn resolve(params: &FlushedZoneParams) -> Result<Self, PipelineError> {
        let invasion = params
            .invasion_category
            .as_deref()
            .map(str::parse::<InvasionDepth>)
            .transpose()?;

        Ok(match (params.fixed_resistivity_ohmm, invasion) {
            (Some(rza), _) => Self::FixedResistivity { rza },
            (None, None) => Self::MudFiltrate,
            (None, Some(depth)) => Self::Invaded { depth },
        })
    }

    /// Resistivity of the water filling the flushed zone (ohm·m).
    pub fn flushed_water_resistivity(&self, rw_corrected: f64, rmf_corrected: f64) -> f64 {
        match *self {
            Self::FixedResistivity { rza } => rza,
            Self::MudFiltrate => rmf_corrected,
            Self::Invaded { depth } => {
                models::harmonic_mixture(depth.fraction(), rw_corrected, rmf_corrected)
            }
        }
    }
}

impl fmt::Display for SxoPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FixedResistivity { rza } => write!(f, "fixed rza={rza}"),
            Self::MudFiltrate => f.write_str("mud filtrate"),
            Self::Invaded { depth } => write!(f, "{depth} invasion (z={})", depth.fraction()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flushed(category: Option<&str>, rza: Option<f64>) -> FlushedZoneParams {
        FlushedZoneParams {
            invasion_category: category.map(str::to_string),
            fixed_resistivity_ohmm: rza,
        }
    }

    #[test]
    fn test_parse_all_categories() {
        for depth in InvasionDepth::ALL {
            assert_eq!(depth.label().parse::<InvasionDepth>(), Ok(depth));
        }
        assert_eq!(" Very Deep ".parse::<InvasionDepth>(), Ok(InvasionDepth::VeryDeep));
    }

    #[test]
    fn test_fractions() {
        assert_eq!(InvasionDepth::VeryDeep.fraction(), 0.025);
        assert_eq!(InvasionDepth::Deep.fraction(), 0.035);
        assert_eq!(InvasionDepth::Average.fraction(), 0.05);
        assert_eq!(InvasionDepth::Shallow.fraction(), 0.075);
        assert_eq!(InvasionDepth::VeryShallow.fraction(), 0.1);
    }

    #[test]
    fn test_unknown_category_rejected() {
        assert_eq!(
            "medium".parse::<InvasionDepth>(),
            Err(PipelineError::InvalidInvasionCategory("medium".to_string()))
        );
    }

    #[test]
    fn test_precedence() {
        assert_eq!(
            SxoPolicy::resolve(&flushed(Some("deep"), Some(0.4))),
            Ok(SxoPolicy::FixedResistivity { rza: 0.4 })
        );
        assert_eq!(
            SxoPolicy::resolve(&flushed(None, None)),
            Ok(SxoPolicy::MudFiltrate)
        );
        assert_eq!(
            SxoPolicy::resolve(&flushed(Some("shallow"), None)),
            Ok(SxoPolicy::Invaded {
                depth: InvasionDepth::Shallow
            })
        );
    }

    #[test]
    fn test_bad_category_rejected_even_with_rza() {
        assert!(matches!(
            SxoPolicy::resolve(&flushed(Some("medium"), Some(0.4))),
            Err(PipelineError::InvalidInvasionCategory(_))
        ));
    }

    #[test]
    fn test_flushed_water_resistivity() {
        let rw = 0.03;
        let rmf = 0.2;
        assert_eq!(
            SxoPolicy::FixedResistivity { rza: 0.7 }.flushed_water_resistivity(rw, rmf),
            0.7
        );
        assert_eq!(SxoPolicy::MudFiltrate.flushed_water_resistivity(rw, rmf), rmf);

        let mixed = SxoPolicy::Invaded {
            depth: InvasionDepth::Average,
        }
        .flushed_water_resistivity(rw, rmf);
        let expected = 1.0 / (0.05 / rw + 0.95 / rmf);
        assert!((mixed - expected).abs() < 1e-12);
        // Mixture lies between the two end members
        assert!(mixed > rw && mixed < rmf);
    }
}
