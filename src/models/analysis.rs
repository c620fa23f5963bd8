use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::error::{AppError, AppResult};

/// Upper bound of every percentage-style metric
pub const METRIC_MAX: i64 = 100;

/// Acne severity reported by a capture
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AcneLevel {
    None,
    Mild,
    Moderate,
    Severe,
}

impl AcneLevel {
    /// Whether any acne was detected at all
    pub fn is_present(self) -> bool {
        self != AcneLevel::None
    }
}

impl Display for AcneLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            AcneLevel::None => "none",
            AcneLevel::Mild => "mild",
            AcneLevel::Moderate => "moderate",
            AcneLevel::Severe => "severe",
        };
        write!(f, "{}", label)
    }
}

/// Skin metrics produced by a single capture
///
/// Numeric fields are scores in `[0, 100]`. Values are signed so that
/// out-of-range input from callers is representable; see [`Analysis::validate`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub acne_level: AcneLevel,
    /// Pore visibility score
    pub pores: i64,
    pub oiliness: i64,
    pub dryness: i64,
    pub dark_spots: i64,
}

impl Analysis {
    /// Checks that every metric lies within `[0, 100]`
    pub fn validate(&self) -> AppResult<()> {
        let fields = [
            ("pores", self.pores),
            ("oiliness", self.oiliness),
            ("dryness", self.dryness),
            ("darkSpots", self.dark_spots),
        ];

        for (field, value) in fields {
            if !(0..=METRIC_MAX).contains(&value) {
                return Err(AppError::InvalidInput(format!(
                    "{} must be between 0 and {}, got {}",
                    field, METRIC_MAX, value
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Analysis {
        Analysis {
            acne_level: AcneLevel::Mild,
            pores: 20,
            oiliness: 30,
            dryness: 20,
            dark_spots: 5,
        }
    }

    #[test]
    fn test_acne_level_serialization() {
        assert_eq!(serde_json::to_string(&AcneLevel::Severe).unwrap(), "\"severe\"");
        let level: AcneLevel = serde_json::from_str("\"none\"").unwrap();
        assert_eq!(level, AcneLevel::None);
    }

    #[test]
    fn test_acne_level_is_present() {
        assert!(!AcneLevel::None.is_present());
        assert!(AcneLevel::Mild.is_present());
        assert!(AcneLevel::Severe.is_present());
    }

    #[test]
    fn test_analysis_uses_camel_case_fields() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["acneLevel"], "mild");
        assert_eq!(json["darkSpots"], 5);
    }

    #[test]
    fn test_validate_accepts_bounds() {
        let analysis = Analysis {
            pores: 0,
            dark_spots: 100,
            ..sample()
        };
        assert!(analysis.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let analysis = Analysis {
            oiliness: 101,
            ..sample()
        };
        let err = analysis.validate().unwrap_err();
        assert!(err.to_string().contains("oiliness"));

        let analysis = Analysis {
            dark_spots: -1,
            ..sample()
        };
        assert!(analysis.validate().is_err());
    }
}
