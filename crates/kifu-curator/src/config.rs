use serde::{Deserialize, Serialize};

/// Tunable weights of the suitability score.
///
/// Deserializes from a partial JSON object; missing fields keep their defaults.
/// Deserialization rejects settings for which [`CuratorConfig::validate`]
/// fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CuratorConfigFields")]
pub struct CuratorConfig {
    /// Weight of the needs-match component in the total
    pub needs_match_weight: f64,
    /// Weight of the stability component in the total
    pub stability_weight: f64,
    /// Radar score below which an axis counts as a weakness
    pub weak_axis_threshold: f64,
    /// Score-lead standard deviation at which raw stability halves
    pub volatility_scale: f64,
    /// Share of stability taken from the reliability ratio, when known
    pub reliability_weight: f64,
}

impl Default for CuratorConfig {
    fn default() -> Self {
        Self {
            needs_match_weight: 0.6,
            stability_weight: 0.4,
            weak_axis_threshold: 3.0,
            volatility_scale: 5.0,
            reliability_weight: 0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum CuratorConfigError {
    #[display("'{field}' must be a finite non-negative number, got {value}")]
    NegativeWeight { field: &'static str, value: f64 },
    #[display("'reliability_weight' must lie in [0, 1], got {value}")]
    ReliabilityWeightOutOfRange { value: f64 },
    #[display("'volatility_scale' must be a finite positive number, got {value}")]
    NonPositiveVolatilityScale { value: f64 },
    #[display("'weak_axis_threshold' must be finite, got {value}")]
    NonFiniteThreshold { value: f64 },
}

impl CuratorConfig {
    /// Checks that every score computed with these settings is a finite number.
    ///
    /// # Errors
    ///
    /// Returns an error for a negative or non-finite component weight, a
    /// reliability weight outside `[0, 1]`, a volatility scale that is not
    /// positive, or a non-finite weakness threshold.
    pub fn validate(&self) -> Result<(), CuratorConfigError> {
        for (field, value) in [
            ("needs_match_weight", self.needs_match_weight),
            ("stability_weight", self.stability_weight),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(CuratorConfigError::NegativeWeight { field, value });
            }
        }
        if !(0.0..=1.0).contains(&self.reliability_weight) {
            return Err(CuratorConfigError::ReliabilityWeightOutOfRange {
                value: self.reliability_weight,
            });
        }
        if !(self.volatility_scale.is_finite() && self.volatility_scale > 0.0) {
            return Err(CuratorConfigError::NonPositiveVolatilityScale {
                value: self.volatility_scale,
            });
        }
        if !self.weak_axis_threshold.is_finite() {
            return Err(CuratorConfigError::NonFiniteThreshold {
                value: self.weak_axis_threshold,
            });
        }
        Ok(())
    }
}

/// Wire form of [`CuratorConfig`], checked before it becomes one.
#[derive(Deserialize)]
#[serde(default)]
struct CuratorConfigFields {
    needs_match_weight: f64,
    stability_weight: f64,
    weak_axis_threshold: f64,
    volatility_scale: f64,
    reliability_weight: f64,
}

impl Default for CuratorConfigFields {
    fn default() -> Self {
        let CuratorConfig {
            needs_match_weight,
            stability_weight,
            weak_axis_threshold,
            volatility_scale,
            reliability_weight,
        } = CuratorConfig::default();
        Self {
            needs_match_weight,
            stability_weight,
            weak_axis_threshold,
            volatility_scale,
            reliability_weight,
        }
    }
}

impl TryFrom<CuratorConfigFields> for CuratorConfig {
    type Error = CuratorConfigError;

    fn try_from(fields: CuratorConfigFields) -> Result<Self, Self::Error> {
        let config = Self {
            needs_match_weight: fields.needs_match_weight,
            stability_weight: fields.stability_weight,
            weak_axis_threshold: fields.weak_axis_threshold,
            volatility_scale: fields.volatility_scale,
            reliability_weight: fields.reliability_weight,
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: CuratorConfig = serde_json::from_str(r#"{ "stability_weight": 0.5 }"#).unwrap();
        assert_eq!(config.stability_weight, 0.5);
        assert_eq!(config.needs_match_weight, 0.6);
        assert_eq!(config.weak_axis_threshold, 3.0);
    }

    #[test]
    fn test_default_is_valid() {
        assert_eq!(CuratorConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_degenerate_settings_are_rejected() {
        for json in [
            r#"{ "volatility_scale": 0.0 }"#,
            r#"{ "volatility_scale": -1.0 }"#,
            r#"{ "needs_match_weight": -0.1 }"#,
            r#"{ "stability_weight": -2.0 }"#,
            r#"{ "reliability_weight": 1.5 }"#,
        ] {
            let result = serde_json::from_str::<CuratorConfig>(json);
            assert!(result.is_err(), "{json}");
        }

        let config = CuratorConfig {
            volatility_scale: 0.0,
            ..CuratorConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(CuratorConfigError::NonPositiveVolatilityScale { value: 0.0 })
        );
    }

    #[test]
    fn test_error_message_names_field() {
        let config = CuratorConfig {
            stability_weight: -1.0,
            ..CuratorConfig::default()
        };
        let message = config.validate().unwrap_err().to_string();
        assert!(message.contains("stability_weight"), "{message}");
    }
}
