use crate::error::SoilError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound of the pH scale.
pub const PH_MAX: Decimal = Decimal::from_parts(14, 0, 0, false, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parameter {
    Ph,
    Nitrogen,
    Phosphorus,
    Potassium,
}

impl Parameter {
    /// All parameters in input order.
    pub const ALL: [Parameter; 4] = [
        Parameter::Ph,
        Parameter::Nitrogen,
        Parameter::Phosphorus,
        Parameter::Potassium,
    ];

    pub fn unit(&self) -> &'static str {
        match self {
            Parameter::Ph => "",
            _ => "mg/kg",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Parameter::Ph => "pH Level",
            Parameter::Nitrogen => "Nitrogen",
            Parameter::Phosphorus => "Phosphorus",
            Parameter::Potassium => "Potassium",
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parameter::Ph => write!(f, "pH"),
            Parameter::Nitrogen => write!(f, "nitrogen"),
            Parameter::Phosphorus => write!(f, "phosphorus"),
            Parameter::Potassium => write!(f, "potassium"),
        }
    }
}

/// Soil parameters as typed by the user, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSoilInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_id: Option<String>,
    #[serde(default)]
    pub ph: String,
    #[serde(default)]
    pub nitrogen: String,
    #[serde(default)]
    pub phosphorus: String,
    #[serde(default)]
    pub potassium: String,
    /// Free-text location, e.g. "Bangalore, Karnataka".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl RawSoilInput {
    pub fn new(ph: &str, nitrogen: &str, phosphorus: &str, potassium: &str) -> Self {
        Self {
            ph: ph.to_string(),
            nitrogen: nitrogen.to_string(),
            phosphorus: phosphorus.to_string(),
            potassium: potassium.to_string(),
            ..Self::default()
        }
    }
}

/// A validated soil sample. Only obtainable through validation, so every
/// value held here is inside its domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SoilSample {
    ph: Decimal,
    nitrogen: u32,
    phosphorus: u32,
    potassium: u32,
}

impl SoilSample {
    /// Build a sample from already-typed values, applying the pH bound.
    pub fn new(
        ph: Decimal,
        nitrogen: u32,
        phosphorus: u32,
        potassium: u32,
    ) -> Result<Self, SoilError> {
        if ph < Decimal::ZERO || ph > PH_MAX {
            return Err(SoilError::OutOfRange {
                field: Parameter::Ph,
                value: ph.to_string(),
                expected: "between 0 and 14".into(),
            });
        }
        Ok(Self {
            ph,
            nitrogen,
            phosphorus,
            potassium,
        })
    }

    pub fn ph(&self) -> Decimal {
        self.ph
    }

    pub fn nitrogen(&self) -> u32 {
        self.nitrogen
    }

    pub fn phosphorus(&self) -> u32 {
        self.phosphorus
    }

    pub fn potassium(&self) -> u32 {
        self.potassium
    }

    /// Value of one parameter as a decimal, for threshold comparison.
    pub fn value(&self, parameter: Parameter) -> Decimal {
        match parameter {
            Parameter::Ph => self.ph,
            Parameter::Nitrogen => Decimal::from(self.nitrogen),
            Parameter::Phosphorus => Decimal::from(self.phosphorus),
            Parameter::Potassium => Decimal::from(self.potassium),
        }
    }
}

impl fmt::Display for SoilSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pH {}, N {} mg/kg, P {} mg/kg, K {} mg/kg",
            self.ph, self.nitrogen, self.phosphorus, self.potassium
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new_rejects_ph_above_scale() {
        let err = SoilSample::new(dec!(14.1), 0, 0, 0).unwrap_err();
        assert_eq!(err.field(), Some(Parameter::Ph));
    }

    #[test]
    fn test_new_accepts_scale_ends() {
        assert!(SoilSample::new(dec!(0), 0, 0, 0).is_ok());
        assert!(SoilSample::new(dec!(14), 0, 0, 0).is_ok());
    }

    #[test]
    fn test_value_converts_nutrients() {
        let s = SoilSample::new(dec!(6.5), 45, 23, 180).unwrap();
        assert_eq!(s.value(Parameter::Ph), dec!(6.5));
        assert_eq!(s.value(Parameter::Potassium), dec!(180));
    }

    #[test]
    fn test_parameter_display_and_unit() {
        assert_eq!(Parameter::Ph.to_string(), "pH");
        assert_eq!(Parameter::Ph.unit(), "");
        assert_eq!(Parameter::Potassium.unit(), "mg/kg");
    }

    #[test]
    fn test_raw_input_missing_keys_default_empty() {
        let raw: RawSoilInput = serde_json::from_str(r#"{ "ph": "6.5" }"#).unwrap();
        assert_eq!(raw.ph, "6.5");
        assert!(raw.nitrogen.is_empty());
        assert!(raw.location.is_none());
    }
}
