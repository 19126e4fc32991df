use crate::error::SoilError;
use crate::model::{Parameter, RawSoilInput, SoilSample};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Validate raw user input into a `SoilSample`.
///
/// Empty fields are reported before any value is parsed, in input order
/// (pH, nitrogen, phosphorus, potassium). Then:
/// - pH must be a number in [0, 14]
/// - nutrients must be non-negative numbers; fractional mg/kg are
///   truncated to whole units ("45.7" -> 45)
pub fn validate(raw: &RawSoilInput) -> Result<SoilSample, SoilError> {
    validate_fields(&raw.ph, &raw.nitrogen, &raw.phosphorus, &raw.potassium)
}

/// Validate the four raw field strings directly.
pub fn validate_fields(
    ph: &str,
    nitrogen: &str,
    phosphorus: &str,
    potassium: &str,
) -> Result<SoilSample, SoilError> {
    let fields = [
        (Parameter::Ph, ph.trim()),
        (Parameter::Nitrogen, nitrogen.trim()),
        (Parameter::Phosphorus, phosphorus.trim()),
        (Parameter::Potassium, potassium.trim()),
    ];

    if let Some((field, _)) = fields.iter().find(|(_, v)| v.is_empty()) {
        tracing::warn!(%field, "rejected soil input: missing value");
        return Err(SoilError::MissingField { field: *field });
    }

    let ph = parse_ph(fields[0].1)?;
    let nitrogen = parse_nutrient(Parameter::Nitrogen, fields[1].1)?;
    let phosphorus = parse_nutrient(Parameter::Phosphorus, fields[2].1)?;
    let potassium = parse_nutrient(Parameter::Potassium, fields[3].1)?;

    SoilSample::new(ph, nitrogen, phosphorus, potassium)
}

fn parse_ph(s: &str) -> Result<Decimal, SoilError> {
    let out_of_range = || {
        tracing::warn!(value = s, "rejected soil input: invalid pH");
        SoilError::OutOfRange {
            field: Parameter::Ph,
            value: s.to_string(),
            expected: "between 0 and 14".into(),
        }
    };

    let ph = parse_decimal(s).ok_or_else(out_of_range)?;
    if ph < Decimal::ZERO || ph > crate::model::PH_MAX {
        return Err(out_of_range());
    }
    Ok(ph)
}

fn parse_nutrient(field: Parameter, s: &str) -> Result<u32, SoilError> {
    let out_of_range = || {
        tracing::warn!(%field, value = s, "rejected soil input: invalid nutrient value");
        SoilError::OutOfRange {
            field,
            value: s.to_string(),
            expected: "a non-negative number of mg/kg".into(),
        }
    };

    let value = parse_decimal(s).ok_or_else(out_of_range)?;
    if value.is_sign_negative() && !value.is_zero() {
        return Err(out_of_range());
    }
    value.trunc().to_u32().ok_or_else(out_of_range)
}

/// Parse a decimal, accepting scientific notation as a fallback.
fn parse_decimal(s: &str) -> Option<Decimal> {
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_valid_sample() {
        let s = validate_fields("6.5", "45", "23", "180").unwrap();
        assert_eq!(s.ph(), dec!(6.5));
        assert_eq!(s.nitrogen(), 45);
        assert_eq!(s.phosphorus(), 23);
        assert_eq!(s.potassium(), 180);
    }

    #[test]
    fn test_whitespace_trimming() {
        let s = validate_fields("  7.0 ", " 40", "20 ", "\t150").unwrap();
        assert_eq!(s.ph(), dec!(7.0));
        assert_eq!(s.potassium(), 150);
    }

    #[test]
    fn test_empty_nitrogen_is_missing() {
        let err = validate_fields("6.5", "", "23", "180").unwrap_err();
        assert!(matches!(
            err,
            SoilError::MissingField {
                field: Parameter::Nitrogen
            }
        ));
    }

    #[test]
    fn test_whitespace_only_is_missing() {
        let err = validate_fields("6.5", "45", "   ", "180").unwrap_err();
        assert_eq!(err.field(), Some(Parameter::Phosphorus));
        assert!(matches!(err, SoilError::MissingField { .. }));
    }

    #[test]
    fn test_missing_reported_before_out_of_range() {
        let err = validate_fields("15", "45", "23", "").unwrap_err();
        assert!(matches!(
            err,
            SoilError::MissingField {
                field: Parameter::Potassium
            }
        ));
    }

    #[test]
    fn test_ph_above_14_out_of_range() {
        let err = validate_fields("15", "45", "23", "180").unwrap_err();
        assert!(matches!(
            err,
            SoilError::OutOfRange {
                field: Parameter::Ph,
                ..
            }
        ));
    }

    #[test]
    fn test_negative_ph_out_of_range() {
        let err = validate_fields("-0.1", "45", "23", "180").unwrap_err();
        assert_eq!(err.field(), Some(Parameter::Ph));
    }

    #[test]
    fn test_ph_bounds_inclusive() {
        assert!(validate_fields("0", "0", "0", "0").is_ok());
        assert!(validate_fields("14", "0", "0", "0").is_ok());
    }

    #[test]
    fn test_non_numeric_ph_out_of_range() {
        let err = validate_fields("acidic", "45", "23", "180").unwrap_err();
        assert!(matches!(err, SoilError::OutOfRange { .. }));
    }

    #[test]
    fn test_negative_potassium_out_of_range() {
        let err = validate_fields("6.5", "45", "23", "-5").unwrap_err();
        assert!(matches!(
            err,
            SoilError::OutOfRange {
                field: Parameter::Potassium,
                ..
            }
        ));
    }

    #[test]
    fn test_fractional_nutrient_truncated() {
        let s = validate_fields("6.5", "45.9", "23", "180").unwrap();
        assert_eq!(s.nitrogen(), 45);
    }

    #[test]
    fn test_huge_nutrient_out_of_range() {
        let err = validate_fields("6.5", "45", "99999999999", "180").unwrap_err();
        assert_eq!(err.field(), Some(Parameter::Phosphorus));
    }

    #[test]
    fn test_error_message_names_field() {
        let err = validate_fields("6.5", "lots", "23", "180").unwrap_err();
        assert!(err.to_string().contains("nitrogen"));
    }
}
