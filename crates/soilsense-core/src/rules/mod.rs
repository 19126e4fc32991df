pub mod builtin;
pub mod schema;

use crate::error::SoilError;
use schema::{OutcomeDef, PolicyDef, RangeDef};
use std::collections::HashSet;
use std::path::Path;

/// Load a policy from a JSON file.
pub fn load_policy(path: &Path) -> Result<PolicyDef, SoilError> {
    let content = std::fs::read_to_string(path).map_err(|e| SoilError::PolicyLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_policy(&content, path)
}

/// Parse a policy from a JSON string.
pub fn parse_policy(json: &str, source: &Path) -> Result<PolicyDef, SoilError> {
    let policy: PolicyDef = serde_json::from_str(json).map_err(|e| SoilError::PolicyLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_policy(&policy)?;
    tracing::debug!(name = %policy.name, path = %source.display(), "loaded policy");
    Ok(policy)
}

/// Parse a policy from a JSON string (no file path context).
pub fn parse_policy_str(json: &str) -> Result<PolicyDef, SoilError> {
    let policy: PolicyDef = serde_json::from_str(json).map_err(SoilError::Json)?;
    validate_policy(&policy)?;
    Ok(policy)
}

/// Validate that a policy is well-formed.
pub fn validate_policy(policy: &PolicyDef) -> Result<(), SoilError> {
    for (i, branch) in policy.branches.iter().enumerate() {
        let ctx = format!("branch {} ({})", i + 1, branch.outcome.soil_health);
        validate_outcome(&branch.outcome, &ctx)?;
        if branch.requirements.is_empty() {
            return Err(SoilError::PolicyInvalid(format!(
                "{ctx} has no requirements; use the fallback for a catch-all outcome"
            )));
        }
        for req in &branch.requirements {
            validate_range(req, &ctx)?;
        }
    }

    validate_outcome(&policy.fallback, "fallback")?;

    for tip in &policy.tips {
        if tip.advice.trim().is_empty() {
            return Err(SoilError::PolicyInvalid(format!(
                "tip for {} has empty advice",
                tip.parameter
            )));
        }
    }

    let mut seen = HashSet::new();
    for range in &policy.optimal {
        validate_range(range, "optimal ranges")?;
        if !seen.insert(range.parameter) {
            return Err(SoilError::PolicyInvalid(format!(
                "optimal ranges list {} more than once",
                range.parameter
            )));
        }
    }

    Ok(())
}

fn validate_outcome(outcome: &OutcomeDef, ctx: &str) -> Result<(), SoilError> {
    if outcome.crops.is_empty() {
        return Err(SoilError::PolicyInvalid(format!(
            "{ctx}: crops must not be empty"
        )));
    }

    let mut seen = HashSet::new();
    for crop in &outcome.crops {
        if crop.trim().is_empty() {
            return Err(SoilError::PolicyInvalid(format!(
                "{ctx}: crop name must not be empty"
            )));
        }
        if !seen.insert(crop.to_lowercase()) {
            return Err(SoilError::PolicyInvalid(format!(
                "{ctx}: crop '{crop}' listed more than once"
            )));
        }
    }

    Ok(())
}

fn validate_range(range: &RangeDef, ctx: &str) -> Result<(), SoilError> {
    match (range.min, range.max) {
        (None, None) => Err(SoilError::PolicyInvalid(format!(
            "{ctx}: range for {} has neither min nor max",
            range.parameter
        ))),
        (Some(min), Some(max)) if min > max => Err(SoilError::PolicyInvalid(format!(
            "{ctx}: range for {} has min {} above max {}",
            range.parameter, min, max
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "name": "Test",
        "version": "1.0",
        "branches": [
            {
                "soil_health": "Good",
                "crops": ["Barley"],
                "requirements": [{ "parameter": "ph", "min": "5.5", "max": "8.0" }]
            }
        ],
        "fallback": { "soil_health": "Fair - Needs improvement", "crops": ["Millet"] },
        "tips": [
            { "parameter": "nitrogen", "when": "below", "threshold": "40", "advice": "Add N" }
        ]
    }"#;

    #[test]
    fn test_parse_valid_policy() {
        let p = parse_policy_str(MINIMAL).unwrap();
        assert_eq!(p.name, "Test");
        assert_eq!(p.branches.len(), 1);
        assert_eq!(p.branches[0].outcome.crops, vec!["Barley"]);
        assert_eq!(p.tips.len(), 1);
        assert!(p.optimal.is_empty());
    }

    #[test]
    fn test_fallback_only_policy_allowed() {
        let json = r#"{
            "name": "Flat",
            "version": "1.0",
            "branches": [],
            "fallback": { "soil_health": "Good", "crops": ["Millet"] }
        }"#;
        assert!(parse_policy_str(json).is_ok());
    }

    #[test]
    fn test_empty_crops_rejected() {
        let json = MINIMAL.replace(r#"["Barley"]"#, "[]");
        assert!(parse_policy_str(&json).is_err());
    }

    #[test]
    fn test_duplicate_crop_rejected() {
        let json = MINIMAL.replace(r#"["Millet"]"#, r#"["Millet", "millet"]"#);
        let err = parse_policy_str(&json).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let json = MINIMAL.replace(r#""min": "5.5", "max": "8.0""#, r#""min": "8.0", "max": "5.5""#);
        assert!(parse_policy_str(&json).is_err());
    }

    #[test]
    fn test_unbounded_requirement_rejected() {
        let json = MINIMAL.replace(r#", "min": "5.5", "max": "8.0""#, "");
        assert!(parse_policy_str(&json).is_err());
    }

    #[test]
    fn test_unknown_health_label_rejected() {
        let json = MINIMAL.replace(r#""soil_health": "Good""#, r#""soil_health": "Poor""#);
        assert!(parse_policy_str(&json).is_err());
    }

    #[test]
    fn test_empty_advice_rejected() {
        let json = MINIMAL.replace(r#""Add N""#, r#""  ""#);
        assert!(parse_policy_str(&json).is_err());
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let err = load_policy(Path::new("/nonexistent/policy.json")).unwrap_err();
        assert!(matches!(err, SoilError::PolicyLoad { .. }));
        assert!(err.to_string().contains("/nonexistent/policy.json"));
    }
}
