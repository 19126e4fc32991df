use soilsense_core::error::SoilError;
use soilsense_core::rules::builtin;
use soilsense_core::rules::schema::{Comparison, PolicyDef, RangeDef};
use std::path::{Path, PathBuf};

pub fn explain(rules: Option<PathBuf>) -> Result<(), SoilError> {
    let policy = super::resolve_policy(rules.as_deref())?;

    println!("{} (version {})\n", policy.name, policy.version);

    if let Some(ref desc) = policy.description {
        println!("{}\n", desc);
    }

    println!(
        "Samples are checked against {} rule(s) in order; the first one that",
        policy.branches.len()
    );
    println!("fits decides the soil health and the suggested crops.\n");

    for (i, branch) in policy.branches.iter().enumerate() {
        let conditions: Vec<String> = branch.requirements.iter().map(describe_range).collect();
        println!("  {}. If {}:", i + 1, conditions.join(" and "));
        println!("       {} -> {}", branch.outcome.soil_health, branch.outcome.crops.join(", "));
        println!();
    }

    println!("  Otherwise:");
    println!(
        "       {} -> {}",
        policy.fallback.soil_health,
        policy.fallback.crops.join(", ")
    );
    println!();

    if !policy.tips.is_empty() {
        println!("Improvement tips (every matching tip is given, whatever the soil health):\n");
        for tip in &policy.tips {
            let op = match tip.when {
                Comparison::Below => "below",
                Comparison::Above => "above",
            };
            println!("  {} {} {}: {}", tip.parameter, op, tip.threshold, tip.advice);
        }
        println!();
    }

    if !policy.optimal.is_empty() {
        println!("Optimal ranges:\n");
        for range in &policy.optimal {
            println!("  {}", describe_range(range));
        }
        println!();
    }

    Ok(())
}

pub fn show() -> Result<(), SoilError> {
    let json = serde_json::to_string_pretty(builtin::default_policy())?;
    println!("{json}");
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), SoilError> {
    let policy = soilsense_core::rules::load_policy(file)?;

    println!("Policy '{}' (v{}) is valid.", policy.name, policy.version);
    println!("  Branches: {}", policy.branches.len());
    println!("  Tips: {}", policy.tips.len());

    let warnings = policy_warnings(&policy);
    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}

/// Issues worth pointing out that do not make a policy invalid.
fn policy_warnings(policy: &PolicyDef) -> Vec<String> {
    let mut warnings = Vec::new();

    if policy.tips.is_empty() {
        warnings.push("no improvement tips defined".to_string());
    }

    for param in soilsense_core::model::Parameter::ALL {
        if !policy.optimal.iter().any(|r| r.parameter == param) {
            warnings.push(format!(
                "no optimal range for {}; it will always be reported as optimal",
                param
            ));
        }
    }

    warnings
}

fn describe_range(range: &RangeDef) -> String {
    let unit = range.parameter.unit();
    let unit = if unit.is_empty() {
        String::new()
    } else {
        format!(" {}", unit)
    };
    match (range.min, range.max) {
        (Some(min), Some(max)) => format!("{} {}-{}{}", range.parameter, min, max, unit),
        (Some(min), None) => format!("{} >= {}{}", range.parameter, min, unit),
        (None, Some(max)) => format!("{} <= {}{}", range.parameter, max, unit),
        (None, None) => format!("{} any", range.parameter),
    }
}
