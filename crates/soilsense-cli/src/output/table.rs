use soilsense_core::recommend::outcome::{AnalysisResult, BatchResult, ParameterReading};
use soilsense_core::trace::{TraceBundle, TraceSeverity};

pub fn print_analysis(result: &AnalysisResult, show_parameters: bool) {
    let rec = &result.recommendation;

    match (&result.sample_id, &result.location) {
        (Some(id), Some(loc)) => println!("=== Sample {} ({}) ===\n", id, loc),
        (Some(id), None) => println!("=== Sample {} ===\n", id),
        (None, Some(loc)) => println!("=== Soil analysis ({}) ===\n", loc),
        (None, None) => println!("=== Soil analysis ===\n"),
    }

    println!("  Soil health: {}", rec.soil_health);
    println!("  Sample:      {}\n", result.sample);

    println!("  Recommended crops:");
    for (i, crop) in rec.crops.iter().enumerate() {
        println!("    {}. {}", i + 1, crop);
    }
    println!();

    if !rec.tips.is_empty() {
        println!("  Improvement tips:");
        for tip in &rec.tips {
            println!("    - {}", tip);
        }
        println!();
    }

    if show_parameters {
        print_parameters(&result.parameters);
    }

    if let Some(ref trace) = result.trace {
        print_trace(trace);
    }
}

pub fn print_batch(result: &BatchResult) {
    for (i, sample) in result.samples.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print_analysis(sample, false);
    }
}

fn print_parameters(readings: &[ParameterReading]) {
    let max_label = readings
        .iter()
        .map(|r| r.parameter.label().len())
        .max()
        .unwrap_or(10);

    println!("  Soil parameters:");
    for r in readings {
        let value = format!("{}{}", r.value, unit_suffix(r.parameter.unit()));
        let optimal = match (r.optimal_min, r.optimal_max) {
            (Some(min), Some(max)) => format!("optimal {}-{}", min, max),
            (Some(min), None) => format!("optimal >= {}", min),
            (None, Some(max)) => format!("optimal <= {}", max),
            (None, None) => "no optimal range".to_string(),
        };
        println!(
            "    {:<width$}  {:<12} {:<8} ({})",
            r.parameter.label(),
            value,
            r.status.to_string(),
            optimal,
            width = max_label
        );
    }
    println!();
}

fn unit_suffix(unit: &str) -> String {
    if unit.is_empty() {
        String::new()
    } else {
        format!(" {}", unit)
    }
}

fn print_trace(trace: &TraceBundle) {
    println!("  Decision trace ({}):", trace.policy_name);
    for decision in &trace.decisions {
        let marker = match decision.severity {
            TraceSeverity::Important => "*",
            TraceSeverity::Info => " ",
        };
        println!("   {} {}", marker, decision.reason);
        for step in &decision.steps {
            println!("        {}", step.message);
        }
    }
    println!();
}
