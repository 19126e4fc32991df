use soilsense_core::error::SoilError;
use soilsense_core::model::RawSoilInput;
use soilsense_core::AnalyzeOptions;
use std::path::PathBuf;

use crate::output;

pub fn run(
    input_file: PathBuf,
    rules: Option<PathBuf>,
    output_format: &str,
    trace: bool,
) -> Result<(), SoilError> {
    let policy = super::resolve_policy(rules.as_deref())?;

    let json_bytes = std::fs::read(&input_file)?;
    let inputs: Vec<RawSoilInput> = serde_json::from_slice(&json_bytes)?;
    tracing::info!(count = inputs.len(), file = %input_file.display(), "loaded samples");

    let options = AnalyzeOptions {
        include_trace: trace,
    };
    let result = soilsense_core::analyze_batch(&inputs, &policy, &options)?;

    match output_format {
        "json" => output::json::print(&result)?,
        _ => output::table::print_batch(&result),
    }

    Ok(())
}
