use soilsense_core::error::SoilError;
use soilsense_core::model::RawSoilInput;
use soilsense_core::AnalyzeOptions;
use std::path::PathBuf;

use crate::output;

/// Soil values as given on the command line. Omitted flags become empty
/// input so validation reports them as missing.
pub struct SampleArgs {
    pub ph: Option<String>,
    pub nitrogen: Option<String>,
    pub phosphorus: Option<String>,
    pub potassium: Option<String>,
    pub location: Option<String>,
}

impl From<SampleArgs> for RawSoilInput {
    fn from(args: SampleArgs) -> Self {
        RawSoilInput {
            sample_id: None,
            ph: args.ph.unwrap_or_default(),
            nitrogen: args.nitrogen.unwrap_or_default(),
            phosphorus: args.phosphorus.unwrap_or_default(),
            potassium: args.potassium.unwrap_or_default(),
            location: args.location,
        }
    }
}

pub fn run(
    sample: SampleArgs,
    rules: Option<PathBuf>,
    output_format: &str,
    show_parameters: bool,
    trace: bool,
) -> Result<(), SoilError> {
    let policy = super::resolve_policy(rules.as_deref())?;
    let raw = RawSoilInput::from(sample);
    let options = AnalyzeOptions {
        include_trace: trace,
    };

    let result = soilsense_core::analyze(&raw, &policy, &options)?;

    match output_format {
        "json" => output::json::print(&result)?,
        _ => output::table::print_analysis(&result, show_parameters),
    }

    Ok(())
}
