pub mod error;
pub mod model;
pub mod recommend;
pub mod rules;
pub mod trace;
pub mod validate;

use error::SoilError;
use model::RawSoilInput;
use recommend::outcome::{AnalysisResult, BatchResult};
use rules::schema::PolicyDef;

/// Options controlling what an analysis returns.
#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    /// Attach a step-by-step decision trace to each result.
    pub include_trace: bool,
}

/// Main API entry point: validate raw soil input and recommend crops.
///
/// Validation failures are returned before the policy is consulted; once a
/// sample is valid the analysis cannot fail.
pub fn analyze(
    raw: &RawSoilInput,
    policy: &PolicyDef,
    options: &AnalyzeOptions,
) -> Result<AnalysisResult, SoilError> {
    let sample = validate::validate(raw)?;

    let recommendation = recommend::recommend_with(&sample, policy);
    let parameters = recommend::assess_parameters(&sample, policy);
    let summary = recommend::spoken_summary(&recommendation);
    let trace = options
        .include_trace
        .then(|| trace::build_trace(&sample, policy));

    Ok(AnalysisResult {
        sample_id: raw.sample_id.clone(),
        location: raw.location.clone(),
        sample,
        policy_name: policy.name.clone(),
        recommendation,
        parameters,
        summary,
        trace,
    })
}

/// Analyze several samples in order.
///
/// Stops at the first invalid sample; the error names its position
/// (1-based) and sample id.
pub fn analyze_batch(
    inputs: &[RawSoilInput],
    policy: &PolicyDef,
    options: &AnalyzeOptions,
) -> Result<BatchResult, SoilError> {
    let mut samples = Vec::with_capacity(inputs.len());
    for (i, raw) in inputs.iter().enumerate() {
        let result = analyze(raw, policy, options).map_err(|e| SoilError::Sample {
            index: i + 1,
            label: raw
                .sample_id
                .clone()
                .unwrap_or_else(|| "no sample id".into()),
            source: Box::new(e),
        })?;
        samples.push(result);
    }
    tracing::debug!(count = samples.len(), "batch analyzed");
    Ok(BatchResult { samples })
}
