use crate::model::SoilSample;
use crate::recommend::engine::select_branch;
use crate::rules::schema::{Comparison, PolicyDef, RangeDef};
use serde::{Deserialize, Serialize};

pub const TRACE_SCHEMA_VERSION: &str = "1.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceSeverity {
    Important,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceStepType {
    RequirementCheck,
    TipCheck,
    OverallDecision,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceStep {
    pub step_type: TraceStepType,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceDecisionTarget {
    Branch,
    Fallback,
    Tip,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceDecision {
    pub decision_id: String,
    pub target: TraceDecisionTarget,
    /// Whether the branch matched or the tip fired.
    pub matched: bool,
    pub reason: String,
    pub severity: TraceSeverity,
    pub steps: Vec<TraceStep>,
}

/// Step-by-step record of how a recommendation was reached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceBundle {
    pub trace_schema_version: String,
    pub policy_name: String,
    pub decisions: Vec<TraceDecision>,
}

/// Rebuild the evaluation of `policy` against `sample` as a trace.
///
/// Branches are listed up to and including the one that matched; branches
/// after it are never evaluated.
pub fn build_trace(sample: &SoilSample, policy: &PolicyDef) -> TraceBundle {
    let mut decisions = Vec::new();
    let selected = select_branch(sample, policy);
    let evaluated = selected.map_or(policy.branches.len(), |i| i + 1);

    for (idx, branch) in policy.branches.iter().take(evaluated).enumerate() {
        let steps: Vec<TraceStep> = branch
            .requirements
            .iter()
            .map(|req| TraceStep {
                step_type: TraceStepType::RequirementCheck,
                message: describe_requirement(sample, req),
            })
            .collect();
        let matched = selected == Some(idx);

        decisions.push(TraceDecision {
            decision_id: format!("dec_branch_{}", idx),
            target: TraceDecisionTarget::Branch,
            matched,
            reason: if matched {
                format!(
                    "branch {} matched -> {}",
                    idx + 1,
                    branch.outcome.soil_health
                )
            } else {
                format!(
                    "branch {} ({}) not satisfied",
                    idx + 1,
                    branch.outcome.soil_health
                )
            },
            severity: if matched {
                TraceSeverity::Important
            } else {
                TraceSeverity::Info
            },
            steps,
        });
    }

    if selected.is_none() {
        decisions.push(TraceDecision {
            decision_id: "dec_fallback".into(),
            target: TraceDecisionTarget::Fallback,
            matched: true,
            reason: format!("no branch matched -> {}", policy.fallback.soil_health),
            severity: TraceSeverity::Important,
            steps: vec![TraceStep {
                step_type: TraceStepType::OverallDecision,
                message: format!("Fallback crops: {}", policy.fallback.crops.join(", ")),
            }],
        });
    }

    for (idx, tip) in policy.tips.iter().enumerate() {
        let value = sample.value(tip.parameter);
        let fired = tip.applies(value);
        let op = match tip.when {
            Comparison::Below => "<",
            Comparison::Above => ">",
        };

        decisions.push(TraceDecision {
            decision_id: format!("dec_tip_{}", idx),
            target: TraceDecisionTarget::Tip,
            matched: fired,
            reason: if fired {
                tip.advice.clone()
            } else {
                format!("not needed: {} is not {} {}", tip.parameter, op, tip.threshold)
            },
            severity: if fired {
                TraceSeverity::Important
            } else {
                TraceSeverity::Info
            },
            steps: vec![TraceStep {
                step_type: TraceStepType::TipCheck,
                message: format!(
                    "{} {} {} {} -> {}",
                    tip.parameter,
                    value,
                    op,
                    tip.threshold,
                    if fired { "yes" } else { "no" }
                ),
            }],
        });
    }

    TraceBundle {
        trace_schema_version: TRACE_SCHEMA_VERSION.to_string(),
        policy_name: policy.name.clone(),
        decisions,
    }
}

fn describe_requirement(sample: &SoilSample, req: &RangeDef) -> String {
    let value = sample.value(req.parameter);
    let bounds = match (req.min, req.max) {
        (Some(min), Some(max)) => format!("in [{}, {}]", min, max),
        (Some(min), None) => format!(">= {}", min),
        (None, Some(max)) => format!("<= {}", max),
        (None, None) => "unbounded".to_string(),
    };
    let verdict = if req.contains(value) { "ok" } else { "failed" };
    format!("{} {} {}: {}", req.parameter, value, bounds, verdict)
}
