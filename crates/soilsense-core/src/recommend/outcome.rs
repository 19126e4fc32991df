use crate::model::{Parameter, SoilSample};
use crate::trace::TraceBundle;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Overall soil health. The set of labels is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoilHealth {
    Excellent,
    Good,
    #[serde(rename = "Fair - Needs improvement")]
    Fair,
}

impl SoilHealth {
    pub fn label(&self) -> &'static str {
        match self {
            SoilHealth::Excellent => "Excellent",
            SoilHealth::Good => "Good",
            SoilHealth::Fair => "Fair - Needs improvement",
        }
    }
}

impl fmt::Display for SoilHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Crop suggestions, health label and improvement tips for one sample.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Recommendation {
    /// Suggested crops, best fit first. Never contains duplicates.
    pub crops: Vec<String>,
    pub soil_health: SoilHealth,
    /// Improvement advice in policy order; empty when nothing needs fixing.
    pub tips: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterStatus {
    Optimal,
    Low,
    High,
}

impl fmt::Display for ParameterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterStatus::Optimal => write!(f, "optimal"),
            ParameterStatus::Low => write!(f, "low"),
            ParameterStatus::High => write!(f, "high"),
        }
    }
}

/// One soil parameter compared against its optimal range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterReading {
    pub parameter: Parameter,
    pub value: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optimal_min: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optimal_max: Option<Decimal>,
    pub status: ParameterStatus,
}

/// Full analysis of one sample.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub sample: SoilSample,
    /// Name of the policy that produced the recommendation.
    pub policy_name: String,
    pub recommendation: Recommendation,
    pub parameters: Vec<ParameterReading>,
    /// Short sentence suitable for text-to-speech.
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<TraceBundle>,
}

/// Analysis results for several samples, in input order.
#[derive(Debug, Clone, Serialize)]
pub struct BatchResult {
    pub samples: Vec<AnalysisResult>,
}
