use crate::model::Parameter;
use crate::recommend::outcome::SoilHealth;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A crop recommendation policy: ordered branches, a catch-all fallback,
/// improvement tips and the optimal range of each parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyDef {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    /// Evaluated in order; the first branch whose requirements all hold wins.
    pub branches: Vec<BranchDef>,
    /// Outcome when no branch matches.
    pub fallback: OutcomeDef,
    /// Evaluated independently of the branches, all matching tips in order.
    #[serde(default)]
    pub tips: Vec<TipDef>,
    #[serde(default)]
    pub optimal: Vec<RangeDef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeDef {
    pub soil_health: SoilHealth,
    pub crops: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchDef {
    #[serde(flatten)]
    pub outcome: OutcomeDef,
    pub requirements: Vec<RangeDef>,
}

/// Inclusive bounds on one parameter. Either bound may be open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeDef {
    pub parameter: Parameter,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<Decimal>,
}

impl RangeDef {
    pub fn contains(&self, value: Decimal) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Comparison {
    Below,
    Above,
}

/// An improvement tip, given when a parameter is strictly below or above a threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TipDef {
    pub parameter: Parameter,
    pub when: Comparison,
    pub threshold: Decimal,
    pub advice: String,
}

impl TipDef {
    pub fn applies(&self, value: Decimal) -> bool {
        match self.when {
            Comparison::Below => value < self.threshold,
            Comparison::Above => value > self.threshold,
        }
    }
}
