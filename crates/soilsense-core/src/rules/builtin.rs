use crate::model::Parameter;
use crate::recommend::outcome::SoilHealth;
use crate::rules::schema::{BranchDef, Comparison, OutcomeDef, PolicyDef, RangeDef, TipDef};
use rust_decimal::Decimal;
use std::sync::LazyLock;

static DEFAULT_POLICY: LazyLock<PolicyDef> = LazyLock::new(build_default);

/// The builtin crop recommendation policy.
pub fn default_policy() -> &'static PolicyDef {
    &DEFAULT_POLICY
}

fn range(parameter: Parameter, min: Option<Decimal>, max: Option<Decimal>) -> RangeDef {
    RangeDef { parameter, min, max }
}

fn outcome(soil_health: SoilHealth, crops: &[&str]) -> OutcomeDef {
    OutcomeDef {
        soil_health,
        crops: crops.iter().map(|c| c.to_string()).collect(),
    }
}

fn tip(parameter: Parameter, when: Comparison, threshold: Decimal, advice: &str) -> TipDef {
    TipDef {
        parameter,
        when,
        threshold,
        advice: advice.to_string(),
    }
}

fn build_default() -> PolicyDef {
    use Comparison::{Above, Below};
    use Parameter::{Nitrogen, Ph, Phosphorus, Potassium};

    let ph_5_5 = Decimal::new(55, 1);
    let ph_6_0 = Decimal::new(60, 1);
    let ph_7_5 = Decimal::new(75, 1);
    let ph_8_0 = Decimal::new(80, 1);

    PolicyDef {
        name: "Standard crop recommendations".into(),
        description: Some(
            "Crop suggestions and fertilizer advice from soil pH and N-P-K levels".into(),
        ),
        version: "1.0".into(),
        branches: vec![
            BranchDef {
                outcome: outcome(
                    SoilHealth::Excellent,
                    &["Rice", "Wheat", "Corn", "Tomato", "Potato"],
                ),
                requirements: vec![
                    range(Ph, Some(ph_6_0), Some(ph_7_5)),
                    range(Nitrogen, Some(Decimal::from(40)), None),
                    range(Phosphorus, Some(Decimal::from(20)), None),
                    range(Potassium, Some(Decimal::from(150)), None),
                ],
            },
            BranchDef {
                outcome: outcome(
                    SoilHealth::Good,
                    &["Barley", "Soybean", "Cotton", "Sugarcane"],
                ),
                requirements: vec![range(Ph, Some(ph_5_5), Some(ph_8_0))],
            },
        ],
        fallback: outcome(SoilHealth::Fair, &["Millet", "Sorghum", "Groundnut"]),
        tips: vec![
            tip(Ph, Below, ph_6_0, "Add lime to increase soil pH"),
            tip(Ph, Above, ph_7_5, "Add organic matter to lower pH"),
            tip(Nitrogen, Below, Decimal::from(40), "Apply nitrogen-rich fertilizer"),
            tip(Phosphorus, Below, Decimal::from(20), "Add phosphorus fertilizer"),
            tip(Potassium, Below, Decimal::from(150), "Apply potassium fertilizer"),
        ],
        optimal: vec![
            range(Ph, Some(ph_6_0), Some(ph_7_5)),
            range(Nitrogen, Some(Decimal::from(40)), Some(Decimal::from(200))),
            range(Phosphorus, Some(Decimal::from(20)), Some(Decimal::from(100))),
            range(Potassium, Some(Decimal::from(150)), Some(Decimal::from(300))),
        ],
    }
}
