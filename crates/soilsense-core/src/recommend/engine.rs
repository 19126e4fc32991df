use crate::model::{Parameter, SoilSample};
use crate::recommend::outcome::{ParameterReading, ParameterStatus, Recommendation};
use crate::rules::builtin::default_policy;
use crate::rules::schema::{OutcomeDef, PolicyDef, TipDef};
use std::collections::HashSet;

/// Number of crops named in the spoken summary.
const SPOKEN_CROPS: usize = 3;

/// Recommend crops for a sample using the builtin policy.
pub fn recommend(sample: &SoilSample) -> Recommendation {
    recommend_with(sample, default_policy())
}

/// Recommend crops for a sample using the given policy.
///
/// The first branch whose requirements all hold decides crops and soil
/// health, otherwise the fallback does. Tips are evaluated independently of
/// the chosen branch, so an "Excellent" sample can still carry advice.
pub fn recommend_with(sample: &SoilSample, policy: &PolicyDef) -> Recommendation {
    let outcome = match select_branch(sample, policy) {
        Some(i) => &policy.branches[i].outcome,
        None => &policy.fallback,
    };

    let tips: Vec<String> = matching_tips(sample, policy)
        .map(|tip| tip.advice.clone())
        .collect();

    tracing::debug!(
        %sample,
        soil_health = %outcome.soil_health,
        tips = tips.len(),
        "recommendation computed"
    );

    Recommendation {
        crops: unique_crops(outcome),
        soil_health: outcome.soil_health,
        tips,
    }
}

/// Index of the first branch whose requirements the sample satisfies.
pub fn select_branch(sample: &SoilSample, policy: &PolicyDef) -> Option<usize> {
    policy.branches.iter().position(|branch| {
        branch
            .requirements
            .iter()
            .all(|req| req.contains(sample.value(req.parameter)))
    })
}

/// Tips that apply to the sample, in policy order.
pub fn matching_tips<'a>(
    sample: &'a SoilSample,
    policy: &'a PolicyDef,
) -> impl Iterator<Item = &'a TipDef> + 'a {
    policy
        .tips
        .iter()
        .filter(move |tip| tip.applies(sample.value(tip.parameter)))
}

/// Compare each parameter against the policy's optimal range.
///
/// Parameters without a configured range are reported as optimal.
pub fn assess_parameters(sample: &SoilSample, policy: &PolicyDef) -> Vec<ParameterReading> {
    Parameter::ALL
        .iter()
        .map(|&parameter| {
            let value = sample.value(parameter);
            let range = policy.optimal.iter().find(|r| r.parameter == parameter);
            let (optimal_min, optimal_max) = range.map_or((None, None), |r| (r.min, r.max));

            let status = if optimal_min.is_some_and(|min| value < min) {
                ParameterStatus::Low
            } else if optimal_max.is_some_and(|max| value > max) {
                ParameterStatus::High
            } else {
                ParameterStatus::Optimal
            };

            ParameterReading {
                parameter,
                value,
                optimal_min,
                optimal_max,
                status,
            }
        })
        .collect()
}

/// Sentence read aloud once an analysis completes.
pub fn spoken_summary(recommendation: &Recommendation) -> String {
    let crops: Vec<&str> = recommendation
        .crops
        .iter()
        .take(SPOKEN_CROPS)
        .map(String::as_str)
        .collect();
    format!(
        "Soil analysis complete. Recommended crops are {}. Soil health is {}.",
        crops.join(", "),
        recommendation.soil_health
    )
}

fn unique_crops(outcome: &OutcomeDef) -> Vec<String> {
    let mut seen = HashSet::new();
    outcome
        .crops
        .iter()
        .filter(|c| seen.insert(c.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommend::outcome::SoilHealth;
    use crate::rules::schema::{BranchDef, RangeDef};
    use rust_decimal_macros::dec;

    fn sample(ph: rust_decimal::Decimal, n: u32, p: u32, k: u32) -> SoilSample {
        SoilSample::new(ph, n, p, k).unwrap()
    }

    #[test]
    fn test_excellent_branch_no_tips() {
        let rec = recommend(&sample(dec!(6.5), 45, 23, 180));
        assert_eq!(rec.soil_health, SoilHealth::Excellent);
        assert_eq!(rec.crops, vec!["Rice", "Wheat", "Corn", "Tomato", "Potato"]);
        assert!(rec.tips.is_empty());
    }

    #[test]
    fn test_fair_branch_with_all_deficiency_tips() {
        let rec = recommend(&sample(dec!(5.0), 30, 10, 100));
        assert_eq!(rec.soil_health, SoilHealth::Fair);
        assert_eq!(rec.crops, vec!["Millet", "Sorghum", "Groundnut"]);
        assert_eq!(
            rec.tips,
            vec![
                "Add lime to increase soil pH",
                "Apply nitrogen-rich fertilizer",
                "Add phosphorus fertilizer",
                "Apply potassium fertilizer",
            ]
        );
    }

    #[test]
    fn test_lower_boundaries_inclusive() {
        let rec = recommend(&sample(dec!(6.0), 40, 20, 150));
        assert_eq!(rec.soil_health, SoilHealth::Excellent);
        assert!(rec.tips.is_empty());
    }

    #[test]
    fn test_good_branch_at_ph_8() {
        let rec = recommend(&sample(dec!(8.0), 200, 100, 300));
        assert_eq!(rec.soil_health, SoilHealth::Good);
        assert_eq!(rec.crops, vec!["Barley", "Soybean", "Cotton", "Sugarcane"]);
        assert_eq!(rec.tips, vec!["Add organic matter to lower pH"]);
    }

    #[test]
    fn test_tips_independent_of_branch() {
        // pH 7.5 is inside the excellent pH band but potassium misses by one
        let rec = recommend(&sample(dec!(7.5), 40, 20, 149));
        assert_eq!(rec.soil_health, SoilHealth::Good);
        assert_eq!(rec.tips, vec!["Apply potassium fertilizer"]);
    }

    #[test]
    fn test_good_branch_low_ph_gets_lime_tip() {
        let rec = recommend(&sample(dec!(5.5), 50, 30, 200));
        assert_eq!(rec.soil_health, SoilHealth::Good);
        assert_eq!(rec.tips, vec!["Add lime to increase soil pH"]);
    }

    #[test]
    fn test_alkaline_soil_falls_back() {
        let rec = recommend(&sample(dec!(8.1), 50, 30, 200));
        assert_eq!(rec.soil_health, SoilHealth::Fair);
        assert_eq!(rec.tips, vec!["Add organic matter to lower pH"]);
    }

    #[test]
    fn test_select_branch_indices() {
        let p = default_policy();
        assert_eq!(select_branch(&sample(dec!(6.5), 45, 23, 180), p), Some(0));
        assert_eq!(select_branch(&sample(dec!(6.5), 10, 23, 180), p), Some(1));
        assert_eq!(select_branch(&sample(dec!(4.0), 45, 23, 180), p), None);
    }

    #[test]
    fn test_duplicate_crops_collapsed() {
        let mut policy = default_policy().clone();
        policy.fallback.crops = vec!["Millet".into(), "Millet".into(), "Sorghum".into()];
        let rec = recommend_with(&sample(dec!(3.0), 0, 0, 0), &policy);
        assert_eq!(rec.crops, vec!["Millet", "Sorghum"]);
    }

    #[test]
    fn test_custom_policy_first_match_wins() {
        let mut policy = default_policy().clone();
        policy.branches.insert(
            0,
            BranchDef {
                outcome: OutcomeDef {
                    soil_health: SoilHealth::Good,
                    crops: vec!["Tea".into()],
                },
                requirements: vec![RangeDef {
                    parameter: Parameter::Ph,
                    min: None,
                    max: Some(dec!(7.0)),
                }],
            },
        );
        let rec = recommend_with(&sample(dec!(6.5), 45, 23, 180), &policy);
        assert_eq!(rec.crops, vec!["Tea"]);
    }

    #[test]
    fn test_assess_parameters_statuses() {
        let readings = assess_parameters(&sample(dec!(8.0), 45, 10, 400), default_policy());
        let statuses: Vec<_> = readings.iter().map(|r| r.status).collect();
        assert_eq!(
            statuses,
            vec![
                ParameterStatus::High,
                ParameterStatus::Optimal,
                ParameterStatus::Low,
                ParameterStatus::High,
            ]
        );
        assert_eq!(readings[0].optimal_min, Some(dec!(6.0)));
        assert_eq!(readings[3].value, dec!(400));
    }

    #[test]
    fn test_assess_without_ranges_is_optimal() {
        let mut policy = default_policy().clone();
        policy.optimal.clear();
        let readings = assess_parameters(&sample(dec!(1.0), 0, 0, 0), &policy);
        assert!(readings.iter().all(|r| r.status == ParameterStatus::Optimal));
    }

    #[test]
    fn test_spoken_summary_names_first_three_crops() {
        let rec = recommend(&sample(dec!(6.5), 45, 23, 180));
        assert_eq!(
            spoken_summary(&rec),
            "Soil analysis complete. Recommended crops are Rice, Wheat, Corn. Soil health is Excellent."
        );
    }
}
