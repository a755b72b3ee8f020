use serde::Serialize;

use crate::alternatives::catalog::{AlternativeFood, CatalogProvider};
use crate::nutrition::NutritionRecord;
use crate::profile::{Condition, Profile};

const MAX_SUGGESTIONS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    #[serde(flatten)]
    pub food: AlternativeFood,
    /// Points gained over the current food's score.
    pub score_gain: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "suggestions", rename_all = "snake_case")]
pub enum Recommendation {
    /// The current food already scores at least as well as every candidate.
    NoneNeeded,
    Alternatives(Vec<Suggestion>),
}

impl Recommendation {
    pub fn suggestions(&self) -> &[Suggestion] {
        match self {
            Recommendation::NoneNeeded => &[],
            Recommendation::Alternatives(suggestions) => suggestions,
        }
    }
}

fn condition_benefits(profile: &Profile) -> impl Iterator<Item = &'static str> + '_ {
    [
        (Condition::HighBloodPressure, "Blood pressure friendly"),
        (Condition::Type2Diabetes, "Diabetic friendly"),
        (Condition::HeartDisease, "Heart healthy"),
    ]
    .into_iter()
    .filter(|(condition, _)| profile.has(*condition))
    .map(|(_, benefit)| benefit)
}

fn customize_benefits(food: &AlternativeFood, profile: &Profile) -> Vec<String> {
    let mut benefits = food.benefits.clone();
    for benefit in condition_benefits(profile) {
        if !benefits.iter().any(|b| b == benefit) {
            benefits.push(benefit.to_string());
        }
    }
    benefits
}

/// Picks up to three catalog foods that score strictly higher than the
/// current one, in catalog order, tagged with benefits for the user's
/// conditions.
pub fn recommend_alternatives(
    catalog: &dyn CatalogProvider,
    current: &NutritionRecord,
    profile: &Profile,
) -> Recommendation {
    let suggestions: Vec<Suggestion> = catalog
        .candidates()
        .iter()
        .filter(|food| food.health_score > current.health_score)
        .take(MAX_SUGGESTIONS)
        .map(|food| Suggestion {
            food: AlternativeFood {
                benefits: customize_benefits(food, profile),
                ..food.clone()
            },
            score_gain: food.health_score - current.health_score,
        })
        .collect();

    if suggestions.is_empty() {
        tracing::debug!(score = current.health_score, "no healthier alternatives in catalog");
        Recommendation::NoneNeeded
    } else {
        Recommendation::Alternatives(suggestions)
    }
}
