use crate::nutrition::NutritionRecord;
use crate::profile::{Condition, Profile};

pub const MIN_SCORE: u8 = 10;
pub const MAX_SCORE: u8 = 100;

const BLOOD_PRESSURE_SODIUM_MG: f32 = 600.0;
const BLOOD_PRESSURE_PENALTY: i32 = 30;
const DIABETES_SUGAR_G: f32 = 25.0;
const DIABETES_PENALTY: i32 = 25;
/// Share of the daily calorie target one meal may use before it is penalised.
pub const MEAL_CALORIE_SHARE: f32 = 0.4;
const CALORIE_PENALTY: i32 = 20;

/// Scores how well a food fits the profile.
///
/// Starts from 100 and subtracts a fixed penalty for each threshold crossed:
/// sodium above 600 mg with high blood pressure, sugar above 25 g with type 2
/// diabetes, and calories above 40% of the daily target. The thresholds are
/// hard cutoffs. The result is clamped to `[10, 100]`.
pub fn health_score(nutrition: &NutritionRecord, profile: &Profile) -> u8 {
    let mut score = i32::from(MAX_SCORE);

    if profile.has(Condition::HighBloodPressure) && nutrition.sodium > BLOOD_PRESSURE_SODIUM_MG {
        score -= BLOOD_PRESSURE_PENALTY;
    }
    if profile.has(Condition::Type2Diabetes) && nutrition.sugar > DIABETES_SUGAR_G {
        score -= DIABETES_PENALTY;
    }
    if exceeds_meal_calories(nutrition, profile) {
        score -= CALORIE_PENALTY;
    }

    score.clamp(i32::from(MIN_SCORE), i32::from(MAX_SCORE)) as u8
}

pub fn exceeds_meal_calories(nutrition: &NutritionRecord, profile: &Profile) -> bool {
    nutrition.calories > profile.target_calories * MEAL_CALORIE_SHARE
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Healthy,
    ModerateRisk,
    HighRisk,
}

impl ScoreBand {
    pub fn of(score: u8) -> Self {
        match score {
            70.. => ScoreBand::Healthy,
            40..=69 => ScoreBand::ModerateRisk,
            _ => ScoreBand::HighRisk,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::Healthy => "Healthy Choice",
            ScoreBand::ModerateRisk => "Moderate Risk",
            ScoreBand::HighRisk => "High Risk",
        }
    }
}
