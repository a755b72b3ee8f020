use crate::nutrition::NutritionRecord;
use crate::profile::{Condition, Profile};

/// Advice line for one of the user's conditions, given the analysed food.
pub fn condition_advice(condition: Condition, nutrition: &NutritionRecord) -> &'static str {
    match condition {
        Condition::Type1Diabetes | Condition::Type2Diabetes => {
            if nutrition.sugar > 15.0 {
                "High sugar content may require insulin adjustment. Monitor blood glucose closely."
            } else {
                "Moderate sugar content. Consider pairing with protein to slow glucose absorption."
            }
        }
        Condition::HighBloodPressure => {
            if nutrition.sodium > 1000.0 {
                "High sodium content may raise blood pressure. Consider alternatives or reduce portion size."
            } else {
                "Moderate sodium levels. Stay hydrated and monitor your blood pressure."
            }
        }
        Condition::KidneyDisease => {
            if nutrition.sodium > 800.0 || nutrition.protein > 25.0 {
                "High sodium/protein may strain kidneys. Consult your nephrologist about portion sizes."
            } else {
                "Reasonable levels for kidney health. Continue monitoring fluid intake."
            }
        }
        Condition::HeartDisease => {
            if nutrition.calories > 600.0 {
                "High calorie content. Consider a smaller portion or more physical activity today."
            } else {
                "Moderate calorie content supports heart health when part of balanced diet."
            }
        }
        Condition::HighCholesterol | Condition::Obesity => {
            "Continue following your healthcare provider's dietary recommendations."
        }
    }
}

pub fn personalized_advice(
    nutrition: &NutritionRecord,
    profile: &Profile,
) -> Vec<(Condition, &'static str)> {
    profile
        .conditions
        .iter()
        .map(|&condition| (condition, condition_advice(condition, nutrition)))
        .collect()
}
