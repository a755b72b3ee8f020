use serde::Serialize;

use crate::health::scorer::exceeds_meal_calories;
use crate::nutrition::NutritionRecord;
use crate::profile::{Condition, Profile};

/// Fraction of a personal daily limit one food may use before it is flagged.
const RISK_LIMIT_SHARE: f32 = 0.5;
const SPIKE_SUGAR_G: f32 = 20.0;
const PRESSURE_SODIUM_MG: f32 = 800.0;

pub const HIGH_SODIUM_RISK: &str = "High sodium content";
pub const HIGH_SUGAR_RISK: &str = "High sugar content";
pub const HIGH_CALORIE_RISK: &str = "High calorie content";
pub const SUGAR_SPIKE_WARNING: &str = "May cause blood sugar spike";
pub const BLOOD_PRESSURE_WARNING: &str = "May increase blood pressure";

/// Soft flags for nutrients above half of the user's personal limits.
pub fn generate_risks(nutrition: &NutritionRecord, profile: &Profile) -> Vec<String> {
    let mut risks = Vec::new();

    if nutrition.sodium > profile.sodium_limit * RISK_LIMIT_SHARE {
        risks.push(HIGH_SODIUM_RISK.to_string());
    }
    if nutrition.sugar > profile.sugar_limit * RISK_LIMIT_SHARE {
        risks.push(HIGH_SUGAR_RISK.to_string());
    }
    if exceeds_meal_calories(nutrition, profile) {
        risks.push(HIGH_CALORIE_RISK.to_string());
    }

    risks
}

/// Condition-specific alerts based on absolute thresholds.
pub fn generate_warnings(nutrition: &NutritionRecord, profile: &Profile) -> Vec<String> {
    let mut warnings = Vec::new();

    if profile.has(Condition::Type2Diabetes) && nutrition.sugar > SPIKE_SUGAR_G {
        warnings.push(SUGAR_SPIKE_WARNING.to_string());
    }
    if profile.has(Condition::HighBloodPressure) && nutrition.sodium > PRESSURE_SODIUM_MG {
        warnings.push(BLOOD_PRESSURE_WARNING.to_string());
    }

    warnings
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LimitKind {
    Sodium,
    Sugar,
    Calories,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LimitAlert {
    pub kind: LimitKind,
    pub severity: Severity,
    pub message: String,
}

/// Alerts for a single food that already exceeds a whole daily limit.
pub fn limit_alerts(nutrition: &NutritionRecord, profile: &Profile) -> Vec<LimitAlert> {
    let mut alerts = Vec::new();

    if nutrition.sodium > profile.sodium_limit {
        alerts.push(LimitAlert {
            kind: LimitKind::Sodium,
            severity: Severity::High,
            message: format!(
                "Sodium ({}mg) exceeds your daily limit of {}mg",
                nutrition.sodium, profile.sodium_limit
            ),
        });
    }
    if nutrition.sugar > profile.sugar_limit {
        alerts.push(LimitAlert {
            kind: LimitKind::Sugar,
            severity: Severity::High,
            message: format!(
                "Sugar ({}g) exceeds your daily limit of {}g",
                nutrition.sugar, profile.sugar_limit
            ),
        });
    }
    if exceeds_meal_calories(nutrition, profile) {
        alerts.push(LimitAlert {
            kind: LimitKind::Calories,
            severity: Severity::Medium,
            message: format!("High calorie content ({}) for a single meal", nutrition.calories),
        });
    }

    alerts
}
