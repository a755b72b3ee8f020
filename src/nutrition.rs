use serde::{Deserialize, Serialize};

use crate::health::{alerts, scorer};
use crate::profile::Profile;

pub const UNKNOWN_FOOD: &str = "Unknown Food";
pub const NEUTRAL_HEALTH_SCORE: u8 = 50;

/// Nutrient values of one analysed food plus the score and alerts derived
/// from them. `health_score` always lies in `[10, 100]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionRecord {
    pub food_name: String,
    pub calories: f32,
    /// mg
    pub sodium: f32,
    /// g
    pub sugar: f32,
    pub carbs: f32,
    pub protein: f32,
    pub fiber: f32,
    pub health_score: u8,
    pub risks: Vec<String>,
    pub warnings: Vec<String>,
}

impl Default for NutritionRecord {
    fn default() -> Self {
        Self {
            food_name: UNKNOWN_FOOD.to_string(),
            calories: 0.0,
            sodium: 0.0,
            sugar: 0.0,
            carbs: 0.0,
            protein: 0.0,
            fiber: 0.0,
            health_score: NEUTRAL_HEALTH_SCORE,
            risks: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

impl NutritionRecord {
    /// Recomputes score, risks and warnings from the nutrient fields.
    pub fn with_derived_fields(mut self, profile: &Profile) -> Self {
        self.health_score = scorer::health_score(&self, profile);
        self.risks = alerts::generate_risks(&self, profile);
        self.warnings = alerts::generate_warnings(&self, profile);
        self
    }
}
