use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

/// Health conditions offered by the profile form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Condition {
    #[serde(rename = "Type 1 Diabetes")]
    Type1Diabetes,
    #[serde(rename = "Type 2 Diabetes")]
    Type2Diabetes,
    #[serde(rename = "High Blood Pressure")]
    HighBloodPressure,
    #[serde(rename = "Kidney Disease")]
    KidneyDisease,
    #[serde(rename = "Heart Disease")]
    HeartDisease,
    #[serde(rename = "High Cholesterol")]
    HighCholesterol,
    #[serde(rename = "Obesity")]
    Obesity,
}

impl Condition {
    pub const ALL: [Condition; 7] = [
        Condition::Type1Diabetes,
        Condition::Type2Diabetes,
        Condition::HighBloodPressure,
        Condition::KidneyDisease,
        Condition::HeartDisease,
        Condition::HighCholesterol,
        Condition::Obesity,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Condition::Type1Diabetes => "Type 1 Diabetes",
            Condition::Type2Diabetes => "Type 2 Diabetes",
            Condition::HighBloodPressure => "High Blood Pressure",
            Condition::KidneyDisease => "Kidney Disease",
            Condition::HeartDisease => "Heart Disease",
            Condition::HighCholesterol => "High Cholesterol",
            Condition::Obesity => "Obesity",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ProfileError {
    #[error("{field} must be a positive number, got {value}")]
    NonPositive { field: &'static str, value: f32 },
}

/// The user's medical and dietary attributes. Built once per session and
/// only read afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    pub conditions: BTreeSet<Condition>,
    pub medications: Vec<String>,
    pub allergies: BTreeSet<String>,
    pub dietary_restrictions: BTreeSet<String>,
    pub target_calories: f32,
    /// Daily sodium limit in mg.
    pub sodium_limit: f32,
    /// Daily sugar limit in g.
    pub sugar_limit: f32,
    pub age: u32,
    /// kg
    pub weight: f32,
    /// cm
    pub height: f32,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            conditions: BTreeSet::new(),
            medications: Vec::new(),
            allergies: BTreeSet::new(),
            dietary_restrictions: BTreeSet::new(),
            target_calories: 2000.0,
            sodium_limit: 2300.0,
            sugar_limit: 50.0,
            age: 30,
            weight: 70.0,
            height: 170.0,
        }
    }
}

impl Profile {
    pub fn has(&self, condition: Condition) -> bool {
        self.conditions.contains(&condition)
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.insert(condition);
        self
    }

    pub fn bmi(&self) -> f32 {
        let height_m = self.height / 100.0;
        self.weight / (height_m * height_m)
    }

    /// Comma-separated condition names, or `none` when the set is empty.
    pub fn conditions_label(&self, none: &str) -> String {
        if self.conditions.is_empty() {
            return none.to_string();
        }
        self.conditions
            .iter()
            .map(Condition::name)
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn allergies_label(&self, none: &str) -> String {
        if self.allergies.is_empty() {
            return none.to_string();
        }
        self.allergies.iter().cloned().collect::<Vec<_>>().join(", ")
    }

    pub fn validate(&self) -> Result<(), ProfileError> {
        let checks = [
            ("targetCalories", self.target_calories),
            ("sodiumLimit", self.sodium_limit),
            ("sugarLimit", self.sugar_limit),
            ("weight", self.weight),
            ("height", self.height),
        ];
        for (field, value) in checks {
            if !value.is_finite() || value <= 0.0 {
                return Err(ProfileError::NonPositive { field, value });
            }
        }
        Ok(())
    }
}

pub async fn load_profile(path: &Path) -> Result<Profile> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read profile file {:?}", path))?;
    let profile: Profile = serde_json::from_str(&raw)
        .with_context(|| format!("Profile file {:?} is not a valid profile", path))?;
    profile
        .validate()
        .with_context(|| format!("Profile file {:?} failed validation", path))?;
    tracing::debug!(conditions = profile.conditions.len(), "profile loaded");
    Ok(profile)
}
