//! Tolerant decoding of the model's free-form nutrition reply.
//!
//! The prompt asks for a JSON object, but replies often arrive wrapped in
//! prose or markdown fences, or as plain "calories: 350" lines. Decoding tries
//! the embedded object first, then a line scan, and reports which fields it
//! actually found so callers can tell a reported zero from a missing value.

use regex::Regex;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::sync::LazyLock;

use crate::health::{alerts, scorer};
use crate::nutrition::NutritionRecord;
use crate::profile::Profile;

static RE_OBJECT_LITERAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{[\s\S]*\}").unwrap());
static RE_DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());
static RE_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?").unwrap());
static RE_NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s]").unwrap());

const FOOD_NAME_MAX_CHARS: usize = 50;
const NUTRIENT_FIELDS: usize = 6;

/// Nutrition values as reported by the model. `None` means "not reported".
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialNutrition {
    #[serde(default, alias = "food_name")]
    pub food_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub calories: Option<f32>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub sodium: Option<f32>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub sugar: Option<f32>,
    #[serde(default, alias = "carbohydrates", deserialize_with = "lenient_number")]
    pub carbs: Option<f32>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub protein: Option<f32>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub fiber: Option<f32>,
    #[serde(default, alias = "health_score", deserialize_with = "lenient_number")]
    pub health_score: Option<f32>,
    #[serde(default)]
    pub risks: Option<Vec<String>>,
    #[serde(default)]
    pub warnings: Option<Vec<String>>,
}

impl PartialNutrition {
    pub fn nutrients_found(&self) -> usize {
        [
            self.calories,
            self.sodium,
            self.sugar,
            self.carbs,
            self.protein,
            self.fiber,
        ]
        .iter()
        .filter(|value| value.is_some())
        .count()
    }

    fn has_any_field(&self) -> bool {
        self.nutrients_found() > 0
            || self.food_name.is_some()
            || self.health_score.is_some()
            || self.risks.is_some()
            || self.warnings.is_some()
    }

    fn overlay_nutrients(&self, record: &mut NutritionRecord) {
        if let Some(name) = self.food_name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            record.food_name = name.to_string();
        }
        record.calories = self.calories.unwrap_or(0.0);
        record.sodium = self.sodium.unwrap_or(0.0);
        record.sugar = self.sugar.unwrap_or(0.0);
        record.carbs = self.carbs.unwrap_or(0.0);
        record.protein = self.protein.unwrap_or(0.0);
        record.fiber = self.fiber.unwrap_or(0.0);
    }
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64().map(|v| v as f32),
        Value::String(s) => RE_NUMBER.find(&s).and_then(|m| m.as_str().parse().ok()),
        _ => None,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeSource {
    /// An embedded JSON object decoded with at least one known field.
    Structured,
    /// Numbers scraped from "nutrient: value" style lines.
    Heuristic,
    /// Nothing usable was found.
    Unrecognized,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecodedNutrition {
    pub partial: PartialNutrition,
    pub source: DecodeSource,
}

impl DecodedNutrition {
    pub fn is_valid(&self) -> bool {
        self.source != DecodeSource::Unrecognized
    }

    /// Share of the six nutrient fields the reply actually reported.
    pub fn confidence(&self) -> f32 {
        self.partial.nutrients_found() as f32 / NUTRIENT_FIELDS as f32
    }

    /// Builds the full record. Nutrients that were not reported become zero.
    /// Score, risks and warnings are computed locally for line-scanned replies;
    /// a structured reply keeps whatever it reported (the score clamped) and
    /// gets the rest computed.
    pub fn into_record(self, profile: &Profile) -> NutritionRecord {
        match self.source {
            DecodeSource::Unrecognized => NutritionRecord::default(),
            DecodeSource::Heuristic => {
                let mut record = NutritionRecord::default();
                self.partial.overlay_nutrients(&mut record);
                record.with_derived_fields(profile)
            }
            DecodeSource::Structured => {
                let mut record = NutritionRecord::default();
                self.partial.overlay_nutrients(&mut record);
                record.health_score = match self.partial.health_score {
                    Some(score) if score.is_finite() => score
                        .round()
                        .clamp(f32::from(scorer::MIN_SCORE), f32::from(scorer::MAX_SCORE))
                        as u8,
                    _ => scorer::health_score(&record, profile),
                };
                record.risks = self
                    .partial
                    .risks
                    .unwrap_or_else(|| alerts::generate_risks(&record, profile));
                record.warnings = self
                    .partial
                    .warnings
                    .unwrap_or_else(|| alerts::generate_warnings(&record, profile));
                record
            }
        }
    }
}

pub fn decode_response(text: &str) -> DecodedNutrition {
    if let Some(partial) = decode_object_literal(text) {
        tracing::debug!(fields = partial.nutrients_found(), "decoded structured nutrition reply");
        return DecodedNutrition {
            partial,
            source: DecodeSource::Structured,
        };
    }

    let partial = scan_lines(text);
    if partial.nutrients_found() == 0 {
        tracing::warn!("no nutrition values recognised in model reply");
        return DecodedNutrition {
            partial: PartialNutrition::default(),
            source: DecodeSource::Unrecognized,
        };
    }
    tracing::debug!(fields = partial.nutrients_found(), "scraped nutrition values from reply lines");
    DecodedNutrition {
        partial,
        source: DecodeSource::Heuristic,
    }
}

/// Parses a model reply into a complete record for this profile. Never fails.
pub fn parse_ai_response(text: &str, profile: &Profile) -> NutritionRecord {
    decode_response(text).into_record(profile)
}

fn decode_object_literal(text: &str) -> Option<PartialNutrition> {
    let literal = RE_OBJECT_LITERAL.find(text)?;
    match serde_json::from_str::<PartialNutrition>(literal.as_str()) {
        Ok(partial) if partial.has_any_field() => Some(partial),
        Ok(_) => {
            tracing::debug!("object literal in reply has no nutrition fields");
            None
        }
        Err(e) => {
            tracing::debug!(error = %e, "object literal in reply is not valid JSON");
            None
        }
    }
}

fn first_digits(line: &str) -> Option<f32> {
    RE_DIGITS.find(line).and_then(|m| m.as_str().parse().ok())
}

fn scan_lines(text: &str) -> PartialNutrition {
    let mut partial = PartialNutrition::default();

    for line in text.lines().map(str::to_lowercase) {
        if line.contains("calories") {
            partial.calories = first_digits(&line).or(partial.calories);
        }
        if line.contains("sodium") {
            partial.sodium = first_digits(&line).or(partial.sodium);
        }
        if line.contains("sugar") {
            partial.sugar = first_digits(&line).or(partial.sugar);
        }
        if line.contains("carbs") || line.contains("carbohydrate") {
            partial.carbs = first_digits(&line).or(partial.carbs);
        }
        if line.contains("protein") {
            partial.protein = first_digits(&line).or(partial.protein);
        }
        if line.contains("fiber") {
            partial.fiber = first_digits(&line).or(partial.fiber);
        }
    }

    partial.food_name = text.lines().next().and_then(food_name_from_line);
    partial
}

fn food_name_from_line(line: &str) -> Option<String> {
    let head: String = line.chars().take(FOOD_NAME_MAX_CHARS).collect();
    let name = RE_NON_WORD.replace_all(&head, "").trim().to_string();
    (!name.is_empty()).then_some(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Condition;

    #[test]
    fn test_structured_reply() {
        let text = r#"Here is the analysis:
{"foodName":"Rice","calories":200,"sodium":50,"sugar":1,"carbs":45,"protein":4,"fiber":1}
Enjoy!"#;
        let decoded = decode_response(text);
        assert_eq!(decoded.source, DecodeSource::Structured);
        assert_eq!(decoded.confidence(), 1.0);

        let record = decoded.into_record(&Profile::default());
        assert_eq!(record.food_name, "Rice");
        assert_eq!(record.calories, 200.0);
        assert_eq!(record.carbs, 45.0);
        assert_eq!(record.health_score, 100);
        assert!(record.risks.is_empty());
    }

    #[test]
    fn test_structured_reply_without_score_is_scored_locally() {
        let profile = Profile::default().with_condition(Condition::HighBloodPressure);
        let record = parse_ai_response(
            r#"{"foodName":"Pickles","calories":40,"sodium":1300,"sugar":2}"#,
            &profile,
        );
        // Nutrients come from the reply; score and alerts do not stay at their defaults.
        assert_eq!(record.sodium, 1300.0);
        assert_eq!(record.health_score, 70);
        assert_eq!(record.risks, vec!["High sodium content".to_string()]);
        assert_eq!(record.warnings, vec!["May increase blood pressure".to_string()]);
    }

    #[test]
    fn test_structured_reply_in_markdown_fence() {
        let text = "```json\n{\n  \"foodName\": \"Chicken Biryani\",\n  \"calories\": \"650 kcal\",\n  \"sodium\": 1200.5\n}\n```";
        let decoded = decode_response(text);
        assert_eq!(decoded.source, DecodeSource::Structured);
        assert_eq!(decoded.partial.calories, Some(650.0));
        assert_eq!(decoded.partial.sodium, Some(1200.5));
        assert_eq!(decoded.partial.sugar, None);
        assert_eq!(decoded.confidence(), 2.0 / 6.0);
    }

    #[test]
    fn test_structured_score_is_clamped() {
        let text = r#"{"foodName":"Soda","sugar":40,"healthScore":2,"risks":["Sugary"]}"#;
        let record = parse_ai_response(text, &Profile::default());
        assert_eq!(record.health_score, 10);
        assert_eq!(record.risks, vec!["Sugary".to_string()]);
        assert!(record.warnings.is_empty());
    }

    #[test]
    fn test_structured_score_computed_when_missing() {
        let profile = Profile::default().with_condition(Condition::Type2Diabetes);
        let record = parse_ai_response(r#"{"foodName":"Cake","sugar":30}"#, &profile);
        assert_eq!(record.health_score, 75);
        assert_eq!(record.warnings, vec!["May cause blood sugar spike".to_string()]);
    }

    #[test]
    fn test_heuristic_reply() {
        let text = "Grilled Chicken\ncalories: 350\nsodium: 400mg";
        let decoded = decode_response(text);
        assert_eq!(decoded.source, DecodeSource::Heuristic);
        assert_eq!(decoded.partial.sugar, None);

        let record = decoded.into_record(&Profile::default());
        assert_eq!(record.calories, 350.0);
        assert_eq!(record.sodium, 400.0);
        assert_eq!(record.sugar, 0.0);
        assert!(record.food_name.starts_with("Grilled Chicken"));
        assert_eq!(record.health_score, 100);
    }

    #[test]
    fn test_heuristic_takes_first_digit_run() {
        let text = "Pasta!!\nTotal Carbohydrates: 62.5 g\nFiber - about 3 grams\nProtein 12g";
        let partial = decode_response(text).partial;
        assert_eq!(partial.carbs, Some(62.0));
        assert_eq!(partial.fiber, Some(3.0));
        assert_eq!(partial.protein, Some(12.0));
        assert_eq!(partial.food_name.as_deref(), Some("Pasta"));
    }

    #[test]
    fn test_heuristic_recomputes_derived_fields() {
        let profile = Profile::default().with_condition(Condition::HighBloodPressure);
        let record = parse_ai_response("Ramen\nSodium: 1900 mg\nCalories: 500", &profile);
        assert_eq!(record.health_score, 70);
        assert_eq!(record.risks, vec!["High sodium content".to_string()]);
        assert_eq!(record.warnings, vec!["May increase blood pressure".to_string()]);
    }

    #[test]
    fn test_invalid_object_falls_back_to_lines() {
        let text = "Salad {not json}\ncalories: 120";
        let decoded = decode_response(text);
        assert_eq!(decoded.source, DecodeSource::Heuristic);
        assert_eq!(decoded.partial.calories, Some(120.0));
    }

    #[test]
    fn test_food_name_is_truncated() {
        let long = format!("{}\ncalories: 10", "a".repeat(80));
        let partial = decode_response(&long).partial;
        assert_eq!(partial.food_name.map(|n| n.len()), Some(50));
    }

    #[test]
    fn test_unrecognized_reply_yields_default_record() {
        let decoded = decode_response("I'm sorry, I can't identify this image.");
        assert!(!decoded.is_valid());
        assert_eq!(decoded.confidence(), 0.0);
        let record = decoded.into_record(&Profile::default());
        assert_eq!(record, NutritionRecord::default());
    }

    #[test]
    fn test_reported_zero_differs_from_missing() {
        let partial = decode_response(r#"{"foodName":"Water","calories":0}"#).partial;
        assert_eq!(partial.calories, Some(0.0));
        assert_eq!(partial.sodium, None);
    }
}
