use async_trait::async_trait;
use nutricare::alternatives::{recommend_alternatives, CsvCatalog, Recommendation, StaticCatalog};
use nutricare::analysis::{analyze_food, evaluate_reply};
use nutricare::api_connection::{ApiConnectionError, ImageData, TextGenerator};
use nutricare::chat::{ChatSession, ReplySource, Role};
use nutricare::i18n::Language;
use nutricare::nutrition::NutritionRecord;
use nutricare::profile::{load_profile, Condition, Profile};
use nutricare::report::render_report;
use nutricare::response_parser::{parse_ai_response, DecodeSource};
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

const BIRYANI_REPLY: &str = r#"Sure! Here is what I found:
```json
{
  "foodName": "Chicken Biryani",
  "calories": 900,
  "sodium": 1400,
  "sugar": 30,
  "carbs": 110,
  "protein": 35,
  "fiber": 4
}
```
Let me know if you need anything else."#;

/// Replays a fixed reply and keeps the last prompt it was sent.
struct ScriptedModel {
    reply: Result<&'static str, u16>,
    last_prompt: Mutex<Option<String>>,
}

impl ScriptedModel {
    fn replying(reply: &'static str) -> Self {
        Self {
            reply: Ok(reply),
            last_prompt: Mutex::new(None),
        }
    }

    fn failing_with(status: u16) -> Self {
        Self {
            reply: Err(status),
            last_prompt: Mutex::new(None),
        }
    }

    fn last_prompt(&self) -> String {
        self.last_prompt.lock().unwrap().clone().unwrap_or_default()
    }
}

#[async_trait]
impl TextGenerator for ScriptedModel {
    async fn generate(&self, prompt: &str, _image: Option<&ImageData>) -> Result<String, ApiConnectionError> {
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        match self.reply {
            Ok(text) => Ok(text.to_string()),
            Err(status) => Err(ApiConnectionError::ApiError {
                status: reqwest::StatusCode::from_u16(status).unwrap(),
                error_body: "upstream unavailable".to_string(),
            }),
        }
    }
}

fn at_risk_profile() -> Profile {
    Profile {
        sodium_limit: 1500.0,
        ..Default::default()
    }
    .with_condition(Condition::Type2Diabetes)
    .with_condition(Condition::HighBloodPressure)
}

fn meal_photo() -> ImageData {
    ImageData::from_data_url("data:image/jpeg;base64,/9j/4AAQSkZJRg==")
}

#[tokio::test]
async fn test_photo_to_report() {
    let profile = at_risk_profile();
    let model = ScriptedModel::replying(BIRYANI_REPLY);

    let analysis = analyze_food(&model, &profile, Some(&meal_photo()), Language::En)
        .await
        .unwrap();
    assert_eq!(analysis.source, DecodeSource::Structured);

    let record = &analysis.record;
    assert_eq!(record.food_name, "Chicken Biryani");
    // 100 - 30 (sodium) - 25 (sugar) - 20 (calories)
    assert_eq!(record.health_score, 25);
    assert_eq!(
        record.risks,
        vec!["High sodium content", "High sugar content", "High calorie content"]
    );
    assert_eq!(
        record.warnings,
        vec!["May cause blood sugar spike", "May increase blood pressure"]
    );

    let prompt = model.last_prompt();
    assert!(prompt.contains("- Sodium Limit: 1500mg/day"));
    assert!(prompt.contains("User has uploaded an image for analysis"));

    let recommendation = recommend_alternatives(&StaticCatalog::default(), record, &profile);
    assert_eq!(recommendation.suggestions().len(), 3);
    assert!(recommendation
        .suggestions()
        .iter()
        .all(|s| s.food.benefits.iter().any(|b| b == "Diabetic friendly")));

    let report = render_report(record, &profile, &recommendation, Language::En);
    assert!(report.contains("Health Score: 25/100 (High Risk)"));
    assert!(report.contains("Healthier Alternatives:"));
}

#[test]
fn test_parser_round_trip_and_heuristic() {
    let profile = Profile::default();

    let record = parse_ai_response(
        r#"Result: {"foodName":"Rice","calories":200,"sodium":50,"sugar":1,"carbs":45,"protein":4,"fiber":1}"#,
        &profile,
    );
    assert_eq!(record.food_name, "Rice");
    assert_eq!(record.calories, 200.0);
    assert_eq!(record.sodium, 50.0);
    assert_eq!(record.fiber, 1.0);

    let record = parse_ai_response("Grilled Chicken\ncalories: 350\nsodium: 400mg", &profile);
    assert_eq!(record.calories, 350.0);
    assert_eq!(record.sodium, 400.0);
    assert!(record.food_name.starts_with("Grilled Chicken"));
}

#[test]
fn test_garbage_reply_degrades_to_neutral_record() {
    let analysis = evaluate_reply("I'm not sure what this is.", &at_risk_profile());
    assert_eq!(analysis.source, DecodeSource::Unrecognized);
    assert_eq!(analysis.record.food_name, "Unknown Food");
    assert_eq!(analysis.record.health_score, 50);
    assert_eq!(analysis.confidence, 0.0);
}

#[test]
fn test_sodium_risk_depends_on_amount() {
    let profile = Profile {
        sodium_limit: 2300.0,
        ..Default::default()
    };
    let salty = NutritionRecord {
        sodium: 2500.0,
        ..Default::default()
    }
    .with_derived_fields(&profile);
    assert!(salty.risks.iter().any(|r| r == "High sodium content"));

    let moderate = NutritionRecord {
        sodium: 1000.0,
        ..Default::default()
    }
    .with_derived_fields(&profile);
    assert!(!moderate.risks.iter().any(|r| r == "High sodium content"));
}

#[test]
fn test_recommender_edges() {
    let catalog = StaticCatalog::default();
    let profile = Profile::default();

    let poor = NutritionRecord {
        health_score: 40,
        ..Default::default()
    };
    let recommendation = recommend_alternatives(&catalog, &poor, &profile);
    assert!(recommendation
        .suggestions()
        .iter()
        .any(|s| s.food.name == "Baked Salmon with Vegetables" && s.food.health_score == 92));

    let great = NutritionRecord {
        health_score: 95,
        ..Default::default()
    };
    assert_eq!(
        recommend_alternatives(&catalog, &great, &profile),
        Recommendation::NoneNeeded
    );
}

#[tokio::test]
async fn test_chat_uses_analysis_and_falls_back() {
    let profile = at_risk_profile();
    let analysis = parse_ai_response(BIRYANI_REPLY, &profile);
    let mut session = ChatSession::new(profile, Some(analysis), Language::En);

    let model = ScriptedModel::replying("Swap the rice for cauliflower rice.");
    let (reply, source) = session
        .ask(&model, "Is my lunch okay?", Some(meal_photo()))
        .await
        .unwrap();
    assert_eq!(source, ReplySource::Model);
    assert_eq!(reply.text, "Swap the rice for cauliflower rice.");
    let prompt = model.last_prompt();
    assert!(prompt.contains("Chicken Biryani (900 calories, 25/100 health score)"));
    assert!(prompt.ends_with("User Question: Is my lunch okay?"));

    let broken = ScriptedModel::failing_with(503);
    let (reply, source) = session
        .ask(&broken, "How do I reduce sodium?", None)
        .await
        .unwrap();
    assert_eq!(source, ReplySource::Fallback);
    assert!(reply.text.starts_with("Connection issue detected"));
    assert!(reply.text.contains("1500"));

    let roles: Vec<Role> = session.messages().iter().map(|m| m.role).collect();
    assert_eq!(roles, vec![Role::User, Role::Assistant, Role::User, Role::Assistant]);
    assert!(session.messages()[0].image.is_some());
}

#[tokio::test]
async fn test_profile_and_catalog_from_files() {
    let mut profile_file = NamedTempFile::new().unwrap();
    write!(
        profile_file,
        r#"{{"conditions":["Heart Disease"],"allergies":["peanuts"],"sodiumLimit":1800,"age":61}}"#
    )
    .unwrap();
    let profile = load_profile(profile_file.path()).await.unwrap();
    assert!(profile.has(Condition::HeartDisease));
    assert_eq!(profile.sodium_limit, 1800.0);
    assert_eq!(profile.target_calories, 2000.0);

    let mut catalog_file = NamedTempFile::new().unwrap();
    writeln!(catalog_file, "name,health_score,calories,sodium_mg,sugar_g,benefits,description").unwrap();
    writeln!(catalog_file, "Chana Salad,80,320,250,6,High fiber;Heart healthy,Chickpeas with cucumber").unwrap();
    writeln!(catalog_file, "Fruit Chaat,70,180,20,28,Vitamin C,Seasonal fruit").unwrap();
    let catalog = CsvCatalog::load(catalog_file.path()).unwrap();

    let current = NutritionRecord {
        health_score: 60,
        ..Default::default()
    };
    let recommendation = recommend_alternatives(&catalog, &current, &profile);
    let suggestions = recommendation.suggestions();
    assert_eq!(suggestions.len(), 2);
    assert_eq!(suggestions[0].food.name, "Chana Salad");
    // Already listed, so not appended twice.
    assert_eq!(suggestions[0].food.benefits, vec!["High fiber", "Heart healthy"]);
    assert_eq!(suggestions[1].food.benefits, vec!["Vitamin C", "Heart healthy"]);
}
