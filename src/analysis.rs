use serde::Serialize;

use crate::api_connection::{ApiConnectionError, ImageData, TextGenerator};
use crate::i18n::Language;
use crate::nutrition::NutritionRecord;
use crate::profile::Profile;
use crate::prompts;
use crate::response_parser::{decode_response, DecodeSource};

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("no image was provided for analysis")]
    MissingImage,
    #[error("food analysis request failed: {0}")]
    Remote(#[from] ApiConnectionError),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodAnalysis {
    #[serde(flatten)]
    pub record: NutritionRecord,
    #[serde(skip)]
    pub source: DecodeSource,
    /// Share of nutrient fields the model actually reported.
    pub confidence: f32,
    #[serde(skip)]
    pub raw_reply: String,
}

/// Interprets an already received model reply for this profile.
pub fn evaluate_reply(reply: &str, profile: &Profile) -> FoodAnalysis {
    let decoded = decode_response(reply);
    let source = decoded.source;
    let confidence = decoded.confidence();
    FoodAnalysis {
        record: decoded.into_record(profile),
        source,
        confidence,
        raw_reply: reply.to_string(),
    }
}

/// Sends the meal photo with the profile to the model and scores the reply.
///
/// A missing image is rejected before any request is made. Replies that are
/// not valid JSON never fail the analysis; only the remote call itself can.
pub async fn analyze_food(
    generator: &dyn TextGenerator,
    profile: &Profile,
    image: Option<&ImageData>,
    language: Language,
) -> Result<FoodAnalysis, AnalysisError> {
    let image = image.ok_or(AnalysisError::MissingImage)?;

    let prompt = prompts::advisor_prompt(prompts::analysis_prompt(language), profile, None, true, language);
    tracing::info!(mime_type = %image.mime_type, ?language, "requesting food analysis");
    let reply = generator.generate(&prompt, Some(image)).await?;

    let analysis = evaluate_reply(&reply, profile);
    tracing::info!(
        food = %analysis.record.food_name,
        score = analysis.record.health_score,
        source = ?analysis.source,
        confidence = analysis.confidence,
        "food analysis complete"
    );
    Ok(analysis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Canned {
        reply: &'static str,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl TextGenerator for Canned {
        async fn generate(&self, prompt: &str, image: Option<&ImageData>) -> Result<String, ApiConnectionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            assert!(prompt.contains("\"foodName\""));
            assert!(image.is_some());
            Ok(self.reply.to_string())
        }
    }

    fn canned(reply: &'static str) -> Canned {
        Canned {
            reply,
            calls: AtomicUsize::new(0),
        }
    }

    #[tokio::test]
    async fn test_missing_image_makes_no_request() {
        let generator = canned("{}");
        let result = analyze_food(&generator, &Profile::default(), None, Language::En).await;
        assert!(matches!(result, Err(AnalysisError::MissingImage)));
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_structured_analysis() {
        let generator = canned(r#"```json
{"foodName":"Rice","calories":200,"sodium":50,"sugar":1,"carbs":45,"protein":4,"fiber":1}
```"#);
        let image = ImageData::from_data_url("data:image/jpeg;base64,/9j/");
        let analysis = analyze_food(&generator, &Profile::default(), Some(&image), Language::En)
            .await
            .unwrap();
        assert_eq!(analysis.source, DecodeSource::Structured);
        assert_eq!(analysis.record.food_name, "Rice");
        assert_eq!(analysis.record.health_score, 100);
        assert_eq!(analysis.confidence, 1.0);
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_evaluate_unrecognized_reply() {
        let analysis = evaluate_reply("Sorry, I can't help with that.", &Profile::default());
        assert_eq!(analysis.source, DecodeSource::Unrecognized);
        assert_eq!(analysis.record, NutritionRecord::default());
    }
}
