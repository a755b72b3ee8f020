use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ur,
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Language::En),
            "ur" | "urdu" => Ok(Language::Ur),
            other => Err(format!("Unsupported language: {}", other)),
        }
    }
}

/// User-facing strings of the terminal front-end.
#[derive(Debug)]
pub struct Messages {
    pub upload_first: &'static str,
    pub analyzing: &'static str,
    pub analysis_complete: &'static str,
    pub analysis_error: &'static str,
    pub thinking: &'static str,
    pub chat_title: &'static str,
    pub chat_placeholder: &'static str,
    pub quick_questions_heading: &'static str,
    pub quick_questions: [&'static str; 4],
    pub health_score: &'static str,
    pub health_alerts: &'static str,
    pub personalized_advice: &'static str,
    pub no_conditions_advice: &'static str,
    pub based_on_conditions: &'static str,
    pub healthier_alternatives: &'static str,
    pub great_choice: &'static str,
    pub great_choice_detail: &'static str,
    pub none: &'static str,
    pub disclaimer: &'static str,
}

static EN: Messages = Messages {
    upload_first: "Please upload an image first",
    analyzing: "Analyzing...",
    analysis_complete: "Food analysis complete!",
    analysis_error: "Failed to analyze food. Please try again.",
    thinking: "AI is thinking...",
    chat_title: "AI Nutrition Assistant",
    chat_placeholder: "Ask about nutrition, health risks, or get personalized advice...",
    quick_questions_heading: "Quick questions:",
    quick_questions: [
        "What are healthy meal alternatives for my condition?",
        "How can I reduce sodium in my diet?",
        "What foods should I avoid with my health profile?",
        "Give me a personalized meal plan for today",
    ],
    health_score: "Health Score",
    health_alerts: "Health Alerts",
    personalized_advice: "Personalized Advice",
    no_conditions_advice: "No specific health conditions specified. Consider adding your conditions for more personalized advice.",
    based_on_conditions: "Based on your health conditions",
    healthier_alternatives: "Healthier Alternatives",
    great_choice: "Great Choice!",
    great_choice_detail: "This food aligns well with your health goals. Keep up the good work!",
    none: "None",
    disclaimer: "This application provides AI-generated nutritional suggestions for informational purposes only. Always consult with your healthcare provider before making any dietary changes or medical decisions.",
};

static UR: Messages = Messages {
    upload_first: "براہ کرم پہلے تصویر اپ لوڈ کریں",
    analyzing: "تجزیہ ہو رہا ہے...",
    analysis_complete: "کھانے کا تجزیہ مکمل!",
    analysis_error: "کھانے کا تجزیہ نہیں ہو سکا۔ براہ کرم دوبارہ کوشش کریں۔",
    thinking: "اے آئی سوچ رہا ہے...",
    chat_title: "اے آئی غذائی مشیر",
    chat_placeholder: "غذائیت، صحت کے خطرات، یا ذاتی مشورے کے بارے میں پوچھیں...",
    quick_questions_heading: "فوری سوالات:",
    quick_questions: [
        "میری حالت کے لیے صحت مند کھانے کے متبادل کیا ہیں؟",
        "میں اپنی خوراک میں سوڈیم کیسے کم کروں؟",
        "میرے صحت پروفائل کے ساتھ مجھے کون سے کھانے سے بچنا چاہیے؟",
        "آج کے لیے مجھے ذاتی کھانے کا منصوبہ دیں",
    ],
    health_score: "صحت کا اسکور",
    health_alerts: "صحت کی انتباہات",
    personalized_advice: "ذاتی مشورہ",
    no_conditions_advice: "کوئی صحت کی حالت درج نہیں۔ مزید ذاتی مشورے کے لیے اپنی حالتیں شامل کریں۔",
    based_on_conditions: "آپ کی صحت کی حالتوں کی بنیاد پر",
    healthier_alternatives: "صحت مند متبادل",
    great_choice: "بہترین انتخاب!",
    great_choice_detail: "یہ کھانا آپ کے صحت کے اہداف کے مطابق ہے۔ اسی طرح جاری رکھیں!",
    none: "کوئی نہیں",
    disclaimer: "یہ ایپلیکیشن صرف معلوماتی مقاصد کے لیے اے آئی سے تیار کردہ غذائی تجاویز فراہم کرتی ہے۔ کوئی بھی غذائی تبدیلی کرنے سے پہلے اپنے معالج سے مشورہ کریں۔",
};

impl Language {
    pub fn messages(&self) -> &'static Messages {
        match self {
            Language::En => &EN,
            Language::Ur => &UR,
        }
    }
}
