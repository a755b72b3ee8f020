use crate::i18n::Language;
use crate::nutrition::NutritionRecord;
use crate::profile::Profile;

pub fn analysis_prompt(language: Language) -> &'static str {
    match language {
        Language::En => {
            r#"Please analyze this food image and provide detailed nutritional information. Return the analysis in this exact JSON format:

{
  "foodName": "Name of the food item",
  "calories": estimated_calories_number,
  "sodium": estimated_sodium_in_mg,
  "sugar": estimated_sugar_in_grams,
  "carbs": estimated_carbs_in_grams,
  "protein": estimated_protein_in_grams,
  "fiber": estimated_fiber_in_grams
}

Be as accurate as possible with the nutritional estimates based on what you can see in the image. If you can see multiple food items, provide the total for the entire meal."#
        }
        Language::Ur => {
            r#"براہ کرم اس کھانے کی تصویر کا تجزیہ کریں اور تفصیلی غذائی معلومات فراہم کریں۔ تجزیہ اس بالکل JSON فارمیٹ میں واپس کریں:

{
  "foodName": "کھانے کی اشیاء کا نام",
  "calories": estimated_calories_number,
  "sodium": estimated_sodium_in_mg,
  "sugar": estimated_sugar_in_grams,
  "carbs": estimated_carbs_in_grams,
  "protein": estimated_protein_in_grams,
  "fiber": estimated_fiber_in_grams
}

تصویر میں جو کچھ آپ دیکھ سکتے ہیں اس کی بنیاد پر غذائی تخمینے میں جتنا درست ہو سکیں۔ اگر آپ متعدد کھانے کی اشیاء دیکھ سکتے ہیں تو پورے کھانے کا کل فراہم کریں۔"#
        }
    }
}

/// System preamble describing the user's profile, followed by the question.
pub fn advisor_prompt(
    question: &str,
    profile: &Profile,
    analysis: Option<&NutritionRecord>,
    has_image: bool,
    language: Language,
) -> String {
    let none = language.messages().none;
    let conditions = profile.conditions_label(none);
    let allergies = profile.allergies_label(none);

    let preamble = match language {
        Language::En => {
            let recent = analysis
                .map(|r| {
                    format!(
                        "- Recent Food Analysis: {} ({} calories, {}/100 health score)\n",
                        r.food_name, r.calories, r.health_score
                    )
                })
                .unwrap_or_default();
            let image_line = if has_image { "- User has uploaded an image for analysis\n" } else { "" };
            let task = if has_image {
                "Analyze the food in the uploaded image and provide personalized advice based on their medical profile."
            } else {
                "Provide advice in English."
            };
            format!(
                "You are a helpful AI nutrition assistant. Provide personalized nutrition advice based on the user's medical profile. Be concise, helpful, and focus on practical advice.\n\n\
                 User's Medical Profile:\n\
                 - Age: {} years\n\
                 - Weight: {} kg\n\
                 - Height: {} cm\n\
                 - Target Calories: {}/day\n\
                 - Sodium Limit: {}mg/day\n\
                 - Sugar Limit: {}g/day\n\
                 - Health Conditions: {}\n\
                 - Allergies: {}\n\
                 {}{}\n\
                 {} Keep responses under 300 words and focus on actionable recommendations.",
                profile.age,
                profile.weight,
                profile.height,
                profile.target_calories,
                profile.sodium_limit,
                profile.sugar_limit,
                conditions,
                allergies,
                recent,
                image_line,
                task
            )
        }
        Language::Ur => {
            let recent = analysis
                .map(|r| {
                    format!(
                        "- حالیہ کھانے کا تجزیہ: {} ({} کیلوریز، {}/100 صحت کا اسکور)\n",
                        r.food_name, r.calories, r.health_score
                    )
                })
                .unwrap_or_default();
            let image_line = if has_image { "- صارف نے تجزیے کے لیے ایک تصویر اپ لوڈ کی ہے\n" } else { "" };
            let task = if has_image {
                "اپ لوڈ کی گئی تصویر میں موجود کھانے کا تجزیہ کریں اور ان کے طبی پروفائل کی بنیاد پر ذاتی مشورہ فراہم کریں۔"
            } else {
                "اردو میں مشورہ فراہم کریں۔"
            };
            format!(
                "آپ ایک مددگار اے آئی غذائی مشیر ہیں۔ صارف کے طبی پروفائل کی بنیاد پر ذاتی غذائی مشورہ فراہم کریں۔ مختصر، مددگار رہیں اور عملی مشورے پر توجہ دیں۔\n\n\
                 صارف کا طبی پروفائل:\n\
                 - عمر: {} سال\n\
                 - وزن: {} کلو\n\
                 - قد: {} سینٹی میٹر\n\
                 - ہدف کیلوریز: {}/دن\n\
                 - سوڈیم کی حد: {}mg/دن\n\
                 - چینی کی حد: {}g/دن\n\
                 - صحت کی حالات: {}\n\
                 - الرجی: {}\n\
                 {}{}\n\
                 {} جوابات 300 الفاظ سے کم رکھیں اور قابل عمل سفارشات پر توجہ دیں۔",
                profile.age,
                profile.weight,
                profile.height,
                profile.target_calories,
                profile.sodium_limit,
                profile.sugar_limit,
                conditions,
                allergies,
                recent,
                image_line,
                task
            )
        }
    };

    let question_label = match language {
        Language::En => "User Question",
        Language::Ur => "صارف کا سوال",
    };
    format!("{}\n\n{}: {}", preamble, question_label, question)
}

/// Notice shown before locally generated advice when the remote call fails.
pub fn failure_notice(credential_problem: bool, question: &str, language: Language) -> String {
    match (language, credential_problem) {
        (Language::En, true) => format!(
            "API key issue detected. Please check your Gemini API key configuration. The system is currently unable to connect to the AI service.\n\nFor immediate help with your question \"{}\", here's general advice:",
            question
        ),
        (Language::En, false) => format!(
            "Connection issue detected. While I'm having connectivity problems, here's some general advice for \"{}\":",
            question
        ),
        (Language::Ur, true) => format!(
            "API key کا مسئلہ ہے۔ برائے کرم اپنی Gemini API key کی configuration چیک کریں۔\n\nآپ کے سوال \"{}\" کے لیے عمومی مشورہ:",
            question
        ),
        (Language::Ur, false) => format!("کنکٹیویٹی کا مسئلہ ہے۔ \"{}\" کے لیے عمومی مشورہ:", question),
    }
}

pub fn retry_hint(credential_problem: bool, language: Language) -> &'static str {
    match (language, credential_problem) {
        (Language::En, true) => "Please verify your API key and try again.",
        (Language::En, false) => "Please try your question again in a moment.",
        (Language::Ur, true) => "برائے کرم اپنی API key چیک کرکے دوبارہ کوشش کریں۔",
        (Language::Ur, false) => "برائے کرم ایک لمحے میں دوبارہ کوشش کریں۔",
    }
}
