//! Canned, profile-aware advice used when the model is unavailable.
//!
//! Each topic owns a keyword list, matched on word boundaries. The topic with
//! the most keyword hits in the question wins; equal hit counts go to the topic
//! listed first in [`TOPIC_PRIORITY`]. A question that mentions sodium always
//! gets the user's sodium limit, whichever topic won.

use regex::Regex;
use std::sync::LazyLock;

use crate::nutrition::NutritionRecord;
use crate::profile::{Condition, Profile};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    MealPlan,
    Sodium,
    Sugar,
    Weight,
    Avoid,
    Healthy,
    Exercise,
}

/// Tie-break order, highest priority first.
pub const TOPIC_PRIORITY: [Topic; 7] = [
    Topic::MealPlan,
    Topic::Sodium,
    Topic::Sugar,
    Topic::Weight,
    Topic::Avoid,
    Topic::Healthy,
    Topic::Exercise,
];

impl Topic {
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Topic::MealPlan => &["meal plan", "plan", "menu", "breakfast", "lunch", "dinner"],
            Topic::Sodium => &["sodium", "salt", "salty", "blood pressure"],
            Topic::Sugar => &["sugar", "glucose", "diabetes", "diabetic", "sweet"],
            Topic::Weight => &["weight", "bmi", "lose", "fat"],
            Topic::Avoid => &["avoid", "should not", "shouldn't", "bad for"],
            Topic::Healthy => &["healthy", "alternative", "alternatives", "better", "substitute"],
            Topic::Exercise => &["exercise", "workout", "walk", "walking", "activity"],
        }
    }

    /// Number of this topic's keywords present as whole words in already
    /// lower-cased text.
    pub fn score(&self, lowered: &str) -> usize {
        KEYWORD_PATTERNS
            .iter()
            .filter(|(topic, pattern)| topic == self && pattern.is_match(lowered))
            .count()
    }
}

static KEYWORD_PATTERNS: LazyLock<Vec<(Topic, Regex)>> = LazyLock::new(|| {
    TOPIC_PRIORITY
        .iter()
        .flat_map(|topic| {
            topic.keywords().iter().map(move |keyword| {
                let pattern = format!(r"\b{}\b", regex::escape(keyword));
                (*topic, Regex::new(&pattern).unwrap())
            })
        })
        .collect()
});

/// Picks the topic for a question, or `None` when no keyword matches.
pub fn select_topic(question: &str) -> Option<Topic> {
    let lowered = question.to_lowercase();
    let mut best: Option<(Topic, usize)> = None;
    for topic in TOPIC_PRIORITY {
        let score = topic.score(&lowered);
        if score > 0 && best.map_or(true, |(_, top)| score > top) {
            best = Some((topic, score));
        }
    }
    best.map(|(topic, _)| topic)
}

fn conditions_or_none(profile: &Profile) -> String {
    profile.conditions_label("None")
}

fn bullet_list(lines: &[String]) -> String {
    lines.iter().map(|l| format!("• {}", l)).collect::<Vec<_>>().join("\n")
}

fn meal_plan(profile: &Profile) -> String {
    let per_meal = (profile.target_calories * 0.3).round();
    let snack = (profile.target_calories * 0.1).round();
    let mut lines = vec![
        format!("Breakfast (~{} cal): oatmeal with berries and a boiled egg", per_meal),
        format!("Lunch (~{} cal): grilled chicken salad with olive oil dressing", per_meal),
        format!("Dinner (~{} cal): baked fish with steamed vegetables and brown rice", per_meal),
        format!("Snack (~{} cal): a handful of unsalted nuts or fresh fruit", snack),
    ];
    if profile.has(Condition::Type2Diabetes) || profile.has(Condition::Type1Diabetes) {
        lines.push("Spread carbohydrates evenly across meals to keep glucose stable".to_string());
    }
    format!(
        "Here is a meal plan for your {} calorie daily target:\n{}\nKeep total sodium under {}mg and sugar under {}g.",
        profile.target_calories,
        bullet_list(&lines),
        profile.sodium_limit,
        profile.sugar_limit
    )
}

fn sodium(profile: &Profile) -> String {
    let mut text = format!(
        "For sodium reduction (your limit: {}mg/day):\n{}",
        profile.sodium_limit,
        bullet_list(&[
            "Cook at home using fresh herbs and spices".to_string(),
            "Read nutrition labels - look for <140mg per serving".to_string(),
            "Choose fresh vegetables over canned".to_string(),
            "Limit processed and restaurant foods".to_string(),
            "Use lemon, garlic, and herbs for flavor".to_string(),
        ])
    );
    if profile.has(Condition::HighBloodPressure) {
        text.push_str("\nThis is especially important for blood pressure management.");
    }
    text
}

fn sugar(profile: &Profile) -> String {
    let mut text = format!(
        "To stay under your sugar limit of {}g/day:\n{}",
        profile.sugar_limit,
        bullet_list(&[
            "Swap sugary drinks for water or unsweetened tea".to_string(),
            "Choose whole fruit instead of juice".to_string(),
            "Check labels for hidden sugars such as syrups and dextrose".to_string(),
            "Pair carbohydrates with protein or fiber".to_string(),
        ])
    );
    if profile.has(Condition::Type2Diabetes) || profile.has(Condition::Type1Diabetes) {
        text.push_str("\nMonitor your blood glucose after meals to see how foods affect you.");
    }
    text
}

fn weight(profile: &Profile) -> String {
    let bmi = profile.bmi();
    let category = match bmi {
        b if b < 18.5 => "underweight",
        b if b < 25.0 => "in the healthy range",
        b if b < 30.0 => "overweight",
        _ => "in the obese range",
    };
    format!(
        "Your BMI is {:.1} ({} kg, {} cm), which is {}. With a target of {} calories/day:\n{}",
        bmi,
        profile.weight,
        profile.height,
        category,
        profile.target_calories,
        bullet_list(&[
            "Fill half your plate with vegetables".to_string(),
            "Choose lean proteins and whole grains".to_string(),
            "Aim for gradual change of 0.5-1 kg per week".to_string(),
        ])
    )
}

fn avoid(profile: &Profile) -> String {
    let mut lines = Vec::new();
    if profile.has(Condition::HighBloodPressure) {
        lines.push(format!(
            "Salty snacks, pickles and processed meats (sodium limit {}mg)",
            profile.sodium_limit
        ));
    }
    if profile.has(Condition::Type2Diabetes) || profile.has(Condition::Type1Diabetes) {
        lines.push(format!(
            "Sugary drinks, sweets and white bread (sugar limit {}g)",
            profile.sugar_limit
        ));
    }
    if profile.has(Condition::HeartDisease) || profile.has(Condition::HighCholesterol) {
        lines.push("Fried foods and fatty cuts of meat".to_string());
    }
    if profile.has(Condition::KidneyDisease) {
        lines.push("Very high protein portions and salty foods".to_string());
    }
    for allergy in &profile.allergies {
        lines.push(format!("Anything containing {} (allergy)", allergy));
    }
    if lines.is_empty() {
        lines.push("Heavily processed foods and sugary drinks".to_string());
    }
    format!(
        "With your health profile (conditions: {}), limit or avoid:\n{}",
        conditions_or_none(profile),
        bullet_list(&lines)
    )
}

fn healthy(profile: &Profile, analysis: Option<&NutritionRecord>) -> String {
    let context = analysis
        .map(|r| format!(" instead of {} (score {}/100)", r.food_name, r.health_score))
        .unwrap_or_default();
    format!(
        "Healthier choices{} that fit your {} calorie target:\n{}",
        context,
        profile.target_calories,
        bullet_list(&[
            "Grilled chicken salad with light vinaigrette".to_string(),
            "Quinoa bowl with roasted vegetables".to_string(),
            "Baked salmon with steamed broccoli".to_string(),
            "Vegetable stir-fry over brown rice".to_string(),
        ])
    )
}

fn exercise(profile: &Profile) -> String {
    let mut text = format!(
        "At age {} with a BMI of {:.1}, aim for at least 150 minutes of moderate activity per week:\n{}",
        profile.age,
        profile.bmi(),
        bullet_list(&[
            "Brisk walking for 30 minutes, five days a week".to_string(),
            "Two short strength sessions per week".to_string(),
            "A 10-15 minute walk after meals".to_string(),
        ])
    );
    if profile.has(Condition::HeartDisease) {
        text.push_str("\nCheck with your cardiologist before starting a new routine.");
    }
    text
}

fn general(question: &str, profile: &Profile, analysis: Option<&NutritionRecord>) -> String {
    let context = analysis
        .map(|r| format!("your food analysis of {}", r.food_name))
        .unwrap_or_else(|| "your health profile".to_string());
    format!(
        "Based on your question about \"{}\" and {}, considering your health profile (age {}, weight {}kg, height {}cm, conditions: {}), I recommend consulting with your healthcare provider for personalized medical advice.",
        question,
        context,
        profile.age,
        profile.weight,
        profile.height,
        conditions_or_none(profile)
    )
}

/// Advice text for `topic`, interpolated with the profile.
pub fn topic_response(topic: Topic, profile: &Profile, analysis: Option<&NutritionRecord>) -> String {
    match topic {
        Topic::MealPlan => meal_plan(profile),
        Topic::Sodium => sodium(profile),
        Topic::Sugar => sugar(profile),
        Topic::Weight => weight(profile),
        Topic::Avoid => avoid(profile),
        Topic::Healthy => healthy(profile, analysis),
        Topic::Exercise => exercise(profile),
    }
}

fn sodium_reminder(profile: &Profile) -> String {
    format!("Keep sodium under your limit of {}mg/day.", profile.sodium_limit)
}

pub fn respond(question: &str, profile: &Profile, analysis: Option<&NutritionRecord>) -> String {
    match select_topic(question) {
        Some(topic) => {
            tracing::debug!(?topic, "answering from canned advice");
            let mut text = topic_response(topic, profile, analysis);
            // Sodium and meal plan templates already state the limit.
            let states_limit = matches!(topic, Topic::Sodium | Topic::MealPlan);
            if !states_limit && Topic::Sodium.score(&question.to_lowercase()) > 0 {
                text.push('\n');
                text.push_str(&sodium_reminder(profile));
            }
            text
        }
        None => general(question, profile, analysis),
    }
}
