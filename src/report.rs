use std::fmt::Write;

use crate::alternatives::Recommendation;
use crate::health::advice::personalized_advice;
use crate::health::alerts::{limit_alerts, LimitKind, Severity, HIGH_CALORIE_RISK};
use crate::health::scorer::ScoreBand;
use crate::i18n::Language;
use crate::nutrition::NutritionRecord;
use crate::profile::Profile;

/// Plain-text rendering of an analysed food for the terminal.
pub fn render_report(
    record: &NutritionRecord,
    profile: &Profile,
    recommendation: &Recommendation,
    language: Language,
) -> String {
    let msg = language.messages();
    let mut out = String::new();

    let _ = writeln!(out, "== {} ==", record.food_name);
    let _ = writeln!(
        out,
        "{} cal | sodium {}mg | sugar {}g | carbs {}g | protein {}g | fiber {}g",
        record.calories, record.sodium, record.sugar, record.carbs, record.protein, record.fiber
    );

    let _ = writeln!(out, "\n{}: {}/100 ({})", msg.health_score, record.health_score, ScoreBand::of(record.health_score).label());
    let _ = writeln!(out, "{}: {}", msg.based_on_conditions, profile.conditions_label(msg.none));

    let limits = limit_alerts(record, profile);
    if !record.warnings.is_empty() || !limits.is_empty() || !record.risks.is_empty() {
        let _ = writeln!(out, "\n{}:", msg.health_alerts);
        for warning in &record.warnings {
            let _ = writeln!(out, "  [!!] {}", warning);
        }
        for alert in &limits {
            let marker = match alert.severity {
                Severity::High => "[!!]",
                Severity::Medium => "[! ]",
            };
            let _ = writeln!(out, "  {} {}", marker, alert.message);
        }
        let calorie_alert = limits.iter().any(|a| a.kind == LimitKind::Calories);
        for risk in &record.risks {
            if calorie_alert && risk == HIGH_CALORIE_RISK {
                continue;
            }
            let _ = writeln!(out, "  [ -] {}", risk);
        }
    }

    let _ = writeln!(out, "\n{}:", msg.personalized_advice);
    let advice = personalized_advice(record, profile);
    if advice.is_empty() {
        let _ = writeln!(out, "  {}", msg.no_conditions_advice);
    }
    for (condition, line) in advice {
        let _ = writeln!(out, "  ({}) {}", condition, line);
    }

    match recommendation {
        Recommendation::NoneNeeded => {
            let _ = writeln!(out, "\n{}\n  {}", msg.great_choice, msg.great_choice_detail);
        }
        Recommendation::Alternatives(suggestions) => {
            let _ = writeln!(out, "\n{}:", msg.healthier_alternatives);
            for suggestion in suggestions {
                let food = &suggestion.food;
                let _ = writeln!(
                    out,
                    "  * {} - {}/100 (+{})\n    {}\n    {} cal | {}mg sodium | {}g sugar\n    {}",
                    food.name,
                    food.health_score,
                    suggestion.score_gain,
                    food.description,
                    food.calories,
                    food.sodium,
                    food.sugar,
                    food.benefits.join(", ")
                );
            }
        }
    }

    let _ = writeln!(out, "\n{}", msg.disclaimer);
    out
}
