//! Prompt text for each collaborator call and response cleanup.

use crate::core::{EnergyLevel, Pillar};

use super::types::{Alert, CompanionRequest, InsightRequest, RecipeRequest};

pub const RECIPE_MAX_TOKENS: u32 = 500;
pub const INSIGHT_MAX_TOKENS: u32 = 200;
pub const COMPANION_MAX_TOKENS: u32 = 60;

pub const INSIGHT_DEFAULT_NAME: &str = "Patient";
pub const COMPANION_DEFAULT_NAME: &str = "Friend";

fn display_name<'a>(name: &'a Option<String>, default: &'a str) -> &'a str {
    name.as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(default)
}

pub fn insight_name(request: &InsightRequest) -> &str {
    display_name(&request.user_name, INSIGHT_DEFAULT_NAME)
}

fn complexity_guide(energy: EnergyLevel) -> &'static str {
    match energy {
        EnergyLevel::Low => "Very simple, minimal prep. Under 10 minutes. No cooking if possible.",
        EnergyLevel::Medium => "Moderate prep, 15-20 minutes. Simple cooking allowed.",
        EnergyLevel::High => {
            "Can be more involved, 20-30 minutes. Optimize for nutrition and macros."
        }
    }
}

fn energy_description(energy: EnergyLevel) -> &'static str {
    match energy {
        EnergyLevel::High => "high energy and feeling strong",
        EnergyLevel::Medium => "moderate energy",
        EnergyLevel::Low => "low energy and taking it easy",
    }
}

fn pillar_context(pillar: Option<Pillar>) -> &'static str {
    match pillar {
        Some(Pillar::Diet) => "focusing on nutrition",
        Some(Pillar::Exercise) => "focusing on movement",
        Some(Pillar::Mentality) => "focusing on mental wellness (the most important pillar!)",
        None => "working on their health",
    }
}

pub fn recipe_prompt(request: &RecipeRequest) -> String {
    format!(
        r#"You are a nutritionist creating a personalized {meal} recipe.

Available ingredients (use as many as fit naturally): {foods}

Energy level: {energy} - {guide}

Create a recipe in this EXACT JSON format, no other text:
{{
  "name": "Recipe name (creative, appetizing)",
  "tagline": "One sentence description",
  "prepTime": "X minutes",
  "ingredients": [
    {{"item": "ingredient name", "amount": "quantity"}}
  ],
  "steps": [
    "Step 1 instruction",
    "Step 2 instruction"
  ],
  "nutrition": {{
    "protein": "Xg",
    "carbs": "Xg",
    "fats": "Xg",
    "calories": "~XXX"
  }},
  "tip": "One quick pro tip"
}}

Use 4-7 ingredients max. Keep steps clear and brief. Make it genuinely delicious."#,
        meal = request.meal_type,
        foods = request.foods.join(", "),
        energy = request.energy_level,
        guide = complexity_guide(request.energy_level),
    )
}

pub fn insight_prompt(request: &InsightRequest, alerts: &[Alert]) -> String {
    let energies: Vec<String> = request
        .energy_history
        .iter()
        .map(|e| e.to_string())
        .collect();
    let completion =
        serde_json::to_string(&request.completion_history).unwrap_or_else(|_| "[]".to_string());
    let detected: Vec<String> = alerts.iter().map(|a| a.kind.to_string()).collect();
    let detected = if detected.is_empty() {
        "none".to_string()
    } else {
        detected.join(", ")
    };

    format!(
        r#"You are an AI health analyst for a hospital care team. Analyze this patient data and provide a brief clinical observation.

Patient: {name}
Energy levels (most recent last): {energies}
Streak: {streak} days
Recent completion: {completion}
Alerts detected: {detected}

Respond in this EXACT JSON format. Do NOT use any emoji characters anywhere in your response:
{{
  "trend": "improving" | "stable" | "declining" | "insufficient_data",
  "insight": "One clear sentence about their pattern (max 15 words, no emoji)",
  "patientMessage": "Encouraging message for the patient (max 12 words, no emoji)",
  "careNote": "Brief clinical note for care team (max 20 words, no emoji, clinical tone)"
}}"#,
        name = insight_name(request),
        energies = energies.join(" -> "),
        streak = request.streak,
    )
}

pub fn companion_prompt(request: &CompanionRequest) -> String {
    format!(
        r#"You are Dem, a warm and encouraging AI health companion. Generate a SHORT, personalized message (max 12 words) for:

Patient name: {name}
Day: {day} of their 3-day plan
Energy today: {energy}
Current focus: {focus}
Tasks completed today: {done}
Current streak: {streak} day(s)

Rules:
- Max 12 words. Be specific to their context.
- Warm, friendly, slightly playful tone
- If low energy: be extra gentle and validating
- If high energy: be enthusiastic
- Occasionally use their name naturally
- No hashtags, no exclamation marks every time
- Vary style: sometimes a question, sometimes a statement, sometimes a fun observation
- Do NOT start with "I" or repeat the same pattern every time"#,
        name = display_name(&request.user_name, COMPANION_DEFAULT_NAME),
        day = request.day_number,
        energy = energy_description(request.energy_level),
        focus = pillar_context(request.pillar),
        done = request.completed_tasks.len(),
        streak = request.streak,
    )
}

/// Strip markdown code fences a model may wrap JSON in.
pub fn clean_json(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Completion, MealType};

    #[test]
    fn test_clean_json() {
        assert_eq!(clean_json("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(clean_json("  {\"a\":1} "), "{\"a\":1}");
    }

    #[test]
    fn test_recipe_prompt_mentions_inputs() {
        let prompt = recipe_prompt(&RecipeRequest {
            foods: vec!["Oatmeal".to_string(), "Berries".to_string()],
            meal_type: MealType::Breakfast,
            energy_level: EnergyLevel::Low,
            user_name: None,
        });
        assert!(prompt.contains("personalized breakfast recipe"));
        assert!(prompt.contains("Oatmeal, Berries"));
        assert!(prompt.contains("Under 10 minutes"));
        assert!(prompt.contains("\"prepTime\""));
    }

    #[test]
    fn test_insight_prompt_defaults() {
        let request = InsightRequest {
            energy_history: vec![EnergyLevel::Low, EnergyLevel::High],
            completion_history: vec![Completion::default()],
            user_name: Some("   ".to_string()),
            streak: 0,
        };
        let prompt = insight_prompt(&request, &[]);
        assert!(prompt.contains("Patient: Patient"));
        assert!(prompt.contains("low -> high"));
        assert!(prompt.contains("Alerts detected: none"));
    }

    #[test]
    fn test_companion_prompt_context() {
        let prompt = companion_prompt(&CompanionRequest {
            user_name: Some("Rae".to_string()),
            day_number: 2,
            energy_level: EnergyLevel::High,
            completed_tasks: vec![Pillar::Diet],
            streak: 1,
            pillar: Some(Pillar::Mentality),
        });
        assert!(prompt.contains("Patient name: Rae"));
        assert!(prompt.contains("high energy and feeling strong"));
        assert!(prompt.contains("mental wellness"));
        assert!(prompt.contains("Tasks completed today: 1"));
    }
}
