use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::{Completion, EnergyLevel, MealType, Pillar};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub item: String,
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    pub protein: String,
    pub carbs: String,
    pub fats: String,
    pub calories: String,
}

/// Generated recipe for one meal slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub name: String,
    pub tagline: String,
    pub prep_time: String,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<String>,
    pub nutrition: Nutrition,
    pub tip: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Improving,
    Stable,
    Declining,
    InsufficientData,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Improving => write!(f, "improving"),
            Trend::Stable => write!(f, "stable"),
            Trend::Declining => write!(f, "declining"),
            Trend::InsufficientData => write!(f, "insufficient data"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    pub trend: Trend,
    pub insight: String,
    pub patient_message: String,
    pub care_note: String,
}

impl Insight {
    /// Neutral reading used whenever the provider cannot answer
    pub fn fallback() -> Self {
        Insight {
            trend: Trend::Stable,
            insight: "Keep up the great work on your recovery journey.".to_string(),
            patient_message: "Every small step counts toward your recovery.".to_string(),
            care_note: "Patient engagement within normal parameters.".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertSeverity {
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertKind {
    EnergyDecline,
    EngagementDrop,
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertKind::EnergyDecline => write!(f, "ENERGY_DECLINE"),
            AlertKind::EngagementDrop => write!(f, "ENGAGEMENT_DROP"),
        }
    }
}

/// Care-team flag raised from the histories, never by the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub severity: AlertSeverity,
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub message: String,
    pub recommendation: String,
}

/// An insight together with the alerts computed for the same histories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedInsight {
    #[serde(flatten)]
    pub insight: Insight,
    #[serde(default)]
    pub alerts: Vec<Alert>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRequest {
    /// Food names, not ids
    pub foods: Vec<String>,
    pub meal_type: MealType,
    pub energy_level: EnergyLevel,
    pub user_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightRequest {
    /// Oldest first
    pub energy_history: Vec<EnergyLevel>,
    pub completion_history: Vec<Completion>,
    pub user_name: Option<String>,
    pub streak: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanionRequest {
    pub user_name: Option<String>,
    pub day_number: u8,
    pub energy_level: EnergyLevel,
    pub completed_tasks: Vec<Pillar>,
    pub streak: usize,
    pub pillar: Option<Pillar>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecipeOutcome {
    pub recipe: Option<Recipe>,
    /// True when the provider failed and no recipe is available
    pub fallback: bool,
}

impl RecipeOutcome {
    pub fn unavailable() -> Self {
        RecipeOutcome {
            recipe: None,
            fallback: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipe_wire_format() {
        let raw = r#"{
            "name": "Green Bowl",
            "tagline": "Fresh",
            "prepTime": "15 minutes",
            "ingredients": [{"item": "Spinach", "amount": "2 cups"}],
            "steps": ["Wash", "Toss"],
            "nutrition": {"protein": "12g", "carbs": "30g", "fats": "9g", "calories": "~320"},
            "tip": "Add lemon"
        }"#;
        let recipe: Recipe = serde_json::from_str(raw).unwrap();
        assert_eq!(recipe.prep_time, "15 minutes");
        assert_eq!(recipe.ingredients[0].item, "Spinach");
    }

    #[test]
    fn test_trend_and_alert_wire_names() {
        assert_eq!(
            serde_json::to_string(&Trend::InsufficientData).unwrap(),
            "\"insufficient_data\""
        );
        let alert = Alert {
            severity: AlertSeverity::High,
            kind: AlertKind::EngagementDrop,
            message: "m".to_string(),
            recommendation: "r".to_string(),
        };
        let value = serde_json::to_value(&alert).unwrap();
        assert_eq!(value["severity"], "HIGH");
        assert_eq!(value["type"], "ENGAGEMENT_DROP");
    }

    #[test]
    fn test_cached_insight_is_flat() {
        let cached = CachedInsight {
            insight: Insight::fallback(),
            alerts: vec![],
        };
        let value = serde_json::to_value(&cached).unwrap();
        assert_eq!(value["trend"], "stable");
        assert_eq!(value["patientMessage"], "Every small step counts toward your recovery.");
        assert!(value["alerts"].as_array().unwrap().is_empty());
    }
}
