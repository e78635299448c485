//! AI collaborator boundary.
//!
//! Every call resolves to usable content: a provider failure or an
//! unparsable answer turns into a fixed fallback, never an error.

pub mod alerts;
pub mod prompts;
pub mod provider;
pub mod types;

pub use alerts::detect_alerts;
pub use provider::{build_generator, OfflineProvider, TextGenerator};
#[cfg(feature = "remote-ai")]
pub use provider::AnthropicProvider;
pub use types::{
    Alert, AlertKind, AlertSeverity, CachedInsight, CompanionRequest, Ingredient, Insight,
    InsightRequest, Nutrition, Recipe, RecipeOutcome, RecipeRequest, Trend,
};

use tracing::{debug, warn};

use crate::core::{MealType, Plan, Result, StateBackend, Store};
use crate::progress::{calculate_streak, completion_history, energy_history};

pub const COMPANION_FAILURE: &str = "Keep going, you've got this!";
pub const COMPANION_EMPTY: &str = "You're doing great!";

pub struct AiService {
    generator: Box<dyn TextGenerator>,
}

impl AiService {
    pub fn new(generator: Box<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub fn offline() -> Self {
        Self::new(Box::new(OfflineProvider))
    }

    pub fn provider_name(&self) -> &str {
        self.generator.name()
    }

    pub async fn recipe(&self, request: &RecipeRequest) -> RecipeOutcome {
        if request.foods.is_empty() {
            debug!(meal = %request.meal_type, "no foods for this meal, skipping recipe");
            return RecipeOutcome::unavailable();
        }

        let prompt = prompts::recipe_prompt(request);
        let raw = match self
            .generator
            .generate(&prompt, prompts::RECIPE_MAX_TOKENS)
            .await
        {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "recipe request failed");
                return RecipeOutcome::unavailable();
            }
        };

        match serde_json::from_str::<Recipe>(&prompts::clean_json(&raw)) {
            Ok(recipe) => RecipeOutcome {
                recipe: Some(recipe),
                fallback: false,
            },
            Err(e) => {
                warn!(error = %e, "unparsable recipe answer");
                RecipeOutcome::unavailable()
            }
        }
    }

    /// Alerts are computed locally and kept even when the narrative falls back.
    pub async fn insight(&self, request: &InsightRequest) -> CachedInsight {
        let alerts = detect_alerts(
            prompts::insight_name(request),
            &request.energy_history,
            &request.completion_history,
        );

        let prompt = prompts::insight_prompt(request, &alerts);
        let insight = match self
            .generator
            .generate(&prompt, prompts::INSIGHT_MAX_TOKENS)
            .await
        {
            Ok(raw) => serde_json::from_str::<Insight>(&prompts::clean_json(&raw)).unwrap_or_else(
                |e| {
                    warn!(error = %e, "unparsable insight answer");
                    Insight::fallback()
                },
            ),
            Err(e) => {
                warn!(error = %e, "insight request failed");
                Insight::fallback()
            }
        };

        CachedInsight { insight, alerts }
    }

    pub async fn companion_message(&self, request: &CompanionRequest) -> String {
        let prompt = prompts::companion_prompt(request);
        match self
            .generator
            .generate(&prompt, prompts::COMPANION_MAX_TOKENS)
            .await
        {
            Ok(text) if text.trim().is_empty() => COMPANION_EMPTY.to_string(),
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                warn!(error = %e, "companion request failed");
                COMPANION_FAILURE.to_string()
            }
        }
    }

    /// Recipe for one meal of a plan day, served from the cache when present.
    /// Only real recipes are cached.
    pub async fn recipe_for_day<B: StateBackend>(
        &self,
        store: &Store<B>,
        plan: &Plan,
        user_name: Option<&str>,
        day_number: u8,
        meal: MealType,
    ) -> Result<RecipeOutcome> {
        let day = plan.day(day_number)?;
        if let Some(recipe) = store.cached_recipe(day_number, meal) {
            debug!(day_number, %meal, "recipe cache hit");
            return Ok(RecipeOutcome {
                recipe: Some(recipe),
                fallback: false,
            });
        }

        let request = RecipeRequest {
            foods: day.diet.meals.slot(meal).to_vec(),
            meal_type: meal,
            energy_level: day.energy_level,
            user_name: user_name.map(str::to_string),
        };
        let outcome = self.recipe(&request).await;
        if let Some(recipe) = &outcome.recipe {
            if let Err(e) = store.cache_recipe(day_number, meal, recipe) {
                warn!(error = %e, "could not cache recipe");
            }
        }
        Ok(outcome)
    }

    /// Insight over days 1..=day_number. A cached result is returned unless
    /// `refresh` is set; every fresh result replaces the cache entry.
    pub async fn insight_for_day<B: StateBackend>(
        &self,
        store: &Store<B>,
        plan: &Plan,
        user_name: Option<&str>,
        day_number: u8,
        refresh: bool,
    ) -> Result<CachedInsight> {
        let energy = energy_history(plan, day_number)?;
        if !refresh {
            if let Some(cached) = store.cached_insight(day_number) {
                debug!(day_number, "insight cache hit");
                return Ok(cached);
            }
        }

        let request = InsightRequest {
            energy_history: energy,
            completion_history: completion_history(plan, day_number)?,
            user_name: user_name.map(str::to_string),
            streak: calculate_streak(plan),
        };
        let result = self.insight(&request).await;
        if let Err(e) = store.cache_insight(day_number, &result) {
            warn!(error = %e, "could not cache insight");
        }
        Ok(result)
    }
}
