use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, error, warn};

use super::backend::{FileBackend, MemoryBackend, StateBackend};
use super::error::Result;
use super::model::{AppState, MealType, Plan, UserProfile};
use crate::ai::{CachedInsight, Recipe};

pub const APP_STATE_KEY: &str = "dem-app-state";
pub const ENERGY_PROMPT_KEY: &str = "dem-energy-modal-shown";
pub const AI_CACHE_KEY: &str = "dem-ai-cache";

/// Cached AI content. Entries live until the store is cleared.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct AiCache {
    #[serde(default)]
    recipes: HashMap<String, Recipe>,
    #[serde(default)]
    insights: HashMap<String, CachedInsight>,
}

fn recipe_key(day_number: u8, meal: MealType) -> String {
    format!("{}-{}", day_number, meal)
}

fn insight_key(day_number: u8) -> String {
    day_number.to_string()
}

/// Persistent app state over an injected backing medium.
///
/// Three independent records are kept: the app root, the per-day energy
/// prompt flags and the AI cache. Reads never fail: a missing or unreadable
/// record yields its empty default. Writes replace a record wholesale and are
/// last-write-wins; `update_plan` is an unguarded read-modify-write.
pub struct Store<B: StateBackend = FileBackend> {
    backend: B,
}

impl Store<MemoryBackend> {
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }
}

impl Store<FileBackend> {
    /// Open a file-backed store in `dir`
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self::new(FileBackend::new(dir)?))
    }
}

impl<B: StateBackend> Store<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    fn read_record<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        let raw = match self.backend.read(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return T::default(),
            Err(e) => {
                warn!(key, error = %e, "could not read record, using default");
                return T::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "corrupt record, using default");
                T::default()
            }
        }
    }

    fn write_record<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let content = serde_json::to_string_pretty(value)?;
        self.backend.write(key, &content).map_err(|e| {
            error!(key, error = %e, "failed to write record");
            e
        })
    }

    pub fn load(&self) -> AppState {
        self.read_record(APP_STATE_KEY)
    }

    pub fn save(&self, state: &AppState) -> Result<()> {
        self.write_record(APP_STATE_KEY, state)
    }

    pub fn save_user_profile(&self, user: UserProfile) -> Result<()> {
        let mut state = self.load();
        state.user = Some(user);
        state.has_completed_onboarding = true;
        self.save(&state)
    }

    pub fn save_current_plan(&self, plan: &Plan) -> Result<()> {
        let mut state = self.load();
        state.current_plan = Some(plan.clone());
        self.save(&state)
    }

    /// Profile, plan and onboarding flag in a single root write
    pub fn save_onboarding(&self, user: UserProfile, plan: &Plan) -> Result<()> {
        let mut state = self.load();
        state.user = Some(user);
        state.current_plan = Some(plan.clone());
        state.has_completed_onboarding = true;
        self.save(&state)
    }

    /// Replace the current plan with `f(plan)`. Returns false, writing
    /// nothing, when there is no plan.
    pub fn update_plan<F>(&self, f: F) -> Result<bool>
    where
        F: FnOnce(Plan) -> Plan,
    {
        let mut state = self.load();
        let Some(plan) = state.current_plan.take() else {
            debug!("update_plan without a current plan");
            return Ok(false);
        };
        state.current_plan = Some(f(plan));
        self.save(&state)?;
        Ok(true)
    }

    pub fn mark_energy_prompted(&self, day_number: u8) -> Result<()> {
        let mut shown: HashMap<String, bool> = self.read_record(ENERGY_PROMPT_KEY);
        shown.insert(day_number.to_string(), true);
        self.write_record(ENERGY_PROMPT_KEY, &shown)
    }

    pub fn was_energy_prompted(&self, day_number: u8) -> bool {
        let shown: HashMap<String, bool> = self.read_record(ENERGY_PROMPT_KEY);
        shown.get(&day_number.to_string()).copied().unwrap_or(false)
    }

    pub fn cached_recipe(&self, day_number: u8, meal: MealType) -> Option<Recipe> {
        let mut cache: AiCache = self.read_record(AI_CACHE_KEY);
        cache.recipes.remove(&recipe_key(day_number, meal))
    }

    pub fn cache_recipe(&self, day_number: u8, meal: MealType, recipe: &Recipe) -> Result<()> {
        let mut cache: AiCache = self.read_record(AI_CACHE_KEY);
        cache
            .recipes
            .insert(recipe_key(day_number, meal), recipe.clone());
        self.write_record(AI_CACHE_KEY, &cache)
    }

    pub fn cached_insight(&self, day_number: u8) -> Option<CachedInsight> {
        let mut cache: AiCache = self.read_record(AI_CACHE_KEY);
        cache.insights.remove(&insight_key(day_number))
    }

    pub fn cache_insight(&self, day_number: u8, insight: &CachedInsight) -> Result<()> {
        let mut cache: AiCache = self.read_record(AI_CACHE_KEY);
        cache
            .insights
            .insert(insight_key(day_number), insight.clone());
        self.write_record(AI_CACHE_KEY, &cache)
    }

    /// Full reset of every record. All removals are attempted; the first
    /// failure is returned.
    pub fn clear(&self) -> Result<()> {
        let mut first_error = None;
        for key in [APP_STATE_KEY, ENERGY_PROMPT_KEY, AI_CACHE_KEY] {
            if let Err(e) = self.backend.remove(key) {
                error!(key, error = %e, "failed to remove record");
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{Ingredient, Insight, Nutrition, Trend};
    use crate::planner::PlanGenerator;
    use crate::catalog::Catalog;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample_user() -> UserProfile {
        UserProfile::new(
            "Mina",
            ["f1", "f2", "v1", "v2", "g1", "g3", "p1", "p3", "p6", "h1"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        )
    }

    fn sample_plan() -> Plan {
        let mut generator = PlanGenerator::with_rng(Catalog::builtin(), StdRng::seed_from_u64(3));
        generator.generate(&sample_user(), None)
    }

    fn sample_recipe() -> Recipe {
        Recipe {
            name: "Sunrise Oats".to_string(),
            tagline: "Warm and quick".to_string(),
            prep_time: "10 minutes".to_string(),
            ingredients: vec![Ingredient {
                item: "Oatmeal".to_string(),
                amount: "1 cup".to_string(),
            }],
            steps: vec!["Cook the oats".to_string()],
            nutrition: Nutrition {
                protein: "8g".to_string(),
                carbs: "40g".to_string(),
                fats: "5g".to_string(),
                calories: "~250".to_string(),
            },
            tip: "Add berries".to_string(),
        }
    }

    #[test]
    fn test_load_defaults_when_empty() {
        let store = Store::in_memory();
        assert_eq!(store.load(), AppState::default());
    }

    #[test]
    fn test_corrupt_root_loads_default() {
        let backend = MemoryBackend::new();
        backend.write(APP_STATE_KEY, "{not json").unwrap();
        let store = Store::new(backend);

        let state = store.load();
        assert!(state.user.is_none());
        assert!(state.current_plan.is_none());
        assert!(!state.has_completed_onboarding);
    }

    #[test]
    fn test_save_current_plan_round_trip() {
        let store = Store::in_memory();
        let plan = sample_plan();

        store.save_current_plan(&plan).unwrap();
        assert_eq!(store.load().current_plan, Some(plan));
    }

    #[test]
    fn test_save_user_profile_marks_onboarded() {
        let store = Store::in_memory();
        let plan = sample_plan();
        store.save_current_plan(&plan).unwrap();

        store.save_user_profile(sample_user()).unwrap();
        let state = store.load();
        assert!(state.has_completed_onboarding);
        assert_eq!(state.user.unwrap().name, "Mina");
        assert!(state.current_plan.is_some());
    }

    #[test]
    fn test_update_plan_without_plan_is_noop() {
        let store = Store::in_memory();
        let applied = store
            .update_plan(|mut plan| {
                plan.current_day = 2;
                plan
            })
            .unwrap();
        assert!(!applied);
        assert_eq!(store.load(), AppState::default());
    }

    #[test]
    fn test_update_plan_applies() {
        let store = Store::in_memory();
        store.save_current_plan(&sample_plan()).unwrap();

        let applied = store
            .update_plan(|mut plan| {
                plan.days[1].completed.diet = true;
                plan
            })
            .unwrap();
        assert!(applied);
        assert!(store.load().current_plan.unwrap().days[1].completed.diet);
    }

    #[test]
    fn test_energy_prompt_flags() {
        let store = Store::in_memory();
        assert!(!store.was_energy_prompted(2));

        store.mark_energy_prompted(2).unwrap();
        assert!(store.was_energy_prompted(2));
        assert!(!store.was_energy_prompted(1));
    }

    #[test]
    fn test_corrupt_prompt_record_reads_false() {
        let backend = MemoryBackend::new();
        backend.write(ENERGY_PROMPT_KEY, "[1,2").unwrap();
        let store = Store::new(backend);

        assert!(!store.was_energy_prompted(1));
        store.mark_energy_prompted(1).unwrap();
        assert!(store.was_energy_prompted(1));
    }

    #[test]
    fn test_ai_cache_keys() {
        let store = Store::in_memory();
        let recipe = sample_recipe();

        store.cache_recipe(1, MealType::Breakfast, &recipe).unwrap();
        assert_eq!(store.cached_recipe(1, MealType::Breakfast), Some(recipe));
        assert!(store.cached_recipe(1, MealType::Lunch).is_none());
        assert!(store.cached_recipe(2, MealType::Breakfast).is_none());

        let insight = CachedInsight {
            insight: Insight {
                trend: Trend::Improving,
                insight: "Energy is climbing.".to_string(),
                patient_message: "Nice work".to_string(),
                care_note: "Engaged".to_string(),
            },
            alerts: vec![],
        };
        store.cache_insight(3, &insight).unwrap();
        assert_eq!(store.cached_insight(3), Some(insight));
        assert!(store.cached_recipe(1, MealType::Breakfast).is_some());
    }

    #[test]
    fn test_clear_removes_everything() {
        let store = Store::in_memory();
        store.save_user_profile(sample_user()).unwrap();
        store.save_current_plan(&sample_plan()).unwrap();
        store.mark_energy_prompted(1).unwrap();
        store
            .cache_recipe(1, MealType::Dinner, &sample_recipe())
            .unwrap();

        store.clear().unwrap();

        assert_eq!(store.load(), AppState::default());
        assert!(!store.was_energy_prompted(1));
        assert!(store.cached_recipe(1, MealType::Dinner).is_none());
    }

    /// Memory records whose removal fails for one key
    struct StuckKey {
        inner: MemoryBackend,
        stuck: &'static str,
    }

    impl StateBackend for StuckKey {
        fn read(&self, key: &str) -> Result<Option<String>> {
            self.inner.read(key)
        }

        fn write(&self, key: &str, value: &str) -> Result<()> {
            self.inner.write(key, value)
        }

        fn remove(&self, key: &str) -> Result<()> {
            if key == self.stuck {
                return Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "stuck").into());
            }
            self.inner.remove(key)
        }
    }

    #[test]
    fn test_clear_attempts_every_record() {
        let store = Store::new(StuckKey {
            inner: MemoryBackend::new(),
            stuck: APP_STATE_KEY,
        });
        store.save_user_profile(sample_user()).unwrap();
        store.mark_energy_prompted(1).unwrap();
        store
            .cache_recipe(1, MealType::Snack, &sample_recipe())
            .unwrap();

        assert!(store.clear().is_err());
        assert!(!store.was_energy_prompted(1));
        assert!(store.cached_recipe(1, MealType::Snack).is_none());
        assert!(store.load().user.is_some());
    }

    #[test]
    fn test_save_onboarding_sets_everything() {
        let store = Store::in_memory();
        let plan = sample_plan();
        store.save_onboarding(sample_user(), &plan).unwrap();

        let state = store.load();
        assert!(state.has_completed_onboarding);
        assert_eq!(state.user.unwrap().name, "Mina");
        assert_eq!(state.current_plan, Some(plan));
    }
}
