//! Front-end actions over a store and a plan generator.

use rand::Rng;
use tracing::{debug, info};

use crate::core::{
    AppState, DemError, EnergyLevel, FileBackend, Pillar, Plan, Result, StateBackend, Store,
    UserProfile,
};
use crate::planner::PlanGenerator;
use crate::progress::{self, ToggleOutcome};

/// Smallest food selection onboarding accepts
pub const MIN_SELECTED_FOODS: usize = 10;

/// Display state of the current plan, all derived on read
#[derive(Debug, Clone)]
pub struct PlanSnapshot {
    pub user: UserProfile,
    pub plan: Plan,
    pub streak: usize,
    pub focus_day: u8,
    pub completed_days: usize,
}

pub struct PlanTracker<'c, B: StateBackend = FileBackend, R: Rng = rand::rngs::StdRng> {
    store: Store<B>,
    generator: PlanGenerator<'c, R>,
}

impl<'c, B: StateBackend, R: Rng> PlanTracker<'c, B, R> {
    pub fn new(store: Store<B>, generator: PlanGenerator<'c, R>) -> Self {
        Self { store, generator }
    }

    pub fn store(&self) -> &Store<B> {
        &self.store
    }

    /// Validate the food selection, save the profile and a fresh medium plan.
    pub fn onboard(&mut self, name: &str, selected_foods: Vec<String>) -> Result<Plan> {
        let catalog = self.generator.catalog();
        if let Some(unknown) = selected_foods.iter().find(|id| catalog.food(id).is_none()) {
            return Err(DemError::UnknownFood(unknown.clone()));
        }

        let mut foods = selected_foods;
        foods.sort();
        foods.dedup();
        if foods.len() < MIN_SELECTED_FOODS {
            return Err(DemError::NotEnoughFoods {
                selected: foods.len(),
                required: MIN_SELECTED_FOODS,
            });
        }

        let user = UserProfile::new(name, foods);
        let plan = self.generator.generate(&user, None);
        self.store.save_onboarding(user, &plan)?;
        info!(plan_id = %plan.id, "onboarding complete");
        Ok(plan)
    }

    pub fn state(&self) -> AppState {
        self.store.load()
    }

    /// Current user and plan, or `None` before onboarding.
    pub fn snapshot(&self) -> Option<PlanSnapshot> {
        let state = self.store.load();
        let (user, plan) = (state.user?, state.current_plan?);
        Some(PlanSnapshot {
            streak: progress::calculate_streak(&plan),
            focus_day: progress::focus_day(&plan),
            completed_days: plan.days.iter().filter(|d| progress::is_day_complete(d)).count(),
            user,
            plan,
        })
    }

    fn require(&self) -> Result<(UserProfile, Plan)> {
        let state = self.store.load();
        match (state.user, state.current_plan) {
            (Some(user), Some(plan)) => Ok((user, plan)),
            _ => Err(DemError::NoPlan),
        }
    }

    /// Regenerate a day for a new energy level and stop prompting for it.
    pub fn set_energy(&mut self, day_number: u8, energy: EnergyLevel) -> Result<Plan> {
        let (user, plan) = self.require()?;
        let next = self
            .generator
            .regenerate_day(&plan, &user, day_number, energy)?;
        self.store.save_current_plan(&next)?;
        self.store.mark_energy_prompted(day_number)?;
        Ok(next)
    }

    /// Record that the prompt was shown and dismissed without a choice.
    pub fn dismiss_energy_prompt(&self, day_number: u8) -> Result<()> {
        Plan::day_index(day_number)?;
        self.store.mark_energy_prompted(day_number)
    }

    pub fn needs_energy_prompt(&self, day_number: u8) -> Result<bool> {
        let (_, plan) = self.require()?;
        let day = plan.day(day_number)?;
        Ok(progress::should_prompt_energy(
            day,
            self.store.was_energy_prompted(day_number),
        ))
    }

    pub fn toggle(&self, day_number: u8, pillar: Pillar) -> Result<ToggleOutcome> {
        Plan::day_index(day_number)?;
        let mut outcome = None;
        let mut failure = None;
        let applied = self.store.update_plan(|mut plan| {
            match progress::toggle_pillar(&mut plan, day_number, pillar) {
                Ok(o) => outcome = Some(o),
                Err(e) => failure = Some(e),
            }
            plan
        })?;

        if let Some(e) = failure {
            return Err(e);
        }
        match (applied, outcome) {
            (true, Some(outcome)) => {
                if outcome.day_completed {
                    info!(day_number, streak = outcome.streak, "day complete");
                }
                Ok(outcome)
            }
            _ => Err(DemError::NoPlan),
        }
    }

    /// Forget everything. The next step is onboarding again.
    pub fn restart(&self) -> Result<()> {
        debug!("clearing all records");
        self.store.clear()
    }
}
