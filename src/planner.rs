use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;
use uuid::Uuid;

use crate::catalog::{meal_pool, Catalog};
use crate::core::{
    Completion, DayPlan, DietPlan, EnergyLevel, ExercisePlan, Food, Intensity, MacroBalance, MealType,
    Meals, MentalityPlan, MentalityType, Plan, Result, UserProfile, PLAN_DAYS,
};
use crate::progress::calculate_streak;
use crate::selector::{pick_one, pick_random};

/// Draw counts per meal slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MealCounts {
    pub breakfast: usize,
    pub lunch: usize,
    pub dinner: usize,
    pub snack: usize,
}

impl MealCounts {
    pub fn slot(&self, meal: MealType) -> usize {
        match meal {
            MealType::Breakfast => self.breakfast,
            MealType::Lunch => self.lunch,
            MealType::Dinner => self.dinner,
            MealType::Snack => self.snack,
        }
    }
}

/// Everything an energy tier decides
#[derive(Debug, Clone, Copy)]
pub struct TierProfile {
    pub intensity: Intensity,
    pub meals: MealCounts,
    pub diet_focus: &'static str,
    pub exercise_focus: &'static str,
}

/// Everything a day index decides
#[derive(Debug, Clone, Copy)]
pub struct DayProfile {
    pub exercise_count: usize,
    pub mentality: MentalityType,
}

// indexed by `tier_index`
static TIERS: [TierProfile; 3] = [
    TierProfile {
        intensity: Intensity::Light,
        meals: MealCounts { breakfast: 2, lunch: 3, dinner: 2, snack: 1 },
        diet_focus: "Simple, satisfying meals",
        exercise_focus: "Light movement",
    },
    TierProfile {
        intensity: Intensity::Moderate,
        meals: MealCounts { breakfast: 3, lunch: 4, dinner: 4, snack: 1 },
        diet_focus: "Balanced nutrition",
        exercise_focus: "Moderate activity",
    },
    TierProfile {
        intensity: Intensity::Intense,
        meals: MealCounts { breakfast: 4, lunch: 5, dinner: 5, snack: 2 },
        diet_focus: "Optimized macro balance",
        exercise_focus: "Challenging workout",
    },
];

// indexed by day number - 1
static DAYS: [DayProfile; PLAN_DAYS] = [
    DayProfile { exercise_count: 1, mentality: MentalityType::Affirmation },
    DayProfile { exercise_count: 1, mentality: MentalityType::Breathing },
    DayProfile { exercise_count: 2, mentality: MentalityType::Reflection },
];

fn tier_index(energy: EnergyLevel) -> usize {
    match energy {
        EnergyLevel::Low => 0,
        EnergyLevel::Medium => 1,
        EnergyLevel::High => 2,
    }
}

pub fn tier(energy: EnergyLevel) -> &'static TierProfile {
    &TIERS[tier_index(energy)]
}

pub fn day_profile(day_number: u8) -> Result<&'static DayProfile> {
    Ok(&DAYS[Plan::day_index(day_number)?])
}

/// Builds day content from a catalog with an injectable random source.
pub struct PlanGenerator<'c, R = StdRng> {
    catalog: &'c Catalog,
    rng: R,
}

impl PlanGenerator<'static, StdRng> {
    /// Built-in catalog, entropy-seeded
    pub fn new() -> Self {
        Self::with_rng(Catalog::builtin(), StdRng::from_entropy())
    }
}

impl Default for PlanGenerator<'static, StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'c, R: Rng> PlanGenerator<'c, R> {
    pub fn with_rng(catalog: &'c Catalog, rng: R) -> Self {
        Self { catalog, rng }
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    pub fn diet_plan(&mut self, food_ids: &[String], energy: EnergyLevel) -> DietPlan {
        let profile = tier(energy);
        let catalog = self.catalog;
        let rng = &mut self.rng;
        let selected = catalog.foods_by_ids(food_ids);

        let breakfast_pool = meal_pool(&selected, MealType::Breakfast);
        let main_pool: Vec<_> = selected
            .iter()
            .copied()
            .filter(|f| f.suits(MealType::Lunch) || f.suits(MealType::Dinner))
            .collect();
        let snack_pool = meal_pool(&selected, MealType::Snack);

        let mut draw = |pool: &[&Food], meal: MealType| -> Vec<String> {
            pick_random(pool, profile.meals.slot(meal), &mut *rng)
                .into_iter()
                .map(|f| f.name.clone())
                .collect()
        };

        // lunch and dinner draw independently from the same pool
        let meals = Meals {
            breakfast: draw(&breakfast_pool, MealType::Breakfast),
            lunch: draw(&main_pool, MealType::Lunch),
            dinner: draw(&main_pool, MealType::Dinner),
            snack: draw(&snack_pool, MealType::Snack),
        };

        DietPlan {
            focus: profile.diet_focus.to_string(),
            meals,
            macro_balance: MacroBalance::TARGET,
        }
    }

    pub fn exercise_plan(&mut self, energy: EnergyLevel, day_number: u8) -> Result<ExercisePlan> {
        let day = day_profile(day_number)?;
        Ok(self.build_exercise(energy, day))
    }

    pub fn mentality_plan(&mut self, day_number: u8) -> Result<MentalityPlan> {
        let day = day_profile(day_number)?;
        Ok(self.build_mentality(day))
    }

    /// Content for one day, with nothing completed yet
    pub fn day_plan(
        &mut self,
        user: &UserProfile,
        energy: EnergyLevel,
        day_number: u8,
        date: DateTime<Utc>,
    ) -> Result<DayPlan> {
        let day = day_profile(day_number)?;
        Ok(self.build_day(user, energy, day_number, day, date))
    }

    /// Full plan starting now. Every day defaults to medium energy.
    pub fn generate(&mut self, user: &UserProfile, levels: Option<[EnergyLevel; PLAN_DAYS]>) -> Plan {
        self.generate_at(user, levels, Utc::now())
    }

    pub fn generate_at(
        &mut self,
        user: &UserProfile,
        levels: Option<[EnergyLevel; PLAN_DAYS]>,
        now: DateTime<Utc>,
    ) -> Plan {
        let levels = levels.unwrap_or([EnergyLevel::Medium; PLAN_DAYS]);
        let days: [DayPlan; PLAN_DAYS] = std::array::from_fn(|i| {
            let day_number = i as u8 + 1;
            let date = now + Duration::days(i as i64);
            self.build_day(user, levels[i], day_number, &DAYS[i], date)
        });

        let plan = Plan {
            id: format!("plan-{}", Uuid::new_v4()),
            created_at: now,
            days,
            current_day: 1,
            streak: 0,
        };
        debug!(plan_id = %plan.id, ?levels, "generated plan");
        plan
    }

    /// New content for one day at a new energy level.
    ///
    /// Only the targeted day is redrawn. Every day keeps its completion flags,
    /// the other two days keep their content, and the plan keeps its identity.
    pub fn regenerate_day(
        &mut self,
        plan: &Plan,
        user: &UserProfile,
        day_number: u8,
        energy: EnergyLevel,
    ) -> Result<Plan> {
        let index = Plan::day_index(day_number)?;
        let old = &plan.days[index];

        let mut fresh = self.build_day(user, energy, day_number, &DAYS[index], old.date);
        fresh.completed = old.completed;

        let mut next = plan.clone();
        next.days[index] = fresh;
        next.streak = calculate_streak(&next);
        debug!(plan_id = %next.id, day_number, %energy, "regenerated day");
        Ok(next)
    }

    /// Redraw every day with new levels, carrying completion flags over by
    /// position. The result is a new plan with a new id, starting at day 1.
    pub fn regenerate_all(
        &mut self,
        plan: &Plan,
        user: &UserProfile,
        levels: [EnergyLevel; PLAN_DAYS],
    ) -> Plan {
        let mut next = self.generate(user, Some(levels));
        for (fresh, old) in next.days.iter_mut().zip(plan.days.iter()) {
            fresh.completed = old.completed;
        }
        next.streak = calculate_streak(&next);
        next
    }

    fn build_day(
        &mut self,
        user: &UserProfile,
        energy: EnergyLevel,
        day_number: u8,
        day: &DayProfile,
        date: DateTime<Utc>,
    ) -> DayPlan {
        DayPlan {
            day_number,
            date,
            energy_level: energy,
            diet: self.diet_plan(&user.selected_foods, energy),
            exercise: self.build_exercise(energy, day),
            mentality: self.build_mentality(day),
            completed: Completion::default(),
        }
    }

    fn build_exercise(&mut self, energy: EnergyLevel, day: &DayProfile) -> ExercisePlan {
        let profile = tier(energy);
        let candidates = self.catalog.exercises_by_intensity(profile.intensity);
        let exercises: Vec<_> = pick_random(&candidates, day.exercise_count, &mut self.rng)
            .into_iter()
            .cloned()
            .collect();
        let minutes: u32 = exercises.iter().map(|e| e.minutes()).sum();

        ExercisePlan {
            focus: profile.exercise_focus.to_string(),
            exercises,
            total_duration: format!("{} min", minutes),
        }
    }

    fn build_mentality(&mut self, day: &DayProfile) -> MentalityPlan {
        let candidates = self.catalog.checks_by_type(day.mentality);
        let check = match pick_one(&candidates, &mut self.rng) {
            Some(check) => (*check).clone(),
            None => {
                debug!(kind = %day.mentality, "no check of this type, drawing from all");
                self.catalog.any_check(&mut self.rng).clone()
            }
        };
        MentalityPlan { check }
    }
}
