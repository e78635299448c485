//! Completion and streak derivation.
//!
//! Everything here reads `completed` flags; nothing trusts a stored streak.

use crate::core::{Completion, DayPlan, EnergyLevel, Pillar, Plan, Result, PLAN_DAYS};

pub fn is_day_complete(day: &DayPlan) -> bool {
    day.completed.is_complete()
}

/// Leading run of complete days, starting at day 1.
pub fn calculate_streak(plan: &Plan) -> usize {
    plan.days.iter().take_while(|d| is_day_complete(d)).count()
}

/// First incomplete day, or the last day once everything is done.
pub fn focus_day(plan: &Plan) -> u8 {
    plan.days
        .iter()
        .find(|d| !is_day_complete(d))
        .map(|d| d.day_number)
        .unwrap_or(PLAN_DAYS as u8)
}

/// A day asks for an energy level once, and never after it is complete.
pub fn should_prompt_energy(day: &DayPlan, already_prompted: bool) -> bool {
    !already_prompted && !is_day_complete(day)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleOutcome {
    pub day_number: u8,
    pub pillar: Pillar,
    /// New value of the flag
    pub done: bool,
    /// The day went from incomplete to complete with this toggle
    pub day_completed: bool,
    pub streak: usize,
}

/// Flip one pillar of one day and refresh the plan's streak cache.
pub fn toggle_pillar(plan: &mut Plan, day_number: u8, pillar: Pillar) -> Result<ToggleOutcome> {
    let day = plan.day_mut(day_number)?;
    let was_complete = day.completed.is_complete();
    let done = day.completed.toggle(pillar);
    let day_completed = !was_complete && day.completed.is_complete();

    plan.streak = calculate_streak(plan);
    Ok(ToggleOutcome {
        day_number,
        pillar,
        done,
        day_completed,
        streak: plan.streak,
    })
}

/// Energy levels of days 1..=through
pub fn energy_history(plan: &Plan, through: u8) -> Result<Vec<EnergyLevel>> {
    let end = Plan::day_index(through)? + 1;
    Ok(plan.days[..end].iter().map(|d| d.energy_level).collect())
}

/// Completion flags of days 1..=through
pub fn completion_history(plan: &Plan, through: u8) -> Result<Vec<Completion>> {
    let end = Plan::day_index(through)? + 1;
    Ok(plan.days[..end].iter().map(|d| d.completed).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::core::{DemError, UserProfile};
    use crate::planner::PlanGenerator;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn plan_with(pattern: [bool; 3]) -> Plan {
        let user = UserProfile::new("Kai", vec!["f1".to_string(), "v2".to_string()]);
        let mut plan = PlanGenerator::with_rng(Catalog::builtin(), StdRng::seed_from_u64(11))
            .generate(&user, None);
        for (day, complete) in plan.days.iter_mut().zip(pattern) {
            day.completed = Completion {
                diet: complete,
                exercise: complete,
                mentality: complete,
            };
        }
        plan
    }

    #[test]
    fn test_streak_is_complete_prefix() {
        assert_eq!(calculate_streak(&plan_with([true, false, true])), 1);
        assert_eq!(calculate_streak(&plan_with([true, true, false])), 2);
        assert_eq!(calculate_streak(&plan_with([false, true, true])), 0);
        assert_eq!(calculate_streak(&plan_with([true, true, true])), 3);
    }

    #[test]
    fn test_streak_ignores_stored_value() {
        let mut plan = plan_with([false, false, false]);
        plan.streak = 3;
        assert_eq!(calculate_streak(&plan), 0);
    }

    #[test]
    fn test_partial_day_is_incomplete() {
        let mut plan = plan_with([false, false, false]);
        plan.days[0].completed.diet = true;
        plan.days[0].completed.exercise = true;
        assert!(!is_day_complete(&plan.days[0]));
        assert_eq!(is_day_complete(&plan.days[0]), is_day_complete(&plan.days[0]));
    }

    #[test]
    fn test_focus_day() {
        assert_eq!(focus_day(&plan_with([false, false, false])), 1);
        assert_eq!(focus_day(&plan_with([true, false, true])), 2);
        assert_eq!(focus_day(&plan_with([true, true, true])), 3);
    }

    #[test]
    fn test_toggle_reports_day_completion() {
        let mut plan = plan_with([false, false, false]);
        toggle_pillar(&mut plan, 1, Pillar::Diet).unwrap();
        toggle_pillar(&mut plan, 1, Pillar::Exercise).unwrap();
        let outcome = toggle_pillar(&mut plan, 1, Pillar::Mentality).unwrap();

        assert!(outcome.done);
        assert!(outcome.day_completed);
        assert_eq!(outcome.streak, 1);
        assert_eq!(plan.streak, 1);

        let undo = toggle_pillar(&mut plan, 1, Pillar::Mentality).unwrap();
        assert!(!undo.done);
        assert!(!undo.day_completed);
        assert_eq!(plan.streak, 0);
    }

    #[test]
    fn test_toggle_rejects_bad_day() {
        let mut plan = plan_with([false, false, false]);
        let before = plan.clone();
        assert!(matches!(
            toggle_pillar(&mut plan, 4, Pillar::Diet),
            Err(DemError::InvalidDay(4))
        ));
        assert_eq!(plan, before);
    }

    #[test]
    fn test_energy_prompt_rule() {
        let plan = plan_with([true, false, false]);
        assert!(!should_prompt_energy(&plan.days[0], false));
        assert!(should_prompt_energy(&plan.days[1], false));
        assert!(!should_prompt_energy(&plan.days[1], true));
    }

    #[test]
    fn test_histories() {
        let plan = plan_with([true, false, false]);
        assert_eq!(energy_history(&plan, 2).unwrap().len(), 2);
        let completion = completion_history(&plan, 3).unwrap();
        assert_eq!(completion.len(), 3);
        assert!(completion[0].is_complete());
        assert!(energy_history(&plan, 0).is_err());
    }
}
