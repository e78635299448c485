use anyhow::{bail, Context, Result};
use std::path::PathBuf;

use dem::ai::{build_generator, AiService, CompanionRequest};
use dem::catalog::Catalog;
use dem::config::Config;
use dem::core::{DayPlan, EnergyLevel, FoodCategory, MealType, Pillar, Store};
use dem::planner::PlanGenerator;
use dem::progress;
use dem::tracker::{PlanSnapshot, PlanTracker};

pub use commands::{Args, Commands};

mod commands;

fn open(data_dir: Option<PathBuf>) -> Result<(Config, PlanTracker<'static>)> {
    let config = Config::new(data_dir)?;
    let store = Store::open(config.state_dir()).context("Failed to open state directory")?;
    let tracker = PlanTracker::new(store, PlanGenerator::new());
    Ok((config, tracker))
}

fn current(tracker: &PlanTracker<'static>) -> Result<PlanSnapshot> {
    match tracker.snapshot() {
        Some(snapshot) => Ok(snapshot),
        None => bail!("No plan yet. Run `dem onboard --foods ...` first."),
    }
}

fn pillar_mark(done: bool) -> &'static str {
    if done {
        "✅"
    } else {
        "⬜"
    }
}

fn print_day(day: &DayPlan) {
    println!(
        "📅 Day {} ({}) - {} energy",
        day.day_number,
        day.date.format("%a %b %-d"),
        day.energy_level.label()
    );

    println!("\n{} Diet: {}", pillar_mark(day.completed.diet), day.diet.focus);
    for meal in MealType::ALL {
        let items = day.diet.meals.slot(meal);
        if !items.is_empty() {
            println!("   {:<10} {}", meal.to_string(), items.join(", "));
        }
    }
    let balance = day.diet.macro_balance;
    println!(
        "   balance    fruit {}% / vegetable {}% / grain {}% / protein {}%",
        balance.fruit, balance.vegetable, balance.grain, balance.protein
    );

    println!(
        "\n{} Exercise: {} ({})",
        pillar_mark(day.completed.exercise),
        day.exercise.focus,
        day.exercise.total_duration
    );
    for exercise in &day.exercise.exercises {
        println!("   {} [{}] - {}", exercise.name, exercise.duration, exercise.description);
    }

    let check = &day.mentality.check;
    println!(
        "\n{} Mentality: {} ({})",
        pillar_mark(day.completed.mentality),
        check.title,
        check.duration
    );
    println!("   {}", check.content);
}

pub fn handle_onboard(name: String, foods: Vec<String>, data_dir: Option<PathBuf>) -> Result<()> {
    let (_, mut tracker) = open(data_dir)?;
    let plan = tracker.onboard(&name, foods)?;
    let snapshot = current(&tracker)?;

    println!("👋 Welcome, {}!", snapshot.user.name);
    for (category, percent) in Catalog::builtin().category_breakdown(&snapshot.user.selected_foods) {
        println!("   {:<12} {}%", category.to_string(), percent);
    }
    println!("\nYour 3-day plan {} is ready.\n", plan.id);
    print_day(&plan.days[0]);
    Ok(())
}

pub fn handle_show(day: Option<u8>, data_dir: Option<PathBuf>) -> Result<()> {
    let (_, tracker) = open(data_dir)?;
    let snapshot = current(&tracker)?;
    let day_number = day.unwrap_or(snapshot.focus_day);

    print_day(snapshot.plan.day(day_number)?);
    if tracker.needs_energy_prompt(day_number)? {
        println!(
            "\n⚡ How is your energy today? `dem energy {} <low|medium|high>`",
            day_number
        );
    }
    Ok(())
}

pub fn handle_energy(day: u8, level: EnergyLevel, data_dir: Option<PathBuf>) -> Result<()> {
    let (_, mut tracker) = open(data_dir)?;
    let plan = tracker.set_energy(day, level)?;
    println!("🔄 Day {} rebuilt for {} energy\n", day, level.label());
    print_day(plan.day(day)?);
    Ok(())
}

pub fn handle_toggle(day: u8, pillar: Pillar, data_dir: Option<PathBuf>) -> Result<()> {
    let (_, tracker) = open(data_dir)?;
    let outcome = tracker.toggle(day, pillar)?;

    println!(
        "{} Day {} {}",
        pillar_mark(outcome.done),
        outcome.day_number,
        outcome.pillar
    );
    if outcome.day_completed {
        println!("🎉 Day {} complete! Streak: {}", outcome.day_number, outcome.streak);
    }
    Ok(())
}

pub fn handle_status(data_dir: Option<PathBuf>) -> Result<()> {
    let (_, tracker) = open(data_dir)?;
    let snapshot = current(&tracker)?;

    println!("📊 {} - plan {}", snapshot.user.name, snapshot.plan.id);
    for day in &snapshot.plan.days {
        let c = day.completed;
        println!(
            "   Day {}  {:<6}  diet {}  exercise {}  mentality {}",
            day.day_number,
            day.energy_level.label(),
            pillar_mark(c.diet),
            pillar_mark(c.exercise),
            pillar_mark(c.mentality)
        );
    }
    println!(
        "\n🔥 Streak: {} | Days complete: {}/3 | Today: day {}",
        snapshot.streak, snapshot.completed_days, snapshot.focus_day
    );
    Ok(())
}

pub async fn handle_recipe(day: u8, meal: MealType, data_dir: Option<PathBuf>) -> Result<()> {
    let (config, tracker) = open(data_dir)?;
    let snapshot = current(&tracker)?;
    let ai = AiService::new(build_generator(&config.ai));

    let outcome = ai
        .recipe_for_day(
            tracker.store(),
            &snapshot.plan,
            Some(snapshot.user.name.as_str()),
            day,
            meal,
        )
        .await?;

    let Some(recipe) = outcome.recipe else {
        println!("🍽  No recipe available right now. Try again later.");
        return Ok(());
    };

    println!("🍽  {} ({})", recipe.name, recipe.prep_time);
    println!("   {}\n", recipe.tagline);
    for ingredient in &recipe.ingredients {
        println!("   - {} {}", ingredient.amount, ingredient.item);
    }
    println!();
    for (i, step) in recipe.steps.iter().enumerate() {
        println!("   {}. {}", i + 1, step);
    }
    let n = &recipe.nutrition;
    println!(
        "\n   protein {} | carbs {} | fats {} | calories {}",
        n.protein, n.carbs, n.fats, n.calories
    );
    println!("   💡 {}", recipe.tip);
    Ok(())
}

pub async fn handle_insight(day: Option<u8>, refresh: bool, data_dir: Option<PathBuf>) -> Result<()> {
    let (config, tracker) = open(data_dir)?;
    let snapshot = current(&tracker)?;
    let day_number = day.unwrap_or(snapshot.focus_day);

    if !progress::is_day_complete(snapshot.plan.day(day_number)?) {
        println!("ℹ️  Day {} is not complete yet, the reading may be partial.", day_number);
    }

    let ai = AiService::new(build_generator(&config.ai));
    let result = ai
        .insight_for_day(
            tracker.store(),
            &snapshot.plan,
            Some(snapshot.user.name.as_str()),
            day_number,
            refresh,
        )
        .await?;

    println!("📈 Trend: {}", result.insight.trend);
    println!("   {}", result.insight.insight);
    println!("   💬 {}", result.insight.patient_message);
    println!("   🩺 {}", result.insight.care_note);
    for alert in &result.alerts {
        println!(
            "\n⚠️  {:?} {}: {}\n   {}",
            alert.severity, alert.kind, alert.message, alert.recommendation
        );
    }
    Ok(())
}

pub async fn handle_cheer(day: Option<u8>, pillar: Option<Pillar>, data_dir: Option<PathBuf>) -> Result<()> {
    let (config, tracker) = open(data_dir)?;
    let snapshot = current(&tracker)?;
    let day_number = day.unwrap_or(snapshot.focus_day);
    let today = snapshot.plan.day(day_number)?;

    let ai = AiService::new(build_generator(&config.ai));
    let message = ai
        .companion_message(&CompanionRequest {
            user_name: Some(snapshot.user.name.clone()),
            day_number,
            energy_level: today.energy_level,
            completed_tasks: today.completed.done(),
            streak: snapshot.streak,
            pillar,
        })
        .await;

    println!("💬 {}", message);
    Ok(())
}

pub fn handle_foods() -> Result<()> {
    let catalog = Catalog::builtin();
    for category in FoodCategory::ALL {
        println!("{}:", category);
        for food in catalog.foods_by_category(category) {
            let timing: Vec<String> = food.meal_timing.iter().map(|m| m.to_string()).collect();
            println!("   {:<5} {:<18} {}", food.id, food.name, timing.join(", "));
        }
    }
    Ok(())
}

pub fn handle_reset(yes: bool, data_dir: Option<PathBuf>) -> Result<()> {
    if !yes {
        bail!("This deletes your profile, plan and cached content. Re-run with --yes.");
    }
    let (_, tracker) = open(data_dir)?;
    tracker.restart()?;
    println!("🧹 All data cleared. Run `dem onboard` to start again.");
    Ok(())
}
