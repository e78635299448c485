use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::{DemError, Result};

/// Number of days in a plan.
pub const PLAN_DAYS: usize = 3;

/// Self-reported daily capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl EnergyLevel {
    pub const ALL: [EnergyLevel; 3] = [EnergyLevel::Low, EnergyLevel::Medium, EnergyLevel::High];

    pub fn label(&self) -> &'static str {
        match self {
            EnergyLevel::Low => "Low",
            EnergyLevel::Medium => "Medium",
            EnergyLevel::High => "High",
        }
    }
}

impl fmt::Display for EnergyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnergyLevel::Low => write!(f, "low"),
            EnergyLevel::Medium => write!(f, "medium"),
            EnergyLevel::High => write!(f, "high"),
        }
    }
}

impl FromStr for EnergyLevel {
    type Err = DemError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "low" => Ok(EnergyLevel::Low),
            "medium" | "mid" => Ok(EnergyLevel::Medium),
            "high" => Ok(EnergyLevel::High),
            _ => Err(DemError::Parse(format!("unknown energy level: {}", s))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FoodCategory {
    Fruit,
    Vegetable,
    Grain,
    Protein,
    HealthyFat,
}

impl FoodCategory {
    pub const ALL: [FoodCategory; 5] = [
        FoodCategory::Fruit,
        FoodCategory::Vegetable,
        FoodCategory::Grain,
        FoodCategory::Protein,
        FoodCategory::HealthyFat,
    ];
}

impl fmt::Display for FoodCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FoodCategory::Fruit => write!(f, "fruit"),
            FoodCategory::Vegetable => write!(f, "vegetable"),
            FoodCategory::Grain => write!(f, "grain"),
            FoodCategory::Protein => write!(f, "protein"),
            FoodCategory::HealthyFat => write!(f, "healthy-fat"),
        }
    }
}

/// Meal slot of a day. Also used as a food's timing tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snack,
    ];
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MealType::Breakfast => write!(f, "breakfast"),
            MealType::Lunch => write!(f, "lunch"),
            MealType::Dinner => write!(f, "dinner"),
            MealType::Snack => write!(f, "snack"),
        }
    }
}

impl FromStr for MealType {
    type Err = DemError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "breakfast" => Ok(MealType::Breakfast),
            "lunch" => Ok(MealType::Lunch),
            "dinner" => Ok(MealType::Dinner),
            "snack" => Ok(MealType::Snack),
            _ => Err(DemError::Parse(format!("unknown meal type: {}", s))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseType {
    Cardio,
    Strength,
    Flexibility,
    Rest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Light,
    Moderate,
    Intense,
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Intensity::Light => write!(f, "light"),
            Intensity::Moderate => write!(f, "moderate"),
            Intensity::Intense => write!(f, "intense"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MentalityType {
    Affirmation,
    Breathing,
    Reflection,
    Gratitude,
    Meditation,
}

impl fmt::Display for MentalityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MentalityType::Affirmation => write!(f, "affirmation"),
            MentalityType::Breathing => write!(f, "breathing"),
            MentalityType::Reflection => write!(f, "reflection"),
            MentalityType::Gratitude => write!(f, "gratitude"),
            MentalityType::Meditation => write!(f, "meditation"),
        }
    }
}

/// One of the three tracked daily dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pillar {
    Diet,
    Exercise,
    Mentality,
}

impl Pillar {
    pub const ALL: [Pillar; 3] = [Pillar::Diet, Pillar::Exercise, Pillar::Mentality];
}

impl fmt::Display for Pillar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pillar::Diet => write!(f, "diet"),
            Pillar::Exercise => write!(f, "exercise"),
            Pillar::Mentality => write!(f, "mentality"),
        }
    }
}

impl FromStr for Pillar {
    type Err = DemError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "diet" => Ok(Pillar::Diet),
            "exercise" => Ok(Pillar::Exercise),
            "mentality" | "mind" => Ok(Pillar::Mentality),
            _ => Err(DemError::Parse(format!("unknown pillar: {}", s))),
        }
    }
}

/// Catalog food
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Food {
    pub id: String,
    pub name: String,
    pub category: FoodCategory,
    /// Meals this food suits. Empty means every meal.
    #[serde(default)]
    pub meal_timing: Vec<MealType>,
}

impl Food {
    pub fn suits(&self, meal: MealType) -> bool {
        self.meal_timing.is_empty() || self.meal_timing.contains(&meal)
    }
}

/// Catalog exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ExerciseType,
    pub intensity: Intensity,
    pub description: String,
    /// Free-form, e.g. "20 min" or "3 sets"
    pub duration: String,
}

impl Exercise {
    /// Leading integer of the duration string, 0 when there is none.
    pub fn minutes(&self) -> u32 {
        let digits: String = self
            .duration
            .trim_start()
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits.parse().unwrap_or(0)
    }
}

/// Catalog mental-wellness check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentalityCheck {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: MentalityType,
    pub title: String,
    pub content: String,
    pub duration: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    /// Food ids chosen at onboarding
    pub selected_foods: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    pub const DEFAULT_NAME: &'static str = "Friend";

    /// A blank name falls back to [`UserProfile::DEFAULT_NAME`].
    pub fn new(name: &str, selected_foods: Vec<String>) -> Self {
        let name = name.trim();
        UserProfile {
            name: if name.is_empty() {
                Self::DEFAULT_NAME.to_string()
            } else {
                name.to_string()
            },
            selected_foods,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Meals {
    pub breakfast: Vec<String>,
    pub lunch: Vec<String>,
    pub dinner: Vec<String>,
    #[serde(default)]
    pub snack: Vec<String>,
}

impl Meals {
    pub fn slot(&self, meal: MealType) -> &[String] {
        match meal {
            MealType::Breakfast => &self.breakfast,
            MealType::Lunch => &self.lunch,
            MealType::Dinner => &self.dinner,
            MealType::Snack => &self.snack,
        }
    }
}

/// Aspirational macro split in percent. Display only, never derived from the meals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroBalance {
    pub fruit: u8,
    pub vegetable: u8,
    pub grain: u8,
    pub protein: u8,
}

impl MacroBalance {
    pub const TARGET: MacroBalance = MacroBalance {
        fruit: 18,
        vegetable: 32,
        grain: 25,
        protein: 25,
    };
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DietPlan {
    pub focus: String,
    pub meals: Meals,
    pub macro_balance: MacroBalance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExercisePlan {
    pub focus: String,
    pub exercises: Vec<Exercise>,
    pub total_duration: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentalityPlan {
    pub check: MentalityCheck,
}

/// Per-pillar completion flags of a day
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    pub diet: bool,
    pub exercise: bool,
    pub mentality: bool,
}

impl Completion {
    pub fn get(&self, pillar: Pillar) -> bool {
        match pillar {
            Pillar::Diet => self.diet,
            Pillar::Exercise => self.exercise,
            Pillar::Mentality => self.mentality,
        }
    }

    /// Flips one flag and returns its new value.
    pub fn toggle(&mut self, pillar: Pillar) -> bool {
        let flag = match pillar {
            Pillar::Diet => &mut self.diet,
            Pillar::Exercise => &mut self.exercise,
            Pillar::Mentality => &mut self.mentality,
        };
        *flag = !*flag;
        *flag
    }

    pub fn is_complete(&self) -> bool {
        self.diet && self.exercise && self.mentality
    }

    pub fn is_untouched(&self) -> bool {
        !self.diet && !self.exercise && !self.mentality
    }

    pub fn done(&self) -> Vec<Pillar> {
        Pillar::ALL.into_iter().filter(|p| self.get(*p)).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
    pub day_number: u8,
    pub date: DateTime<Utc>,
    pub energy_level: EnergyLevel,
    pub diet: DietPlan,
    pub exercise: ExercisePlan,
    pub mentality: MentalityPlan,
    pub completed: Completion,
}

/// Three-day plan. The fixed-size array keeps days 1..3 in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub days: [DayPlan; PLAN_DAYS],
    pub current_day: u8,
    /// Display cache. Recompute with `progress::calculate_streak`.
    #[serde(default)]
    pub streak: usize,
}

impl Plan {
    /// Zero-based slot for a 1-based day number.
    pub fn day_index(day_number: u8) -> Result<usize> {
        match day_number {
            1..=3 => Ok(usize::from(day_number) - 1),
            _ => Err(DemError::InvalidDay(day_number)),
        }
    }

    pub fn day(&self, day_number: u8) -> Result<&DayPlan> {
        Ok(&self.days[Self::day_index(day_number)?])
    }

    pub fn day_mut(&mut self, day_number: u8) -> Result<&mut DayPlan> {
        Ok(&mut self.days[Self::day_index(day_number)?])
    }

    pub fn energy_levels(&self) -> [EnergyLevel; PLAN_DAYS] {
        [
            self.days[0].energy_level,
            self.days[1].energy_level,
            self.days[2].energy_level,
        ]
    }
}

/// Root persisted aggregate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub user: Option<UserProfile>,
    pub current_plan: Option<Plan>,
    #[serde(default)]
    pub has_completed_onboarding: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise(duration: &str) -> Exercise {
        Exercise {
            id: "x".to_string(),
            name: "X".to_string(),
            kind: ExerciseType::Cardio,
            intensity: Intensity::Light,
            description: String::new(),
            duration: duration.to_string(),
        }
    }

    #[test]
    fn test_exercise_minutes() {
        assert_eq!(exercise("20 min").minutes(), 20);
        assert_eq!(exercise("3 sets").minutes(), 3);
        assert_eq!(exercise("a while").minutes(), 0);
    }

    #[test]
    fn test_completion_toggle() {
        let mut completion = Completion::default();
        assert!(completion.toggle(Pillar::Exercise));
        assert!(completion.exercise);
        assert!(!completion.toggle(Pillar::Exercise));
        assert!(completion.is_untouched());
    }

    #[test]
    fn test_day_index_bounds() {
        assert_eq!(Plan::day_index(1).unwrap(), 0);
        assert_eq!(Plan::day_index(3).unwrap(), 2);
        assert!(matches!(Plan::day_index(0), Err(DemError::InvalidDay(0))));
        assert!(matches!(Plan::day_index(4), Err(DemError::InvalidDay(4))));
    }

    #[test]
    fn test_blank_name_falls_back() {
        let user = UserProfile::new("  ", vec![]);
        assert_eq!(user.name, "Friend");
    }

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(
            serde_json::to_string(&FoodCategory::HealthyFat).unwrap(),
            "\"healthy-fat\""
        );
        assert_eq!("HIGH".parse::<EnergyLevel>().unwrap(), EnergyLevel::High);
        assert!("sideways".parse::<Pillar>().is_err());
    }
}
