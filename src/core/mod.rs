pub mod backend;
pub mod error;
pub mod model;
pub mod store;

pub use backend::{FileBackend, MemoryBackend, StateBackend};
pub use error::{DemError, Result};
pub use model::{
    AppState, Completion, DayPlan, DietPlan, EnergyLevel, Exercise, ExercisePlan, ExerciseType,
    Food, FoodCategory, Intensity, MacroBalance, MealType, Meals, MentalityCheck, MentalityPlan,
    MentalityType, Pillar, Plan, UserProfile, PLAN_DAYS,
};
pub use store::Store;
