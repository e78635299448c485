//! Static reference data: foods, exercises and mentality checks.

mod exercises;
mod foods;
mod mentality;

use once_cell::sync::Lazy;
use rand::Rng;

use crate::core::{
    DemError, Exercise, Food, FoodCategory, Intensity, MealType, MentalityCheck, MentalityType,
    Result,
};

static BUILTIN: Lazy<Catalog> = Lazy::new(|| Catalog {
    foods: foods::builtin(),
    exercises: exercises::builtin(),
    mentality: mentality::builtin(),
});

/// Immutable item collections the generator draws from
#[derive(Debug, Clone)]
pub struct Catalog {
    foods: Vec<Food>,
    exercises: Vec<Exercise>,
    mentality: Vec<MentalityCheck>,
}

impl Catalog {
    /// Build a custom catalog. At least one mentality check is required so
    /// every day can always be given one.
    pub fn new(
        foods: Vec<Food>,
        exercises: Vec<Exercise>,
        mentality: Vec<MentalityCheck>,
    ) -> Result<Self> {
        if mentality.is_empty() {
            return Err(DemError::Config(
                "catalog needs at least one mentality check".to_string(),
            ));
        }
        Ok(Self {
            foods,
            exercises,
            mentality,
        })
    }

    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    pub fn foods(&self) -> &[Food] {
        &self.foods
    }

    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    pub fn mentality_checks(&self) -> &[MentalityCheck] {
        &self.mentality
    }

    pub fn food(&self, id: &str) -> Option<&Food> {
        self.foods.iter().find(|f| f.id == id)
    }

    /// Foods whose id is in `ids`, in catalog order. Unknown ids are skipped.
    pub fn foods_by_ids(&self, ids: &[String]) -> Vec<&Food> {
        self.foods
            .iter()
            .filter(|f| ids.iter().any(|id| *id == f.id))
            .collect()
    }

    pub fn foods_by_category(&self, category: FoodCategory) -> Vec<&Food> {
        self.foods.iter().filter(|f| f.category == category).collect()
    }

    pub fn exercises_by_intensity(&self, intensity: Intensity) -> Vec<&Exercise> {
        self.exercises
            .iter()
            .filter(|e| e.intensity == intensity)
            .collect()
    }

    pub fn checks_by_type(&self, kind: MentalityType) -> Vec<&MentalityCheck> {
        self.mentality.iter().filter(|c| c.kind == kind).collect()
    }

    /// Uniformly random check from the whole catalog
    pub fn any_check<R: Rng + ?Sized>(&self, rng: &mut R) -> &MentalityCheck {
        &self.mentality[rng.gen_range(0..self.mentality.len())]
    }

    /// Share of each category in a selection, in whole percent.
    /// Categories with no selected food are left out.
    pub fn category_breakdown(&self, ids: &[String]) -> Vec<(FoodCategory, u8)> {
        let selected = self.foods_by_ids(ids);
        if selected.is_empty() {
            return Vec::new();
        }

        FoodCategory::ALL
            .into_iter()
            .filter_map(|category| {
                let count = selected.iter().filter(|f| f.category == category).count();
                if count == 0 {
                    return None;
                }
                let percent = (count * 100 + selected.len() / 2) / selected.len();
                Some((category, percent as u8))
            })
            .collect()
    }
}

/// Foods from `pool` that suit `meal`
pub fn meal_pool<'a>(pool: &[&'a Food], meal: MealType) -> Vec<&'a Food> {
    pool.iter().copied().filter(|f| f.suits(meal)).collect()
}
