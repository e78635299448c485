use crate::core::{Food, FoodCategory, MealType};

use FoodCategory::*;
use MealType::*;

const FOODS: &[(&str, &str, FoodCategory, &[MealType])] = &[
    // Fruits
    ("f1", "Apple", Fruit, &[Breakfast, Snack]),
    ("f2", "Banana", Fruit, &[Breakfast, Snack]),
    ("f3", "Berries", Fruit, &[Breakfast, Snack]),
    ("f4", "Orange", Fruit, &[Breakfast, Snack]),
    ("f5", "Grapes", Fruit, &[Snack]),
    ("f6", "Mango", Fruit, &[Breakfast, Snack]),
    ("f7", "Pear", Fruit, &[Snack]),
    ("f8", "Watermelon", Fruit, &[Snack]),
    // Vegetables
    ("v1", "Broccoli", Vegetable, &[Lunch, Dinner]),
    ("v2", "Spinach", Vegetable, &[Breakfast, Lunch, Dinner]),
    ("v3", "Carrots", Vegetable, &[Lunch, Dinner, Snack]),
    ("v4", "Bell Peppers", Vegetable, &[Breakfast, Lunch, Dinner]),
    ("v5", "Tomatoes", Vegetable, &[Breakfast, Lunch, Dinner]),
    ("v6", "Cucumber", Vegetable, &[Lunch, Snack]),
    ("v7", "Sweet Potato", Vegetable, &[Breakfast, Lunch, Dinner]),
    ("v8", "Kale", Vegetable, &[Lunch, Dinner]),
    ("v9", "Cauliflower", Vegetable, &[Lunch, Dinner]),
    ("v10", "Zucchini", Vegetable, &[Lunch, Dinner]),
    ("v11", "Mushrooms", Vegetable, &[Breakfast, Lunch, Dinner]),
    ("v12", "Asparagus", Vegetable, &[Dinner]),
    // Grains
    ("g1", "Brown Rice", Grain, &[Lunch, Dinner]),
    ("g2", "Quinoa", Grain, &[Breakfast, Lunch, Dinner]),
    ("g3", "Oatmeal", Grain, &[Breakfast]),
    ("g4", "Whole Wheat Bread", Grain, &[Breakfast, Lunch]),
    ("g5", "Whole Grain Pasta", Grain, &[Lunch, Dinner]),
    ("g6", "Barley", Grain, &[Lunch, Dinner]),
    ("g7", "Buckwheat", Grain, &[Breakfast, Lunch, Dinner]),
    // Proteins
    ("p1", "Chicken Breast", Protein, &[Lunch, Dinner]),
    ("p2", "Salmon", Protein, &[Breakfast, Lunch, Dinner]),
    ("p3", "Eggs", Protein, &[Breakfast, Lunch]),
    ("p4", "Turkey", Protein, &[Lunch, Dinner]),
    ("p5", "Tofu", Protein, &[Lunch, Dinner]),
    ("p6", "Greek Yogurt", Protein, &[Breakfast, Snack]),
    ("p7", "Lentils", Protein, &[Lunch, Dinner]),
    ("p8", "Chickpeas", Protein, &[Lunch, Dinner]),
    ("p9", "Black Beans", Protein, &[Lunch, Dinner]),
    ("p10", "Tuna", Protein, &[Lunch, Dinner]),
    // Healthy fats
    ("h1", "Avocado", HealthyFat, &[Breakfast, Lunch, Snack]),
    ("h2", "Almonds", HealthyFat, &[Snack]),
    ("h3", "Walnuts", HealthyFat, &[Breakfast, Snack]),
    ("h4", "Olive Oil", HealthyFat, &[Lunch, Dinner]),
    ("h5", "Peanut Butter", HealthyFat, &[Breakfast, Snack]),
];

pub(super) fn builtin() -> Vec<Food> {
    FOODS
        .iter()
        .map(|(id, name, category, timing)| Food {
            id: id.to_string(),
            name: name.to_string(),
            category: *category,
            meal_timing: timing.to_vec(),
        })
        .collect()
}
