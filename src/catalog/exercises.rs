use crate::core::{Exercise, ExerciseType, Intensity};

use ExerciseType::*;
use Intensity::*;

const EXERCISES: &[(&str, &str, ExerciseType, Intensity, &str, &str)] = &[
    // Light
    ("ex1", "Easy Walk", Cardio, Light, "A gentle 20-minute walk around your neighborhood", "20 min"),
    ("ex2", "Stretching", Flexibility, Light, "Full body stretching routine", "15 min"),
    ("ex3", "Yoga Flow", Flexibility, Light, "Gentle yoga for mobility and relaxation", "20 min"),
    // Moderate
    ("ex4", "Brisk Walk", Cardio, Moderate, "Power walk at a challenging pace", "30 min"),
    ("ex5", "Bodyweight Circuit", Strength, Moderate, "Push-ups, squats, planks - 3 rounds", "25 min"),
    ("ex6", "Light Jog", Cardio, Moderate, "Easy-paced jogging with walk breaks", "25 min"),
    ("ex7", "Bike Ride", Cardio, Moderate, "Cycling at a steady pace", "30 min"),
    ("ex8", "Core Workout", Strength, Moderate, "Planks, crunches, leg raises - 3 sets", "20 min"),
    // Intense
    ("ex9", "HIIT Cardio", Cardio, Intense, "High-intensity intervals with short rest", "20 min"),
    ("ex10", "Strength Training", Strength, Intense, "Heavy compound lifts - squats, deadlifts, bench", "45 min"),
    ("ex11", "Running", Cardio, Intense, "Sustained running at challenging pace", "30 min"),
    ("ex12", "Upper Body Strength", Strength, Intense, "Push-ups, pull-ups, dips - 4 sets each", "40 min"),
    ("ex13", "Lower Body Strength", Strength, Intense, "Squats, lunges, calf raises - 4 sets each", "40 min"),
    // Rest day
    ("ex14", "Active Recovery", Rest, Light, "Light movement and stretching", "15 min"),
];

pub(super) fn builtin() -> Vec<Exercise> {
    EXERCISES
        .iter()
        .map(|(id, name, kind, intensity, description, duration)| Exercise {
            id: id.to_string(),
            name: name.to_string(),
            kind: *kind,
            intensity: *intensity,
            description: description.to_string(),
            duration: duration.to_string(),
        })
        .collect()
}
