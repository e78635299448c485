use crate::core::{MentalityCheck, MentalityType};

use MentalityType::*;

const CHECKS: &[(&str, MentalityType, &str, &str, &str)] = &[
    (
        "m1",
        Affirmation,
        "Daily Affirmation",
        "I am capable of achieving my health goals. Every small step I take today brings me closer to the person I want to become.",
        "1 min",
    ),
    (
        "m2",
        Breathing,
        "Box Breathing",
        "Breathe in for 4 counts, hold for 4, breathe out for 4, hold for 4. Repeat 5 times. This calms your nervous system and centers your mind.",
        "3 min",
    ),
    (
        "m3",
        Reflection,
        "Progress Reflection",
        "What's one thing you did today that moved you forward? It doesn't have to be big - celebrating small wins builds momentum.",
        "2 min",
    ),
    (
        "m4",
        Gratitude,
        "Three Good Things",
        "Name three things you're grateful for today. They can be as simple as a good meal, a kind word, or your ability to show up for yourself.",
        "2 min",
    ),
    (
        "m5",
        Meditation,
        "Body Scan",
        "Close your eyes. Notice tension in your body - your jaw, shoulders, hands. Breathe into each area and let it soften. You're safe. You're doing great.",
        "5 min",
    ),
    (
        "m6",
        Affirmation,
        "Strength Reminder",
        "You've overcome challenges before. The fact that you're here, trying, is proof of your strength. Keep going.",
        "1 min",
    ),
    (
        "m7",
        Reflection,
        "Energy Check",
        "How are you feeling right now? What does your body need? There's no wrong answer - honesty with yourself is part of self-care.",
        "2 min",
    ),
];

pub(super) fn builtin() -> Vec<MentalityCheck> {
    CHECKS
        .iter()
        .map(|(id, kind, title, content, duration)| MentalityCheck {
            id: id.to_string(),
            kind: *kind,
            title: title.to_string(),
            content: content.to_string(),
            duration: duration.to_string(),
        })
        .collect()
}
