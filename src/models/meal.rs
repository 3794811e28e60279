//! Meal-color rotation: each group is assigned a color, each color eats
//! on a fixed schedule.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The four scheduled meal slots for one color.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MealSchedule {
    pub sat_breakfast: String,
    pub sat_lunch: String,
    pub sat_dinner: String,
    pub sun_breakfast: String,
}

impl MealSchedule {
    pub fn new(
        sat_breakfast: impl Into<String>,
        sat_lunch: impl Into<String>,
        sat_dinner: impl Into<String>,
        sun_breakfast: impl Into<String>,
    ) -> Self {
        Self {
            sat_breakfast: sat_breakfast.into(),
            sat_lunch: sat_lunch.into(),
            sat_dinner: sat_dinner.into(),
            sun_breakfast: sun_breakfast.into(),
        }
    }
}

/// The fixed catalogue of meal-color slots and their schedules.
pub fn default_meal_times() -> BTreeMap<String, MealSchedule> {
    let slots = [
        ("Blue", "7:00 AM", "12:00 PM", "5:30 PM", "7:30 AM"),
        ("Red", "7:15 AM", "12:15 PM", "5:45 PM", "7:45 AM"),
        ("Orange", "7:30 AM", "12:30 PM", "6:00 PM", "8:00 AM"),
        ("Yellow", "7:45 AM", "12:45 PM", "6:15 PM", "8:15 AM"),
        ("Green", "8:00 AM", "1:00 PM", "6:30 PM", "8:30 AM"),
        ("Purple", "8:15 AM", "1:15 PM", "6:45 PM", "8:45 AM"),
        ("Brown", "8:30 AM", "1:30 PM", "7:00 PM", "9:00 AM"),
        ("Grey", "8:45 AM", "1:45 PM", "7:15 PM", "9:15 AM"),
    ];

    slots
        .into_iter()
        .map(|(color, b, l, d, sun)| (color.to_string(), MealSchedule::new(b, l, d, sun)))
        .collect()
}

/// Colors active by default on a fresh document.
pub fn default_active_colors() -> Vec<String> {
    ["Blue", "Red", "Orange", "Yellow", "Green", "Purple"]
        .into_iter()
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_meal_times_has_eight_colors() {
        let times = default_meal_times();
        assert_eq!(times.len(), 8);
        assert_eq!(times["Blue"].sat_breakfast, "7:00 AM");
        assert_eq!(times["Grey"].sun_breakfast, "9:15 AM");
    }

    #[test]
    fn test_default_active_colors() {
        let colors = default_active_colors();
        assert_eq!(colors.len(), 6);
        assert!(colors.contains(&"Purple".to_string()));
        assert!(!colors.contains(&"Grey".to_string()));
    }

    #[test]
    fn test_active_colors_are_known_slots() {
        let times = default_meal_times();
        for color in default_active_colors() {
            assert!(times.contains_key(&color), "unknown color {}", color);
        }
    }
}
