//! Built-in exercise sections shown on the Workouts and CreatePlan screens.

use crate::types::Exercise;

pub struct ActivitySection {
    pub title: &'static str,
    pub icon: &'static str,
    pub exercises: &'static [(&'static str, u32)],
}

pub const SECTIONS: &[ActivitySection] = &[
    ActivitySection {
        title: "Strength",
        icon: "■",
        exercises: &[("Squats", 15), ("Push-ups", 20), ("Lunges", 15), ("Deadlifts", 30)],
    },
    ActivitySection {
        title: "Cardio",
        icon: "▶",
        exercises: &[("Jumping Jacks", 30), ("Burpees", 20), ("High Knees", 30)],
    },
    ActivitySection {
        title: "Core",
        icon: "◆",
        exercises: &[("Plank", 45), ("Crunches", 20), ("Russian Twists", 30)],
    },
];

/// Every catalog exercise in section order.
pub fn all_exercises() -> Vec<Exercise> {
    SECTIONS
        .iter()
        .flat_map(|section| section.exercises.iter())
        .map(|(name, duration)| Exercise {
            name: (*name).to_string(),
            duration: *duration,
        })
        .collect()
}

pub fn find_exercise(name: &str) -> Option<Exercise> {
    all_exercises()
        .into_iter()
        .find(|exercise| exercise.name.eq_ignore_ascii_case(name.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_unique() {
        let exercises = all_exercises();
        for (index, exercise) in exercises.iter().enumerate() {
            assert!(
                exercises[index + 1..].iter().all(|other| other.name != exercise.name),
                "duplicate exercise {}",
                exercise.name
            );
        }
    }

    #[test]
    fn test_find_exercise() {
        assert_eq!(find_exercise("squats").map(|e| e.duration), Some(15));
        assert!(find_exercise("Juggling").is_none());
    }
}
