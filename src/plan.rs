//! Weekly exercise plan: weekday key to a list of exercise names.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::db::{self, keys};
use crate::error::Result;
use crate::types::Weekday;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyPlan {
    days: BTreeMap<Weekday, Vec<String>>,
}

impl Default for WeeklyPlan {
    fn default() -> Self {
        WeeklyPlan {
            days: Weekday::ALL.into_iter().map(|day| (day, Vec::new())).collect(),
        }
    }
}

impl WeeklyPlan {
    /// Reads the stored plan. Missing days come back as empty lists.
    pub fn load(conn: &Connection) -> Result<Self> {
        let stored = db::get_json::<BTreeMap<Weekday, Vec<String>>>(keys::WEEKLY_PLAN, conn)?;
        let mut plan = WeeklyPlan::default();
        if let Some(days) = stored {
            plan.days.extend(days);
        }
        Ok(plan)
    }

    /// Overwrites the stored plan with this one.
    pub fn save(&self, conn: &Connection) -> Result<()> {
        db::set_json(keys::WEEKLY_PLAN, &self.days, conn)?;
        tracing::info!(exercises = self.total_exercises(), "weekly plan saved");
        Ok(())
    }

    /// Adds `exercise` to `day` if absent, removes it if present.
    /// Returns whether the exercise is now selected.
    pub fn toggle_exercise(&mut self, day: Weekday, exercise: &str) -> bool {
        let list = self.days.entry(day).or_default();
        if let Some(index) = list.iter().position(|name| name == exercise) {
            list.remove(index);
            false
        } else {
            list.push(exercise.to_string());
            true
        }
    }

    pub fn exercises(&self, day: Weekday) -> &[String] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, day: Weekday, exercise: &str) -> bool {
        self.exercises(day).iter().any(|name| name == exercise)
    }

    pub fn total_exercises(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }
}

/// The stored exercises for `today`'s weekday, empty when nothing is planned.
pub fn todays_exercises(today: NaiveDate, conn: &Connection) -> Vec<String> {
    let day = Weekday::from(today.weekday());
    match db::get_json::<BTreeMap<Weekday, Vec<String>>>(keys::WEEKLY_PLAN, conn) {
        Ok(Some(mut days)) => days.remove(&day).unwrap_or_default(),
        Ok(None) => Vec::new(),
        Err(err) => {
            tracing::warn!(error = %err, "failed to read weekly plan");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_in_memory;

    #[test]
    fn test_default_plan_has_seven_empty_days() {
        let plan = WeeklyPlan::default();
        for day in Weekday::ALL {
            assert!(plan.exercises(day).is_empty());
        }
        assert_eq!(plan.total_exercises(), 0);
    }

    #[test]
    fn test_toggle_is_its_own_inverse() {
        let mut plan = WeeklyPlan::default();
        plan.toggle_exercise(Weekday::Mon, "Lunges");
        let before = plan.clone();

        assert!(plan.toggle_exercise(Weekday::Mon, "Squats"));
        assert!(plan.contains(Weekday::Mon, "Squats"));
        assert!(!plan.toggle_exercise(Weekday::Mon, "Squats"));
        assert_eq!(plan, before);
    }

    #[test]
    fn test_days_are_independent() {
        let mut plan = WeeklyPlan::default();
        plan.toggle_exercise(Weekday::Mon, "Squats");
        plan.toggle_exercise(Weekday::Wed, "Squats");
        plan.toggle_exercise(Weekday::Mon, "Squats");
        assert!(plan.exercises(Weekday::Mon).is_empty());
        assert_eq!(plan.exercises(Weekday::Wed), ["Squats"]);
    }

    #[test]
    fn test_save_overwrites_and_load_round_trips() {
        let conn = init_in_memory();
        let mut plan = WeeklyPlan::default();
        plan.toggle_exercise(Weekday::Fri, "Plank");
        plan.toggle_exercise(Weekday::Fri, "Burpees");
        plan.save(&conn).unwrap();

        let mut replacement = WeeklyPlan::default();
        replacement.toggle_exercise(Weekday::Sun, "Yoga Flow");
        replacement.save(&conn).unwrap();

        let loaded = WeeklyPlan::load(&conn).unwrap();
        assert_eq!(loaded, replacement);
        assert!(loaded.exercises(Weekday::Fri).is_empty());
    }

    #[test]
    fn test_stored_format_uses_day_abbreviations() {
        let conn = init_in_memory();
        let mut plan = WeeklyPlan::default();
        plan.toggle_exercise(Weekday::Tue, "Push-ups");
        plan.save(&conn).unwrap();

        let raw = db::get(keys::WEEKLY_PLAN, &conn).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["Tue"], serde_json::json!(["Push-ups"]));
        assert_eq!(value["Mon"], serde_json::json!([]));
    }

    #[test]
    fn test_load_fills_missing_days() {
        let conn = init_in_memory();
        db::set(keys::WEEKLY_PLAN, r#"{"Thu":["Crunches"]}"#, &conn).unwrap();
        let plan = WeeklyPlan::load(&conn).unwrap();
        assert_eq!(plan.exercises(Weekday::Thu), ["Crunches"]);
        assert!(plan.exercises(Weekday::Sat).is_empty());
    }

    #[test]
    fn test_todays_exercises() {
        let conn = init_in_memory();
        // 2026-10-19 is a Monday.
        let monday = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert!(todays_exercises(monday, &conn).is_empty());

        db::set(keys::WEEKLY_PLAN, r#"{"Mon":["Squats","Plank"]}"#, &conn).unwrap();
        assert_eq!(todays_exercises(monday, &conn), ["Squats", "Plank"]);
        let tuesday = monday.succ_opt().unwrap();
        assert!(todays_exercises(tuesday, &conn).is_empty());
    }
}
