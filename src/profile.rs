//! User profile, theme preference and completed-workout statistics.

use chrono::NaiveDate;
use rusqlite::Connection;
use serde::de::DeserializeOwned;

use crate::db::{self, keys};
use crate::error::{AppError, Result};
use crate::timer::ActivityConfig;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Profile {
    pub user_name: Option<String>,
    pub join_month: Option<String>,
    pub dark_theme: bool,
}

impl Profile {
    /// Reads the profile and records the join month on first launch.
    pub fn load(today: NaiveDate, conn: &Connection) -> Self {
        let user_name = read_string(keys::USER_NAME, conn);
        let mut join_month = read_string(keys::JOIN_MONTH, conn);
        if join_month.is_none() {
            let month = today.format("%B %Y").to_string();
            match db::set(keys::JOIN_MONTH, &month, conn) {
                Ok(()) => {
                    tracing::info!(%month, "join month recorded");
                    join_month = Some(month);
                }
                Err(err) => tracing::warn!(error = %err, "failed to record join month"),
            }
        }
        let dark_theme = read_json::<bool>(keys::THEME, conn).unwrap_or(false);
        Profile {
            user_name,
            join_month,
            dark_theme,
        }
    }

    pub fn display_name(&self) -> &str {
        self.user_name.as_deref().unwrap_or("Athlete")
    }

    pub fn set_user_name(&mut self, name: &str, conn: &Connection) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("name", "cannot be empty"));
        }
        db::set(keys::USER_NAME, name, conn)?;
        self.user_name = Some(name.to_string());
        Ok(())
    }

    pub fn toggle_theme(&mut self, conn: &Connection) -> Result<()> {
        let dark = !self.dark_theme;
        db::set_json(keys::THEME, &dark, conn)?;
        self.dark_theme = dark;
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WorkoutStats {
    pub completed_workouts: u32,
    pub completed_hours: f64,
    pub burned_calories: f64,
}

impl WorkoutStats {
    pub fn load(conn: &Connection) -> Self {
        WorkoutStats {
            completed_workouts: read_json(keys::COMPLETED_WORKOUTS, conn).unwrap_or(0),
            completed_hours: read_json(keys::COMPLETED_HOURS, conn).unwrap_or(0.0),
            burned_calories: read_json(keys::COMPLETE_CALORIES, conn).unwrap_or(0.0),
        }
    }

    /// Counts a finished activity towards the totals.
    pub fn record_completion(&mut self, activity: &ActivityConfig, conn: &Connection) -> Result<()> {
        let updated = WorkoutStats {
            completed_workouts: self.completed_workouts + 1,
            completed_hours: self.completed_hours + f64::from(activity.duration) / 3600.0,
            burned_calories: self.burned_calories + activity.total_calories,
        };
        db::set_json(keys::COMPLETED_WORKOUTS, &updated.completed_workouts, conn)?;
        db::set_json(keys::COMPLETED_HOURS, &updated.completed_hours, conn)?;
        db::set_json(keys::COMPLETE_CALORIES, &updated.burned_calories, conn)?;
        *self = updated;
        tracing::info!(
            activity = %activity.name,
            workouts = self.completed_workouts,
            "workout recorded"
        );
        Ok(())
    }
}

fn read_string(key: &str, conn: &Connection) -> Option<String> {
    match db::get(key, conn) {
        Ok(value) => value.filter(|v| !v.trim().is_empty()),
        Err(err) => {
            tracing::warn!(key, error = %err, "failed to read value");
            None
        }
    }
}

fn read_json<T: DeserializeOwned>(key: &str, conn: &Connection) -> Option<T> {
    match db::get_json(key, conn) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(key, error = %err, "failed to read value");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_in_memory;

    fn october() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn test_join_month_written_once() {
        let conn = init_in_memory();
        let profile = Profile::load(october(), &conn);
        assert_eq!(profile.join_month.as_deref(), Some("October 2026"));

        let later = NaiveDate::from_ymd_opt(2027, 1, 2).unwrap();
        let profile = Profile::load(later, &conn);
        assert_eq!(profile.join_month.as_deref(), Some("October 2026"));
    }

    #[test]
    fn test_user_name() {
        let conn = init_in_memory();
        let mut profile = Profile::load(october(), &conn);
        assert_eq!(profile.display_name(), "Athlete");
        assert!(profile.set_user_name("  ", &conn).unwrap_err().is_validation());

        profile.set_user_name(" Jordan ", &conn).unwrap();
        assert_eq!(Profile::load(october(), &conn).user_name.as_deref(), Some("Jordan"));
        // Plain string, not JSON.
        assert_eq!(db::get(keys::USER_NAME, &conn).unwrap().as_deref(), Some("Jordan"));
    }

    #[test]
    fn test_theme_toggle_persists_json_bool() {
        let conn = init_in_memory();
        let mut profile = Profile::load(october(), &conn);
        assert!(!profile.dark_theme);
        profile.toggle_theme(&conn).unwrap();
        assert_eq!(db::get(keys::THEME, &conn).unwrap().as_deref(), Some("true"));
        assert!(Profile::load(october(), &conn).dark_theme);
    }

    #[test]
    fn test_record_completion() {
        let conn = init_in_memory();
        let mut stats = WorkoutStats::load(&conn);
        stats.record_completion(&ActivityConfig::running(), &conn).unwrap();
        stats.record_completion(&ActivityConfig::biking(), &conn).unwrap();

        assert_eq!(stats.completed_workouts, 2);
        assert_eq!(stats.completed_hours, 2.0);
        assert_eq!(stats.burned_calories, 1300.0);
        assert_eq!(WorkoutStats::load(&conn), stats);
    }
}
