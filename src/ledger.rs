//! Daily nutrition ledger: four running totals plus an append-only log.
//!
//! Totals are reset lazily: `reset_if_new_day` runs when a nutrition screen is
//! opened, never on a background schedule, so totals can be stale until then.

use chrono::{DateTime, Local, NaiveDate};
use rusqlite::Connection;

use crate::db::{self, keys};
use crate::error::{AppError, Result};
use crate::types::{FoodEntry, NutritionTotals};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ledger {
    pub totals: NutritionTotals,
    pub entries: Vec<FoodEntry>,
}

impl Ledger {
    /// Reads totals and the entry log. Unreadable values are logged and
    /// treated as absent.
    pub fn load(conn: &Connection) -> Self {
        let totals = match db::get_json::<NutritionTotals>(keys::DAILY_VALUES, conn) {
            Ok(totals) => totals.unwrap_or_default(),
            Err(err) => {
                tracing::warn!(error = %err, "failed to read daily values");
                NutritionTotals::default()
            }
        };
        let entries = match db::get_json::<Vec<FoodEntry>>(keys::FOOD_ENTRIES, conn) {
            Ok(entries) => entries.unwrap_or_default(),
            Err(err) => {
                tracing::warn!(error = %err, "failed to read food entries");
                Vec::new()
            }
        };
        Ledger { totals, entries }
    }

    /// Validates and appends an entry, adding it onto the totals.
    ///
    /// Nothing changes when validation or persisting fails.
    pub fn add_entry(
        &mut self,
        name: &str,
        calories: f64,
        fat: f64,
        sugar: f64,
        protein: f64,
        conn: &Connection,
    ) -> Result<&FoodEntry> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("name", "cannot be empty"));
        }
        validate_amount("calories", calories)?;
        validate_amount("fat", fat)?;
        validate_amount("sugar", sugar)?;
        validate_amount("protein", protein)?;

        let entry = FoodEntry {
            name: name.to_string(),
            calories,
            fat,
            sugar,
            protein,
        };

        let mut totals = self.totals;
        totals.add(&entry);
        let mut entries = self.entries.clone();
        entries.push(entry);

        // Log and totals are written together or not at all.
        let tx = conn.unchecked_transaction()?;
        db::set_json(keys::FOOD_ENTRIES, &entries, &tx)?;
        db::set_json(keys::DAILY_VALUES, &totals, &tx)?;
        tx.commit()?;

        self.totals = totals;
        self.entries = entries;
        tracing::info!(food = name, calories, fat, sugar, protein, "food entry added");
        Ok(&self.entries[self.entries.len() - 1])
    }

    /// Parses raw form input, then behaves like [`Ledger::add_entry`].
    pub fn add_entry_from_input(
        &mut self,
        name: &str,
        calories: &str,
        fat: &str,
        sugar: &str,
        protein: &str,
        conn: &Connection,
    ) -> Result<&FoodEntry> {
        let calories = parse_amount("calories", calories)?;
        let fat = parse_amount("fat", fat)?;
        let sugar = parse_amount("sugar", sugar)?;
        let protein = parse_amount("protein", protein)?;
        self.add_entry(name, calories, fat, sugar, protein, conn)
    }

    /// Zeroes the totals when the stored reset date is not `today`.
    /// Returns whether a reset happened.
    pub fn reset_if_new_day(&mut self, today: NaiveDate, conn: &Connection) -> Result<bool> {
        let last_reset = match db::get_json::<DateTime<Local>>(keys::LAST_RESET, conn) {
            Ok(value) => value,
            Err(AppError::Serialization(err)) => {
                tracing::warn!(error = %err, "stored reset timestamp is unreadable");
                None
            }
            Err(err) => return Err(err),
        };
        if last_reset.is_some_and(|ts| ts.date_naive() == today) {
            return Ok(false);
        }

        let zero = NutritionTotals::default();
        let tx = conn.unchecked_transaction()?;
        db::set_json(keys::DAILY_VALUES, &zero, &tx)?;
        db::set_json(keys::LAST_RESET, &reset_timestamp(today), &tx)?;
        tx.commit()?;
        self.totals = zero;
        tracing::info!(%today, "daily totals reset");
        Ok(true)
    }
}

fn validate_amount(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(AppError::validation(field, "must be a number"));
    }
    if value <= 0.0 {
        return Err(AppError::validation(field, "must be greater than 0"));
    }
    Ok(())
}

fn parse_amount(field: &'static str, raw: &str) -> Result<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AppError::validation(field, "is required"));
    }
    raw.parse::<f64>()
        .map_err(|_| AppError::validation(field, format!("'{raw}' is not a number")))
}

// The current instant when `today` is the real date, otherwise local midnight
// of `today` so tests with a fixed date stay consistent.
fn reset_timestamp(today: NaiveDate) -> DateTime<Local> {
    let now = Local::now();
    if now.date_naive() == today {
        return now;
    }
    today
        .and_hms_opt(0, 0, 0)
        .and_then(|midnight| midnight.and_local_timezone(Local).earliest())
        .unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_in_memory;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_add_banana() {
        let conn = init_in_memory();
        let mut ledger = Ledger::load(&conn);
        assert!(ledger.totals.is_zero());

        ledger.add_entry("Banana", 105.0, 0.3, 14.0, 1.3, &conn).unwrap();

        assert_eq!(
            ledger.totals,
            NutritionTotals {
                calories: 105.0,
                fat: 0.3,
                sugar: 14.0,
                protein: 1.3,
            }
        );
        assert_eq!(ledger.entries.len(), 1);
        assert_eq!(ledger.entries[0].name, "Banana");

        // Persisted state matches memory.
        assert_eq!(Ledger::load(&conn), ledger);
    }

    #[test]
    fn test_add_entry_accumulates() {
        let conn = init_in_memory();
        let mut ledger = Ledger::load(&conn);
        ledger.add_entry("Oats", 150.0, 3.0, 1.0, 5.0, &conn).unwrap();
        ledger.add_entry("Milk", 100.0, 2.5, 12.0, 8.0, &conn).unwrap();

        assert_eq!(ledger.totals.calories, 250.0);
        assert_eq!(ledger.totals.fat, 5.5);
        assert_eq!(ledger.totals.sugar, 13.0);
        assert_eq!(ledger.totals.protein, 13.0);
        let names: Vec<_> = ledger.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Oats", "Milk"]);
    }

    #[test]
    fn test_add_entry_rejects_invalid_input() {
        let conn = init_in_memory();
        let mut ledger = Ledger::load(&conn);
        ledger.add_entry("Apple", 95.0, 0.3, 19.0, 0.5, &conn).unwrap();
        let before = ledger.clone();

        let cases = [
            ("", 10.0, 1.0, 1.0, 1.0),
            ("   ", 10.0, 1.0, 1.0, 1.0),
            ("Toast", 0.0, 1.0, 1.0, 1.0),
            ("Toast", 10.0, -1.0, 1.0, 1.0),
            ("Toast", 10.0, 1.0, f64::NAN, 1.0),
            ("Toast", 10.0, 1.0, 1.0, f64::INFINITY),
        ];
        for (name, calories, fat, sugar, protein) in cases {
            let err = ledger
                .add_entry(name, calories, fat, sugar, protein, &conn)
                .unwrap_err();
            assert!(err.is_validation(), "expected validation error, got {err}");
        }

        assert_eq!(ledger, before);
        assert_eq!(Ledger::load(&conn), before);
    }

    #[test]
    fn test_add_entry_from_input_rejects_non_numeric() {
        let conn = init_in_memory();
        let mut ledger = Ledger::load(&conn);

        let err = ledger
            .add_entry_from_input("Rice", "abc", "1", "1", "1", &conn)
            .unwrap_err();
        assert!(err.is_validation());
        let err = ledger
            .add_entry_from_input("Rice", "200", "", "1", "1", &conn)
            .unwrap_err();
        assert!(err.is_validation());
        assert!(ledger.entries.is_empty());

        ledger
            .add_entry_from_input("Rice", " 200 ", "0.4", "0.1", "4.2", &conn)
            .unwrap();
        assert_eq!(ledger.totals.calories, 200.0);
    }

    #[test]
    fn test_failed_write_leaves_ledger_unchanged() {
        let conn = init_in_memory();
        let mut ledger = Ledger::load(&conn);
        conn.execute_batch("DROP TABLE kv").unwrap();

        let err = ledger.add_entry("Egg", 78.0, 5.0, 0.6, 6.0, &conn).unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
        assert!(ledger.entries.is_empty());
        assert!(ledger.totals.is_zero());
    }

    // Aborts any write to `key` until the triggers are dropped.
    fn block_writes(conn: &Connection, key: &str) {
        conn.execute_batch(&format!(
            "CREATE TRIGGER block_insert BEFORE INSERT ON kv WHEN NEW.key = '{key}'
                 BEGIN SELECT RAISE(ABORT, 'write blocked'); END;
             CREATE TRIGGER block_update BEFORE UPDATE ON kv WHEN NEW.key = '{key}'
                 BEGIN SELECT RAISE(ABORT, 'write blocked'); END;"
        ))
        .unwrap();
    }

    fn unblock_writes(conn: &Connection) {
        conn.execute_batch("DROP TRIGGER block_insert; DROP TRIGGER block_update;")
            .unwrap();
    }

    #[test]
    fn test_failed_totals_write_keeps_log_unchanged() {
        let conn = init_in_memory();
        let mut ledger = Ledger::load(&conn);
        ledger.add_entry("Apple", 95.0, 0.3, 19.0, 0.5, &conn).unwrap();
        block_writes(&conn, keys::DAILY_VALUES);

        let err = ledger.add_entry("Egg", 78.0, 5.0, 0.6, 6.0, &conn).unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
        assert_eq!(ledger.entries.len(), 1);
        assert_eq!(Ledger::load(&conn), ledger);
    }

    #[test]
    fn test_failed_reset_keeps_store_and_memory_in_step() {
        let conn = init_in_memory();
        let mut ledger = Ledger::load(&conn);
        ledger.reset_if_new_day(day(2026, 3, 14), &conn).unwrap();
        ledger.add_entry("Pasta", 350.0, 2.0, 3.0, 12.0, &conn).unwrap();
        block_writes(&conn, keys::LAST_RESET);

        let err = ledger.reset_if_new_day(day(2026, 3, 15), &conn).unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
        assert_eq!(ledger.totals.calories, 350.0);
        assert_eq!(Ledger::load(&conn).totals, ledger.totals);

        // A later add must not resurrect or lose anything.
        ledger.add_entry("Pear", 60.0, 0.1, 10.0, 0.4, &conn).unwrap();
        assert_eq!(Ledger::load(&conn).totals, ledger.totals);

        unblock_writes(&conn);
        assert!(ledger.reset_if_new_day(day(2026, 3, 15), &conn).unwrap());
        assert!(Ledger::load(&conn).totals.is_zero());
    }

    #[test]
    fn test_load_tolerates_malformed_values() {
        let conn = init_in_memory();
        db::set(keys::DAILY_VALUES, "not json", &conn).unwrap();
        db::set(keys::FOOD_ENTRIES, "[{]", &conn).unwrap();
        let ledger = Ledger::load(&conn);
        assert_eq!(ledger, Ledger::default());
    }

    #[test]
    fn test_reset_is_idempotent_on_same_day() {
        let conn = init_in_memory();
        let mut ledger = Ledger::load(&conn);
        let today = day(2026, 3, 14);

        assert!(ledger.reset_if_new_day(today, &conn).unwrap());
        ledger.add_entry("Yogurt", 120.0, 4.0, 11.0, 9.0, &conn).unwrap();

        assert!(!ledger.reset_if_new_day(today, &conn).unwrap());
        assert_eq!(ledger.totals.calories, 120.0);
        assert_eq!(Ledger::load(&conn).totals.calories, 120.0);
    }

    #[test]
    fn test_reset_after_rollover_zeroes_once() {
        let conn = init_in_memory();
        let mut ledger = Ledger::load(&conn);
        ledger.reset_if_new_day(day(2026, 3, 14), &conn).unwrap();
        ledger.add_entry("Pasta", 350.0, 2.0, 3.0, 12.0, &conn).unwrap();

        let tomorrow = day(2026, 3, 15);
        assert!(ledger.reset_if_new_day(tomorrow, &conn).unwrap());
        assert!(ledger.totals.is_zero());
        assert!(Ledger::load(&conn).totals.is_zero());
        // The log is append-only and survives the reset.
        assert_eq!(ledger.entries.len(), 1);

        assert!(!ledger.reset_if_new_day(tomorrow, &conn).unwrap());
    }

    #[test]
    fn test_reset_on_month_and_year_change() {
        let conn = init_in_memory();
        let mut ledger = Ledger::load(&conn);
        ledger.reset_if_new_day(day(2026, 1, 31), &conn).unwrap();
        assert!(ledger.reset_if_new_day(day(2026, 2, 28), &conn).unwrap());
        assert!(ledger.reset_if_new_day(day(2027, 2, 28), &conn).unwrap());
    }
}
