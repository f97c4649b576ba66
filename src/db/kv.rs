/// String-keyed, string-valued storage with JSON helpers.
use chrono::Local;
use rusqlite::{Connection, OptionalExtension};
use serde::{Serialize, de::DeserializeOwned};

use crate::error::Result;

pub fn get(key: &str, conn: &Connection) -> Result<Option<String>> {
    let value = conn
        .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| row.get(0))
        .optional()?;
    Ok(value)
}

pub fn set(key: &str, value: &str, conn: &Connection) -> Result<()> {
    conn.execute(
        "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        (key, value, Local::now().to_rfc3339()),
    )?;
    Ok(())
}

pub fn remove(key: &str, conn: &Connection) -> Result<()> {
    conn.execute("DELETE FROM kv WHERE key = ?1", [key])?;
    Ok(())
}

/// Reads and decodes a JSON value. A missing key is `Ok(None)`.
pub fn get_json<T: DeserializeOwned>(key: &str, conn: &Connection) -> Result<Option<T>> {
    match get(key, conn)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

pub fn set_json<T: Serialize + ?Sized>(key: &str, value: &T, conn: &Connection) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    set(key, &raw, conn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_in_memory;
    use crate::error::AppError;

    #[test]
    fn test_get_missing_key_is_none() {
        let conn = init_in_memory();
        assert_eq!(get("nothing", &conn).unwrap(), None);
    }

    #[test]
    fn test_set_overwrites() {
        let conn = init_in_memory();
        set("userName", "Sam", &conn).unwrap();
        set("userName", "Robin", &conn).unwrap();
        assert_eq!(get("userName", &conn).unwrap().as_deref(), Some("Robin"));
    }

    #[test]
    fn test_remove() {
        let conn = init_in_memory();
        set("theme", "false", &conn).unwrap();
        remove("theme", &conn).unwrap();
        assert_eq!(get("theme", &conn).unwrap(), None);
        // Removing an absent key is not an error.
        remove("theme", &conn).unwrap();
    }

    #[test]
    fn test_json_helpers() {
        let conn = init_in_memory();
        set_json("completedWorkouts", &3u32, &conn).unwrap();
        assert_eq!(get("completedWorkouts", &conn).unwrap().as_deref(), Some("3"));
        assert_eq!(get_json::<u32>("completedWorkouts", &conn).unwrap(), Some(3));
    }

    #[test]
    fn test_get_json_malformed() {
        let conn = init_in_memory();
        set("weeklyPlan", "{not json", &conn).unwrap();
        let result = get_json::<Vec<String>>("weeklyPlan", &conn);
        assert!(matches!(result, Err(AppError::Serialization(_))));
    }
}
