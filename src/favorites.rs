//! Favorite exercises, unique by name.

use rusqlite::Connection;

use crate::db::{self, keys};
use crate::error::Result;
use crate::types::FavoriteExercise;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Favorites {
    pub items: Vec<FavoriteExercise>,
}

impl Favorites {
    pub fn load(conn: &Connection) -> Self {
        match db::get_json::<Vec<FavoriteExercise>>(keys::FAVORITE_EXERCISES, conn) {
            Ok(items) => Favorites {
                items: items.unwrap_or_default(),
            },
            Err(err) => {
                tracing::warn!(error = %err, "failed to read favorite exercises");
                Favorites::default()
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.iter().any(|item| item.name == name)
    }

    /// Adds the exercise if no favorite has its name, removes it otherwise,
    /// then persists the whole list. Returns whether it is now a favorite.
    pub fn toggle(&mut self, exercise: FavoriteExercise, conn: &Connection) -> Result<bool> {
        let mut items = self.items.clone();
        let added = if let Some(index) = items.iter().position(|item| item.name == exercise.name) {
            items.remove(index);
            false
        } else {
            items.push(exercise);
            true
        };
        db::set_json(keys::FAVORITE_EXERCISES, &items, conn)?;
        self.items = items;
        Ok(added)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_in_memory;

    fn favorite(name: &str, duration: u32) -> FavoriteExercise {
        FavoriteExercise {
            name: name.to_string(),
            duration,
            image: None,
            image_dark: None,
        }
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let conn = init_in_memory();
        let mut favorites = Favorites::load(&conn);
        assert!(favorites.toggle(favorite("Plank", 45), &conn).unwrap());
        assert!(favorites.contains("Plank"));
        assert_eq!(Favorites::load(&conn), favorites);

        // Matching is by name only.
        assert!(!favorites.toggle(favorite("Plank", 60), &conn).unwrap());
        assert!(favorites.items.is_empty());
        assert!(Favorites::load(&conn).items.is_empty());
    }

    #[test]
    fn test_reads_image_references() {
        let conn = init_in_memory();
        db::set(
            keys::FAVORITE_EXERCISES,
            r#"[{"name":"Squats","duration":15,"image":"squat.png","imageDark":"squat-dark.png"}]"#,
            &conn,
        )
        .unwrap();
        let favorites = Favorites::load(&conn);
        assert_eq!(favorites.items[0].image.as_deref(), Some("squat.png"));
        assert_eq!(favorites.items[0].image_dark.as_deref(), Some("squat-dark.png"));
    }

    #[test]
    fn test_failed_write_keeps_list() {
        let conn = init_in_memory();
        let mut favorites = Favorites::load(&conn);
        conn.execute_batch("DROP TABLE kv").unwrap();
        assert!(favorites.toggle(favorite("Burpees", 20), &conn).is_err());
        assert!(favorites.items.is_empty());
    }
}
