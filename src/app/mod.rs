mod state;

use crossterm::event::KeyCode;

pub use state::{Alert, App, FoodField, WorkoutItem, workout_items};

/// Possible input events the app reacts to.
pub enum AppEvent {
    Tick,
    KeyPress(KeyCode),
}
