use std::time::Instant;

use chrono::{Datelike, Local};
use crossterm::event::KeyCode;
use rusqlite::Connection;

use crate::catalog;
use crate::error::AppError;
use crate::favorites::Favorites;
use crate::ledger::Ledger;
use crate::lookup::{ProductSource, ScannedProduct};
use crate::plan::{self, WeeklyPlan};
use crate::profile::{Profile, WorkoutStats};
use crate::router::{BackOutcome, RouteParams, Router, Screen};
use crate::timer::{ActivityConfig, TickOutcome, TimerSession};
use crate::types::{Exercise, FavoriteExercise, Weekday};

use super::AppEvent;

/// The top-level application state. Owns every piece of state the screens
/// render, plus the store connection.
pub struct App {
    pub running: bool,
    pub db: Connection,
    pub router: Router,
    pub ledger: Ledger,
    pub plan_draft: WeeklyPlan,
    pub todays_plan: Vec<String>,
    pub favorites: Favorites,
    pub profile: Profile,
    pub stats: WorkoutStats,
    pub timer: Option<TimerSession>,
    pub status: Option<String>,
    pub alert: Option<Alert>,
    pub show_help: bool,
    pub food_form: FoodForm,
    pub barcode_input: String,
    pub name_input: Option<String>,
    pub selected_workout_index: usize,
    pub selected_favorite_index: usize,
    pub selected_plan_day: Weekday,
    pub selected_plan_exercise_index: usize,
    products: Box<dyn ProductSource>,
}

/// A blocking message; any key dismisses it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FoodField {
    Name,
    Calories,
    Fat,
    Sugar,
    Protein,
}

impl FoodField {
    pub const ALL: [FoodField; 5] = [
        FoodField::Name,
        FoodField::Calories,
        FoodField::Fat,
        FoodField::Sugar,
        FoodField::Protein,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FoodField::Name => "Food",
            FoodField::Calories => "Calories (kcal)",
            FoodField::Fat => "Fat (g)",
            FoodField::Sugar => "Sugar (g)",
            FoodField::Protein => "Protein (g)",
        }
    }

    fn index(self) -> usize {
        FoodField::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        FoodField::ALL[(self.index() + 1) % FoodField::ALL.len()]
    }

    fn prev(self) -> Self {
        FoodField::ALL[(self.index() + FoodField::ALL.len() - 1) % FoodField::ALL.len()]
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FoodForm {
    pub name: String,
    pub calories: String,
    pub fat: String,
    pub sugar: String,
    pub protein: String,
    pub field: FoodField,
}

impl Default for FoodForm {
    fn default() -> Self {
        FoodForm {
            name: String::new(),
            calories: String::new(),
            fat: String::new(),
            sugar: String::new(),
            protein: String::new(),
            field: FoodField::Name,
        }
    }
}

impl FoodForm {
    /// Pre-fills the form from a scanned product. Missing nutriments stay
    /// empty so they have to be filled in before the entry is accepted.
    pub fn from_product(product: &ScannedProduct) -> Self {
        let fill = |value: Option<f64>| value.map(|v| v.to_string()).unwrap_or_default();
        FoodForm {
            name: product.name.clone(),
            calories: fill(product.calories),
            fat: fill(product.fat),
            sugar: fill(product.sugar),
            protein: fill(product.protein),
            field: FoodField::Name,
        }
    }

    pub fn value(&self, field: FoodField) -> &str {
        match field {
            FoodField::Name => &self.name,
            FoodField::Calories => &self.calories,
            FoodField::Fat => &self.fat,
            FoodField::Sugar => &self.sugar,
            FoodField::Protein => &self.protein,
        }
    }

    fn active_mut(&mut self) -> &mut String {
        match self.field {
            FoodField::Name => &mut self.name,
            FoodField::Calories => &mut self.calories,
            FoodField::Fat => &mut self.fat,
            FoodField::Sugar => &mut self.sugar,
            FoodField::Protein => &mut self.protein,
        }
    }
}

/// One row of the Workouts screen.
#[derive(Clone, Debug, PartialEq)]
pub enum WorkoutItem {
    Running,
    Biking,
    Exercise(Exercise),
}

impl WorkoutItem {
    pub fn name(&self) -> &str {
        match self {
            WorkoutItem::Running => "Running",
            WorkoutItem::Biking => "Biking",
            WorkoutItem::Exercise(exercise) => &exercise.name,
        }
    }
}

/// Rows of the Workouts screen: the two timed activities, then the catalog.
pub fn workout_items() -> Vec<WorkoutItem> {
    let mut items = vec![WorkoutItem::Running, WorkoutItem::Biking];
    items.extend(catalog::all_exercises().into_iter().map(WorkoutItem::Exercise));
    items
}

impl App {
    pub fn new(db: Connection, products: Box<dyn ProductSource>) -> Self {
        let today = Local::now().date_naive();
        let profile = Profile::load(today, &db);
        let stats = WorkoutStats::load(&db);
        let favorites = Favorites::load(&db);
        let ledger = Ledger::load(&db);
        let todays_plan = plan::todays_exercises(today, &db);
        let selected_plan_day = Weekday::from(today.weekday());

        Self {
            running: true,
            db,
            router: Router::default(),
            ledger,
            plan_draft: WeeklyPlan::default(),
            todays_plan,
            favorites,
            profile,
            stats,
            timer: None,
            status: None,
            alert: None,
            show_help: false,
            food_form: FoodForm::default(),
            barcode_input: String::new(),
            name_input: None,
            selected_workout_index: 0,
            selected_favorite_index: 0,
            selected_plan_day,
            selected_plan_exercise_index: 0,
            products,
        }
    }

    pub fn screen(&self) -> Screen {
        self.router.current()
    }

    /// Central update function - process an event and mutate state.
    pub fn update(&mut self, event: AppEvent) {
        match event {
            AppEvent::Tick => self.poll_timer(Instant::now()),
            AppEvent::KeyPress(key) => self.handle_key(key),
        }
    }

    pub(crate) fn poll_timer(&mut self, now: Instant) {
        let Some(session) = self.timer.as_mut() else {
            return;
        };
        if session.poll(&self.db, now) == TickOutcome::Completed {
            let activity = session.timer.config().clone();
            self.on_activity_complete(&activity);
        }
    }

    fn on_activity_complete(&mut self, activity: &ActivityConfig) {
        if let Err(err) = self.stats.record_completion(activity, &self.db) {
            tracing::warn!(error = %err, "failed to record workout");
            self.status = Some(format!("Failed to record workout: {err}"));
        }
        self.alert = Some(Alert {
            title: "Well done!".to_string(),
            message: format!("{} complete.", activity.name),
        });
    }

    /// Leaves the current screen and mounts `screen`.
    pub fn navigate_to(&mut self, screen: Screen, params: Option<RouteParams>) {
        self.unmount();
        self.router.navigate_to(screen, params);
        self.mount();
    }

    /// Hardware back button.
    pub fn go_back(&mut self) {
        self.unmount();
        match self.router.back() {
            BackOutcome::Moved(_) => self.mount(),
            BackOutcome::Exit => self.running = false,
        }
    }

    fn unmount(&mut self) {
        // Dropping the session cancels its pending ticks.
        self.timer = None;
        self.name_input = None;
        self.status = None;
    }

    fn mount(&mut self) {
        let today = Local::now().date_naive();
        match self.router.current() {
            Screen::Home => {
                self.todays_plan = plan::todays_exercises(today, &self.db);
                self.stats = WorkoutStats::load(&self.db);
            }
            Screen::Calories | Screen::TotalValues => {
                self.ledger = Ledger::load(&self.db);
                if let Err(err) = self.ledger.reset_if_new_day(today, &self.db) {
                    tracing::warn!(error = %err, "daily reset failed");
                    self.status = Some(format!("Failed to reset daily totals: {err}"));
                }
                if let Some(RouteParams::Product(product)) = self.router.take_params() {
                    self.food_form = FoodForm::from_product(&product);
                }
            }
            Screen::BarcodeScanner => self.barcode_input.clear(),
            Screen::Running => self.mount_timer(ActivityConfig::running()),
            Screen::Biking => self.mount_timer(ActivityConfig::biking()),
            Screen::WorkoutTimer => {
                let exercise = match self.router.params() {
                    Some(RouteParams::Exercise(exercise)) => exercise.clone(),
                    _ => {
                        self.status = Some("No exercise selected.".to_string());
                        return;
                    }
                };
                self.mount_timer(ActivityConfig::exercise(&exercise.name, exercise.duration));
            }
            Screen::CreatePlan => match WeeklyPlan::load(&self.db) {
                Ok(plan) => self.plan_draft = plan,
                Err(err) => {
                    tracing::warn!(error = %err, "failed to read weekly plan");
                    self.plan_draft = WeeklyPlan::default();
                }
            },
            Screen::Profile | Screen::SettingsScreen => {
                self.profile = Profile::load(today, &self.db);
                self.stats = WorkoutStats::load(&self.db);
            }
            Screen::Workouts | Screen::Favorites => {
                self.favorites = Favorites::load(&self.db);
                if self.selected_favorite_index >= self.favorites.items.len() {
                    self.selected_favorite_index = self.favorites.items.len().saturating_sub(1);
                }
            }
        }
    }

    fn mount_timer(&mut self, config: ActivityConfig) {
        self.timer = Some(TimerSession::mount(config, &self.db, Instant::now()));
    }

    fn handle_key(&mut self, key: KeyCode) {
        if self.alert.is_some() {
            if matches!(key, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.alert = None;
            }
            return;
        }
        if self.show_help {
            if matches!(key, KeyCode::Esc | KeyCode::Char('?')) {
                self.show_help = false;
            }
            return;
        }
        if self.name_input.is_some() {
            self.handle_name_input_key(key);
            return;
        }

        match self.screen() {
            Screen::Calories => self.handle_calories_key(key),
            Screen::BarcodeScanner => self.handle_scanner_key(key),
            screen => {
                if !self.handle_global_key(key) {
                    self.handle_screen_key(screen, key);
                }
            }
        }
    }

    /// Keys shared by every screen without text input. Returns whether the
    /// key was consumed.
    fn handle_global_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char('q') => self.running = false,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Esc | KeyCode::Backspace => self.go_back(),
            KeyCode::Char('h') => self.navigate_to(Screen::Home, None),
            KeyCode::Char('w') => self.navigate_to(Screen::Workouts, None),
            KeyCode::Char('c') => self.navigate_to(Screen::Calories, None),
            KeyCode::Char('f') => self.navigate_to(Screen::Favorites, None),
            KeyCode::Char('p') => self.navigate_to(Screen::Profile, None),
            _ => return false,
        }
        true
    }

    fn handle_screen_key(&mut self, screen: Screen, key: KeyCode) {
        match screen {
            Screen::Home => {
                if key == KeyCode::Char('n') {
                    self.navigate_to(Screen::CreatePlan, None);
                }
            }
            Screen::Workouts => self.handle_workouts_key(key),
            Screen::Favorites => self.handle_favorites_key(key),
            Screen::Running | Screen::Biking | Screen::WorkoutTimer => self.handle_timer_key(key),
            Screen::TotalValues => {}
            Screen::Profile => {
                if key == KeyCode::Char('s') {
                    self.navigate_to(Screen::SettingsScreen, None);
                }
            }
            Screen::SettingsScreen => self.handle_settings_key(key),
            Screen::CreatePlan => self.handle_plan_key(key),
            Screen::Calories | Screen::BarcodeScanner => {}
        }
    }

    fn handle_workouts_key(&mut self, key: KeyCode) {
        let items = workout_items();
        match key {
            KeyCode::Up => {
                self.selected_workout_index = wrap_prev(self.selected_workout_index, items.len());
            }
            KeyCode::Down => {
                self.selected_workout_index = wrap_next(self.selected_workout_index, items.len());
            }
            KeyCode::Enter => match items.get(self.selected_workout_index) {
                Some(WorkoutItem::Running) => self.navigate_to(Screen::Running, None),
                Some(WorkoutItem::Biking) => self.navigate_to(Screen::Biking, None),
                Some(WorkoutItem::Exercise(exercise)) => self.navigate_to(
                    Screen::WorkoutTimer,
                    Some(RouteParams::Exercise(exercise.clone())),
                ),
                None => {}
            },
            KeyCode::Char(' ') => {
                if let Some(WorkoutItem::Exercise(exercise)) = items.get(self.selected_workout_index) {
                    self.toggle_favorite(FavoriteExercise::from(exercise));
                } else {
                    self.status = Some("Only exercises can be favorited.".to_string());
                }
            }
            _ => {}
        }
    }

    fn handle_favorites_key(&mut self, key: KeyCode) {
        let len = self.favorites.items.len();
        match key {
            KeyCode::Up => self.selected_favorite_index = wrap_prev(self.selected_favorite_index, len),
            KeyCode::Down => {
                self.selected_favorite_index = wrap_next(self.selected_favorite_index, len)
            }
            KeyCode::Enter => {
                if let Some(favorite) = self.favorites.items.get(self.selected_favorite_index) {
                    let exercise = Exercise {
                        name: favorite.name.clone(),
                        duration: favorite.duration,
                    };
                    self.navigate_to(Screen::WorkoutTimer, Some(RouteParams::Exercise(exercise)));
                }
            }
            KeyCode::Char(' ') => {
                if let Some(favorite) = self.favorites.items.get(self.selected_favorite_index).cloned() {
                    self.toggle_favorite(favorite);
                    let len = self.favorites.items.len();
                    if self.selected_favorite_index >= len {
                        self.selected_favorite_index = len.saturating_sub(1);
                    }
                }
            }
            _ => {}
        }
    }

    fn toggle_favorite(&mut self, favorite: FavoriteExercise) {
        let name = favorite.name.clone();
        match self.favorites.toggle(favorite, &self.db) {
            Ok(true) => self.status = Some(format!("'{name}' added to favorites.")),
            Ok(false) => self.status = Some(format!("'{name}' removed from favorites.")),
            Err(err) => {
                tracing::warn!(error = %err, "failed to save favorites");
                self.status = Some(format!("Failed to save favorites: {err}"));
            }
        }
    }

    fn handle_timer_key(&mut self, key: KeyCode) {
        let Some(session) = self.timer.as_mut() else {
            return;
        };
        match key {
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('s') => {
                session.start(&self.db, Instant::now())
            }
            KeyCode::Char('x') => session.timer.pause(&self.db),
            KeyCode::Char('r') => session.timer.cancel(&self.db),
            _ => {}
        }
    }

    fn handle_settings_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('t') => {
                if let Err(err) = self.profile.toggle_theme(&self.db) {
                    tracing::warn!(error = %err, "failed to save theme");
                    self.status = Some(format!("Failed to save theme: {err}"));
                }
            }
            KeyCode::Char('n') => {
                self.name_input = Some(self.profile.user_name.clone().unwrap_or_default());
            }
            _ => {}
        }
    }

    fn handle_name_input_key(&mut self, key: KeyCode) {
        let Some(input) = self.name_input.as_mut() else {
            return;
        };
        match key {
            KeyCode::Esc => self.name_input = None,
            KeyCode::Enter => {
                let name = input.clone();
                match self.profile.set_user_name(&name, &self.db) {
                    Ok(()) => {
                        self.name_input = None;
                        self.status = Some("Name saved.".to_string());
                    }
                    Err(err) => self.show_error(err),
                }
            }
            KeyCode::Backspace | KeyCode::Delete => {
                input.pop();
            }
            KeyCode::Char(ch) if !ch.is_control() => input.push(ch),
            _ => {}
        }
    }

    fn handle_plan_key(&mut self, key: KeyCode) {
        let exercises = catalog::all_exercises();
        match key {
            KeyCode::Left => self.selected_plan_day = self.selected_plan_day.prev(),
            KeyCode::Right => self.selected_plan_day = self.selected_plan_day.next(),
            KeyCode::Up => {
                self.selected_plan_exercise_index =
                    wrap_prev(self.selected_plan_exercise_index, exercises.len())
            }
            KeyCode::Down => {
                self.selected_plan_exercise_index =
                    wrap_next(self.selected_plan_exercise_index, exercises.len())
            }
            KeyCode::Char(' ') => {
                if let Some(exercise) = exercises.get(self.selected_plan_exercise_index) {
                    self.plan_draft
                        .toggle_exercise(self.selected_plan_day, &exercise.name);
                }
            }
            KeyCode::Enter | KeyCode::Char('s') => self.save_plan(),
            _ => {}
        }
    }

    fn save_plan(&mut self) {
        match self.plan_draft.save(&self.db) {
            Ok(()) => {
                self.navigate_to(Screen::Home, None);
                self.status = Some("Plan saved.".to_string());
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to save plan");
                self.status = Some(format!("Failed to save plan: {err}"));
            }
        }
    }

    fn handle_calories_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => self.go_back(),
            KeyCode::F(2) => self.navigate_to(Screen::BarcodeScanner, None),
            KeyCode::F(3) => self.navigate_to(Screen::TotalValues, None),
            KeyCode::Tab | KeyCode::Down => self.food_form.field = self.food_form.field.next(),
            KeyCode::BackTab | KeyCode::Up => self.food_form.field = self.food_form.field.prev(),
            KeyCode::Enter => self.submit_food_form(),
            KeyCode::Backspace | KeyCode::Delete => {
                self.food_form.active_mut().pop();
            }
            KeyCode::Char(ch) if !ch.is_control() => self.food_form.active_mut().push(ch),
            _ => {}
        }
    }

    fn submit_food_form(&mut self) {
        let form = &self.food_form;
        let result = self
            .ledger
            .add_entry_from_input(
                &form.name,
                &form.calories,
                &form.fat,
                &form.sugar,
                &form.protein,
                &self.db,
            )
            .map(|entry| entry.name.clone());
        match result {
            Ok(name) => {
                self.status = Some(format!("Added '{name}'."));
                self.food_form = FoodForm::default();
            }
            Err(err) => self.show_error(err),
        }
    }

    fn handle_scanner_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => self.go_back(),
            KeyCode::Enter => self.lookup_barcode(),
            KeyCode::Backspace | KeyCode::Delete => {
                self.barcode_input.pop();
            }
            KeyCode::Char(ch) if !ch.is_control() => self.barcode_input.push(ch),
            _ => {}
        }
    }

    fn lookup_barcode(&mut self) {
        let code = self.barcode_input.clone();
        match self.products.lookup(&code) {
            Ok(product) => {
                self.navigate_to(Screen::Calories, Some(RouteParams::Product(product)));
                self.status = Some("Product found. Check the values and press Enter.".to_string());
            }
            Err(err) => {
                tracing::info!(code = %code, error = %err, "barcode lookup failed");
                self.show_error(err);
            }
        }
    }

    fn show_error(&mut self, err: AppError) {
        let title = match &err {
            AppError::Validation { .. } => "Invalid input",
            AppError::ProductNotFound { .. } => "Product not found",
            AppError::Lookup(_) => "Network error",
            AppError::Storage(_) | AppError::Serialization(_) => "Storage error",
        };
        self.alert = Some(Alert {
            title: title.to_string(),
            message: err.to_string(),
        });
    }
}

fn wrap_prev(index: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else if index == 0 {
        len - 1
    } else {
        index - 1
    }
}

fn wrap_next(index: usize, len: usize) -> usize {
    if len == 0 { 0 } else { (index + 1) % len }
}
