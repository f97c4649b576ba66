//! Screen state machine.
//!
//! Back navigation is a fixed lookup from each screen to its predecessor, not
//! a history stack: A -> B -> C -> back lands on C's predecessor, whatever it is.

use crate::lookup::ScannedProduct;
use crate::types::Exercise;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Screen {
    Home,
    Workouts,
    Favorites,
    Calories,
    TotalValues,
    Profile,
    SettingsScreen,
    WorkoutTimer,
    Running,
    Biking,
    BarcodeScanner,
    CreatePlan,
}

impl Screen {
    pub fn title(self) -> &'static str {
        match self {
            Screen::Home => "Home",
            Screen::Workouts => "Workouts",
            Screen::Favorites => "Favorites",
            Screen::Calories => "Calories",
            Screen::TotalValues => "Total Values",
            Screen::Profile => "Profile",
            Screen::SettingsScreen => "Settings",
            Screen::WorkoutTimer => "Workout Timer",
            Screen::Running => "Running",
            Screen::Biking => "Biking",
            Screen::BarcodeScanner => "Barcode Scanner",
            Screen::CreatePlan => "Create Plan",
        }
    }

    /// The screen the back action leads to. `None` for `Home`, where back is
    /// left to the platform (the app exits).
    pub fn predecessor(self) -> Option<Screen> {
        match self {
            Screen::Home => None,
            Screen::TotalValues | Screen::BarcodeScanner => Some(Screen::Calories),
            Screen::SettingsScreen => Some(Screen::Profile),
            Screen::WorkoutTimer | Screen::Running | Screen::Biking => Some(Screen::Workouts),
            _ => Some(Screen::Home),
        }
    }
}

/// Payload carried alongside the current screen.
#[derive(Clone, Debug, PartialEq)]
pub enum RouteParams {
    Exercise(Exercise),
    Product(ScannedProduct),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackOutcome {
    Moved(Screen),
    Exit,
}

#[derive(Clone, Debug)]
pub struct Router {
    current: Screen,
    params: Option<RouteParams>,
}

impl Default for Router {
    fn default() -> Self {
        Router {
            current: Screen::Home,
            params: None,
        }
    }
}

impl Router {
    pub fn current(&self) -> Screen {
        self.current
    }

    pub fn params(&self) -> Option<&RouteParams> {
        self.params.as_ref()
    }

    pub fn take_params(&mut self) -> Option<RouteParams> {
        self.params.take()
    }

    /// Unconditionally replaces the current screen and its params.
    pub fn navigate_to(&mut self, screen: Screen, params: Option<RouteParams>) {
        tracing::debug!(from = ?self.current, to = ?screen, "navigate");
        self.current = screen;
        self.params = params;
    }

    pub fn back(&mut self) -> BackOutcome {
        match self.current.predecessor() {
            Some(screen) => {
                self.navigate_to(screen, None);
                BackOutcome::Moved(screen)
            }
            None => BackOutcome::Exit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workout_timer_back_goes_to_workouts() {
        let mut router = Router::default();
        router.navigate_to(Screen::Profile, None);
        router.navigate_to(
            Screen::WorkoutTimer,
            Some(RouteParams::Exercise(Exercise {
                name: "Squats".to_string(),
                duration: 15,
            })),
        );
        assert!(matches!(router.params(), Some(RouteParams::Exercise(e)) if e.duration == 15));

        assert_eq!(router.back(), BackOutcome::Moved(Screen::Workouts));
        assert_eq!(router.current(), Screen::Workouts);
        assert!(router.params().is_none());
    }

    #[test]
    fn test_back_table() {
        let cases = [
            (Screen::TotalValues, Screen::Calories),
            (Screen::BarcodeScanner, Screen::Calories),
            (Screen::SettingsScreen, Screen::Profile),
            (Screen::Running, Screen::Workouts),
            (Screen::Biking, Screen::Workouts),
            (Screen::Workouts, Screen::Home),
            (Screen::Favorites, Screen::Home),
            (Screen::Calories, Screen::Home),
            (Screen::Profile, Screen::Home),
            (Screen::CreatePlan, Screen::Home),
        ];
        for (from, to) in cases {
            let mut router = Router::default();
            router.navigate_to(from, None);
            assert_eq!(router.back(), BackOutcome::Moved(to), "back from {from:?}");
        }
    }

    #[test]
    fn test_back_is_not_a_history() {
        let mut router = Router::default();
        router.navigate_to(Screen::Calories, None);
        router.navigate_to(Screen::Profile, None);
        router.navigate_to(Screen::SettingsScreen, None);
        router.navigate_to(Screen::TotalValues, None);
        assert_eq!(router.back(), BackOutcome::Moved(Screen::Calories));
        assert_eq!(router.back(), BackOutcome::Moved(Screen::Home));
    }

    #[test]
    fn test_back_on_home_exits() {
        let mut router = Router::default();
        assert_eq!(router.back(), BackOutcome::Exit);
        assert_eq!(router.current(), Screen::Home);
    }
}
