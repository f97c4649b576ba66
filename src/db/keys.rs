//! Fixed key names used in the key-value store.

pub const USER_NAME: &str = "userName";
pub const JOIN_MONTH: &str = "joinMonth";
pub const THEME: &str = "theme";

pub const DAILY_VALUES: &str = "dailyValues";
pub const FOOD_ENTRIES: &str = "foodEntries";
pub const LAST_RESET: &str = "lastReset";

pub const WEEKLY_PLAN: &str = "weeklyPlan";
pub const FAVORITE_EXERCISES: &str = "favoriteExercises";

pub const COMPLETED_WORKOUTS: &str = "completedWorkouts";
pub const COMPLETED_HOURS: &str = "completedHours";
pub const COMPLETE_CALORIES: &str = "completeCalories";

pub const RUNNING_TIMER_SECONDS: &str = "runningTimerSeconds";
pub const RUNNING_TIMER_IS_RUNNING: &str = "runningTimerIsRunning";
pub const BIKING_TIMER_SECONDS: &str = "bikingTimerSeconds";
pub const BIKING_TIMER_IS_RUNNING: &str = "bikingTimerIsRunning";
