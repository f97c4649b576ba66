//! Countdown timer for fixed-duration activities.
//!
//! State is written to the store on every change so a relaunch resumes from
//! the last persisted second.

use std::time::{Duration, Instant};

use rusqlite::Connection;

use crate::db::{self, keys};

/// Keys a timer persists its state under.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerKeys {
    pub seconds: &'static str,
    pub running: &'static str,
}

/// A timed activity with a fixed duration.
#[derive(Clone, Debug, PartialEq)]
pub struct ActivityConfig {
    pub name: String,
    pub duration: u32,
    pub total_calories: f64,
    pub keys: Option<TimerKeys>,
}

impl ActivityConfig {
    pub fn running() -> Self {
        ActivityConfig {
            name: "Running".to_string(),
            duration: 3600,
            total_calories: 1000.0,
            keys: Some(TimerKeys {
                seconds: keys::RUNNING_TIMER_SECONDS,
                running: keys::RUNNING_TIMER_IS_RUNNING,
            }),
        }
    }

    pub fn biking() -> Self {
        ActivityConfig {
            name: "Biking".to_string(),
            duration: 3600,
            total_calories: 300.0,
            keys: Some(TimerKeys {
                seconds: keys::BIKING_TIMER_SECONDS,
                running: keys::BIKING_TIMER_IS_RUNNING,
            }),
        }
    }

    /// A single exercise countdown. Not persisted.
    pub fn exercise(name: &str, duration: u32) -> Self {
        ActivityConfig {
            name: name.to_string(),
            duration: duration.max(1),
            total_calories: 0.0,
            keys: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Idle,
    Ticked,
    Completed,
}

#[derive(Clone, Debug)]
pub struct CountdownTimer {
    config: ActivityConfig,
    remaining_seconds: u32,
    running: bool,
}

impl CountdownTimer {
    /// Builds the timer and restores any persisted state verbatim.
    pub fn restore(config: ActivityConfig, conn: &Connection) -> Self {
        let mut timer = CountdownTimer {
            remaining_seconds: config.duration,
            running: false,
            config,
        };
        let Some(keys) = timer.config.keys else {
            return timer;
        };

        match db::get(keys.seconds, conn) {
            Ok(Some(raw)) => match raw.trim().parse::<u32>() {
                Ok(seconds) => timer.remaining_seconds = seconds.min(timer.config.duration),
                Err(_) => {
                    tracing::warn!(key = keys.seconds, value = %raw, "dropping unreadable timer seconds");
                    if let Err(err) = db::remove(keys.seconds, conn) {
                        tracing::warn!(key = keys.seconds, error = %err, "failed to drop timer seconds");
                    }
                }
            },
            Ok(None) => {}
            Err(err) => tracing::warn!(key = keys.seconds, error = %err, "failed to read timer seconds"),
        }
        match db::get(keys.running, conn) {
            Ok(Some(raw)) => timer.running = raw == "true",
            Ok(None) => {}
            Err(err) => tracing::warn!(key = keys.running, error = %err, "failed to read timer state"),
        }
        // A stored zero means the app died between the last tick and the reset.
        if timer.remaining_seconds == 0 {
            timer.running = false;
            timer.remaining_seconds = timer.config.duration;
        }
        tracing::debug!(
            activity = %timer.config.name,
            remaining = timer.remaining_seconds,
            running = timer.running,
            "timer restored"
        );
        timer
    }

    pub fn config(&self) -> &ActivityConfig {
        &self.config
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self, conn: &Connection) {
        if self.running {
            return;
        }
        self.running = true;
        self.persist_running(conn);
    }

    pub fn pause(&mut self, conn: &Connection) {
        self.running = false;
        self.persist_running(conn);
    }

    pub fn cancel(&mut self, conn: &Connection) {
        self.running = false;
        self.remaining_seconds = self.config.duration;
        self.persist_running(conn);
        self.persist_seconds(conn);
    }

    /// Advances by exactly one second while running.
    pub fn tick(&mut self, conn: &Connection) -> TickOutcome {
        if !self.running || self.remaining_seconds == 0 {
            return TickOutcome::Idle;
        }
        self.remaining_seconds -= 1;
        self.persist_seconds(conn);
        if self.remaining_seconds > 0 {
            return TickOutcome::Ticked;
        }

        tracing::info!(activity = %self.config.name, "activity complete");
        self.cancel(conn);
        TickOutcome::Completed
    }

    /// Elapsed share of the activity, 0 to 100.
    pub fn progress(&self) -> f64 {
        (1.0 - f64::from(self.remaining_seconds) / f64::from(self.config.duration)) * 100.0
    }

    pub fn calories_burned(&self) -> f64 {
        let elapsed = self.config.duration - self.remaining_seconds;
        f64::from(elapsed) / f64::from(self.config.duration) * self.config.total_calories
    }

    pub fn formatted(&self) -> String {
        format_mm_ss(self.remaining_seconds)
    }

    fn persist_seconds(&self, conn: &Connection) {
        let Some(keys) = self.config.keys else {
            return;
        };
        if let Err(err) = db::set(keys.seconds, &self.remaining_seconds.to_string(), conn) {
            tracing::warn!(key = keys.seconds, error = %err, "failed to persist timer seconds");
        }
    }

    fn persist_running(&self, conn: &Connection) {
        let Some(keys) = self.config.keys else {
            return;
        };
        let value = if self.running { "true" } else { "false" };
        if let Err(err) = db::set(keys.running, value, conn) {
            tracing::warn!(key = keys.running, error = %err, "failed to persist timer state");
        }
    }
}

/// Minutes and seconds, zero padded. Minutes are not wrapped into hours.
pub fn format_mm_ss(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Lets at most one tick through per second of wall-clock time.
#[derive(Clone, Debug)]
pub struct TickGate {
    interval: Duration,
    last: Option<Instant>,
}

impl TickGate {
    pub fn new() -> Self {
        TickGate {
            interval: Duration::from_secs(1),
            last: None,
        }
    }

    /// Restarts the interval from `now`, e.g. when the timer is started.
    pub fn arm(&mut self, now: Instant) {
        self.last = Some(now);
    }

    pub fn due(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.duration_since(last) >= self.interval => {
                self.last = Some(now);
                true
            }
            Some(_) => false,
            None => {
                self.last = Some(now);
                false
            }
        }
    }
}

impl Default for TickGate {
    fn default() -> Self {
        Self::new()
    }
}

/// A mounted timer screen. Dropping the session stops its ticks, so a
/// session left behind can never write after the screen is mounted again.
#[derive(Debug)]
pub struct TimerSession {
    pub timer: CountdownTimer,
    gate: TickGate,
}

impl TimerSession {
    pub fn mount(config: ActivityConfig, conn: &Connection, now: Instant) -> Self {
        let mut gate = TickGate::new();
        gate.arm(now);
        TimerSession {
            timer: CountdownTimer::restore(config, conn),
            gate,
        }
    }

    pub fn start(&mut self, conn: &Connection, now: Instant) {
        if !self.timer.is_running() {
            self.gate.arm(now);
        }
        self.timer.start(conn);
    }

    pub fn poll(&mut self, conn: &Connection, now: Instant) -> TickOutcome {
        if !self.timer.is_running() {
            return TickOutcome::Idle;
        }
        if !self.gate.due(now) {
            return TickOutcome::Idle;
        }
        self.timer.tick(conn)
    }
}
