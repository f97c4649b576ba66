use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use crate::app::{App, AppEvent};

/// Waits up to `timeout` for a key press.
pub fn poll_key(timeout: Duration) -> Result<Option<AppEvent>> {
    if event::poll(timeout)? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(Some(AppEvent::KeyPress(key.code)));
            }
        }
    }
    Ok(None)
}

/// Runs the main event loop.
///
/// A tick is delivered on every pass so a held key cannot starve the timer;
/// the timer itself only advances once per second.
pub fn run(app: &mut App, terminal: &mut crate::tui::Terminal) -> Result<()> {
    let tick_rate = Duration::from_millis(250);

    while app.running {
        terminal.draw(|frame| crate::ui::draw(frame, app))?;

        if let Some(event) = poll_key(tick_rate)? {
            app.update(event);
        }
        app.update(AppEvent::Tick);
    }
    Ok(())
}
