use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span, Text},
};

use super::theme::Theme;

pub fn build_help_text(theme: Theme) -> Text<'static> {
    let mut lines = Vec::new();

    lines.push(Line::from(Span::styled(
        "Key bindings",
        Style::default()
            .fg(theme.accent())
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));

    lines.push(section_title(theme, "Global"));
    lines.extend(section_lines(
        theme,
        &[
            "q: Quit",
            "?: Toggle help",
            "h/w/f/c/p: Home, Workouts, Favorites, Calories, Profile",
            "esc: Back (quits on Home)",
        ],
    ));

    lines.push(Line::from(""));
    lines.push(section_title(theme, "Lists"));
    lines.extend(section_lines(
        theme,
        &[
            "Up/Down: Move selection",
            "Enter: Open",
            "space: Toggle favorite",
        ],
    ));

    lines.push(Line::from(""));
    lines.push(section_title(theme, "Timers"));
    lines.extend(section_lines(
        theme,
        &["space/s: Start", "x: Pause", "r: Reset"],
    ));

    lines.push(Line::from(""));
    lines.push(section_title(theme, "Calories"));
    lines.extend(section_lines(
        theme,
        &[
            "Type to edit the active field",
            "Tab/Up/Down: Switch field",
            "Enter: Add food",
            "F2: Scan barcode  F3: Daily totals",
        ],
    ));

    lines.push(Line::from(""));
    lines.push(section_title(theme, "Plan"));
    lines.extend(section_lines(
        theme,
        &[
            "n: Create plan (home)",
            "Left/Right: Day  Up/Down: Exercise",
            "space: Toggle exercise  Enter: Save",
        ],
    ));

    lines.push(Line::from(""));
    lines.push(section_title(theme, "Settings"));
    lines.extend(section_lines(theme, &["t: Toggle dark mode", "n: Edit name"]));

    Text::from(lines)
}

fn section_title(theme: Theme, title: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("  {title}"),
        Style::default()
            .fg(theme.secondary())
            .add_modifier(Modifier::BOLD),
    ))
}

fn section_lines(theme: Theme, items: &[&str]) -> Vec<Line<'static>> {
    items
        .iter()
        .map(|item| {
            Line::from(Span::styled(
                format!("  - {item}"),
                Style::default().fg(theme.text()),
            ))
        })
        .collect()
}
