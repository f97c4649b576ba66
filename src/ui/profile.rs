use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span, Text},
};

use super::helpers::format_amount;
use super::theme::Theme;
use crate::app::App;

pub fn build_profile_text(app: &App, theme: Theme) -> Text<'_> {
    let profile = &app.profile;
    let stats = &app.stats;
    let member_since = profile.join_month.as_deref().unwrap_or("-");
    Text::from(vec![
        Line::from(Span::styled(
            format!("  {}", profile.display_name()),
            Style::default()
                .fg(theme.primary())
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("  Member since {member_since}"),
            Style::default().fg(theme.dim()),
        )),
        Line::from(""),
        field_line(theme, "Workouts", stats.completed_workouts.to_string()),
        field_line(theme, "Hours", format!("{:.1}", stats.completed_hours)),
        field_line(theme, "Calories burned", format_amount(stats.burned_calories)),
        field_line(theme, "Favorites", app.favorites.items.len().to_string()),
    ])
}

pub fn build_settings_text(app: &App, theme: Theme) -> Text<'_> {
    let theme_name = if app.profile.dark_theme { "dark" } else { "light" };
    Text::from(vec![
        field_line(theme, "Name", app.profile.display_name().to_string()),
        field_line(theme, "Theme", theme_name.to_string()),
    ])
}

fn field_line(theme: Theme, label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("    {label:<16}"), Style::default().fg(theme.dim())),
        Span::styled(
            value,
            Style::default()
                .fg(theme.accent())
                .add_modifier(Modifier::BOLD),
        ),
    ])
}
