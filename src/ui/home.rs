use chrono::{Datelike, Local};
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span, Text},
};

use super::helpers::format_amount;
use super::theme::Theme;
use crate::app::App;
use crate::types::Weekday;

pub fn build_home_text(app: &App, theme: Theme) -> Text<'_> {
    let today = Weekday::from(Local::now().weekday());
    let mut lines = vec![
        Line::from(vec![
            Span::styled("  Hello, ", Style::default().fg(theme.text())),
            Span::styled(
                app.profile.display_name(),
                Style::default()
                    .fg(theme.primary())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("! Stay strong today.", Style::default().fg(theme.text())),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            format!("  Today's plan ({today})"),
            Style::default()
                .fg(theme.secondary())
                .add_modifier(Modifier::BOLD),
        )),
    ];

    if app.todays_plan.is_empty() {
        lines.push(Line::from(Span::styled(
            "    Rest day. Press n to create a plan.",
            Style::default().fg(theme.dim()),
        )));
    } else {
        for exercise in &app.todays_plan {
            lines.push(Line::from(vec![
                Span::styled("    • ", Style::default().fg(theme.selection_marker())),
                Span::styled(exercise.as_str(), Style::default().fg(theme.text())),
            ]));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Progress",
        Style::default()
            .fg(theme.secondary())
            .add_modifier(Modifier::BOLD),
    )));
    let stats = &app.stats;
    lines.push(stat_line(theme, "Workouts", stats.completed_workouts.to_string()));
    lines.push(stat_line(theme, "Hours", format!("{:.1}", stats.completed_hours)));
    lines.push(stat_line(theme, "Calories burned", format_amount(stats.burned_calories)));

    Text::from(lines)
}

fn stat_line(theme: Theme, label: &str, value: String) -> Line<'static> {
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
