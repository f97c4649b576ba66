use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span, Text},
};

use super::helpers::{clamp_name, format_amount, progress_bar};
use super::theme::Theme;
use crate::app::{App, WorkoutItem, workout_items};
use crate::catalog;
use crate::timer::{ActivityConfig, format_mm_ss};

pub fn build_workouts_text(app: &App, theme: Theme) -> Text<'_> {
    let items = workout_items();
    let mut lines = vec![section_header(theme, "▶", "Activities")];
    let mut index = 0;
    for item in items.iter().take_while(|item| !matches!(item, WorkoutItem::Exercise(_))) {
        let config = match item {
            WorkoutItem::Running => ActivityConfig::running(),
            _ => ActivityConfig::biking(),
        };
        let detail = format!(
            "{}  {} kcal",
            format_mm_ss(config.duration),
            format_amount(config.total_calories)
        );
        lines.push(row(app, theme, index, item.name(), detail));
        index += 1;
    }

    for section in catalog::SECTIONS {
        lines.push(Line::from(""));
        lines.push(section_header(theme, section.icon, section.title));
        for (name, duration) in section.exercises {
            let detail = format!("{}s", duration);
            lines.push(row(app, theme, index, name, detail));
            index += 1;
        }
    }
    Text::from(lines)
}

fn section_header(theme: Theme, icon: &str, title: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("  {icon} {title}"),
        Style::default()
            .fg(theme.secondary())
            .add_modifier(Modifier::BOLD),
    ))
}

fn row(app: &App, theme: Theme, index: usize, name: &str, detail: String) -> Line<'static> {
    let selected = index == app.selected_workout_index;
    let favorite = app.favorites.contains(name);
    let marker_style = if selected {
        Style::default()
            .fg(theme.selection_marker())
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.dim())
    };
    let name_style = if selected {
        Style::default()
            .fg(theme.highlight())
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text())
    };
    Line::from(vec![
        Span::styled(if selected { "  > " } else { "    " }, marker_style),
        Span::styled(clamp_name(name, 18), name_style),
        Span::styled(format!(" {detail:>16}"), Style::default().fg(theme.dim())),
        Span::styled(
            if favorite { "  ★" } else { "" },
            Style::default().fg(theme.warn()),
        ),
    ])
}

pub fn build_favorites_text(app: &App, theme: Theme) -> Text<'_> {
    if app.favorites.items.is_empty() {
        return Text::from(Line::from(Span::styled(
            "  No favorites yet. Press space on an exercise in Workouts.",
            Style::default().fg(theme.dim()),
        )));
    }

    let lines = app
        .favorites
        .items
        .iter()
        .enumerate()
        .map(|(index, favorite)| {
            let selected = index == app.selected_favorite_index;
            let name_style = if selected {
                Style::default()
                    .fg(theme.highlight())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text())
            };
            Line::from(vec![
                Span::styled(
                    if selected { "  > " } else { "    " },
                    Style::default().fg(theme.selection_marker()),
                ),
                Span::styled("★ ", Style::default().fg(theme.warn())),
                Span::styled(clamp_name(&favorite.name, 18), name_style),
                Span::styled(
                    format!(" {:>5}", format_mm_ss(favorite.duration)),
                    Style::default().fg(theme.dim()),
                ),
            ])
        })
        .collect::<Vec<_>>();
    Text::from(lines)
}

pub fn build_timer_text(app: &App, theme: Theme) -> Text<'_> {
    let Some(session) = app.timer.as_ref() else {
        return Text::from(Line::from(Span::styled(
            "  No exercise selected.",
            Style::default().fg(theme.dim()),
        )));
    };
    let timer = &session.timer;
    let config = timer.config();
    let (state, state_color) = if timer.is_running() {
        ("running", theme.active())
    } else if timer.remaining_seconds() < config.duration {
        ("paused", theme.warn())
    } else {
        ("ready", theme.dim())
    };

    let mut lines = vec![
        Line::from(Span::styled(
            format!("  {}", config.name),
            Style::default()
                .fg(theme.primary())
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("  {}", timer.formatted()),
                Style::default()
                    .fg(theme.accent())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {state}"), Style::default().fg(state_color)),
        ]),
        Line::from(Span::styled(
            format!("  {} {:.0}%", progress_bar(timer.progress(), 30), timer.progress()),
            Style::default().fg(theme.success()),
        )),
    ];
    if config.total_calories > 0.0 {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("  Calories burned: ", Style::default().fg(theme.dim())),
            Span::styled(
                format!(
                    "{} / {} kcal",
                    format_amount(timer.calories_burned()),
                    format_amount(config.total_calories)
                ),
                Style::default().fg(theme.text()),
            ),
        ]));
    }
    Text::from(lines)
}
