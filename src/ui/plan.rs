use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
};

use super::theme::Theme;
use crate::app::App;
use crate::catalog;
use crate::types::Weekday;

pub fn build_plan_text(app: &App, theme: Theme) -> Text<'_> {
    let mut lines = vec![days_line(app, theme), Line::from("")];

    let day = app.selected_plan_day;
    for (index, exercise) in catalog::all_exercises().iter().enumerate() {
        let selected = index == app.selected_plan_exercise_index;
        let planned = app.plan_draft.contains(day, &exercise.name);
        let name_style = if selected {
            Style::default()
                .fg(theme.highlight())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text())
        };
        lines.push(Line::from(vec![
            Span::styled(
                if selected { "  > " } else { "    " },
                Style::default().fg(theme.selection_marker()),
            ),
            Span::styled(
                if planned { "[x] " } else { "[ ] " },
                Style::default().fg(if planned { theme.success() } else { theme.dim() }),
            ),
            Span::styled(exercise.name.clone(), name_style),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("  {} exercises planned this week", app.plan_draft.total_exercises()),
        Style::default().fg(theme.dim()),
    )));
    Text::from(lines)
}

fn days_line(app: &App, theme: Theme) -> Line<'static> {
    let mut spans = vec![Span::raw("  ")];
    for day in Weekday::ALL {
        let count = app.plan_draft.exercises(day).len();
        let style = if day == app.selected_plan_day {
            Style::default()
                .fg(Color::Black)
                .bg(theme.highlight())
                .add_modifier(Modifier::BOLD)
        } else if count > 0 {
            Style::default().fg(theme.text())
        } else {
            Style::default().fg(theme.dim())
        };
        spans.push(Span::styled(format!(" {day} "), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}
