mod help;
mod helpers;
mod home;
mod nutrition;
mod plan;
mod profile;
mod theme;
mod workouts;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    prelude::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::app::{Alert, App};
use crate::router::Screen;
use theme::Theme;

/// Renders the entire UI for a single frame.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let theme = Theme::new(app.profile.dark_theme);
    let screen = app.screen();
    let body_text = match screen {
        Screen::Home => home::build_home_text(app, theme),
        Screen::Workouts => workouts::build_workouts_text(app, theme),
        Screen::Favorites => workouts::build_favorites_text(app, theme),
        Screen::WorkoutTimer | Screen::Running | Screen::Biking => {
            workouts::build_timer_text(app, theme)
        }
        Screen::Calories => nutrition::build_calories_text(app, theme),
        Screen::TotalValues => nutrition::build_totals_text(app, theme),
        Screen::BarcodeScanner => nutrition::build_scanner_text(app, theme),
        Screen::Profile => profile::build_profile_text(app, theme),
        Screen::SettingsScreen => profile::build_settings_text(app, theme),
        Screen::CreatePlan => plan::build_plan_text(app, theme),
    };

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(area);

    let header = Paragraph::new(Text::from(Line::from(vec![
        Span::styled(
            "  Stay Strong  ",
            Style::default().fg(Color::Black).bg(theme.primary()),
        ),
        Span::raw(" "),
        Span::styled(
            "fitness tracker",
            Style::default()
                .fg(theme.secondary())
                .add_modifier(Modifier::BOLD),
        ),
    ])))
    .alignment(Alignment::Left)
    .block(bordered(theme));
    frame.render_widget(header, layout[0]);

    let mut body_lines = vec![
        tabs_line(screen, theme),
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", screen.title()),
            Style::default()
                .fg(theme.accent())
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    body_lines.extend(body_text.lines);
    body_lines.push(Line::from(""));
    body_lines.push(Line::from(Span::styled(
        "----------------------------------------",
        Style::default().fg(theme.dim()),
    )));
    body_lines.extend(keybinds_lines(screen, theme));
    let body = Paragraph::new(Text::from(body_lines))
        .style(Style::default().fg(theme.text()))
        .alignment(Alignment::Left)
        .block(bordered(theme));
    frame.render_widget(body, layout[1]);

    let footer = Paragraph::new(Text::from(footer_line(app, theme)))
        .alignment(Alignment::Left)
        .block(bordered(theme));
    frame.render_widget(footer, layout[2]);

    if let Some(input) = &app.name_input {
        render_name_popup(frame, input, theme);
    }
    if app.show_help {
        render_help_popup(frame, theme);
    }
    if let Some(alert) = &app.alert {
        render_alert_popup(frame, alert, theme);
    }
}

fn bordered(theme: Theme) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(theme.secondary()))
}

fn tabs_line(screen: Screen, theme: Theme) -> Line<'static> {
    let tabs = [
        ("Home", Screen::Home),
        ("Workouts", Screen::Workouts),
        ("Favorites", Screen::Favorites),
        ("Calories", Screen::Calories),
        ("Profile", Screen::Profile),
    ];
    // Sub-screens highlight the tab their back action leads to.
    let active_tab = match screen {
        Screen::CreatePlan => Screen::Home,
        other => match other.predecessor() {
            Some(parent) if parent != Screen::Home => parent,
            _ => other,
        },
    };

    let mut spans = Vec::new();
    for (index, (name, tab)) in tabs.iter().enumerate() {
        if index > 0 {
            spans.push(Span::raw("  "));
        }
        let style = if *tab == active_tab {
            Style::default()
                .fg(Color::Black)
                .bg(theme.highlight())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.dim())
        };
        spans.push(Span::styled(format!(" {name} "), style));
    }
    Line::from(spans)
}

fn footer_line(app: &App, theme: Theme) -> Line<'_> {
    if let Some(status) = &app.status {
        return Line::from(Span::styled(
            status.as_str(),
            Style::default().fg(theme.text()),
        ));
    }
    match app.timer.as_ref().map(|session| &session.timer) {
        Some(timer) if timer.is_running() => Line::from(vec![
            Span::styled(
                "▶ ",
                Style::default()
                    .fg(theme.active())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("{} {}", timer.config().name, timer.formatted()),
                Style::default()
                    .fg(theme.active())
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        _ => Line::from(Span::styled(
            "● No workout running",
            Style::default().fg(theme.dim()),
        )),
    }
}

fn keybinds_lines(screen: Screen, theme: Theme) -> Vec<Line<'static>> {
    let (primary, secondary) = match screen {
        Screen::Home => (
            "n: Create plan  w: Workouts  c: Calories",
            "?: Help  q: Quit",
        ),
        Screen::Workouts => (
            "Up/Down: Select  Enter: Start  space: Favorite",
            "esc: Back  ?: Help  q: Quit",
        ),
        Screen::Favorites => (
            "Up/Down: Select  Enter: Start  space: Remove",
            "esc: Back  ?: Help  q: Quit",
        ),
        Screen::WorkoutTimer | Screen::Running | Screen::Biking => (
            "space: Start  x: Pause  r: Reset",
            "esc: Back  ?: Help  q: Quit",
        ),
        Screen::Calories => (
            "Tab: Next field  Enter: Add  F2: Scan  F3: Totals",
            "esc: Back",
        ),
        Screen::TotalValues => ("", "esc: Back  ?: Help  q: Quit"),
        Screen::BarcodeScanner => ("Enter: Look up", "esc: Back"),
        Screen::Profile => ("s: Settings", "esc: Back  ?: Help  q: Quit"),
        Screen::SettingsScreen => (
            "t: Toggle theme  n: Edit name",
            "esc: Back  ?: Help  q: Quit",
        ),
        Screen::CreatePlan => (
            "Left/Right: Day  Up/Down: Exercise  space: Toggle  Enter: Save",
            "esc: Discard",
        ),
    };
    vec![
        Line::from(Span::styled(primary, Style::default().fg(theme.highlight()))),
        Line::from(Span::styled(secondary, Style::default().fg(theme.dim()))),
    ]
}

fn render_alert_popup(frame: &mut Frame, alert: &Alert, theme: Theme) {
    let area = centered_rect(60, 30, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(Span::styled(
            alert.title.as_str(),
            Style::default()
                .fg(theme.error())
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            alert.message.as_str(),
            Style::default().fg(theme.text()),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Press ", Style::default().fg(theme.dim())),
            Span::styled(
                "Enter",
                Style::default()
                    .fg(theme.highlight())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to continue", Style::default().fg(theme.dim())),
        ]),
    ];

    let popup = Paragraph::new(Text::from(lines))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(bordered(theme).title(" Alert "));
    frame.render_widget(popup, area);
}

fn render_name_popup(frame: &mut Frame, input: &str, theme: Theme) {
    let area = centered_rect(50, 25, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(vec![
            Span::styled("Name: ", Style::default().fg(theme.dim())),
            Span::styled(
                format!("{input}_"),
                Style::default()
                    .fg(theme.highlight())
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Type to edit. Enter: save. Esc: cancel.",
            Style::default().fg(theme.dim()),
        )),
    ];
    let popup = Paragraph::new(Text::from(lines))
        .alignment(Alignment::Left)
        .block(bordered(theme).title(" Edit Name "));
    frame.render_widget(popup, area);
}

fn render_help_popup(frame: &mut Frame, theme: Theme) {
    let area = centered_rect(70, 80, frame.area());
    frame.render_widget(Clear, area);
    let popup = Paragraph::new(help::build_help_text(theme))
        .alignment(Alignment::Left)
        .block(bordered(theme).title(" Help "));
    frame.render_widget(popup, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ]
            .as_ref(),
        )
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ]
            .as_ref(),
        )
        .split(popup_layout[1])[1]
}
