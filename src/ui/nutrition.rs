use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span, Text},
};

use super::helpers::{clamp_name, format_amount};
use super::theme::Theme;
use crate::app::{App, FoodField};

pub fn build_calories_text(app: &App, theme: Theme) -> Text<'_> {
    let form = &app.food_form;
    let mut lines = Vec::new();
    for field in FoodField::ALL {
        let active = field == form.field;
        let label_style = if active {
            Style::default()
                .fg(theme.highlight())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.dim())
        };
        let value = form.value(field);
        let value_span = if value.is_empty() && !active {
            Span::styled("-", Style::default().fg(theme.dim()))
        } else {
            Span::styled(
                format!("{value}{}", if active { "_" } else { "" }),
                Style::default().fg(theme.text()),
            )
        };
        lines.push(Line::from(vec![
            Span::styled(
                if active { "  > " } else { "    " },
                Style::default()
                    .fg(theme.selection_marker())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("{:<17}", field.label()), label_style),
            value_span,
        ]));
    }

    lines.push(Line::from(""));
    lines.push(totals_summary(app, theme));

    if !app.ledger.entries.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  Recent entries",
            Style::default()
                .fg(theme.secondary())
                .add_modifier(Modifier::BOLD),
        )));
        for entry in app.ledger.entries.iter().rev().take(5) {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("    {}", clamp_name(&entry.name, 20)),
                    Style::default().fg(theme.text()),
                ),
                Span::styled(
                    format!(" {:>7} kcal", format_amount(entry.calories)),
                    Style::default().fg(theme.accent()),
                ),
            ]));
        }
    }
    Text::from(lines)
}

fn totals_summary(app: &App, theme: Theme) -> Line<'static> {
    let totals = app.ledger.totals;
    Line::from(vec![
        Span::styled("  Today: ", Style::default().fg(theme.dim())),
        Span::styled(
            format!("{} kcal", format_amount(totals.calories)),
            Style::default()
                .fg(theme.accent())
                .add_modifier(Modifier::BOLD),
        ),
    ])
}

pub fn build_totals_text(app: &App, theme: Theme) -> Text<'_> {
    let totals = app.ledger.totals;
    if totals.is_zero() {
        return Text::from(Line::from(Span::styled(
            "  Nothing logged today.",
            Style::default().fg(theme.dim()),
        )));
    }
    let rows = [
        ("Calories", totals.calories, "kcal"),
        ("Fat", totals.fat, "g"),
        ("Sugar", totals.sugar, "g"),
        ("Protein", totals.protein, "g"),
    ];
    let mut lines = rows
        .iter()
        .map(|(label, value, unit)| {
            Line::from(vec![
                Span::styled(format!("    {label:<10}"), Style::default().fg(theme.dim())),
                Span::styled(
                    format!("{:>8} {unit}", format_amount(*value)),
                    Style::default()
                        .fg(theme.accent())
                        .add_modifier(Modifier::BOLD),
                ),
            ])
        })
        .collect::<Vec<_>>();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("    {} entries in the food log", app.ledger.entries.len()),
        Style::default().fg(theme.dim()),
    )));
    Text::from(lines)
}

pub fn build_scanner_text(app: &App, theme: Theme) -> Text<'_> {
    Text::from(vec![
        Line::from(Span::styled(
            "  Enter the barcode printed on the package.",
            Style::default().fg(theme.text()),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Barcode: ", Style::default().fg(theme.dim())),
            Span::styled(
                format!("{}_", app.barcode_input),
                Style::default()
                    .fg(theme.highlight())
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "  Values are per 100 g and can be adjusted before saving.",
            Style::default().fg(theme.dim()),
        )),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_in_memory;
    use crate::error::{AppError, Result};
    use crate::lookup::{ProductSource, ScannedProduct};
    use crate::types::NutritionTotals;

    struct Offline;

    impl ProductSource for Offline {
        fn lookup(&self, code: &str) -> Result<ScannedProduct> {
            Err(AppError::ProductNotFound {
                code: code.to_string(),
            })
        }
    }

    fn plain(text: &Text) -> String {
        text.lines
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_food_log_is_not_presented_as_today() {
        let mut app = App::new(init_in_memory(), Box::new(Offline));
        app.ledger
            .add_entry("Pasta", 350.0, 2.0, 3.0, 12.0, &app.db)
            .unwrap();
        let theme = Theme::new(false);

        let totals = plain(&build_totals_text(&app, theme));
        assert!(totals.contains("1 entries in the food log"), "{totals}");

        // After a rollover the totals are zero while the log keeps yesterday.
        app.ledger.totals = NutritionTotals::default();
        let calories = plain(&build_calories_text(&app, theme));
        assert!(calories.contains("Recent entries"), "{calories}");
        assert!(calories.contains("Pasta"));
        assert!(!calories.contains("Logged today"));
        assert!(calories.contains("Today: 0 kcal"));
    }
}
