//! Results table — one row per trading day, most recent first.

use ratatui::layout::{Constraint, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row, Table};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(calc) = &app.calculation else {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "No results yet. Enter a symbol and press Enter.",
                theme::muted(),
            )),
        ];
        f.render_widget(Paragraph::new(lines), area);
        return;
    };

    let table = calc.table();
    let widths: Vec<Constraint> = table
        .column_widths()
        .into_iter()
        .map(|w| Constraint::Length(w as u16 + 2))
        .collect();

    let header = Row::new(
        table
            .headers
            .iter()
            .map(|h| Cell::from(h.as_str()).style(theme::accent_bold())),
    );

    let visible = area.height.saturating_sub(1) as usize;
    let start = app.results_scroll.min(table.rows.len().saturating_sub(visible.max(1)));

    let rows = table
        .rows
        .iter()
        .zip(&calc.days)
        .skip(start)
        .take(visible)
        .map(|(cells, day)| {
            let mut styled = vec![
                Cell::from(cells[0].as_str()).style(theme::text()),
                Cell::from(cells[1].as_str()).style(theme::muted()),
            ];
            styled.extend(
                cells[2..]
                    .iter()
                    .zip(&day.values)
                    .map(|(c, v)| Cell::from(c.as_str()).style(theme::cell(!v.is_no_data()))),
            );
            Row::new(styled)
        });

    let widget = Table::new(rows, widths)
        .header(header)
        .column_spacing(1);

    f.render_widget(widget, area);
}
