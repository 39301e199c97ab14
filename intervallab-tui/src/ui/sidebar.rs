//! Sidebar — symbol input and interval legend.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use intervallab_core::{INTERVALS, LOOKBACK_DAYS};

use crate::app::{AppState, Focus};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(3)])
        .split(area);

    render_input(f, chunks[0], app);
    render_legend(f, chunks[1]);
}

fn render_input(f: &mut Frame, area: Rect, app: &AppState) {
    let active = app.focus == Focus::Symbol;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(active))
        .title(" Stock/ETF Symbol ")
        .title_style(theme::panel_title(active));

    let cursor = if active { "_" } else { "" };
    let hint = if app.is_busy() {
        Span::styled("Fetching...", theme::warning())
    } else {
        Span::styled("[Enter] Calculate Averages", theme::muted())
    };

    let lines = vec![
        Line::from(vec![
            Span::styled("> ", theme::accent()),
            Span::styled(app.symbol_input.as_str(), theme::text()),
            Span::styled(cursor, theme::accent()),
        ]),
        Line::from(""),
        Line::from(hint),
    ];

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_legend(f: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::muted())
        .title(" Intervals (US/Eastern) ")
        .title_style(theme::muted());

    let mut lines = Vec::new();
    for interval in &INTERVALS {
        lines.push(Line::from(Span::styled(interval.name, theme::accent_bold())));
        lines.push(Line::from(Span::styled(
            format!("  {} - {}", interval.start_label(), interval.end_label()),
            theme::text(),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("Trailing {LOOKBACK_DAYS} calendar days, weekends excluded."),
        theme::muted(),
    )));
    lines.push(Line::from(Span::styled(
        "Average of open, high, low and close across all 5-minute bars.",
        theme::muted(),
    )));

    let para = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    f.render_widget(para, area);
}
