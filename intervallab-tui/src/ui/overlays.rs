//! Overlay widgets — welcome, help, error history.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;
use crate::ui::centered_rect;

/// First-run welcome overlay.
pub fn render_welcome(f: &mut Frame, area: Rect) {
    let popup = centered_rect(70, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Stock Interval Average Calculator ")
        .title_style(theme::accent_bold());

    let step = |s: &'static str| Line::from(Span::styled(s, theme::text()));
    let note = |s: &'static str| Line::from(Span::styled(s, theme::muted()));

    let text = vec![
        Line::from(""),
        Line::from(Span::styled("How it works:", theme::accent_bold())),
        Line::from(""),
        step("  1. Enter Symbol: any valid stock or ETF symbol (e.g. AAPL, SPY, QQQ)"),
        step("  2. Fetch Data: 5-minute intraday bars for the recent trading days"),
        step("  3. Calculate Averages: for each trading day, the average price during"),
        note("       Morning session (9:00-9:35 AM ET)"),
        note("       Mid-morning session (11:00-11:30 AM ET)"),
        note("       Market close session (3:30-4:00 PM ET)"),
        step("  4. View Results: a table plus summary statistics"),
        step("  5. Export: press x to save the table as CSV"),
        Line::from(""),
        Line::from(Span::styled("Notes:", theme::accent_bold())),
        note("  - All times are US/Eastern"),
        note("  - Only trading days are included (weekends are excluded)"),
        note("  - Market holidays may result in missing data"),
        note("  - Data is sourced from the Alpha Vantage API"),
        note("  - Averages pool Open, High, Low and Close within each interval"),
        Line::from(""),
        Line::from(Span::styled("Press any key to dismiss...", theme::neutral())),
    ];

    let para = Paragraph::new(text).block(block).wrap(Wrap { trim: false });
    f.render_widget(para, popup);
}

/// Keyboard reference.
pub fn render_help(f: &mut Frame, area: Rect) {
    let popup = centered_rect(50, 60, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Keys ")
        .title_style(theme::accent_bold());

    let keys: [(&str, &str); 10] = [
        ("Enter", "calculate averages for the symbol"),
        ("Tab", "switch between symbol and results"),
        ("Backspace", "delete last character"),
        ("j/k", "scroll results"),
        ("g/G", "first / last day"),
        ("x", "export CSV (results pane)"),
        ("e", "error history (results pane)"),
        ("/", "back to the symbol field"),
        ("?", "this help"),
        ("q/Esc", "quit"),
    ];

    let mut lines = vec![Line::from("")];
    for (key, what) in keys {
        lines.push(Line::from(vec![
            Span::styled(format!("  {key:<10}"), theme::accent()),
            Span::styled(what, theme::text()),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Press any key to close",
        theme::neutral(),
    )));

    f.render_widget(Paragraph::new(lines).block(block), popup);
}

/// Error history overlay.
pub fn render_error_history(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(80, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::negative())
        .title(format!(
            " Error History ({}) [Esc]close [j/k]scroll ",
            app.error_history.len()
        ))
        .title_style(theme::negative());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    if app.error_history.is_empty() {
        let text = Paragraph::new(Span::styled("No errors recorded.", theme::muted()));
        f.render_widget(text, inner);
        return;
    }

    let visible_height = inner.height as usize;
    let mut lines: Vec<Line> = Vec::new();
    for (i, err) in app
        .error_history
        .iter()
        .enumerate()
        .skip(app.error_scroll)
        .take(visible_height)
    {
        let style = if i == app.error_scroll {
            theme::negative().add_modifier(Modifier::BOLD)
        } else {
            theme::muted()
        };

        lines.push(Line::from(vec![
            Span::styled(
                format!("[{}] ", err.timestamp.format("%H:%M:%S")),
                theme::muted(),
            ),
            Span::styled(format!("[{}] ", err.category.label()), theme::warning()),
            Span::styled(err.message.as_str(), style),
        ]));

        if !err.context.is_empty() {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(err.context.as_str(), theme::muted()),
            ]));
        }
    }

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
