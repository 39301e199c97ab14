//! Summary metric cards, one per interval.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use intervallab_core::INTERVALS;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(area);

    let summaries = app.calculation.as_ref().map(|c| c.summaries());

    for (idx, card) in cards.iter().enumerate() {
        let (title, value) = match &summaries {
            Some(s) => (
                s[idx].title.clone(),
                Span::styled(
                    s[idx].value.to_currency(),
                    theme::cell(!s[idx].value.is_no_data()).add_modifier(Modifier::BOLD),
                ),
            ),
            None => (
                format!("7-Day {} Average", INTERVALS[idx].name),
                Span::styled("-", theme::muted()),
            ),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme::muted())
            .title(format!(" {title} "))
            .title_style(theme::neutral());

        let para = Paragraph::new(vec![Line::from(""), Line::from(value).centered()]).block(block);
        f.render_widget(para, *card);
    }
}
