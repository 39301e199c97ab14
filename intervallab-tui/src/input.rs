//! Keyboard input dispatch — overlays → global keys → focused pane.
//!
//! Letters typed while the symbol field has focus always go into the field,
//! so single-letter commands (`q`, `x`, `e`) only apply to the results pane.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{AppState, Focus, Overlay, INPUT_MAX_LEN};

pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.running = false;
        return;
    }

    // 1. Overlays consume input first.
    match app.overlay {
        Overlay::Welcome | Overlay::Help => {
            app.overlay = Overlay::None;
            return;
        }
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::None => {}
    }

    // 2. Global keys.
    match key.code {
        KeyCode::Esc => {
            app.running = false;
            return;
        }
        KeyCode::Char('?') => {
            app.overlay = Overlay::Help;
            return;
        }
        KeyCode::Tab | KeyCode::BackTab => {
            app.focus = match app.focus {
                Focus::Symbol => Focus::Results,
                Focus::Results => Focus::Symbol,
            };
            return;
        }
        KeyCode::Enter => {
            app.request_calculation();
            return;
        }
        _ => {}
    }

    // 3. Focused pane.
    match app.focus {
        Focus::Symbol => handle_symbol_key(app, key),
        Focus::Results => handle_results_key(app, key),
    }
}

fn handle_symbol_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Backspace => {
            app.symbol_input.pop();
        }
        KeyCode::Char(c) if !c.is_control() => {
            if app.symbol_input.chars().count() < INPUT_MAX_LEN {
                app.symbol_input.push(c.to_ascii_uppercase());
            }
        }
        _ => {}
    }
}

fn handle_results_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Char('x') => app.export_csv(),
        KeyCode::Char('e') => {
            app.error_scroll = 0;
            app.overlay = Overlay::ErrorHistory;
        }
        KeyCode::Char('/') | KeyCode::Char('s') => app.focus = Focus::Symbol,
        KeyCode::Char('j') | KeyCode::Down => app.scroll_results(1),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_results(-1),
        KeyCode::Char('g') | KeyCode::Home => app.results_scroll = 0,
        KeyCode::Char('G') | KeyCode::End => {
            app.results_scroll = app.result_rows().saturating_sub(1);
        }
        _ => {}
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('e') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}
