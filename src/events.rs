use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::{App, InputMode, Modal, View};
use crate::data::EventKind;

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    // Modals capture the next key press
    if let Some(modal) = &app.modal {
        match modal {
            Modal::Alert(_) => app.modal = None,
            Modal::ConfirmBlock(_) => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.answer_modal(true),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.answer_modal(false),
                _ => {}
            },
        }
        return;
    }

    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    match app.input_mode {
        InputMode::Address => {
            handle_address_input(app, key);
            return;
        }
        InputMode::IpFilter => {
            handle_filter_input(app, key);
            return;
        }
        InputMode::Normal => {}
    }

    // If detail overlay is shown, handle overlay-specific keys
    if app.detail.is_some() {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace | KeyCode::Char('q') => {
                app.close_overlay();
            }
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.quit(),

        // View switching
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.prev_view();
            } else {
                app.next_view();
            }
        }
        KeyCode::BackTab => app.prev_view(),
        KeyCode::Char('1') => app.set_view(View::Traffic),
        KeyCode::Char('2') => app.set_view(View::Logs),
        KeyCode::Char('3') => app.set_view(View::Threats),

        // Navigation (up/down for rows, left/right for tabs)
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Left | KeyCode::Char('h') => app.prev_view(),
        KeyCode::Right | KeyCode::Char('l') => app.next_view(),
        KeyCode::PageUp => app.select_prev_n(10),
        KeyCode::PageDown => app.select_next_n(10),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),

        // Address bar
        KeyCode::Char('i') => app.input_mode = InputMode::Address,
        KeyCode::Char('n') => app.submit_address(EventKind::Normal),
        KeyCode::Char('s') => app.submit_address(EventKind::Syn),
        KeyCode::Char('x') => app.submit_address(EventKind::Blocked),

        // Row actions
        KeyCode::Char('b') => app.block_selected(),
        KeyCode::Enter => app.details_selected(),
        KeyCode::Char('v') => app.resolve_selected(),

        // Filters
        KeyCode::Char('f') => app.cycle_filter(),
        KeyCode::Char('/') => app.start_ip_filter(),
        KeyCode::Char('c') => {
            if !app.filters.ip.is_empty() {
                app.clear_ip_filter();
            }
        }

        // Time range (traffic view)
        KeyCode::Char('[') if app.current_view == View::Traffic => app.prev_time_range(),
        KeyCode::Char(']') if app.current_view == View::Traffic => app.next_time_range(),

        // Refresh
        KeyCode::Char('r') => {
            let feeds = app.current_view.feeds();
            app.refresh(feeds);
        }
        KeyCode::Char('R') => app.refresh_all(),

        KeyCode::Char('?') => app.toggle_help(),

        _ => {}
    }
}

/// Handle key input while the address bar is being edited
fn handle_address_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Esc => app.input_mode = InputMode::Normal,
        KeyCode::Backspace => {
            app.address.pop();
        }
        KeyCode::Char(c) => app.address.push(c),
        _ => {}
    }
}

/// Handle key input while the IP filter is active
fn handle_filter_input(app: &mut App, key: KeyEvent) {
    match key.code {
        // Confirm or cancel, keeping the text
        KeyCode::Enter | KeyCode::Esc => app.input_mode = InputMode::Normal,

        // Clear and exit
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.clear_ip_filter();
        }

        KeyCode::Backspace => {
            app.ip_filter_pop();
            if app.filters.ip.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }

        KeyCode::Char(c) => app.ip_filter_push(c),

        _ => {}
    }
}

/// Handle mouse events
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent, content_start_row: u16) {
    if app.modal.is_some() || app.show_help {
        return;
    }

    match mouse.kind {
        MouseEventKind::ScrollUp => app.select_prev(),
        MouseEventKind::ScrollDown => app.select_next(),

        MouseEventKind::Down(MouseButton::Left) => {
            let clicked_row = mouse.row;

            // Rows start after the table border and header line
            if clicked_row > content_start_row + 1 {
                let item_row = (clicked_row - content_start_row - 2) as usize;
                match app.current_view {
                    View::Logs if item_row < app.log_table.len() => app.selected_log = item_row,
                    View::Threats if item_row < app.threat_table.count => {
                        app.selected_threat = item_row
                    }
                    _ => {}
                }
            }

            // Tab bar is row 1, after the header
            if clicked_row == 1 {
                let col = mouse.column;
                // Approximate tab positions: Traffic (0-12), Logs (13-22), Threats (23-35)
                if col < 13 {
                    app.set_view(View::Traffic);
                } else if col < 23 {
                    app.set_view(View::Logs);
                } else if col < 36 {
                    app.set_view(View::Threats);
                }
            }
        }

        MouseEventKind::Down(MouseButton::Right) => app.close_overlay(),

        _ => {}
    }
}
