//! Event handling for the catalog browser
//!
//! Maps key events to state changes. Anything with a side effect outside the
//! app state (requests, clipboard, browser) is returned as an `Action` for the
//! run loop to perform.

use super::state::{App, Mode};
use crate::browse::{Command, DetailState, QueryStore};
use crate::ui::output::MessageLevel;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// Result of handling an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Nothing outside the app state to do
    Continue,
    /// Run these session commands
    Dispatch(Vec<Command>),
    /// Copy the shareable link to the clipboard
    CopyLink,
    /// Open this URL in the system browser
    OpenLink(String),
    /// Leave the browser
    Quit,
}

impl From<Vec<Command>> for Action {
    fn from(commands: Vec<Command>) -> Self {
        if commands.is_empty() {
            Self::Continue
        } else {
            Self::Dispatch(commands)
        }
    }
}

/// Handle a key press in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) -> Action {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    match app.mode {
        Mode::Normal => handle_normal_mode(app, key),
        Mode::Search => handle_search_mode(app, key),
        Mode::Filters => handle_filters_mode(app, key),
        Mode::Detail => handle_detail_mode(app, key),
        Mode::Help => {
            app.mode = Mode::Normal;
            Action::Continue
        }
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('?') | KeyCode::F(1) => {
            app.mode = Mode::Help;
            Action::Continue
        }
        KeyCode::Char('/') => {
            app.mode = Mode::Search;
            Action::Continue
        }
        KeyCode::Char('f') => {
            app.mode = Mode::Filters;
            app.refresh_picker();
            Action::Continue
        }

        // Navigation within the page
        KeyCode::Up | KeyCode::Char('k') => {
            app.cursor_up();
            Action::Continue
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.cursor_down();
            Action::Continue
        }
        KeyCode::Home => {
            app.jump_to_start();
            Action::Continue
        }
        KeyCode::End => {
            app.jump_to_end();
            Action::Continue
        }

        // Paging and sorting
        KeyCode::Left | KeyCode::Char('h') => app.update(QueryStore::previous_page).into(),
        KeyCode::Right | KeyCode::Char('l') => {
            let page = app.session.state().page();
            if app.session.last_page().is_some_and(|last| page >= last) {
                app.add_message(MessageLevel::Info, "Already on the last page");
                return Action::Continue;
            }
            app.update(QueryStore::next_page).into()
        }
        KeyCode::Char('s') => app
            .update(|store| {
                let sort = store.state().sort().toggled();
                store.set_sort(sort);
            })
            .into(),
        KeyCode::Char('o') => app
            .update(|store| {
                let order = store.state().order().toggled();
                store.set_order(order);
            })
            .into(),
        KeyCode::Char('z') => app.update(QueryStore::cycle_page_size).into(),
        KeyCode::Char('r') => app.update(QueryStore::reset_filters_only).into(),
        KeyCode::Char('R') => app.update(QueryStore::reset_all).into(),
        KeyCode::F(5) => {
            let mut commands = app.session.retry();
            if matches!(app.session.detail(), DetailState::Unavailable { .. }) {
                commands.extend(app.session.reload_detail());
            }
            Action::Dispatch(commands)
        }

        // Entry actions
        KeyCode::Enter => match app.current_entry().map(|entry| entry.id.clone()) {
            Some(id) => {
                app.mode = Mode::Detail;
                app.session.open_detail(&id).into()
            }
            None => Action::Continue,
        },
        KeyCode::Char(' ') => match app.current_entry().map(|entry| entry.id.clone()) {
            Some(id) => app.session.toggle_selection(&id).into(),
            None => Action::Continue,
        },
        KeyCode::Char('y') => Action::CopyLink,
        KeyCode::Char('w') => match app.current_entry().and_then(|entry| entry.link()) {
            Some(link) => Action::OpenLink(link.to_string()),
            None => {
                app.add_message(MessageLevel::Warning, "This entry has no link");
                Action::Continue
            }
        },
        _ => Action::Continue,
    }
}

fn handle_search_mode(app: &mut App, key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Esc | KeyCode::Enter, _) => {
            app.mode = Mode::Normal;
            Action::Continue
        }
        (KeyCode::Backspace, _) => app
            .update(|store| {
                store.pop_search_char();
            })
            .into(),
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
            app.update(|store| store.set_search_text("")).into()
        }
        (KeyCode::Char(c), modifiers) if !modifiers.contains(KeyModifiers::CONTROL) => {
            app.update(|store| store.push_search_char(c)).into()
        }
        _ => Action::Continue,
    }
}

fn handle_filters_mode(app: &mut App, key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => {
            app.mode = Mode::Normal;
            Action::Continue
        }
        KeyCode::Tab | KeyCode::Right => {
            app.picker.next_dimension();
            app.refresh_picker();
            Action::Continue
        }
        KeyCode::BackTab | KeyCode::Left => {
            app.picker.previous_dimension();
            app.refresh_picker();
            Action::Continue
        }
        KeyCode::Up => {
            app.picker.cursor_up();
            Action::Continue
        }
        KeyCode::Down => {
            app.picker.cursor_down();
            Action::Continue
        }
        KeyCode::Char(' ') => {
            let dimension = app.picker.dimension;
            match app.picker.current().map(str::to_string) {
                Some(value) => app
                    .update(|store| {
                        store.toggle_filter_value(dimension, &value);
                    })
                    .into(),
                None => Action::Continue,
            }
        }
        KeyCode::Delete => {
            let dimension = app.picker.dimension;
            app.update(|store| store.clear_dimension(dimension)).into()
        }
        KeyCode::Backspace => {
            app.picker.pop_char();
            app.refresh_picker();
            Action::Continue
        }
        KeyCode::Char(c) => {
            app.picker.push_char(c);
            app.refresh_picker();
            Action::Continue
        }
        _ => Action::Continue,
    }
}

fn handle_detail_mode(app: &mut App, key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace | KeyCode::Char('q') => {
            app.mode = Mode::Normal;
            app.session.close_detail().into()
        }
        KeyCode::F(5) => app.session.reload_detail().into(),
        KeyCode::Char('y') => Action::CopyLink,
        KeyCode::Char('w') => match app.session.detail() {
            DetailState::Loaded(detail) => detail
                .summary
                .link()
                .map_or(Action::Continue, |link| Action::OpenLink(link.to_string())),
            _ => Action::Continue,
        },
        _ => Action::Continue,
    }
}

/// Poll for an event and handle it
///
/// # Errors
///
/// Returns an I/O error if reading terminal events fails.
pub fn poll_and_handle(app: &mut App, timeout: Duration) -> std::io::Result<Action> {
    if !event::poll(timeout)? {
        return Ok(Action::Continue);
    }

    match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => Ok(handle_key(app, key)),
        _ => Ok(Action::Continue),
    }
}
