//! Event loop and state transitions.
//!
//! All mutations of the base collection, selection set and edit buffers
//! live here as plain functions over `&mut AppState`, so they stay
//! testable without a terminal. Every mutation that can shrink the
//! filtered view re-derives it and re-clamps the page.

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::time::Duration;

use crate::app::{AppState, EditBuffer, InputMode, Options};
use crate::app::keymap::KeyAction;
use crate::search::apply_search;
use crate::ui;

pub fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    opts: &Options,
) -> Result<()> {
    let mut app = AppState::new(opts);

    loop {
        app.prune_notices();
        terminal.draw(|f| {
            ui::render(f, &mut app);
        })?;

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && !handle_key(&mut app, &key)
        {
            break;
        }
    }

    Ok(())
}

/// Dispatch one key press. Returns `false` when the application should quit.
pub fn handle_key(app: &mut AppState, key: &KeyEvent) -> bool {
    match app.input_mode {
        InputMode::Normal => match app.keymap.resolve(key) {
            Some(KeyAction::Quit) => return false,
            Some(KeyAction::StartSearch) => {
                app.search_query.clear();
                apply_search(app);
                app.input_mode = InputMode::Search;
            }
            Some(KeyAction::OpenHelp) => {
                app.input_mode = InputMode::Help;
            }
            Some(KeyAction::ToggleSelect) => {
                if let Some(id) = app.cursor_member().map(|m| m.id.clone()) {
                    toggle_select(app, &id);
                }
            }
            Some(KeyAction::SelectAllPage) => select_all_on_page(app),
            Some(KeyAction::ClearSelection) => clear_selection(app),
            Some(KeyAction::DeleteSelected) => delete_selected(app),
            Some(KeyAction::DeleteRow) => {
                if let Some(id) = app.cursor_member().map(|m| m.id.clone()) {
                    delete_by_id(app, &id);
                }
            }
            Some(KeyAction::EditRow) => begin_edit(app),
            Some(KeyAction::MoveUp) => {
                if app.cursor > 0 {
                    app.cursor -= 1;
                }
            }
            Some(KeyAction::MoveDown) => {
                if app.cursor + 1 < app.page_slice().len() {
                    app.cursor += 1;
                }
            }
            Some(KeyAction::FirstPage) => app.first_page(),
            Some(KeyAction::PrevPage) => app.prev_page(),
            Some(KeyAction::NextPage) => app.next_page(),
            Some(KeyAction::LastPage) => app.last_page(),
            Some(KeyAction::Ignore) | None => {}
        },
        InputMode::Search => match key.code {
            KeyCode::Enter => {
                // Filtering already happened on each keystroke; Enter just
                // leaves search mode with the query applied.
                apply_search(app);
                app.input_mode = InputMode::Normal;
            }
            KeyCode::Esc => {
                app.search_query.clear();
                apply_search(app);
                app.input_mode = InputMode::Normal;
            }
            KeyCode::Backspace => {
                app.search_query.pop();
                apply_search(app);
            }
            KeyCode::Char(c) => {
                app.search_query.push(c);
                apply_search(app);
            }
            _ => {}
        },
        InputMode::Edit => match key.code {
            KeyCode::Enter => save_edit(app),
            KeyCode::Esc => cancel_edit(app),
            KeyCode::Tab => {
                if let Some(buf) = app.editing.as_ref().and_then(|id| app.edit_buffers.get_mut(id)) {
                    buf.field = buf.field.next();
                }
            }
            KeyCode::Backspace => {
                if let Some(buf) = app.editing.as_ref().and_then(|id| app.edit_buffers.get_mut(id)) {
                    buf.field_mut().pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(buf) = app.editing.as_ref().and_then(|id| app.edit_buffers.get_mut(id)) {
                    buf.field_mut().push(c);
                }
            }
            _ => {}
        },
        InputMode::Help => match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('?') => {
                app.input_mode = InputMode::Normal;
            }
            _ => {}
        },
    }
    true
}

/// Add or remove one id from the selection set.
pub fn toggle_select(app: &mut AppState, id: &str) {
    if !app.selected.remove(id) {
        app.selected.insert(id.to_string());
    }
}

/// Header-checkbox behavior: if every row on the current page slice is
/// already selected, deselect exactly those rows; otherwise select the
/// missing ones. Compares against the live slice, so a short last page
/// toggles correctly.
pub fn select_all_on_page(app: &mut AppState) {
    let page_ids: Vec<String> = app.page_slice().iter().map(|m| m.id.clone()).collect();
    if page_ids.is_empty() {
        return;
    }
    let all_selected = page_ids.iter().all(|id| app.selected.contains(id));
    if all_selected {
        for id in &page_ids {
            app.selected.remove(id);
        }
    } else {
        for id in page_ids {
            app.selected.insert(id);
        }
    }
}

/// Empty the selection set.
pub fn clear_selection(app: &mut AppState) {
    app.selected.clear();
    app.push_notice("Selection cleared!");
}

/// Remove every selected record from the base collection, then clear the
/// selection.
pub fn delete_selected(app: &mut AppState) {
    let count = app
        .members_all
        .iter()
        .filter(|m| app.selected.contains(&m.id))
        .count();
    app.members_all.retain(|m| !app.selected.contains(&m.id));
    for id in &app.selected {
        app.edit_buffers.remove(id);
    }
    app.selected.clear();
    tracing::debug!(count, "deleted selected rows");
    apply_search(app);
    let noun = if count == 1 { "member" } else { "members" };
    app.push_notice(format!("Selected {noun} deleted successfully!"));
}

/// Remove one record by id. Deleting a missing id is a silent no-op, and
/// the single-row path emits no notice; only bulk delete does.
pub fn delete_by_id(app: &mut AppState, id: &str) {
    app.members_all.retain(|m| m.id != id);
    app.selected.remove(id);
    app.edit_buffers.remove(id);
    if app.editing.as_deref() == Some(id) {
        app.editing = None;
        app.input_mode = InputMode::Normal;
    }
    tracing::debug!(id, "deleted row");
    apply_search(app);
}

/// Switch the cursor row from viewing to editing. The edit buffer is
/// scoped to the record id; a buffer left over from an earlier
/// interrupted edit of the same row is reused as-is.
pub fn begin_edit(app: &mut AppState) {
    let Some(member) = app.cursor_member().cloned() else {
        return;
    };
    app.edit_buffers
        .entry(member.id.clone())
        .or_insert_with(|| EditBuffer::from_member(&member));
    if let Some(m) = app.members_all.iter_mut().find(|m| m.id == member.id) {
        m.is_editing = true;
    }
    app.editing = Some(member.id);
    app.input_mode = InputMode::Edit;
    apply_search(app);
}

/// Commit the focused row's buffered values into the record. A buffered
/// field left empty falls back to the record's existing value.
pub fn save_edit(app: &mut AppState) {
    let Some(id) = app.editing.take() else {
        return;
    };
    let Some(buf) = app.edit_buffers.remove(&id) else {
        app.input_mode = InputMode::Normal;
        return;
    };
    if let Some(m) = app.members_all.iter_mut().find(|m| m.id == id) {
        if !buf.name.is_empty() {
            m.name = buf.name;
        }
        if !buf.email.is_empty() {
            m.email = buf.email;
        }
        if !buf.role.is_empty() {
            m.role = buf.role;
        }
        m.is_editing = false;
    }
    app.input_mode = InputMode::Normal;
    tracing::debug!(id, "saved row edits");
    apply_search(app);
    app.push_notice("Updates saved successfully!");
}

/// Abandon the focused edit without committing.
pub fn cancel_edit(app: &mut AppState) {
    if let Some(id) = app.editing.take() {
        app.edit_buffers.remove(&id);
        if let Some(m) = app.members_all.iter_mut().find(|m| m.id == id) {
            m.is_editing = false;
        }
    }
    app.input_mode = InputMode::Normal;
    apply_search(app);
}
