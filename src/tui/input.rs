//! Input handling and keybindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::controller::{GestureOutcome, InteractionController, ViewMode};
use crate::gateway::RecordGateway;
use crate::record::RecordId;

use super::state::{FormField, InputMode, UiState};

/// Result of handling an input event.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// No action, continue.
    None,
    /// Quit the application.
    Quit,
    /// Reload the collection from the backend.
    Reload,
}

/// Handles key input and updates state.
pub fn handle_key<G: RecordGateway>(
    state: &mut UiState,
    ctl: &mut InteractionController<G>,
    key: KeyEvent,
) -> KeyAction {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return KeyAction::Quit;
    }
    if state.show_quit_confirm {
        return handle_quit_confirm(state, key);
    }
    if ctl.pending_delete().is_some() {
        handle_delete_confirm(state, ctl, key);
        return KeyAction::None;
    }
    let action = match state.input_mode {
        InputMode::Form => {
            handle_form_mode(state, ctl, key);
            KeyAction::None
        }
        InputMode::Search => {
            handle_search_mode(state, ctl, key);
            KeyAction::None
        }
        InputMode::Normal if state.show_help => {
            handle_help(state, key);
            KeyAction::None
        }
        InputMode::Normal if ctl.selected().is_some() => handle_detail(state, ctl, key),
        InputMode::Normal => handle_normal_mode(state, ctl, key),
    };
    state.clamp_cursor(ctl.store().display_len());
    action
}

fn handle_quit_confirm(state: &mut UiState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('y') => {
            state.show_quit_confirm = false;
            KeyAction::Quit
        }
        KeyCode::Esc | KeyCode::Char('n') => {
            state.show_quit_confirm = false;
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}

fn handle_delete_confirm<G: RecordGateway>(
    state: &mut UiState,
    ctl: &mut InteractionController<G>,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Enter | KeyCode::Char('y') => {
            let name = ctl.pending_delete().map(|r| r.name.clone()).unwrap_or_default();
            match ctl.confirm_delete() {
                Some(Ok(())) => state.set_status(format!("Deleted {}", name)),
                Some(Err(e)) => state.set_status(format!("Failed to delete {}: {}", name, e)),
                None => {}
            }
        }
        KeyCode::Esc | KeyCode::Char('n') => ctl.cancel_delete(),
        _ => {}
    }
}

fn handle_help(state: &mut UiState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => {
            state.show_help = false;
            state.help_scroll = 0;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.help_scroll = state.help_scroll.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.help_scroll = state.help_scroll.saturating_add(1);
        }
        _ => {}
    }
}

fn handle_detail<G: RecordGateway>(
    state: &mut UiState,
    ctl: &mut InteractionController<G>,
    key: KeyEvent,
) -> KeyAction {
    let Some(id) = ctl.selected().map(|r| r.id) else {
        return KeyAction::None;
    };
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => ctl.close_detail(),
        KeyCode::Char('e') => open_edit(state, ctl, id),
        KeyCode::Char('d') => {
            ctl.request_delete(id);
        }
        _ => {}
    }
    KeyAction::None
}

/// Handles keys in normal mode.
fn handle_normal_mode<G: RecordGateway>(
    state: &mut UiState,
    ctl: &mut InteractionController<G>,
    key: KeyEvent,
) -> KeyAction {
    let len = ctl.store().display_len();
    match key.code {
        KeyCode::Char('q') => state.show_quit_confirm = true,
        KeyCode::Char('?') => state.show_help = true,
        KeyCode::Char('r') => return KeyAction::Reload,
        KeyCode::Char('v') => {
            let mode = ctl.toggle_view();
            state.header_area = None;
            state.set_status(match mode {
                ViewMode::Cards => "Card view",
                ViewMode::Table => "Table view",
            });
        }
        KeyCode::Char('/') => state.input_mode = InputMode::Search,
        KeyCode::Esc if !state.search_input.is_empty() => {
            state.search_input.clear();
            ctl.search_input("");
            state.cursor = 0;
        }

        // Record navigation
        KeyCode::Up | KeyCode::Char('k') => state.cursor_up(1),
        KeyCode::Down | KeyCode::Char('j') => state.cursor_down(1, len),
        KeyCode::PageUp => state.cursor_up(20),
        KeyCode::PageDown => state.cursor_down(20, len),
        KeyCode::Home | KeyCode::Char('g') => state.cursor = 0,
        KeyCode::End | KeyCode::Char('G') => state.cursor = len.saturating_sub(1),
        KeyCode::Enter => {
            if let Some(id) = state.cursor_record(ctl) {
                ctl.select(id);
            }
        }

        // Record actions
        KeyCode::Char('n') => {
            ctl.open_create();
            state.form_field = FormField::Name;
            state.input_mode = InputMode::Form;
        }
        KeyCode::Char('e') => {
            if let Some(id) = state.cursor_record(ctl) {
                open_edit(state, ctl, id);
            }
        }
        KeyCode::Char('d') => {
            if let Some(id) = state.cursor_record(ctl) {
                ctl.request_delete(id);
            }
        }

        // Columns
        KeyCode::Left | KeyCode::Char('h') => {
            state.active_column = state.active_column.saturating_sub(1);
        }
        KeyCode::Right | KeyCode::Char('l') => {
            let last = ctl.layout().columns().len().saturating_sub(1);
            state.active_column = (state.active_column + 1).min(last);
        }
        KeyCode::Char('s') => {
            if let Some(key) = state.active_key(ctl)
                && !ctl.sort_click(key)
            {
                state.set_status(format!("{} is not sortable", key.label()));
            }
        }
        KeyCode::Char('x') => {
            if let Some(key) = state.active_key(ctl) {
                ctl.toggle_column(key);
            }
        }
        KeyCode::Char('<') | KeyCode::Char('>') => {
            let step = if key.code == KeyCode::Char('<') { -1 } else { 1 };
            if let Some(column) = state.active_key(ctl)
                && ctl.nudge_column(column, step)
                && let Some(pos) = ctl.layout().position(column)
            {
                state.active_column = pos;
            }
        }
        KeyCode::Char(c @ '1'..='9') => {
            let index = (c as usize) - ('1' as usize);
            if let Some(column) = ctl.layout().columns().get(index).map(|c| c.key) {
                state.active_column = index;
                if !ctl.sort_click(column) {
                    state.set_status(format!("{} is not sortable", column.label()));
                }
            }
        }
        _ => {}
    }
    KeyAction::None
}

fn open_edit<G: RecordGateway>(
    state: &mut UiState,
    ctl: &mut InteractionController<G>,
    id: RecordId,
) {
    if ctl.open_edit(id) {
        state.form_field = FormField::Name;
        state.input_mode = InputMode::Form;
    }
}

fn handle_search_mode<G: RecordGateway>(
    state: &mut UiState,
    ctl: &mut InteractionController<G>,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Enter | KeyCode::Esc => state.input_mode = InputMode::Normal,
        KeyCode::Backspace => {
            state.search_input.pop();
            ctl.search_input(&state.search_input);
            state.cursor = 0;
        }
        KeyCode::Char(c) => {
            state.search_input.push(c);
            ctl.search_input(&state.search_input);
            state.cursor = 0;
        }
        _ => {}
    }
}

fn handle_form_mode<G: RecordGateway>(
    state: &mut UiState,
    ctl: &mut InteractionController<G>,
    key: KeyEvent,
) {
    if !ctl.forms().is_open() {
        state.input_mode = InputMode::Normal;
        return;
    }
    match key.code {
        KeyCode::Esc => {
            ctl.close_form();
            state.input_mode = InputMode::Normal;
            return;
        }
        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            match ctl.submit_form() {
                Some(Ok(record)) => {
                    state.set_status(format!("Saved {}", record.name));
                    state.input_mode = InputMode::Normal;
                    if let Some(pos) = ctl.store().display_position(record.id) {
                        state.cursor = pos;
                    }
                }
                Some(Err(e)) => state.set_status(e.to_string()),
                None => state.input_mode = InputMode::Normal,
            }
            return;
        }
        KeyCode::Tab | KeyCode::Down => {
            state.form_field = state.form_field.next();
            return;
        }
        KeyCode::BackTab | KeyCode::Up => {
            state.form_field = state.form_field.prev();
            return;
        }
        _ => {}
    }

    let field = state.form_field;
    let Some(buffer) = ctl.forms_mut().buffer_mut() else {
        return;
    };
    if let Some(list) = field.list() {
        match key.code {
            KeyCode::Enter => {
                buffer.commit_pending(list);
            }
            KeyCode::Backspace if buffer.pending(list).is_empty() => {
                let len = buffer.draft.list(list).len();
                if len > 0 {
                    buffer.remove_list_item(list, len - 1);
                }
            }
            KeyCode::Backspace => {
                buffer.pending_mut(list).pop();
            }
            KeyCode::Char(c) => buffer.pending_mut(list).push(c),
            _ => {}
        }
        return;
    }

    if field == FormField::Rating {
        match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                let digit = i64::from(c.to_digit(10).unwrap_or(0));
                let current = buffer.draft.rating.unwrap_or(0);
                if current < 100 {
                    buffer.draft.rating = Some(current * 10 + digit);
                }
            }
            KeyCode::Backspace => {
                let rest = buffer.draft.rating.unwrap_or(0) / 10;
                buffer.draft.rating = (rest != 0).then_some(rest);
            }
            _ => {}
        }
        return;
    }

    let text = match field {
        FormField::Name => &mut buffer.draft.name,
        FormField::Explanation => &mut buffer.draft.explanation,
        _ => &mut buffer.draft.image_ref,
    };
    match key.code {
        KeyCode::Backspace => {
            text.pop();
        }
        KeyCode::Char(c) => text.push(c),
        KeyCode::Enter => state.form_field = field.next(),
        _ => {}
    }
}

/// Handles mouse input: header gestures in table view.
pub fn handle_mouse<G: RecordGateway>(
    state: &mut UiState,
    ctl: &mut InteractionController<G>,
    mouse: MouseEvent,
) {
    if ctl.view_mode() != ViewMode::Table || state.input_mode != InputMode::Normal {
        ctl.pointer_cancel();
        return;
    }
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            match state.header_units(mouse.column, mouse.row) {
                Some(x) => {
                    ctl.pointer_down(x);
                }
                None => {
                    ctl.pointer_cancel();
                }
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            ctl.pointer_move(state.units_from(mouse.column));
        }
        MouseEventKind::Up(MouseButton::Left) => {
            match ctl.pointer_up(state.units_from(mouse.column)) {
                GestureOutcome::Resized(key) => {
                    let width = ctl.layout().get(key).map(|c| c.width).unwrap_or(0);
                    state.set_status(format!("{} width {}", key.label(), width));
                }
                GestureOutcome::Reordered { source, target } => {
                    state.set_status(format!("Moved {} to {}", source.label(), target.label()));
                }
                GestureOutcome::Sorted(key) => {
                    if let Some(pos) = ctl.layout().position(key) {
                        state.active_column = pos;
                    }
                }
                GestureOutcome::None | GestureOutcome::Cancelled => {}
            }
        }
        _ => {}
    }
}
