//! Main rendering logic for TUI.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use crate::controller::{InteractionController, ViewMode};
use crate::gateway::RecordGateway;

use super::state::{InputMode, UiState};
use super::widgets::{
    render_cards, render_delete_confirm, render_detail, render_form, render_header, render_help,
    render_quit_confirm, render_status, render_table,
};

/// Main render function.
pub fn render<G: RecordGateway>(
    frame: &mut Frame,
    state: &mut UiState,
    ctl: &InteractionController<G>,
) {
    let area = frame.area();

    let chunks = Layout::vertical([
        Constraint::Length(1), // Header
        Constraint::Min(3),    // Content
        Constraint::Length(1), // Status / search line
    ])
    .split(area);

    render_header(frame, chunks[0], ctl);
    render_content(frame, chunks[1], state, ctl);
    render_status(frame, chunks[2], state, ctl);

    // Popups, in overlay order
    if ctl.selected().is_some() && state.input_mode != InputMode::Form {
        render_detail(frame, area, ctl);
    }

    if state.input_mode == InputMode::Form
        && let Some(buffer) = ctl.forms().buffer()
    {
        render_form(frame, area, buffer, state.form_field);
    }

    if let Some(record) = ctl.pending_delete() {
        render_delete_confirm(frame, area, record);
    }

    if state.show_help {
        render_help(frame, area, &mut state.help_scroll);
    }

    if state.show_quit_confirm {
        render_quit_confirm(frame, area);
    }
}

fn render_content<G: RecordGateway>(
    frame: &mut Frame,
    area: Rect,
    state: &mut UiState,
    ctl: &InteractionController<G>,
) {
    match ctl.view_mode() {
        ViewMode::Cards => {
            state.header_area = None;
            render_cards(frame, area, state, ctl);
        }
        ViewMode::Table => render_table(frame, area, state, ctl),
    }
}
