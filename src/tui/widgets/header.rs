//! Header bar (mode, counts, sort, sync time) and bottom status line.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::controller::{InteractionController, ViewMode};
use crate::gateway::RecordGateway;
use crate::tui::state::{InputMode, UiState};
use crate::tui::style::{Styles, Theme};

/// Renders the header bar.
pub fn render_header<G: RecordGateway>(
    frame: &mut Frame,
    area: Rect,
    ctl: &InteractionController<G>,
) {
    let chunks = Layout::horizontal([
        Constraint::Length(10), // Title
        Constraint::Length(8),  // View mode
        Constraint::Min(20),    // Counts / search / sort
        Constraint::Length(30), // Sync status
    ])
    .split(area);

    let store = ctl.store();

    frame.render_widget(Paragraph::new(" dextable").style(Styles::header()), chunks[0]);

    let mode_str = match ctl.view_mode() {
        ViewMode::Cards => " CARDS ",
        ViewMode::Table => " TABLE ",
    };
    frame.render_widget(Paragraph::new(mode_str).style(Styles::header()), chunks[1]);

    let mut info = vec![Span::styled(
        format!("{}/{} records", store.display_len(), store.canonical().len()),
        Styles::header(),
    )];
    if !store.search_term().is_empty() {
        info.push(Span::styled(
            format!("  filter: {}", store.search_term()),
            Styles::header(),
        ));
    }
    if let Some(sort) = store.sort_directive() {
        info.push(Span::styled(
            format!("  sort: {}{}", sort.key.label(), sort.direction.arrow()),
            Styles::header(),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(info)).style(Styles::header()), chunks[2]);

    let (sync_text, sync_style) = if store.is_loading() {
        ("Loading...".to_string(), Styles::header())
    } else if let Some(error) = store.error() {
        (error.to_string(), Styles::error().bg(Theme::HEADER_BG))
    } else if let Some(at) = store.last_synced() {
        (format!("synced {}", at.format("%H:%M:%S")), Styles::header())
    } else {
        ("not loaded".to_string(), Styles::header())
    };
    frame.render_widget(Paragraph::new(sync_text).style(sync_style), chunks[3]);
}

/// Renders the bottom line: search input, the last status message or key hints.
pub fn render_status<G: RecordGateway>(
    frame: &mut Frame,
    area: Rect,
    state: &UiState,
    ctl: &InteractionController<G>,
) {
    let line = if state.input_mode == InputMode::Search {
        Line::from(vec![
            Span::styled("/", Styles::key()),
            Span::styled(format!("{}_", state.search_input), Styles::default()),
        ])
    } else if let Some(message) = &state.status_message {
        Line::from(Span::styled(message.clone(), Styles::default()))
    } else {
        let mut hints = vec![("?", "help"), ("/", "search"), ("v", "view"), ("n", "new")];
        if ctl.view_mode() == ViewMode::Table {
            hints.extend([("←→", "column"), ("s", "sort"), ("x", "hide"), ("<>", "move")]);
        }
        hints.push(("q", "quit"));
        Line::from(
            hints
                .into_iter()
                .flat_map(|(key, what)| {
                    [
                        Span::styled(key, Styles::key()),
                        Span::styled(format!(" {}  ", what), Styles::dim()),
                    ]
                })
                .collect::<Vec<_>>(),
        )
    };
    frame.render_widget(Paragraph::new(line), area);
}
