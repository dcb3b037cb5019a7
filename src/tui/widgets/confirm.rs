//! Confirmation popups: quit and delete.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::record::Record;
use crate::tui::style::Styles;

use super::popup::{fixed_rect, open_popup};

/// Renders a centered quit confirmation popup.
pub fn render_quit_confirm(frame: &mut Frame, area: Rect) {
    let popup_width = (area.width * 50 / 100).clamp(40, 60);
    let inner = open_popup(frame, fixed_rect(popup_width, 7, area), "Exit dextable");

    let content = vec![
        Line::from(Span::styled("Are you sure you want to quit?", Styles::default())),
        Line::from(""),
        choice_line("Enter", "q", " → quit"),
        choice_line("Esc", "n", " → cancel"),
    ];
    frame.render_widget(Paragraph::new(content).alignment(Alignment::Center), inner);
}

/// Renders the delete confirmation popup for `record`.
pub fn render_delete_confirm(frame: &mut Frame, area: Rect, record: &Record) {
    let popup_width = (area.width * 50 / 100).clamp(40, 60);
    let inner = open_popup(frame, fixed_rect(popup_width, 7, area), "Delete record");

    let content = vec![
        Line::from(vec![
            Span::styled("Delete ", Styles::default()),
            Span::styled(record.name.clone(), Styles::error()),
            Span::styled(format!(" (#{})?", record.id), Styles::default()),
        ]),
        Line::from(""),
        choice_line("Enter", "y", " → delete"),
        choice_line("Esc", "n", " → keep"),
    ];
    frame.render_widget(Paragraph::new(content).alignment(Alignment::Center), inner);
}

fn choice_line(
    primary: &'static str,
    secondary: &'static str,
    what: &'static str,
) -> Line<'static> {
    Line::from(vec![
        Span::styled(primary, Styles::key()),
        Span::styled(" or ", Styles::dim()),
        Span::styled(secondary, Styles::key()),
        Span::styled(what, Styles::dim()),
    ])
}
