//! Create/edit form popup.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::form::{FormBuffer, FormMode};
use crate::record::ListField;
use crate::tui::state::FormField;
use crate::tui::style::Styles;

use super::popup::{centered_rect, content_and_footer, open_popup};

/// Renders the open form buffer with `focused` highlighted.
pub fn render_form(frame: &mut Frame, area: Rect, buffer: &FormBuffer, focused: FormField) {
    let title = match buffer.mode {
        FormMode::Create => "New record".to_string(),
        FormMode::Edit(id) => format!("Edit record #{}", id),
    };
    let inner = open_popup(frame, centered_rect(70, 80, area), &title);
    let (content_area, footer_area) = content_and_footer(inner);

    let mut lines = Vec::new();
    for &field in FormField::all() {
        lines.push(field_line(field, field_value(buffer, field), field == focused));
        if let Some(list) = field.list() {
            lines.extend(list_lines(buffer, list));
        }
    }
    frame.render_widget(Paragraph::new(lines), content_area);

    let footer = Line::from(vec![
        Span::styled("Tab", Styles::key()),
        Span::styled(" next field  ", Styles::dim()),
        Span::styled("Enter", Styles::key()),
        Span::styled(" add item  ", Styles::dim()),
        Span::styled("Ctrl+S", Styles::key()),
        Span::styled(" save  ", Styles::dim()),
        Span::styled("Esc", Styles::key()),
        Span::styled(" cancel", Styles::dim()),
    ]);
    frame.render_widget(Paragraph::new(footer), footer_area);
}

fn field_value(buffer: &FormBuffer, field: FormField) -> String {
    let draft = &buffer.draft;
    match field {
        FormField::Name => draft.name.clone(),
        FormField::Explanation => draft.explanation.clone(),
        FormField::Rating => draft.rating.map(|r| r.to_string()).unwrap_or_default(),
        FormField::ImageRef => draft.image_ref.clone(),
        FormField::Power => buffer.pending(ListField::Powers).to_string(),
        FormField::Tip => buffer.pending(ListField::Tips).to_string(),
    }
}

fn field_line(field: FormField, value: String, focused: bool) -> Line<'static> {
    let (marker, value) = if focused {
        ("> ", format!("{}_", value))
    } else {
        ("  ", value)
    };
    let value_style = if focused {
        Styles::selected()
    } else {
        Styles::default()
    };
    Line::from(vec![
        Span::styled(marker, Styles::key()),
        Span::styled(format!("{:<13}", field.label()), Styles::key()),
        Span::styled(value, value_style),
    ])
}

fn list_lines(buffer: &FormBuffer, list: ListField) -> Vec<Line<'static>> {
    buffer
        .draft
        .list(list)
        .iter()
        .enumerate()
        .map(|(i, item)| {
            Line::from(vec![
                Span::styled(format!("{:>17}. ", i + 1), Styles::dim()),
                Span::raw(item.clone()),
            ])
        })
        .collect()
}
