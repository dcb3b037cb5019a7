//! Detail popup for the selected record.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::controller::InteractionController;
use crate::gateway::RecordGateway;
use crate::record::Record;
use crate::tui::style::Styles;

use super::popup::{centered_rect, content_and_footer, open_popup};

/// Renders the selected record, if any.
pub fn render_detail<G: RecordGateway>(
    frame: &mut Frame,
    area: Rect,
    ctl: &InteractionController<G>,
) {
    let Some(record) = ctl.selected() else {
        return;
    };
    let inner = open_popup(
        frame,
        centered_rect(70, 70, area),
        &format!("{} #{}", record.name, record.id),
    );
    let (content_area, footer_area) = content_and_footer(inner);

    let paragraph = Paragraph::new(build_content(record)).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, content_area);

    let footer = Line::from(vec![
        Span::styled("e", Styles::key()),
        Span::styled(" edit  ", Styles::dim()),
        Span::styled("d", Styles::key()),
        Span::styled(" delete  ", Styles::dim()),
        Span::styled("Esc", Styles::key()),
        Span::styled(" close", Styles::dim()),
    ]);
    frame.render_widget(Paragraph::new(footer), footer_area);
}

fn build_content(record: &Record) -> Vec<Line<'static>> {
    let tier = record.tier();
    let mut lines = vec![
        field("Name", record.name.clone()),
        field("Name Origin", record.explanation.clone()),
        Line::from(vec![
            Span::styled(format!("{:<13}", "Rating"), Styles::key()),
            Span::styled(format!("{} ({})", record.rating, tier.label()), Styles::tier(tier)),
        ]),
    ];
    if !record.image_ref.is_empty() {
        lines.push(field("Image", record.image_ref.clone()));
    }
    lines.push(Line::from(""));
    lines.extend(list("Powers", &record.powers));
    lines.push(Line::from(""));
    lines.extend(list("Catching Tips", &record.tips));
    lines
}

fn field(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<13}", label), Styles::key()),
        Span::styled(value, Styles::default()),
    ])
}

fn list(label: &str, items: &[String]) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(label.to_string(), Styles::key()))];
    if items.is_empty() {
        lines.push(Line::from(Span::styled("  (none)", Styles::dim())));
    }
    lines.extend(
        items
            .iter()
            .map(|item| Line::from(Span::raw(format!("  • {}", item)))),
    );
    lines
}
