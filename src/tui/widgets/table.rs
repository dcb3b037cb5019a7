//! Table view: one row per displayed record, header driven by the column layout.

use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Clear, Row, Table, TableState};

use crate::controller::InteractionController;
use crate::gateway::RecordGateway;
use crate::layout::ColumnDescriptor;
use crate::record::{ColumnKey, Record};
use crate::tui::state::{CELL_UNITS, UiState};
use crate::tui::style::Styles;
use crate::view::SortDirective;

/// Renders the record table and records the header position for mouse input.
pub fn render_table<G: RecordGateway>(
    frame: &mut Frame,
    area: Rect,
    state: &mut UiState,
    ctl: &InteractionController<G>,
) {
    let store = ctl.store();
    let layout = ctl.layout();
    let active = state.active_key(ctl);
    let sort = store.sort_directive();

    let columns: Vec<&ColumnDescriptor> = layout.visible().collect();
    let widths: Vec<Constraint> = columns
        .iter()
        .map(|c| Constraint::Length(cells(c.width)))
        .collect();

    let headers: Vec<Span> = columns
        .iter()
        .map(|c| {
            let style = if Some(c.key) == active {
                Styles::active_column()
            } else {
                Styles::table_header()
            };
            Span::styled(header_label(c, sort), style)
        })
        .collect();
    let header = Row::new(headers).style(Styles::table_header()).height(1);

    let rows: Vec<Row> = store
        .display()
        .into_iter()
        .map(|record| Row::new(columns.iter().map(|c| cell(record, c.key))).height(1))
        .collect();

    let hidden = layout.columns().len() - columns.len();
    let title = if hidden > 0 {
        format!(" Records [{}] ({} hidden) ", store.display_len(), hidden)
    } else {
        format!(" Records [{}] ", store.display_len())
    };

    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    state.header_area = Some(Rect::new(inner.x, inner.y, inner.width, 1));

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .column_spacing(0)
        .row_highlight_style(Styles::selected());

    let mut table_state = TableState::default();
    if store.display_len() > 0 {
        table_state.select(Some(state.cursor));
    }

    frame.render_widget(Clear, area);
    frame.render_stateful_widget(table, area, &mut table_state);
}

/// Terminal cells for a width in layout units.
fn cells(width: u32) -> u16 {
    u16::try_from(width / CELL_UNITS as u32).unwrap_or(u16::MAX)
}

/// Header label padded to the column width, with the sort arrow and a resize grip.
fn header_label(column: &ColumnDescriptor, sort: Option<SortDirective>) -> String {
    let arrow = match sort {
        Some(s) if s.key == column.key => s.direction.arrow(),
        _ => "",
    };
    let text = format!("{}{}", column.label, arrow);
    let room = usize::from(cells(column.width)).saturating_sub(1);
    let text: String = text.chars().take(room).collect();
    format!("{:<room$}│", text)
}

fn cell(record: &Record, key: ColumnKey) -> Span<'static> {
    let text = record.cell(key).display();
    if key == ColumnKey::Rating {
        Span::styled(text, Styles::tier(record.tier()))
    } else {
        Span::raw(text)
    }
}
