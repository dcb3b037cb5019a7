//! Card view: a vertical list of record cards.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState};

use crate::controller::InteractionController;
use crate::gateway::RecordGateway;
use crate::record::Record;
use crate::tui::state::UiState;
use crate::tui::style::Styles;

/// Renders the displayed records as cards.
pub fn render_cards<G: RecordGateway>(
    frame: &mut Frame,
    area: Rect,
    state: &UiState,
    ctl: &InteractionController<G>,
) {
    let store = ctl.store();
    let items: Vec<ListItem> = store.display().into_iter().map(card).collect();

    let title = format!(" Records [{}] ", store.display_len());
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Styles::selected());

    let mut list_state = ListState::default();
    if store.display_len() > 0 {
        list_state.select(Some(state.cursor));
    }

    frame.render_widget(Clear, area);
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn card(record: &Record) -> ListItem<'static> {
    let tier = record.tier();
    let mut lines = vec![Line::from(vec![
        Span::styled(
            record.name.clone(),
            Styles::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  #{}", record.id), Styles::dim()),
        Span::raw("  "),
        Span::styled(format!("{} {}", record.rating, tier.label()), Styles::tier(tier)),
    ])];
    if !record.explanation.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("  {}", record.explanation),
            Styles::dim(),
        )));
    }
    if !record.powers.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("  Powers: ", Styles::key()),
            Span::raw(record.powers.join(", ")),
        ]));
    }
    lines.push(Line::from(""));
    ListItem::new(lines)
}
