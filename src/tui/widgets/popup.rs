//! Shared chrome for popup widgets.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::widgets::{Block, Borders, Clear};

use crate::tui::style::Styles;

/// Returns a centered rect of given percentage within `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(r);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}

/// Returns a rect of fixed size centered in `area`, shrunk to fit.
pub fn fixed_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

/// Clears `popup_area`, draws a bordered titled block and returns its inner area.
pub fn open_popup(frame: &mut Frame, popup_area: Rect, title: &str) -> Rect {
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Styles::popup_border())
        .style(Styles::default());
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);
    inner
}

/// Splits a popup's inner area into content and a one-line footer.
pub fn content_and_footer(inner: Rect) -> (Rect, Rect) {
    let chunks = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);
    (chunks[0], chunks[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_rect_centers_and_shrinks() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(fixed_rect(40, 10, area), Rect::new(30, 15, 40, 10));
        assert_eq!(fixed_rect(200, 50, area), area);
    }

    #[test]
    fn test_centered_rect_within_area() {
        let area = Rect::new(0, 0, 100, 50);
        let r = centered_rect(60, 50, area);
        assert_eq!(r.width, 60);
        assert_eq!(r.x, 20);
        assert!(r.y + r.height <= area.height);
    }
}
