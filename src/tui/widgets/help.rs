//! Help popup with key bindings, scrollable.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::tui::style::Styles;

use super::popup::{content_and_footer, fixed_rect, open_popup};

/// Renders the help popup centered on screen with scroll support.
pub fn render_help(frame: &mut Frame, area: Rect, scroll: &mut usize) {
    let popup_width = (area.width * 60 / 100).clamp(40, 80);
    let popup_height = (area.height * 80 / 100).clamp(10, 30);
    let inner = open_popup(frame, fixed_rect(popup_width, popup_height, area), "dextable Help");
    let (content_area, footer_area) = content_and_footer(inner);

    let content = help_lines();
    let max_scroll = content.len().saturating_sub(content_area.height as usize);
    if *scroll > max_scroll {
        *scroll = max_scroll;
    }

    let paragraph = Paragraph::new(content)
        .wrap(Wrap { trim: false })
        .scroll((*scroll as u16, 0))
        .style(Styles::default());
    frame.render_widget(paragraph, content_area);

    let scroll_info = if max_scroll > 0 {
        format!(" [{}/{}]", *scroll + 1, max_scroll + 1)
    } else {
        String::new()
    };
    let footer = Line::from(vec![
        Span::styled("Press ", Styles::dim()),
        Span::styled("?", Styles::key()),
        Span::styled(" or ", Styles::dim()),
        Span::styled("Esc", Styles::key()),
        Span::styled(" to close, ", Styles::dim()),
        Span::styled("↑↓", Styles::key()),
        Span::styled(" to scroll", Styles::dim()),
        Span::styled(scroll_info, Styles::dim()),
    ]);
    frame.render_widget(Paragraph::new(footer), footer_area);
}

fn section(title: &'static str) -> Line<'static> {
    Line::from(Span::styled(title, Styles::key()))
}

fn binding(keys: &'static str, what: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<12}", keys), Styles::key()),
        Span::raw(what),
    ])
}

fn help_lines() -> Vec<Line<'static>> {
    vec![
        section("Records"),
        binding("↑↓ j k", "move cursor"),
        binding("PgUp PgDn", "move by page"),
        binding("Enter", "open detail"),
        binding("n", "new record"),
        binding("e", "edit record"),
        binding("d", "delete record (asks first)"),
        binding("r", "reload from backend"),
        binding("/", "search name, origin, powers, tips"),
        binding("Esc", "clear search"),
        binding("v", "switch cards / table"),
        Line::from(""),
        section("Table columns"),
        binding("← → h l", "focus column"),
        binding("s", "sort focused column (again: reverse)"),
        binding("1-6", "sort by column position"),
        binding("x", "hide / show focused column"),
        binding("< >", "move focused column"),
        binding("mouse", "drag header grip │ to resize"),
        binding("", "drag header label to reorder"),
        binding("", "click header label to sort"),
        Line::from(""),
        section("Form"),
        binding("Tab S-Tab", "next / previous field"),
        binding("Enter", "add power or tip"),
        binding("Backspace", "on empty power/tip: remove last"),
        binding("Ctrl+S", "save"),
        binding("Esc", "discard"),
        Line::from(""),
        section("Rating tiers"),
        Line::from("  95+ Legendary, 90+ Very Strong, 85+ Strong,"),
        Line::from("  80+ Above Average, 70+ Average, below: Below Average"),
        Line::from(""),
        binding("?", "toggle this help"),
        binding("q", "quit"),
    ]
}
