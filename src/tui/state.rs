//! Terminal-side UI state that is not part of the table core.

use ratatui::layout::Rect;

use crate::controller::InteractionController;
use crate::gateway::RecordGateway;
use crate::record::{ColumnKey, ListField, RecordId};

/// Layout units per terminal cell.
pub const CELL_UNITS: i32 = 10;

/// Ticks a status message stays on screen.
pub const STATUS_TICKS: u16 = 12;

/// Input mode for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Search,
    Form,
}

/// Focusable fields of the create/edit form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Name,
    Explanation,
    Rating,
    ImageRef,
    Power,
    Tip,
}

impl FormField {
    pub fn all() -> &'static [FormField] {
        &[
            FormField::Name,
            FormField::Explanation,
            FormField::Rating,
            FormField::ImageRef,
            FormField::Power,
            FormField::Tip,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Name *",
            FormField::Explanation => "Name Origin",
            FormField::Rating => "Rating *",
            FormField::ImageRef => "Image",
            FormField::Power => "Add power",
            FormField::Tip => "Add tip",
        }
    }

    /// The tag list fed by this field, if any.
    pub fn list(&self) -> Option<ListField> {
        match self {
            FormField::Power => Some(ListField::Powers),
            FormField::Tip => Some(ListField::Tips),
            _ => None,
        }
    }

    pub fn next(&self) -> FormField {
        let all = Self::all();
        let i = all.iter().position(|f| f == self).unwrap_or(0);
        all[(i + 1) % all.len()]
    }

    pub fn prev(&self) -> FormField {
        let all = Self::all();
        let i = all.iter().position(|f| f == self).unwrap_or(0);
        all[(i + all.len() - 1) % all.len()]
    }
}

#[derive(Debug, Default)]
pub struct UiState {
    pub input_mode: InputMode,
    /// Position of the highlighted record in the display sequence.
    pub cursor: usize,
    /// Index into the layout's columns of the keyboard-focused column.
    pub active_column: usize,
    pub form_field: FormField,
    /// Search box text as typed; the store keeps the normalized term.
    pub search_input: String,
    pub show_help: bool,
    pub help_scroll: usize,
    pub show_quit_confirm: bool,
    pub status_message: Option<String>,
    status_age: u16,
    /// Screen area of the table header row, set by render for mouse hit-testing.
    pub header_area: Option<Rect>,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps the cursor inside a display sequence of `len` records.
    pub fn clamp_cursor(&mut self, len: usize) {
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }

    pub fn cursor_up(&mut self, n: usize) {
        self.cursor = self.cursor.saturating_sub(n);
    }

    pub fn cursor_down(&mut self, n: usize, len: usize) {
        self.cursor = self.cursor.saturating_add(n);
        self.clamp_cursor(len);
    }

    /// Id of the record under the cursor.
    pub fn cursor_record<G: RecordGateway>(
        &self,
        ctl: &InteractionController<G>,
    ) -> Option<RecordId> {
        ctl.store().display_at(self.cursor).map(|r| r.id)
    }

    /// Key of the keyboard-focused column.
    pub fn active_key<G: RecordGateway>(
        &self,
        ctl: &InteractionController<G>,
    ) -> Option<ColumnKey> {
        ctl.layout().columns().get(self.active_column).map(|c| c.key)
    }

    /// Header x offset in layout units, if `(column, row)` lies on the header row.
    pub fn header_units(&self, column: u16, row: u16) -> Option<i32> {
        let area = self.header_area?;
        let inside = row == area.y && column >= area.x && column < area.x + area.width;
        inside.then(|| self.units_from(column))
    }

    /// Converts a screen column to layout units relative to the header start.
    pub fn units_from(&self, column: u16) -> i32 {
        let origin = self.header_area.map(|a| a.x).unwrap_or(0);
        (i32::from(column) - i32::from(origin)) * CELL_UNITS
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_age = 0;
    }

    /// Ages the status message, dropping it after `STATUS_TICKS` ticks.
    pub fn tick(&mut self) {
        if self.status_message.is_none() {
            return;
        }
        self.status_age += 1;
        if self.status_age >= STATUS_TICKS {
            self.status_message = None;
            self.status_age = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_field_cycle() {
        assert_eq!(FormField::Name.next(), FormField::Explanation);
        assert_eq!(FormField::Tip.next(), FormField::Name);
        assert_eq!(FormField::Name.prev(), FormField::Tip);
        assert_eq!(FormField::Power.list(), Some(ListField::Powers));
        assert_eq!(FormField::Rating.list(), None);
    }

    #[test]
    fn test_cursor_clamping() {
        let mut state = UiState::new();
        state.cursor_down(10, 3);
        assert_eq!(state.cursor, 2);
        state.clamp_cursor(0);
        assert_eq!(state.cursor, 0);
        state.cursor_up(5);
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn test_status_expires_after_ticks() {
        let mut state = UiState::new();
        state.set_status("Saved");
        for _ in 1..STATUS_TICKS {
            state.tick();
        }
        assert_eq!(state.status_message.as_deref(), Some("Saved"));
        state.tick();
        assert_eq!(state.status_message, None);
    }

    #[test]
    fn test_header_units() {
        let mut state = UiState::new();
        assert_eq!(state.header_units(5, 1), None);

        state.header_area = Some(Rect::new(1, 2, 40, 1));
        assert_eq!(state.header_units(1, 2), Some(0));
        assert_eq!(state.header_units(9, 2), Some(80));
        assert_eq!(state.header_units(9, 3), None);
        assert_eq!(state.header_units(41, 2), None);
        assert_eq!(state.units_from(0), -10);
    }
}
