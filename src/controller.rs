//! Interaction controller: the single owner of table UI state.
//!
//! Translates header pointer gestures into column resize/reorder/sort and
//! routes selection, search, form and delete actions to the store and the
//! form manager.

use tracing::{debug, info};

use crate::error::StoreError;
use crate::form::{FormBufferManager, FormMode};
use crate::gateway::RecordGateway;
use crate::layout::ColumnLayout;
use crate::record::{ColumnKey, Record, RecordId};
use crate::store::RecordStore;

/// Width of the resize grip at the right edge of each header cell, in layout units.
pub const RESIZE_HANDLE_UNITS: i32 = 10;

/// Horizontal travel after which a header press becomes a column drag.
pub const DRAG_THRESHOLD_UNITS: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Cards,
    Table,
}

/// What the pointer is over in the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderHit {
    Label(ColumnKey),
    ResizeHandle(ColumnKey),
}

impl HeaderHit {
    pub fn key(&self) -> ColumnKey {
        match self {
            HeaderHit::Label(key) | HeaderHit::ResizeHandle(key) => *key,
        }
    }
}

/// Locates `x` (layout units from the left edge of the table) in the header.
pub fn hit_test(layout: &ColumnLayout, x: i32) -> Option<HeaderHit> {
    if x < 0 {
        return None;
    }
    let x = i64::from(x);
    let mut left = 0i64;
    for column in layout.visible() {
        let right = left + i64::from(column.width);
        if x < right {
            return Some(if x >= right - i64::from(RESIZE_HANDLE_UNITS) {
                HeaderHit::ResizeHandle(column.key)
            } else {
                HeaderHit::Label(column.key)
            });
        }
        left = right;
    }
    None
}

/// Pointer session in progress. The resize baseline itself lives in the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gesture {
    Resize,
    Drag {
        source: ColumnKey,
        start_x: i32,
        moved: bool,
    },
}

/// Result of releasing (or cancelling) a header gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    None,
    Resized(ColumnKey),
    Reordered { source: ColumnKey, target: ColumnKey },
    Sorted(ColumnKey),
    Cancelled,
}

pub struct InteractionController<G: RecordGateway> {
    store: RecordStore<G>,
    layout: ColumnLayout,
    forms: FormBufferManager,
    gesture: Option<Gesture>,
    selected: Option<RecordId>,
    view_mode: ViewMode,
    pending_delete: Option<RecordId>,
}

impl<G: RecordGateway> InteractionController<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            store: RecordStore::new(gateway),
            layout: ColumnLayout::new(),
            forms: FormBufferManager::new(),
            gesture: None,
            selected: None,
            view_mode: ViewMode::default(),
            pending_delete: None,
        }
    }

    pub fn store(&self) -> &RecordStore<G> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut RecordStore<G> {
        &mut self.store
    }

    pub fn layout(&self) -> &ColumnLayout {
        &self.layout
    }

    pub fn forms(&self) -> &FormBufferManager {
        &self.forms
    }

    pub fn forms_mut(&mut self) -> &mut FormBufferManager {
        &mut self.forms
    }

    /// Reloads the collection from the backend.
    pub fn refresh(&mut self) -> Result<usize, StoreError> {
        let result = self.store.load();
        if let Some(id) = self.selected
            && self.store.get(id).is_none()
        {
            self.selected = None;
        }
        result
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn toggle_view(&mut self) -> ViewMode {
        self.view_mode = match self.view_mode {
            ViewMode::Cards => ViewMode::Table,
            ViewMode::Table => ViewMode::Cards,
        };
        self.pointer_cancel();
        self.view_mode
    }

    /// Opens the detail view of `id`. Unknown ids are ignored.
    pub fn select(&mut self, id: RecordId) -> bool {
        if self.store.get(id).is_none() {
            return false;
        }
        self.selected = Some(id);
        true
    }

    pub fn close_detail(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&Record> {
        self.selected.and_then(|id| self.store.get(id))
    }

    pub fn search_input(&mut self, term: &str) {
        self.store.search(term);
    }

    pub fn sort_click(&mut self, key: ColumnKey) -> bool {
        self.store.sort_by(key)
    }

    pub fn toggle_column(&mut self, key: ColumnKey) -> Option<bool> {
        self.layout.toggle_visible(key)
    }

    /// Moves `key` one step left (`-1`) or right (`1`) in the column order.
    pub fn nudge_column(&mut self, key: ColumnKey, step: isize) -> bool {
        let Some(from) = self.layout.position(key) else {
            return false;
        };
        let Some(to) = from.checked_add_signed(step) else {
            return false;
        };
        match self.layout.columns().get(to).map(|c| c.key) {
            Some(target) => self.layout.drag_reorder(key, target),
            None => false,
        }
    }

    /// Starts a header gesture at `x`. Any unterminated gesture is ended first.
    pub fn pointer_down(&mut self, x: i32) -> Option<HeaderHit> {
        if self.gesture.is_some() {
            debug!("ending unterminated gesture");
            self.pointer_cancel();
        }
        let hit = hit_test(&self.layout, x)?;
        self.gesture = match hit {
            HeaderHit::ResizeHandle(key) => {
                self.layout.resize_start(key, x);
                Some(Gesture::Resize)
            }
            HeaderHit::Label(source) => Some(Gesture::Drag {
                source,
                start_x: x,
                moved: false,
            }),
        };
        Some(hit)
    }

    pub fn pointer_move(&mut self, x: i32) {
        match &mut self.gesture {
            Some(Gesture::Resize) => {
                self.layout.resize_track(x);
            }
            Some(Gesture::Drag { start_x, moved, .. }) => {
                let distance = i64::from(x) - i64::from(*start_x);
                if distance.abs() >= i64::from(DRAG_THRESHOLD_UNITS) {
                    *moved = true;
                }
            }
            None => {}
        }
    }

    /// Completes the gesture at `x`.
    ///
    /// A resize ends, a moved drag drops onto the column under the pointer, an
    /// unmoved press counts as a click on a sortable header.
    pub fn pointer_up(&mut self, x: i32) -> GestureOutcome {
        match self.gesture.take() {
            Some(Gesture::Resize) => match self.layout.resize_end() {
                Some(key) => GestureOutcome::Resized(key),
                None => GestureOutcome::None,
            },
            Some(Gesture::Drag {
                source,
                moved: true,
                ..
            }) => {
                let target = hit_test(&self.layout, x).map(|h| h.key());
                if let Some(target) = target
                    && self.layout.drag_reorder(source, target)
                {
                    GestureOutcome::Reordered { source, target }
                } else {
                    GestureOutcome::None
                }
            }
            Some(Gesture::Drag { source, .. }) => {
                if self.store.sort_by(source) {
                    GestureOutcome::Sorted(source)
                } else {
                    GestureOutcome::None
                }
            }
            None => GestureOutcome::None,
        }
    }

    /// Abandons the current gesture, e.g. when the pointer leaves the window.
    pub fn pointer_cancel(&mut self) -> GestureOutcome {
        match self.gesture.take() {
            Some(Gesture::Resize) => {
                self.layout.resize_end();
                GestureOutcome::Cancelled
            }
            Some(Gesture::Drag { .. }) => GestureOutcome::Cancelled,
            None => GestureOutcome::None,
        }
    }

    pub fn has_gesture(&self) -> bool {
        self.gesture.is_some()
    }

    pub fn open_create(&mut self) {
        self.forms.open_create();
    }

    /// Opens the edit form for `id`. Unknown ids are ignored.
    pub fn open_edit(&mut self, id: RecordId) -> bool {
        match self.store.get(id) {
            Some(record) => {
                self.forms.open_edit(record);
                true
            }
            None => false,
        }
    }

    pub fn close_form(&mut self) {
        self.forms.close();
    }

    /// Submits the open form. A successful edit also closes the detail view.
    pub fn submit_form(&mut self) -> Option<Result<Record, StoreError>> {
        let mode = self.forms.buffer()?.mode;
        let result = self.forms.submit(&mut self.store)?;
        if result.is_ok() && matches!(mode, FormMode::Edit(_)) {
            self.close_detail();
        }
        Some(result)
    }

    /// Asks for confirmation before deleting `id`.
    pub fn request_delete(&mut self, id: RecordId) -> bool {
        if self.store.get(id).is_none() {
            return false;
        }
        self.pending_delete = Some(id);
        true
    }

    /// Record awaiting delete confirmation.
    pub fn pending_delete(&self) -> Option<&Record> {
        self.pending_delete.and_then(|id| self.store.get(id))
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Deletes the record awaiting confirmation.
    pub fn confirm_delete(&mut self) -> Option<Result<(), StoreError>> {
        let id = self.pending_delete.take()?;
        let result = self.store.delete(id);
        if result.is_ok() {
            info!(id, "deleted after confirmation");
            if self.selected == Some(id) {
                self.selected = None;
            }
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::{GatewayCall, MemoryGateway};
    use crate::layout::MIN_COLUMN_WIDTH;
    use crate::record::ListField;
    use crate::view::SortDirection;

    fn controller() -> InteractionController<MemoryGateway> {
        let mut c = InteractionController::new(MemoryGateway::with_samples());
        c.refresh().unwrap();
        c
    }

    // Default widths: Id 0..80, Name 80..230, Explanation 230..530, Rating 530..650.

    #[test]
    fn test_hit_test_regions() {
        let layout = ColumnLayout::new();
        assert_eq!(hit_test(&layout, 0), Some(HeaderHit::Label(ColumnKey::Id)));
        assert_eq!(
            hit_test(&layout, 75),
            Some(HeaderHit::ResizeHandle(ColumnKey::Id))
        );
        assert_eq!(hit_test(&layout, 80), Some(HeaderHit::Label(ColumnKey::Name)));
        assert_eq!(hit_test(&layout, -1), None);
        assert_eq!(hit_test(&layout, 10_000), None);
    }

    #[test]
    fn test_hit_test_skips_hidden_columns() {
        let mut layout = ColumnLayout::new();
        layout.toggle_visible(ColumnKey::Id);
        assert_eq!(hit_test(&layout, 0), Some(HeaderHit::Label(ColumnKey::Name)));
    }

    #[test]
    fn test_resize_gesture() {
        let mut c = controller();
        assert_eq!(
            c.pointer_down(225),
            Some(HeaderHit::ResizeHandle(ColumnKey::Name))
        );
        c.pointer_move(265);
        assert_eq!(c.layout().get(ColumnKey::Name).unwrap().width, 190);
        c.pointer_move(0);
        assert_eq!(
            c.layout().get(ColumnKey::Name).unwrap().width,
            MIN_COLUMN_WIDTH
        );
        assert_eq!(c.pointer_up(0), GestureOutcome::Resized(ColumnKey::Name));
        assert!(!c.layout().is_resizing());

        // Moves after release change nothing.
        c.pointer_move(500);
        assert_eq!(
            c.layout().get(ColumnKey::Name).unwrap().width,
            MIN_COLUMN_WIDTH
        );
    }

    #[test]
    fn test_lost_release_does_not_leak_session() {
        let mut c = controller();
        c.pointer_down(225);
        c.pointer_move(245);
        // Release happened outside the window; the next press starts fresh.
        assert_eq!(c.pointer_down(0), Some(HeaderHit::Label(ColumnKey::Id)));
        assert!(!c.layout().is_resizing());
        c.pointer_move(1000);
        assert_eq!(c.layout().get(ColumnKey::Name).unwrap().width, 170);

        assert_eq!(c.pointer_cancel(), GestureOutcome::Cancelled);
        assert!(!c.has_gesture());
    }

    #[test]
    fn test_click_sorts_and_toggles() {
        let mut c = controller();
        c.pointer_down(600);
        assert_eq!(c.pointer_up(602), GestureOutcome::Sorted(ColumnKey::Rating));
        c.pointer_down(600);
        c.pointer_up(600);
        let directive = c.store().sort_directive().unwrap();
        assert_eq!(directive.key, ColumnKey::Rating);
        assert_eq!(directive.direction, SortDirection::Descending);
        assert_eq!(c.store().display()[0].name, "Mewtwo");
    }

    #[test]
    fn test_click_on_list_column_does_not_sort() {
        let mut c = controller();
        c.pointer_down(700);
        assert_eq!(c.pointer_up(700), GestureOutcome::None);
        assert!(c.store().sort_directive().is_none());
    }

    #[test]
    fn test_drag_reorders() {
        let mut c = controller();
        c.pointer_down(10);
        c.pointer_move(300);
        assert_eq!(
            c.pointer_up(300),
            GestureOutcome::Reordered {
                source: ColumnKey::Id,
                target: ColumnKey::Explanation
            }
        );
        assert_eq!(c.layout().position(ColumnKey::Id), Some(2));
        assert!(c.store().sort_directive().is_none());
    }

    #[test]
    fn test_extreme_pointer_coordinates() {
        let mut c = controller();
        c.pointer_down(10);
        c.pointer_move(i32::MIN);
        c.pointer_move(i32::MAX);
        assert_eq!(c.pointer_up(i32::MIN), GestureOutcome::None);
        assert_eq!(c.layout().position(ColumnKey::Id), Some(0));

        c.pointer_down(225);
        c.pointer_move(i32::MIN);
        assert_eq!(
            c.layout().get(ColumnKey::Name).unwrap().width,
            MIN_COLUMN_WIDTH
        );
        c.pointer_move(i32::MAX);
        assert_eq!(c.pointer_up(i32::MAX), GestureOutcome::Resized(ColumnKey::Name));

        assert_eq!(c.pointer_down(i32::MIN), None);
        assert!(!c.has_gesture());
    }

    #[test]
    fn test_nudge_column() {
        let mut c = controller();
        assert!(c.nudge_column(ColumnKey::Name, -1));
        assert_eq!(c.layout().position(ColumnKey::Name), Some(0));
        assert!(!c.nudge_column(ColumnKey::Name, -1));
        assert!(!c.nudge_column(ColumnKey::Tips, 1));
    }

    #[test]
    fn test_edit_flow_closes_detail() {
        let mut c = controller();
        assert!(c.select(2));
        assert!(c.open_edit(2));
        c.forms_mut()
            .buffer_mut()
            .unwrap()
            .add_list_item(ListField::Tips, "Bring burn heal");
        let updated = c.submit_form().unwrap().unwrap();
        assert!(updated.tips.contains(&"Bring burn heal".to_string()));
        assert!(c.selected().is_none());
        assert!(!c.forms().is_open());
    }

    #[test]
    fn test_create_flow() {
        let mut c = controller();
        c.open_create();
        let b = c.forms_mut().buffer_mut().unwrap();
        b.draft.name = "Eevee".to_string();
        b.draft.rating = Some(75);
        let created = c.submit_form().unwrap().unwrap();
        assert!(c.store().get(created.id).is_some());
        assert!(c.submit_form().is_none());
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut c = controller();
        c.select(1);
        assert!(c.request_delete(1));
        assert_eq!(c.pending_delete().unwrap().id, 1);
        assert!(
            !c.store()
                .gateway()
                .calls()
                .contains(&GatewayCall::Delete(1))
        );

        c.cancel_delete();
        assert!(c.confirm_delete().is_none());
        assert!(c.store().get(1).is_some());

        c.request_delete(1);
        c.confirm_delete().unwrap().unwrap();
        assert!(c.store().get(1).is_none());
        assert!(c.selected().is_none());
    }

    #[test]
    fn test_toggle_view_and_select_unknown() {
        let mut c = controller();
        assert_eq!(c.view_mode(), ViewMode::Cards);
        assert_eq!(c.toggle_view(), ViewMode::Table);
        assert!(!c.select(999));
        assert!(!c.open_edit(999));
        assert!(!c.request_delete(999));
    }

    #[test]
    fn test_search_input_routes_to_store() {
        let mut c = controller();
        c.search_input("SHADOW");
        let names: Vec<&str> = c.store().display().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Gengar"]);
    }
}
