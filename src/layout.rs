//! Column layout: ordered descriptors with resize, reorder and visibility.
//!
//! The set of descriptors is fixed at construction (one per `ColumnKey`); the
//! layout only reorders, resizes and toggles them. Unknown keys are ignored.

use tracing::{debug, trace};

use crate::record::ColumnKey;

/// Narrowest width a column can be resized to, in layout units.
pub const MIN_COLUMN_WIDTH: u32 = 50;

/// Metadata for one table column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub key: ColumnKey,
    pub label: String,
    pub width: u32,
    pub visible: bool,
    pub sortable: bool,
}

impl ColumnDescriptor {
    pub fn new(key: ColumnKey) -> Self {
        Self {
            key,
            label: key.label().to_string(),
            width: key.default_width(),
            visible: true,
            sortable: key.is_sortable(),
        }
    }
}

/// Active resize drag: the column and the baseline captured at start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ResizeSession {
    key: ColumnKey,
    start_x: i32,
    baseline_width: u32,
}

#[derive(Debug, Clone)]
pub struct ColumnLayout {
    columns: Vec<ColumnDescriptor>,
    resize: Option<ResizeSession>,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl ColumnLayout {
    /// Layout with every column visible at its default width.
    pub fn new() -> Self {
        Self {
            columns: ColumnKey::all()
                .iter()
                .copied()
                .map(ColumnDescriptor::new)
                .collect(),
            resize: None,
        }
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    /// Visible columns in display order.
    pub fn visible(&self) -> impl Iterator<Item = &ColumnDescriptor> {
        self.columns.iter().filter(|c| c.visible)
    }

    pub fn get(&self, key: ColumnKey) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.key == key)
    }

    pub fn position(&self, key: ColumnKey) -> Option<usize> {
        self.columns.iter().position(|c| c.key == key)
    }

    /// Begins a resize of `key` at `pointer_x`.
    ///
    /// A session that was never ended is replaced. Returns `false` for an
    /// unknown key.
    pub fn resize_start(&mut self, key: ColumnKey, pointer_x: i32) -> bool {
        let Some(baseline_width) = self.get(key).map(|c| c.width) else {
            return false;
        };
        if let Some(stale) = self.resize.take() {
            debug!(column = ?stale.key, "replacing unterminated resize session");
        }
        self.resize = Some(ResizeSession {
            key,
            start_x: pointer_x,
            baseline_width,
        });
        true
    }

    /// Applies the pointer position to the column being resized.
    ///
    /// Returns the new width, or `None` when no resize is in progress.
    pub fn resize_track(&mut self, pointer_x: i32) -> Option<u32> {
        let session = self.resize?;
        let delta = i64::from(pointer_x) - i64::from(session.start_x);
        let width = (i64::from(session.baseline_width) + delta)
            .clamp(i64::from(MIN_COLUMN_WIDTH), i64::from(u32::MAX));
        let width = u32::try_from(width).unwrap_or(u32::MAX);
        let column = self.columns.iter_mut().find(|c| c.key == session.key)?;
        column.width = width;
        trace!(column = ?session.key, width, "resize");
        Some(width)
    }

    /// Ends the resize session, returning the column that was resized.
    pub fn resize_end(&mut self) -> Option<ColumnKey> {
        self.resize.take().map(|s| s.key)
    }

    pub fn is_resizing(&self) -> bool {
        self.resize.is_some()
    }

    /// Column currently being resized.
    pub fn resizing(&self) -> Option<ColumnKey> {
        self.resize.map(|s| s.key)
    }

    /// Moves `source` to the position currently held by `target`.
    ///
    /// Intervening columns shift by one. Returns `false` when nothing moved.
    pub fn drag_reorder(&mut self, source: ColumnKey, target: ColumnKey) -> bool {
        if source == target {
            return false;
        }
        let (Some(from), Some(to)) = (self.position(source), self.position(target)) else {
            return false;
        };
        let column = self.columns.remove(from);
        self.columns.insert(to, column);
        debug!(?source, ?target, from, to, "column moved");
        true
    }

    /// Flips visibility of `key`. Returns the new visibility.
    pub fn toggle_visible(&mut self, key: ColumnKey) -> Option<bool> {
        let column = self.columns.iter_mut().find(|c| c.key == key)?;
        column.visible = !column.visible;
        Some(column.visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(layout: &ColumnLayout) -> Vec<ColumnKey> {
        layout.columns().iter().map(|c| c.key).collect()
    }

    #[test]
    fn test_default_layout_has_one_descriptor_per_key() {
        let layout = ColumnLayout::new();
        assert_eq!(order(&layout), ColumnKey::all().to_vec());
        assert!(layout.columns().iter().all(|c| c.visible));
        assert!(!layout.get(ColumnKey::Powers).unwrap().sortable);
        assert_eq!(layout.get(ColumnKey::Name).unwrap().width, 150);
    }

    #[test]
    fn test_resize_three_phase() {
        let mut layout = ColumnLayout::new();
        assert!(layout.resize_start(ColumnKey::Name, 400));
        assert_eq!(layout.resize_track(430), Some(180));
        assert_eq!(layout.resize_track(390), Some(140));
        assert_eq!(layout.resize_end(), Some(ColumnKey::Name));
        assert_eq!(layout.get(ColumnKey::Name).unwrap().width, 140);
        assert_eq!(layout.get(ColumnKey::Id).unwrap().width, 80);
    }

    #[test]
    fn test_resize_floor() {
        let mut layout = ColumnLayout::new();
        layout.resize_start(ColumnKey::Id, 100);
        for x in [90, 0, -5000, i32::MIN, 60] {
            let width = layout.resize_track(x).unwrap();
            assert!(width >= MIN_COLUMN_WIDTH);
        }
        assert_eq!(layout.get(ColumnKey::Id).unwrap().width, 50);
    }

    #[test]
    fn test_stray_track_and_end_are_ignored() {
        let mut layout = ColumnLayout::new();
        assert_eq!(layout.resize_track(500), None);
        assert_eq!(layout.resize_end(), None);
        assert_eq!(layout.columns(), ColumnLayout::new().columns());
    }

    #[test]
    fn test_new_start_replaces_stale_session() {
        let mut layout = ColumnLayout::new();
        layout.resize_start(ColumnKey::Name, 0);
        layout.resize_start(ColumnKey::Rating, 10);
        assert_eq!(layout.resizing(), Some(ColumnKey::Rating));
        layout.resize_track(20);
        assert_eq!(layout.get(ColumnKey::Rating).unwrap().width, 130);
        assert_eq!(layout.get(ColumnKey::Name).unwrap().width, 150);
    }

    #[test]
    fn test_reorder_forward_and_back() {
        let mut layout = ColumnLayout::new();
        let original = order(&layout);

        assert!(layout.drag_reorder(ColumnKey::Id, ColumnKey::Explanation));
        assert_eq!(
            order(&layout),
            vec![
                ColumnKey::Name,
                ColumnKey::Explanation,
                ColumnKey::Id,
                ColumnKey::Rating,
                ColumnKey::Powers,
                ColumnKey::Tips
            ]
        );

        // Id is back at index 0 once dropped onto the column now there.
        assert!(layout.drag_reorder(ColumnKey::Id, ColumnKey::Name));
        assert_eq!(order(&layout), original);
    }

    #[test]
    fn test_reorder_is_permutation() {
        let mut layout = ColumnLayout::new();
        layout.drag_reorder(ColumnKey::Tips, ColumnKey::Id);
        layout.drag_reorder(ColumnKey::Name, ColumnKey::Powers);
        let mut keys = order(&layout);
        assert_eq!(keys.len(), ColumnKey::all().len());
        keys.sort_by_key(|k| ColumnKey::all().iter().position(|a| a == k));
        assert_eq!(keys, ColumnKey::all().to_vec());
    }

    #[test]
    fn test_reorder_same_key_is_noop() {
        let mut layout = ColumnLayout::new();
        assert!(!layout.drag_reorder(ColumnKey::Name, ColumnKey::Name));
        assert_eq!(order(&layout), ColumnKey::all().to_vec());
    }

    #[test]
    fn test_toggle_visible_keeps_order_and_width() {
        let mut layout = ColumnLayout::new();
        assert_eq!(layout.toggle_visible(ColumnKey::Explanation), Some(false));
        assert_eq!(layout.visible().count(), 5);
        assert_eq!(order(&layout), ColumnKey::all().to_vec());
        assert_eq!(layout.get(ColumnKey::Explanation).unwrap().width, 300);
        assert_eq!(layout.toggle_visible(ColumnKey::Explanation), Some(true));
    }
}
