//! Create/edit form buffers.

use tracing::debug;

use crate::error::StoreError;
use crate::gateway::RecordGateway;
use crate::record::{ListField, Record, RecordDraft, RecordId};
use crate::store::RecordStore;

/// Which flow a buffer belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(RecordId),
}

/// Uncommitted form state: a draft record plus the two tag-entry scratch fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormBuffer {
    pub mode: FormMode,
    pub draft: RecordDraft,
    pub pending_power: String,
    pub pending_tip: String,
}

impl FormBuffer {
    fn empty() -> Self {
        Self {
            mode: FormMode::Create,
            draft: RecordDraft::default(),
            pending_power: String::new(),
            pending_tip: String::new(),
        }
    }

    pub fn pending(&self, field: ListField) -> &str {
        match field {
            ListField::Powers => &self.pending_power,
            ListField::Tips => &self.pending_tip,
        }
    }

    pub fn pending_mut(&mut self, field: ListField) -> &mut String {
        match field {
            ListField::Powers => &mut self.pending_power,
            ListField::Tips => &mut self.pending_tip,
        }
    }

    /// Appends trimmed `text` to the list and clears its scratch field.
    ///
    /// Whitespace-only text is ignored and leaves the scratch field as is.
    pub fn add_list_item(&mut self, field: ListField, text: &str) -> bool {
        let item = text.trim();
        if item.is_empty() {
            return false;
        }
        self.draft.list_mut(field).push(item.to_string());
        self.pending_mut(field).clear();
        true
    }

    /// Adds the scratch text of `field` to its list.
    pub fn commit_pending(&mut self, field: ListField) -> bool {
        let text = self.pending(field).to_string();
        self.add_list_item(field, &text)
    }

    /// Removes the list item at `index`; out-of-range indices are ignored.
    pub fn remove_list_item(&mut self, field: ListField, index: usize) -> Option<String> {
        let list = self.draft.list_mut(field);
        (index < list.len()).then(|| list.remove(index))
    }
}

/// Owns at most one open form buffer.
#[derive(Debug, Clone, Default)]
pub struct FormBufferManager {
    buffer: Option<FormBuffer>,
}

impl FormBufferManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens an empty create form, discarding any open buffer.
    pub fn open_create(&mut self) -> &mut FormBuffer {
        debug!("open create form");
        self.buffer.insert(FormBuffer::empty())
    }

    /// Opens an edit form holding a deep copy of `record`.
    pub fn open_edit(&mut self, record: &Record) -> &mut FormBuffer {
        debug!(id = record.id, "open edit form");
        self.buffer.insert(FormBuffer {
            mode: FormMode::Edit(record.id),
            draft: RecordDraft::from(record),
            ..FormBuffer::empty()
        })
    }

    pub fn close(&mut self) {
        self.buffer = None;
    }

    pub fn is_open(&self) -> bool {
        self.buffer.is_some()
    }

    pub fn buffer(&self) -> Option<&FormBuffer> {
        self.buffer.as_ref()
    }

    pub fn buffer_mut(&mut self) -> Option<&mut FormBuffer> {
        self.buffer.as_mut()
    }

    /// No-op when no form is open.
    pub fn add_list_item(&mut self, field: ListField, text: &str) -> bool {
        self.buffer
            .as_mut()
            .is_some_and(|b| b.add_list_item(field, text))
    }

    pub fn remove_list_item(&mut self, field: ListField, index: usize) -> Option<String> {
        self.buffer.as_mut()?.remove_list_item(field, index)
    }

    /// Submits the open buffer through `store`.
    ///
    /// Validation failures make no backend call. The buffer is closed on
    /// success and kept open on any error. Returns `None` when no form is open.
    pub fn submit<G: RecordGateway>(
        &mut self,
        store: &mut RecordStore<G>,
    ) -> Option<Result<Record, StoreError>> {
        let buffer = self.buffer.as_ref()?;
        let result = match buffer.mode {
            FormMode::Create => store.create(&buffer.draft),
            FormMode::Edit(id) => store.update(id, &buffer.draft),
        };
        if result.is_ok() {
            self.close();
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::{MemoryGateway, sample_records};

    fn store() -> RecordStore<MemoryGateway> {
        let mut store = RecordStore::new(MemoryGateway::with_samples());
        store.load().unwrap();
        store
    }

    #[test]
    fn test_open_create_resets_everything() {
        let mut forms = FormBufferManager::new();
        let b = forms.open_create();
        b.draft.name = "Temp".to_string();
        b.pending_tip = "half typed".to_string();

        let b = forms.open_create();
        assert_eq!(b.mode, FormMode::Create);
        assert_eq!(b.draft, RecordDraft::default());
        assert!(b.pending_tip.is_empty());
    }

    #[test]
    fn test_edit_is_a_deep_copy() {
        let record = sample_records().remove(0);
        let mut forms = FormBufferManager::new();
        let b = forms.open_edit(&record);
        b.draft.powers.push("Surf".to_string());
        b.draft.name.push('!');

        assert_eq!(record, sample_records()[0]);
        assert_eq!(forms.buffer().unwrap().mode, FormMode::Edit(record.id));
    }

    #[test]
    fn test_add_list_item_trims_and_clears_scratch() {
        let mut forms = FormBufferManager::new();
        let b = forms.open_create();
        b.pending_power = "  Ember ".to_string();
        assert!(b.commit_pending(ListField::Powers));
        assert_eq!(b.draft.powers, vec!["Ember".to_string()]);
        assert!(b.pending_power.is_empty());

        b.pending_tip = "   ".to_string();
        assert!(!b.commit_pending(ListField::Tips));
        assert!(b.draft.tips.is_empty());
        assert_eq!(b.pending_tip, "   ");

        assert!(forms.add_list_item(ListField::Powers, "Ember"));
        assert_eq!(forms.buffer().unwrap().draft.powers.len(), 2);
    }

    #[test]
    fn test_remove_list_item_bounds() {
        let mut forms = FormBufferManager::new();
        assert_eq!(forms.remove_list_item(ListField::Tips, 0), None);

        forms.open_create();
        forms.add_list_item(ListField::Tips, "a");
        forms.add_list_item(ListField::Tips, "b");
        assert_eq!(forms.remove_list_item(ListField::Tips, 5), None);
        assert_eq!(forms.remove_list_item(ListField::Tips, 0), Some("a".to_string()));
        assert_eq!(forms.buffer().unwrap().draft.tips, vec!["b".to_string()]);
    }

    #[test]
    fn test_submit_create_validation_keeps_buffer() {
        let mut store = store();
        let calls = store.gateway().calls().len();
        let mut forms = FormBufferManager::new();
        forms.open_create().draft.rating = Some(50);

        let result = forms.submit(&mut store).unwrap();
        assert!(result.unwrap_err().is_validation());
        assert!(forms.is_open());
        assert_eq!(store.gateway().calls().len(), calls);
    }

    #[test]
    fn test_submit_create_success_closes() {
        let mut store = store();
        let mut forms = FormBufferManager::new();
        let b = forms.open_create();
        b.draft.name = "Eevee".to_string();
        b.draft.rating = Some(75);
        b.add_list_item(ListField::Powers, "Tackle");

        let created = forms.submit(&mut store).unwrap().unwrap();
        assert!(!forms.is_open());
        assert_eq!(store.get(created.id).unwrap().powers, vec!["Tackle".to_string()]);
    }

    #[test]
    fn test_submit_edit_failure_keeps_buffer() {
        let mut store = store();
        let mut forms = FormBufferManager::new();
        let original = store.get(1).unwrap().clone();
        forms.open_edit(&original).draft.rating = Some(10);

        store.gateway_mut().set_offline(true);
        assert!(forms.submit(&mut store).unwrap().is_err());
        assert!(forms.is_open());
        assert_eq!(store.get(1).unwrap(), &original);

        store.gateway_mut().set_offline(false);
        forms.submit(&mut store).unwrap().unwrap();
        assert_eq!(store.get(1).unwrap().rating, 10);
    }

    #[test]
    fn test_submit_without_form() {
        let mut store = store();
        assert!(FormBufferManager::new().submit(&mut store).is_none());
    }
}
