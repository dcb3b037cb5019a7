//! Record store: the canonical record sequence and its derived display sequence.

use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::gateway::RecordGateway;
use crate::record::{ColumnKey, Record, RecordDraft, RecordId};
use crate::view::{SortDirection, SortDirective, derive_display, normalize_term};

/// Message shown when the collection could not be fetched.
pub const LOAD_ERROR: &str = "Failed to load records from backend";

/// Owns the canonical sequence and mediates every mutation through the gateway.
///
/// The display sequence is recomputed from scratch after every change to the
/// canonical sequence, the search term or the sort directive. A failed backend
/// call never changes the canonical sequence.
pub struct RecordStore<G: RecordGateway> {
    gateway: G,
    canonical: Vec<Record>,
    /// Indices into `canonical`.
    display: Vec<usize>,
    search: String,
    sort: Option<SortDirective>,
    loading: bool,
    error: Option<String>,
    last_synced: Option<DateTime<Local>>,
}

impl<G: RecordGateway> RecordStore<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            canonical: Vec::new(),
            display: Vec::new(),
            search: String::new(),
            sort: None,
            loading: true,
            error: None,
            last_synced: None,
        }
    }

    /// Fetches the collection and replaces the canonical sequence.
    ///
    /// A new store reports `is_loading()` until its first load resolves,
    /// successfully or not.
    ///
    /// The active search term and sort directive are reapplied. On failure the
    /// previously loaded records stay in place and `error()` is set.
    pub fn load(&mut self) -> Result<usize, StoreError> {
        let result = self.gateway.list_records();
        self.loading = false;

        match result {
            Ok(records) => {
                info!(count = records.len(), "records loaded");
                self.canonical = records;
                self.error = None;
                self.last_synced = Some(Local::now());
                self.refresh_display();
                Ok(self.canonical.len())
            }
            Err(e) => {
                warn!(error = %e, kept = self.canonical.len(), "failed to load records");
                self.error = Some(LOAD_ERROR.to_string());
                Err(e.into())
            }
        }
    }

    /// Creates a record and appends the backend-confirmed version.
    pub fn create(&mut self, candidate: &RecordDraft) -> Result<Record, StoreError> {
        candidate.validate()?;
        let created = self.gateway.create_record(candidate).inspect_err(|e| {
            warn!(error = %e, name = %candidate.name, "create failed");
        })?;
        info!(id = created.id, name = %created.name, "record created");
        self.canonical.push(created.clone());
        self.refresh_display();
        Ok(created)
    }

    /// Updates the record `id`, replacing the canonical entry in place.
    ///
    /// If no local entry has `id` the backend result is not inserted and the
    /// call still succeeds.
    pub fn update(&mut self, id: RecordId, candidate: &RecordDraft) -> Result<Record, StoreError> {
        candidate.validate()?;
        let updated = self.gateway.update_record(id, candidate).inspect_err(|e| {
            warn!(error = %e, id, "update failed");
        })?;
        match self.canonical.iter_mut().find(|r| r.id == id) {
            Some(slot) => {
                info!(id, "record updated");
                *slot = updated.clone();
                self.refresh_display();
            }
            None => debug!(id, "updated record not present locally"),
        }
        Ok(updated)
    }

    /// Deletes the record `id`. Confirmation is the caller's job.
    pub fn delete(&mut self, id: RecordId) -> Result<(), StoreError> {
        self.gateway.delete_record(id).inspect_err(|e| {
            warn!(error = %e, id, "delete failed");
        })?;
        info!(id, "record deleted");
        self.canonical.retain(|r| r.id != id);
        self.refresh_display();
        Ok(())
    }

    /// Sets the search term and recomputes the display sequence.
    pub fn search(&mut self, term: &str) {
        self.search = normalize_term(term);
        debug!(term = %self.search, "search");
        self.refresh_display();
    }

    /// Sorts by `key`, toggling the direction if it is already active.
    ///
    /// Returns `false` (and changes nothing) for non-sortable columns.
    pub fn sort_by(&mut self, key: ColumnKey) -> bool {
        if !key.is_sortable() {
            return false;
        }
        self.sort = Some(match self.sort {
            Some(active) if active.key == key => SortDirective {
                key,
                direction: active.direction.toggled(),
            },
            _ => SortDirective {
                key,
                direction: SortDirection::Ascending,
            },
        });
        debug!(sort = ?self.sort, "sort");
        self.refresh_display();
        true
    }

    fn refresh_display(&mut self) {
        self.display = derive_display(&self.canonical, &self.search, self.sort);
    }

    /// Filtered and sorted records.
    pub fn display(&self) -> Vec<&Record> {
        self.display.iter().map(|&i| &self.canonical[i]).collect()
    }

    pub fn display_len(&self) -> usize {
        self.display.len()
    }

    /// Record at `pos` in the display sequence.
    pub fn display_at(&self, pos: usize) -> Option<&Record> {
        self.display.get(pos).map(|&i| &self.canonical[i])
    }

    /// Position of `id` in the display sequence.
    pub fn display_position(&self, id: RecordId) -> Option<usize> {
        self.display.iter().position(|&i| self.canonical[i].id == id)
    }

    pub fn canonical(&self) -> &[Record] {
        &self.canonical
    }

    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.canonical.iter().find(|r| r.id == id)
    }

    /// Active (normalized) search term; empty when no filter applies.
    pub fn search_term(&self) -> &str {
        &self.search
    }

    pub fn sort_directive(&self) -> Option<SortDirective> {
        self.sort
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn last_synced(&self) -> Option<DateTime<Local>> {
        self.last_synced
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn gateway_mut(&mut self) -> &mut G {
        &mut self.gateway
    }
}
