//! Backend abstraction for the record collection.
//!
//! This module defines the `RecordGateway` trait that the store uses to talk to
//! the backend, plus two implementations:
//! - `MemoryGateway`: in-process collection with sample data and failure injection
//! - `JsonFileGateway`: collection persisted as a JSON array on disk

mod file;
mod memory;

pub use file::JsonFileGateway;
pub use memory::{GatewayCall, MemoryGateway, sample_records};

use crate::record::{Record, RecordDraft, RecordId};

/// Error types that can occur while talking to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// I/O error while reading/writing the collection.
    Io(String),
    /// Stored or received data could not be parsed.
    Parse(String),
    /// The backend refused the request.
    Rejected(String),
    /// The backend could not be reached.
    Unavailable(String),
}

impl std::fmt::Display for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GatewayError::Io(msg) => write!(f, "I/O error: {}", msg),
            GatewayError::Parse(msg) => write!(f, "Parse error: {}", msg),
            GatewayError::Rejected(msg) => write!(f, "Rejected: {}", msg),
            GatewayError::Unavailable(msg) => write!(f, "Backend unavailable: {}", msg),
        }
    }
}

impl std::error::Error for GatewayError {}

impl From<std::io::Error> for GatewayError {
    fn from(e: std::io::Error) -> Self {
        GatewayError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(e: serde_json::Error) -> Self {
        GatewayError::Parse(e.to_string())
    }
}

/// Abstraction for the backend holding the record collection.
///
/// Every call resolves to success with a payload or failure with a cause. The
/// store never inspects the cause beyond reporting it.
pub trait RecordGateway {
    /// Fetches the full collection.
    fn list_records(&mut self) -> Result<Vec<Record>, GatewayError>;

    /// Creates a record. The backend assigns the identity.
    fn create_record(&mut self, draft: &RecordDraft) -> Result<Record, GatewayError>;

    /// Stores `draft` under `id` and returns the stored record.
    fn update_record(&mut self, id: RecordId, draft: &RecordDraft)
    -> Result<Record, GatewayError>;

    /// Deletes the record with `id`.
    fn delete_record(&mut self, id: RecordId) -> Result<(), GatewayError>;
}

impl<G: RecordGateway + ?Sized> RecordGateway for Box<G> {
    fn list_records(&mut self) -> Result<Vec<Record>, GatewayError> {
        (**self).list_records()
    }

    fn create_record(&mut self, draft: &RecordDraft) -> Result<Record, GatewayError> {
        (**self).create_record(draft)
    }

    fn update_record(
        &mut self,
        id: RecordId,
        draft: &RecordDraft,
    ) -> Result<Record, GatewayError> {
        (**self).update_record(id, draft)
    }

    fn delete_record(&mut self, id: RecordId) -> Result<(), GatewayError> {
        (**self).delete_record(id)
    }
}

/// Backend-side collection rules shared by the gateway implementations.
///
/// Identities are assigned as `max(id) + 1`, names are unique, updates upsert
/// under the given id and deleting an absent id succeeds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Collection {
    records: Vec<Record>,
}

impl Collection {
    pub(crate) fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub(crate) fn records(&self) -> &[Record] {
        &self.records
    }

    pub(crate) fn into_records(self) -> Vec<Record> {
        self.records
    }

    fn next_id(&self) -> RecordId {
        self.records.iter().map(|r| r.id).max().unwrap_or(0) + 1
    }

    fn check_unique_name(&self, name: &str, except: Option<RecordId>) -> Result<(), GatewayError> {
        let taken = self
            .records
            .iter()
            .any(|r| r.name == name && Some(r.id) != except);
        if taken {
            return Err(GatewayError::Rejected(format!(
                "a record named '{}' already exists",
                name
            )));
        }
        Ok(())
    }

    pub(crate) fn create(&mut self, draft: &RecordDraft) -> Result<Record, GatewayError> {
        self.check_unique_name(&draft.name, None)?;
        let record = draft.clone().into_record(self.next_id());
        self.records.push(record.clone());
        Ok(record)
    }

    pub(crate) fn update(
        &mut self,
        id: RecordId,
        draft: &RecordDraft,
    ) -> Result<Record, GatewayError> {
        self.check_unique_name(&draft.name, Some(id))?;
        let record = draft.clone().into_record(id);
        match self.records.iter_mut().find(|r| r.id == id) {
            Some(slot) => *slot = record.clone(),
            None => self.records.push(record.clone()),
        }
        Ok(record)
    }

    pub(crate) fn delete(&mut self, id: RecordId) {
        self.records.retain(|r| r.id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, rating: i64) -> RecordDraft {
        RecordDraft {
            name: name.to_string(),
            rating: Some(rating),
            ..RecordDraft::default()
        }
    }

    #[test]
    fn test_create_ignores_client_id_and_assigns_next() {
        let mut c = Collection::default();
        let a = c.create(&draft("Pika", 90)).unwrap();
        let b = c
            .create(&RecordDraft {
                id: Some(77),
                ..draft("Char", 70)
            })
            .unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut c = Collection::default();
        c.create(&draft("Pika", 90)).unwrap();
        let err = c.create(&draft("Pika", 50)).unwrap_err();
        assert!(matches!(err, GatewayError::Rejected(_)));
        assert_eq!(c.records().len(), 1);
    }

    #[test]
    fn test_update_keeps_own_name_and_upserts() {
        let mut c = Collection::default();
        let a = c.create(&draft("Pika", 90)).unwrap();
        let updated = c.update(a.id, &draft("Pika", 95)).unwrap();
        assert_eq!(updated.rating, 95);
        assert_eq!(c.records().len(), 1);

        let inserted = c.update(10, &draft("Mew", 100)).unwrap();
        assert_eq!(inserted.id, 10);
        assert_eq!(c.records().len(), 2);
    }

    #[test]
    fn test_delete_absent_is_ok() {
        let mut c = Collection::new(vec![draft("Pika", 90).into_record(1)]);
        c.delete(42);
        assert_eq!(c.records().len(), 1);
        c.delete(1);
        assert!(c.records().is_empty());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            GatewayError::Unavailable("offline".to_string()).to_string(),
            "Backend unavailable: offline"
        );
    }
}
