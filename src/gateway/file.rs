//! JSON-file backend.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::{Collection, GatewayError, RecordGateway};
use crate::record::{Record, RecordDraft, RecordId};

/// Backend that keeps the collection as a pretty-printed JSON array on disk.
///
/// The file is re-read on every call so external edits are picked up by the
/// next load. A missing file is an empty collection. Writes go to a sibling
/// temp file which is then renamed over the original.
#[derive(Debug, Clone)]
pub struct JsonFileGateway {
    path: PathBuf,
}

impl JsonFileGateway {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `records` if the file does not exist yet. Returns `true` if written.
    pub fn seed_if_missing(&self, records: Vec<Record>) -> Result<bool, GatewayError> {
        if self.path.exists() {
            return Ok(false);
        }
        info!(path = %self.path.display(), count = records.len(), "seeding data file");
        self.write(&Collection::new(records))?;
        Ok(true)
    }

    fn read(&self) -> Result<Collection, GatewayError> {
        match fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(Collection::default()),
            Ok(content) => Ok(Collection::new(serde_json::from_str(&content)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Collection::default()),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, collection: &Collection) -> Result<(), GatewayError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(collection.records())?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        debug!(
            path = %self.path.display(),
            count = collection.records().len(),
            "data file written"
        );
        Ok(())
    }

    fn modify<T>(
        &mut self,
        op: impl FnOnce(&mut Collection) -> Result<T, GatewayError>,
    ) -> Result<T, GatewayError> {
        let mut collection = self.read()?;
        let out = op(&mut collection)?;
        self.write(&collection)?;
        Ok(out)
    }
}

impl RecordGateway for JsonFileGateway {
    fn list_records(&mut self) -> Result<Vec<Record>, GatewayError> {
        Ok(self.read()?.into_records())
    }

    fn create_record(&mut self, draft: &RecordDraft) -> Result<Record, GatewayError> {
        self.modify(|c| c.create(draft))
    }

    fn update_record(
        &mut self,
        id: RecordId,
        draft: &RecordDraft,
    ) -> Result<Record, GatewayError> {
        self.modify(|c| c.update(id, draft))
    }

    fn delete_record(&mut self, id: RecordId) -> Result<(), GatewayError> {
        self.modify(|c| {
            c.delete(id);
            Ok(())
        })
    }
}
