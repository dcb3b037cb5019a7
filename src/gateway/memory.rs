//! In-process backend with sample data and failure injection.

use tracing::debug;

use super::{Collection, GatewayError, RecordGateway};
use crate::record::{Record, RecordDraft, RecordId};

/// A backend call as observed by `MemoryGateway`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    List,
    Create(String),
    Update(RecordId),
    Delete(RecordId),
}

/// In-memory backend.
///
/// Applies the same collection rules as a real backend. Every call is logged
/// in `calls()`; `set_offline` and `fail_next` simulate transport failures.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    collection: Collection,
    calls: Vec<GatewayCall>,
    offline: bool,
    fail_next: Option<GatewayError>,
}

impl MemoryGateway {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            collection: Collection::new(records),
            ..Self::default()
        }
    }

    /// Gateway seeded with `sample_records()`.
    pub fn with_samples() -> Self {
        Self::new(sample_records())
    }

    /// While offline every call fails with `GatewayError::Unavailable`.
    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    /// Makes the next call fail with `error`.
    pub fn fail_next(&mut self, error: GatewayError) {
        self.fail_next = Some(error);
    }

    pub fn calls(&self) -> &[GatewayCall] {
        &self.calls
    }

    pub fn records(&self) -> &[Record] {
        self.collection.records()
    }

    fn begin(&mut self, call: GatewayCall) -> Result<(), GatewayError> {
        debug!(?call, "memory gateway call");
        self.calls.push(call);
        if let Some(err) = self.fail_next.take() {
            return Err(err);
        }
        if self.offline {
            return Err(GatewayError::Unavailable("backend is offline".to_string()));
        }
        Ok(())
    }
}

impl RecordGateway for MemoryGateway {
    fn list_records(&mut self) -> Result<Vec<Record>, GatewayError> {
        self.begin(GatewayCall::List)?;
        Ok(self.collection.records().to_vec())
    }

    fn create_record(&mut self, draft: &RecordDraft) -> Result<Record, GatewayError> {
        self.begin(GatewayCall::Create(draft.name.clone()))?;
        self.collection.create(draft)
    }

    fn update_record(
        &mut self,
        id: RecordId,
        draft: &RecordDraft,
    ) -> Result<Record, GatewayError> {
        self.begin(GatewayCall::Update(id))?;
        self.collection.update(id, draft)
    }

    fn delete_record(&mut self, id: RecordId) -> Result<(), GatewayError> {
        self.begin(GatewayCall::Delete(id))?;
        self.collection.delete(id);
        Ok(())
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// A small, typical collection used by the demo mode and tests.
pub fn sample_records() -> Vec<Record> {
    vec![
        Record {
            id: 1,
            name: "Pikachu".to_string(),
            explanation: "From 'pika', the sound of an electric spark, and 'chu', a squeak"
                .to_string(),
            rating: 90,
            powers: strings(&["Thunderbolt", "Quick Attack", "Iron Tail"]),
            image_ref: "https://img.example/pikachu.png".to_string(),
            tips: strings(&["Search forests after rain", "Use a ground type"]),
        },
        Record {
            id: 2,
            name: "Charizard".to_string(),
            explanation: "Charcoal plus lizard".to_string(),
            rating: 96,
            powers: strings(&["Flamethrower", "Fly"]),
            image_ref: "https://img.example/charizard.png".to_string(),
            tips: strings(&["Volcanic areas", "Bring water moves"]),
        },
        Record {
            id: 3,
            name: "Bulbasaur".to_string(),
            explanation: "Bulb plus dinosaur".to_string(),
            rating: 72,
            powers: strings(&["Vine Whip", "Razor Leaf"]),
            image_ref: "https://img.example/bulbasaur.png".to_string(),
            tips: strings(&["Tall grass at dawn"]),
        },
        Record {
            id: 4,
            name: "Squirtle".to_string(),
            explanation: "Squirt plus turtle".to_string(),
            rating: 70,
            powers: strings(&["Water Gun", "Withdraw"]),
            image_ref: "https://img.example/squirtle.png".to_string(),
            tips: strings(&["Near lakes", "Use electric moves"]),
        },
        Record {
            id: 5,
            name: "Gengar".to_string(),
            explanation: "From doppelganger".to_string(),
            rating: 88,
            powers: strings(&["Shadow Ball", "Hypnosis"]),
            image_ref: "https://img.example/gengar.png".to_string(),
            tips: strings(&["Only at night", "Bring a dark type"]),
        },
        Record {
            id: 6,
            name: "Mewtwo".to_string(),
            explanation: "Clone of Mew".to_string(),
            rating: 99,
            powers: strings(&["Psychic", "Barrier"]),
            image_ref: "https://img.example/mewtwo.png".to_string(),
            tips: strings(&["Deep inside caves", "Master ball recommended"]),
        },
        Record {
            id: 7,
            name: "Snorlax".to_string(),
            explanation: "Snore plus relax".to_string(),
            rating: 82,
            powers: strings(&["Body Slam", "Rest"]),
            image_ref: "https://img.example/snorlax.png".to_string(),
            tips: strings(&["Wake it with a flute"]),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_are_valid_and_unique() {
        let records = sample_records();
        for r in &records {
            assert!(RecordDraft::from(r).validate().is_ok(), "{}", r.name);
        }
        let mut names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), records.len());
    }

    #[test]
    fn test_calls_are_logged() {
        let mut gw = MemoryGateway::with_samples();
        gw.list_records().unwrap();
        gw.delete_record(3).unwrap();
        assert_eq!(gw.calls(), &[GatewayCall::List, GatewayCall::Delete(3)]);
        assert!(gw.records().iter().all(|r| r.id != 3));
    }

    #[test]
    fn test_offline_and_fail_next() {
        let mut gw = MemoryGateway::with_samples();
        gw.fail_next(GatewayError::Rejected("boom".to_string()));
        assert_eq!(
            gw.list_records(),
            Err(GatewayError::Rejected("boom".to_string()))
        );
        assert!(gw.list_records().is_ok());

        gw.set_offline(true);
        assert!(matches!(
            gw.delete_record(1),
            Err(GatewayError::Unavailable(_))
        ));
        assert_eq!(gw.records().len(), sample_records().len());
    }
}
