//! Persisted form of the store.

use crate::constants::SNAPSHOT_VERSION;
use crate::errors::PersistenceError;
use crate::journal_core::JournalEntry;
use serde::{Deserialize, Serialize};

/// Everything the store persists: the session user and every entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub version: u32,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub entries: Vec<JournalEntry>,
}

impl StoreSnapshot {
    pub fn new(user: Option<String>, entries: Vec<JournalEntry>) -> Self {
        StoreSnapshot {
            version: SNAPSHOT_VERSION,
            user,
            entries,
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>, PersistenceError> {
        serde_json::to_vec(self).map_err(PersistenceError::Encode)
    }

    /// Decodes bytes read from the slot named `key`.
    ///
    /// # Errors
    ///
    /// - `PersistenceError::Corrupt` if the bytes are not a snapshot
    /// - `PersistenceError::UnsupportedVersion` for a newer layout
    pub fn decode(key: &str, bytes: &[u8]) -> Result<Self, PersistenceError> {
        let snapshot: StoreSnapshot =
            serde_json::from_slice(bytes).map_err(|source| PersistenceError::Corrupt {
                key: key.to_string(),
                source,
            })?;

        if snapshot.version != SNAPSHOT_VERSION {
            return Err(PersistenceError::UnsupportedVersion(snapshot.version));
        }
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal_core::Mood;

    #[test]
    fn test_snapshot_round_trip_preserves_every_field() {
        let snapshot = StoreSnapshot::new(
            Some("ada".to_string()),
            vec![
                JournalEntry::new("1", "01/01/2025", "", Mood::Happy),
                JournalEntry::new("2", "01/02/2025", "line one\nline two", Mood::from_symbol("🦆"))
                    .with_image("file:///photos/duck.png"),
            ],
        );

        let bytes = snapshot.encode().unwrap();
        let restored = StoreSnapshot::decode("root", &bytes).unwrap();
        assert_eq!(restored, snapshot);
        assert_eq!(restored.entries[0].image, None);
    }

    #[test]
    fn test_every_mood_round_trips_unchanged() {
        let moods: Vec<Mood> = Mood::CATALOGUE
            .iter()
            .cloned()
            .chain(["🦆", "meh", ""].iter().map(|raw| Mood::from_symbol(raw)))
            .collect();
        let entries: Vec<JournalEntry> = moods
            .iter()
            .enumerate()
            .map(|(i, mood)| JournalEntry::new(i.to_string(), "01/01/2025", "", mood.clone()))
            .collect();

        let snapshot = StoreSnapshot::new(None, entries);
        let restored = StoreSnapshot::decode("root", &snapshot.encode().unwrap()).unwrap();
        assert_eq!(restored, snapshot);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        match StoreSnapshot::decode("root", b"\x00\x01not json") {
            Err(PersistenceError::Corrupt { key, .. }) => assert_eq!(key, "root"),
            other => panic!("Expected Corrupt, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_rejects_unknown_version() {
        let bytes = br#"{"version":99,"user":null,"entries":[]}"#;
        assert!(matches!(
            StoreSnapshot::decode("root", bytes),
            Err(PersistenceError::UnsupportedVersion(99))
        ));
    }

    #[test]
    fn test_decode_tolerates_missing_optional_fields() {
        let bytes = br#"{"version":1}"#;
        let snapshot = StoreSnapshot::decode("root", bytes).unwrap();
        assert_eq!(snapshot.user, None);
        assert!(snapshot.entries.is_empty());
    }
}
