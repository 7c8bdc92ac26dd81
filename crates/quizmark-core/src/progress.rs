//! Saved quiz progress.
//!
//! The last score of each section is stored as a small JSON record under
//! `<prefix><section>` in a [`KeyValueStore`]. Keys without the prefix belong
//! to someone else and are never read or removed.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::model::GradeResult;
use crate::traits::KeyValueStore;

/// Key prefix used when none is configured.
pub const DEFAULT_KEY_PREFIX: &str = "mm_progress_";

/// The persisted projection of a [`GradeResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub score: usize,
    pub total: usize,
    /// When the section was graded, as epoch milliseconds on the wire.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub ts: DateTime<Utc>,
}

impl ProgressRecord {
    pub fn from_result(result: &GradeResult, ts: DateTime<Utc>) -> Self {
        Self {
            score: result.score,
            total: result.total,
            ts,
        }
    }
}

/// Prefix-namespaced progress records over a key-value store.
#[derive(Debug)]
pub struct ProgressTracker<S> {
    store: S,
    prefix: String,
}

impl<S: KeyValueStore> ProgressTracker<S> {
    pub fn new(store: S) -> Self {
        Self::with_prefix(store, DEFAULT_KEY_PREFIX)
    }

    pub fn with_prefix(store: S, prefix: impl Into<String>) -> Self {
        Self {
            store,
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn key(&self, section: &str) -> String {
        format!("{}{}", self.prefix, section)
    }

    /// Store the record for a section, replacing any earlier one.
    pub fn save(&self, section: &str, record: &ProgressRecord) -> Result<(), StoreError> {
        let value = serde_json::to_string(record)?;
        self.store.set(&self.key(section), &value)
    }

    /// Read the record for one section.
    pub fn load(&self, section: &str) -> Result<Option<ProgressRecord>, StoreError> {
        match self.store.get(&self.key(section))? {
            Some(value) => Ok(Some(serde_json::from_str(&value)?)),
            None => Ok(None),
        }
    }

    /// Every saved record, keyed by section id.
    ///
    /// Entries that do not decode as a record are skipped.
    pub fn load_all(&self) -> Result<BTreeMap<String, ProgressRecord>, StoreError> {
        let mut records = BTreeMap::new();

        for key in self.store.keys()? {
            let Some(section) = key.strip_prefix(&self.prefix) else {
                continue;
            };
            let Some(value) = self.store.get(&key)? else {
                continue;
            };
            match serde_json::from_str::<ProgressRecord>(&value) {
                Ok(record) => {
                    records.insert(section.to_string(), record);
                }
                Err(e) => {
                    tracing::warn!("skipping unreadable progress entry '{key}': {e}");
                }
            }
        }

        Ok(records)
    }

    /// Remove every prefixed key, returning how many were removed.
    pub fn clear_all(&self) -> Result<usize, StoreError> {
        let mut removed = 0;
        for key in self.store.keys()? {
            if key.starts_with(&self.prefix) {
                self.store.remove(&key)?;
                removed += 1;
            }
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MapStore;
    use chrono::TimeZone;

    fn record(score: usize, total: usize) -> ProgressRecord {
        ProgressRecord {
            score,
            total,
            ts: Utc.timestamp_millis_opt(1_700_000_000_000).unwrap(),
        }
    }

    #[test]
    fn record_wire_format() {
        let json = serde_json::to_string(&record(4, 5)).unwrap();
        assert_eq!(json, r#"{"score":4,"total":5,"ts":1700000000000}"#);
        let back: ProgressRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record(4, 5));
    }

    #[test]
    fn save_uses_prefixed_key() {
        let tracker = ProgressTracker::new(MapStore::default());
        tracker.save("probability", &record(5, 5)).unwrap();

        assert!(tracker
            .store()
            .get("mm_progress_probability")
            .unwrap()
            .is_some());
        assert_eq!(tracker.load("probability").unwrap(), Some(record(5, 5)));
        assert_eq!(tracker.load("sets").unwrap(), None);
    }

    #[test]
    fn load_all_ignores_foreign_and_broken_keys() {
        let store = MapStore::default();
        store.set("mm_theme", "dark").unwrap();
        store.set("mm_progress_broken", "{not json").unwrap();
        let tracker = ProgressTracker::new(store);
        tracker.save("sets", &record(3, 5)).unwrap();
        tracker.save("algebra", &record(5, 5)).unwrap();

        let all = tracker.load_all().unwrap();
        let sections: Vec<_> = all.keys().map(String::as_str).collect();
        assert_eq!(sections, vec!["algebra", "sets"]);
        assert_eq!(all["sets"], record(3, 5));
    }

    #[test]
    fn clear_all_leaves_foreign_keys() {
        let store = MapStore::default();
        store.set("mm_theme", "dark").unwrap();
        let tracker = ProgressTracker::new(store);
        tracker.save("sets", &record(3, 5)).unwrap();
        tracker.save("algebra", &record(5, 5)).unwrap();

        assert_eq!(tracker.clear_all().unwrap(), 2);
        assert!(tracker.load_all().unwrap().is_empty());
        assert_eq!(
            tracker.store().get("mm_theme").unwrap().as_deref(),
            Some("dark")
        );
        assert_eq!(tracker.clear_all().unwrap(), 0);
    }

    #[test]
    fn custom_prefix() {
        let tracker = ProgressTracker::with_prefix(MapStore::default(), "course2:");
        tracker.save("sets", &record(1, 5)).unwrap();
        assert_eq!(tracker.prefix(), "course2:");
        assert!(tracker.store().get("course2:sets").unwrap().is_some());
    }

    #[test]
    fn store_failures_propagate() {
        let tracker = ProgressTracker::new(MapStore::failing());
        assert!(tracker.save("sets", &record(1, 5)).is_err());
        assert!(tracker.load_all().is_err());
        assert!(tracker.clear_all().is_err());
    }
}
