//! In-crate test doubles.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::StoreError;
use crate::traits::KeyValueStore;

/// HashMap-backed store that can be switched into a failing mode.
#[derive(Default)]
pub(crate) struct MapStore {
    entries: Mutex<HashMap<String, String>>,
    failing: bool,
}

impl MapStore {
    pub(crate) fn failing() -> Self {
        Self {
            entries: Mutex::default(),
            failing: true,
        }
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing {
            Err(StoreError::Unavailable("test store is failing".into()))
        } else {
            Ok(())
        }
    }
}

impl KeyValueStore for MapStore {
    fn name(&self) -> &str {
        "map"
    }

    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.check()?;
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.check()?;
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.check()?;
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        self.check()?;
        Ok(self.entries.lock().unwrap().keys().cloned().collect())
    }
}
