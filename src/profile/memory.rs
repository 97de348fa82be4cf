use super::ProfileStore;
use crate::models::ProfileFields;
use crate::Result;
use std::sync::{Arc, Mutex};

/// In-memory profile store. Keeps the serialized entry so tests can seed it
/// with arbitrary (including malformed) content.
#[derive(Clone, Default)]
pub struct MemoryProfileStore {
    entry: Arc<Mutex<Option<String>>>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_raw_entry(self, raw: impl Into<String>) -> Self {
        *self.entry.lock().unwrap() = Some(raw.into());
        self
    }

    pub fn get_raw_entry(&self) -> Option<String> {
        self.entry.lock().unwrap().clone()
    }
}

impl ProfileStore for MemoryProfileStore {
    fn load(&self) -> Result<Option<ProfileFields>> {
        match self.entry.lock().unwrap().as_deref() {
            Some(raw) => Ok(Some(serde_json::from_str(raw)?)),
            None => Ok(None),
        }
    }

    fn save(&self, profile: &ProfileFields) -> Result<()> {
        let raw = serde_json::to_string(profile)?;
        *self.entry.lock().unwrap() = Some(raw);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.entry.lock().unwrap() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip_and_clear() {
        let store = MemoryProfileStore::new();
        let profile = ProfileFields {
            name: "Jane".to_string(),
            ..ProfileFields::default()
        };

        store.save(&profile).unwrap();
        assert_eq!(store.load().unwrap(), Some(profile));

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        assert_eq!(store.get_raw_entry(), None);
    }

    #[test]
    fn test_memory_store_seeded_with_garbage_fails_to_load() {
        let store = MemoryProfileStore::new().with_raw_entry("][");
        assert!(store.load().is_err());
    }
}
