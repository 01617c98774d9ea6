use std::collections::HashMap;

use super::record::ProfileRecord;
use super::store::{ProfileStore, sanitize_name};

/// In-memory store for tests and headless embedding; same contract as the
/// filesystem store, nothing touches disk.
#[derive(Default)]
pub struct MemoryProfileStore {
    records: HashMap<String, ProfileRecord>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProfileStore for MemoryProfileStore {
    fn exists(&self, name: &str) -> bool {
        self.records.contains_key(&sanitize_name(name))
    }

    fn create(&mut self, name: &str) -> Result<bool, String> {
        let key = sanitize_name(name);
        if self.records.contains_key(&key) {
            return Ok(false);
        }
        self.records.insert(key, ProfileRecord::new(name));
        Ok(true)
    }

    fn load(&self, name: &str) -> ProfileRecord {
        self.records
            .get(&sanitize_name(name))
            .cloned()
            .unwrap_or_else(|| ProfileRecord::defaulted(name))
    }

    fn save(&mut self, name: &str, record: &ProfileRecord) -> Result<(), String> {
        self.records.insert(sanitize_name(name), record.clone());
        Ok(())
    }

    fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = self.records.keys().cloned().collect();
        names.sort();
        names
    }

    fn delete(&mut self, name: &str) -> Result<bool, String> {
        Ok(self.records.remove(&sanitize_name(name)).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_contract_as_the_fs_store() {
        let mut store = MemoryProfileStore::new();
        assert!(!store.exists("dave"));
        assert_eq!(store.create("dave"), Ok(true));
        assert_eq!(store.create("dave"), Ok(false));

        let mut record = store.load("dave");
        record.highscore = 5;
        store.save("dave", &record).unwrap();
        assert_eq!(store.load("dave").highscore, 5);

        assert_eq!(store.list(), vec!["dave".to_string()]);
        assert_eq!(store.delete("dave"), Ok(true));
        assert_eq!(store.delete("dave"), Ok(false));
    }

    #[test]
    fn test_names_collide_after_sanitizing() {
        let mut store = MemoryProfileStore::new();
        store.create("a/b").unwrap();
        assert!(store.exists("a_b"));
        assert_eq!(store.list(), vec!["a_b".to_string()]);
    }
}
