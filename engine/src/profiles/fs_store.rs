use std::fs;
use std::path::{Path, PathBuf};

use crate::log_error;

use super::record::ProfileRecord;
use super::store::{ProfileStore, sanitize_name};

const PROFILE_FILENAME: &str = "profile.json";

/// Filesystem-backed store: one directory per profile under `root`, each
/// holding a `profile.json`.
pub struct FsProfileStore {
    root: PathBuf,
}

impl FsProfileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn profile_path(&self, name: &str) -> PathBuf {
        self.root.join(sanitize_name(name)).join(PROFILE_FILENAME)
    }
}

impl ProfileStore for FsProfileStore {
    fn exists(&self, name: &str) -> bool {
        self.profile_path(name).is_file()
    }

    fn create(&mut self, name: &str) -> Result<bool, String> {
        let path = self.profile_path(name);
        if path.exists() {
            return Ok(false);
        }
        write_record(&path, &ProfileRecord::new(name))?;
        Ok(true)
    }

    fn load(&self, name: &str) -> ProfileRecord {
        let path = self.profile_path(name);
        match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|err| {
                log_error!("Unreadable profile record at {}: {}", path.display(), err);
                ProfileRecord::defaulted(name)
            }),
            Err(_) => ProfileRecord::defaulted(name),
        }
    }

    fn save(&mut self, name: &str, record: &ProfileRecord) -> Result<(), String> {
        write_record(&self.profile_path(name), record)
    }

    fn list(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(&self.root) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .flatten()
            .filter(|entry| entry.path().is_dir())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect();
        names.sort();
        names
    }

    fn delete(&mut self, name: &str) -> Result<bool, String> {
        let folder = self.root.join(sanitize_name(name));
        if !folder.is_dir() {
            return Ok(false);
        }
        fs::remove_dir_all(&folder)
            .map_err(|err| format!("Failed to delete profile '{}': {}", name, err))?;
        Ok(true)
    }
}

fn write_record(path: &Path, record: &ProfileRecord) -> Result<(), String> {
    if let Some(folder) = path.parent() {
        fs::create_dir_all(folder)
            .map_err(|err| format!("Failed to create profile folder: {}", err))?;
    }
    let contents = serde_json::to_string_pretty(record)
        .map_err(|err| format!("Failed to encode profile record: {}", err))?;
    fs::write(path, contents).map_err(|err| format!("Failed to write profile record: {}", err))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TempRoot {
        path: PathBuf,
    }

    impl TempRoot {
        fn new() -> Self {
            let random_number: u32 = rand::random();
            let path = std::env::temp_dir().join(format!(
                "snake_profiles_test_{}_{}",
                std::process::id(),
                random_number
            ));
            Self { path }
        }
    }

    impl Drop for TempRoot {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.path);
        }
    }

    #[test]
    fn test_create_load_save_round_trip() {
        let root = TempRoot::new();
        let mut store = FsProfileStore::new(&root.path);

        assert!(!store.exists("alice"));
        assert_eq!(store.create("alice"), Ok(true));
        assert!(store.exists("alice"));
        assert_eq!(store.create("alice"), Ok(false));

        let mut record = store.load("alice");
        assert_eq!(record.name, "alice");
        assert!(record.created_at.is_some());

        record.highscore = 17;
        record.play_count = 3;
        store.save("alice", &record).unwrap();
        assert_eq!(store.load("alice"), record);
    }

    #[test]
    fn test_missing_profile_loads_as_default() {
        let root = TempRoot::new();
        let store = FsProfileStore::new(&root.path);
        let record = store.load("nobody");
        assert_eq!(record, ProfileRecord::defaulted("nobody"));
    }

    #[test]
    fn test_corrupt_record_loads_as_default() {
        let root = TempRoot::new();
        let mut store = FsProfileStore::new(&root.path);
        store.create("mallory").unwrap();
        fs::write(
            root.path.join("mallory").join(PROFILE_FILENAME),
            "{not json",
        )
        .unwrap();
        let record = store.load("mallory");
        assert_eq!(record, ProfileRecord::defaulted("mallory"));
    }

    #[test]
    fn test_name_with_separators_stays_under_root() {
        let root = TempRoot::new();
        let mut store = FsProfileStore::new(&root.path);
        store.create("../escape").unwrap();
        assert!(root.path.join(".._escape").join(PROFILE_FILENAME).is_file());
        assert!(store.exists("../escape"));
    }

    #[test]
    fn test_list_and_delete() {
        let root = TempRoot::new();
        let mut store = FsProfileStore::new(&root.path);
        store.create("bob").unwrap();
        store.create("alice").unwrap();
        assert_eq!(store.list(), vec!["alice".to_string(), "bob".to_string()]);

        assert_eq!(store.delete("bob"), Ok(true));
        assert_eq!(store.delete("bob"), Ok(false));
        assert_eq!(store.list(), vec!["alice".to_string()]);
        assert!(!store.exists("bob"));
    }
}
