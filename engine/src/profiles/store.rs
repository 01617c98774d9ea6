use super::record::ProfileRecord;

/// Persistence collaborator the game logic drives: load at reset or profile
/// switch, save at game over. Implementations must keep `load` infallible.
pub trait ProfileStore {
    fn exists(&self, name: &str) -> bool;

    /// Creates the profile if absent. Returns `Ok(true)` when a new record
    /// was written, `Ok(false)` when one already existed.
    fn create(&mut self, name: &str) -> Result<bool, String>;

    /// A missing or unreadable record loads as a default, never an error.
    fn load(&self, name: &str) -> ProfileRecord;

    fn save(&mut self, name: &str, record: &ProfileRecord) -> Result<(), String>;

    fn list(&self) -> Vec<String>;

    fn delete(&mut self, name: &str) -> Result<bool, String>;
}

/// Storage keys are derived from user-supplied names; path separators are
/// replaced so a name can never escape the profiles directory.
pub fn sanitize_name(name: &str) -> String {
    name.trim().replace(['/', '\\'], "_")
}
