use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Per-profile progress record, persisted as JSON. Unknown or missing fields
/// fall back to their defaults so old or hand-edited files keep loading.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileRecord {
    pub name: String,
    pub created_at: Option<String>,
    pub highscore: u32,
    pub last_score: u32,
    pub play_count: u32,
    pub prefs: Map<String, Value>,
}

impl Default for ProfileRecord {
    fn default() -> Self {
        Self {
            name: String::new(),
            created_at: None,
            highscore: 0,
            last_score: 0,
            play_count: 0,
            prefs: Map::new(),
        }
    }
}

impl ProfileRecord {
    /// Fresh record for a newly created profile.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            created_at: Some(Utc::now().to_rfc3339()),
            ..Self::default()
        }
    }

    /// Fallback when a stored record is missing or unreadable.
    pub fn defaulted(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_starts_at_zero_with_a_timestamp() {
        let record = ProfileRecord::new("alice");
        assert_eq!(record.name, "alice");
        assert!(record.created_at.is_some());
        assert_eq!(record.highscore, 0);
        assert_eq!(record.play_count, 0);
    }

    #[test]
    fn test_partial_json_fills_in_defaults() {
        let record: ProfileRecord =
            serde_json::from_str(r#"{"name": "bob", "highscore": 12}"#).unwrap();
        assert_eq!(record.name, "bob");
        assert_eq!(record.highscore, 12);
        assert_eq!(record.last_score, 0);
        assert_eq!(record.created_at, None);
        assert!(record.prefs.is_empty());
    }

    #[test]
    fn test_record_survives_json_round_trip() {
        let mut record = ProfileRecord::new("carol");
        record.highscore = 44;
        record.play_count = 9;
        record.prefs.insert("theme".to_string(), Value::from("neon"));
        let encoded = serde_json::to_string_pretty(&record).unwrap();
        let decoded: ProfileRecord = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, record);
    }
}
