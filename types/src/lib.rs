use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

mod timestamp;

/// A short id to target url mapping held by the tiny url service.
#[derive(Serialize, Deserialize, Clone, Debug, Default, Eq, PartialEq)]
#[serde(default)]
pub struct Entry {
    pub id: String,
    #[serde(rename = "url")]
    pub target_url: String,
    #[serde(alias = "created", deserialize_with = "timestamp::deserialize")]
    pub created_at: DateTime<Utc>,
}

impl Entry {
    pub fn new(id: String, target_url: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            target_url,
            created_at,
        }
    }

    /// True for the value decoded from an empty success body.
    pub fn is_empty(&self) -> bool {
        self == &Entry::default()
    }
}

/// Form payload for `POST /api/tiny`. An empty id lets the server pick one.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct CreateEntry {
    pub id: String,
    pub url: String,
}

/// Form payload for `POST /api/tiny/{id}`.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct UpdateEntry {
    pub url: String,
}
