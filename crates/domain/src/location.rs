//! Tracked locations
//!
//! A location is identified by a slug derived from its query text. The
//! tracked collection always contains at least one location; callers enforce
//! that invariant through the location service.

use serde::{Deserialize, Serialize};

/// A user-tracked location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Unique slug identifier derived from the query
    pub id: String,
    /// Display name shown in the sidebar
    pub label: String,
    /// Query string sent upstream (place name or coordinates)
    pub query: String,
    /// Cached sidebar temperature preview, not authoritative
    #[serde(default = "default_temp_hint")]
    pub temp_hint: String,
}

fn default_temp_hint() -> String {
    "--".to_string()
}

impl Location {
    /// Create a location from a raw query string
    ///
    /// The query is trimmed and the id is its slug. The label keeps the
    /// trimmed query verbatim.
    pub fn from_query(query: &str) -> Self {
        let trimmed = query.trim();
        Self {
            id: slugify(trimmed),
            label: trimmed.to_string(),
            query: trimmed.to_string(),
            temp_hint: default_temp_hint(),
        }
    }

    /// Case-insensitive match against another query string
    pub fn matches_query(&self, query: &str) -> bool {
        self.query.to_lowercase() == query.trim().to_lowercase()
    }

    /// The preset list used when no persisted state exists
    pub fn presets() -> Vec<Self> {
        let seed = [
            ("new-york", "New York", "72°"),
            ("san-francisco", "San Francisco", "64°"),
            ("los-angeles", "Los Angeles", "78°"),
            ("chicago", "Chicago", "65°"),
            ("miami", "Miami", "86°"),
        ];
        seed.into_iter()
            .map(|(id, name, hint)| Self {
                id: id.to_string(),
                label: name.to_string(),
                query: name.to_string(),
                temp_hint: hint.to_string(),
            })
            .collect()
    }
}

/// Derive an identifier-safe slug: lower-cased, whitespace runs collapsed
/// into single hyphens.
pub fn slugify(text: &str) -> String {
    text.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}
