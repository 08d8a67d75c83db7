use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct CatalogItem {
    pub track_id: String,
    pub track_name: String,
    pub artist_name: String,
    #[serde(default)]
    pub artist_genres_key: String,
}

impl CatalogItem {
    /// The text a user sees for this item, identifiers are never part of it.
    pub fn label(&self) -> String {
        format!("{} — {}", self.track_name, self.artist_name)
    }
}
