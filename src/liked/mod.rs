//! The tracks a user liked during a session.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikedTrack {
    pub track_id: String,
    pub label: String,
}

/// Insertion-ordered, unique by track id. Lives with the caller, the
/// recommender only ever receives the ids.
#[derive(Debug, Default, Clone)]
pub struct LikedSet {
    tracks: Vec<LikedTrack>,
}

impl LikedSet {
    pub fn new() -> LikedSet {
        LikedSet::default()
    }

    /// Returns false if the track was already liked.
    pub fn add<I: Into<String>, L: Into<String>>(&mut self, track_id: I, label: L) -> bool {
        let track_id = track_id.into();
        if self.contains(&track_id) {
            return false;
        }
        self.tracks.push(LikedTrack {
            track_id,
            label: label.into(),
        });
        true
    }

    pub fn contains(&self, track_id: &str) -> bool {
        self.tracks.iter().any(|t| t.track_id == track_id)
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
    }

    pub fn ids(&self) -> Vec<String> {
        self.tracks.iter().map(|t| t.track_id.clone()).collect()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.tracks.iter().map(|t| t.label.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
