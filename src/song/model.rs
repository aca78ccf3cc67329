//! Song records and drafts

/// Store-assigned song identifier
pub type SongId = i64;

/// Id of the protected system record. It can never be created, updated
/// or deleted through the service.
pub const RESERVED_SONG_ID: SongId = 1;

/// A persisted song
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Song {
    pub id: SongId,
    pub title: String,
    pub artist: String,
    /// Free-form duration such as "3:03"; never parsed
    pub duration: Option<String>,
}

impl Song {
    /// The protected system record written by `songbook init`
    pub fn reserved() -> Self {
        Self {
            id: RESERVED_SONG_ID,
            title: "Songbook System Record".to_string(),
            artist: "songbook".to_string(),
            duration: None,
        }
    }
}

/// A validated song that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSong {
    pub title: String,
    pub artist: String,
    pub duration: Option<String>,
}

impl NewSong {
    /// Attach a store-assigned id
    pub fn with_id(self, id: SongId) -> Song {
        Song {
            id,
            title: self.title,
            artist: self.artist,
            duration: self.duration,
        }
    }
}

/// Unvalidated client input; any field may be missing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongDraft {
    pub id: Option<SongId>,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub duration: Option<String>,
}

impl SongDraft {
    /// Draft with title and artist set and no id
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            id: None,
            title: Some(title.into()),
            artist: Some(artist.into()),
            duration: None,
        }
    }

    pub fn with_id(mut self, id: SongId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = Some(duration.into());
        self
    }
}
