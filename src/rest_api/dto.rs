//! # Wire Representation
//!
//! `{ "id": integer|null, "title": string|null, "artist": string|null,
//! "duration": string|null }`

use serde::{Deserialize, Serialize};

use crate::song::{Song, SongDraft, SongId};

/// Song as sent and received over HTTP
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongDto {
    #[serde(default)]
    pub id: Option<SongId>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
}

impl From<&Song> for SongDto {
    fn from(song: &Song) -> Self {
        Self {
            id: Some(song.id),
            title: Some(song.title.clone()),
            artist: Some(song.artist.clone()),
            duration: song.duration.clone(),
        }
    }
}

impl From<SongDto> for SongDraft {
    fn from(dto: SongDto) -> Self {
        Self {
            id: dto.id,
            title: dto.title,
            artist: dto.artist,
            duration: dto.duration,
        }
    }
}
