//! Song repository trait and in-memory implementation

use std::collections::BTreeMap;
use std::sync::RwLock;

use super::errors::{BusinessError, SongError, SongResult};
use super::model::{NewSong, Song, SongId, RESERVED_SONG_ID};

/// Persistence capabilities the song service relies on
///
/// Each call is atomic on its own; callers get no transaction spanning
/// several calls.
pub trait SongRepository: Send + Sync {
    /// All songs in ascending id order
    fn find_all(&self) -> SongResult<Vec<Song>>;

    /// Find a song by its id
    fn find_by_id(&self, id: SongId) -> SongResult<Option<Song>>;

    /// Check if a title is already taken
    fn exists_by_title(&self, title: &str) -> SongResult<bool>;

    /// Store a new song; the repository assigns the id
    fn insert(&self, song: NewSong) -> SongResult<Song>;

    /// Overwrite an existing song's fields
    fn save(&self, song: &Song) -> SongResult<Song>;

    /// Remove a song
    fn delete(&self, id: SongId) -> SongResult<()>;
}

#[derive(Debug)]
struct InMemoryState {
    songs: BTreeMap<SongId, Song>,
    next_id: SongId,
}

impl Default for InMemoryState {
    fn default() -> Self {
        Self {
            songs: BTreeMap::new(),
            next_id: RESERVED_SONG_ID + 1,
        }
    }
}

/// In-memory song repository for tests and `serve --in-memory`
///
/// Assigned ids start after the reserved id, seeded or not. Use
/// [`InMemorySongRepository::with_reserved_song`] to mirror a database
/// created by `songbook init`.
#[derive(Debug, Default)]
pub struct InMemorySongRepository {
    state: RwLock<InMemoryState>,
}

impl InMemorySongRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-seeded with the protected system record
    pub fn with_reserved_song() -> Self {
        let reserved = Song::reserved();
        let mut state = InMemoryState::default();
        state.songs.insert(reserved.id, reserved);
        Self {
            state: RwLock::new(state),
        }
    }

    fn poisoned() -> SongError {
        SongError::Storage("Lock poisoned".to_string())
    }
}

impl SongRepository for InMemorySongRepository {
    fn find_all(&self) -> SongResult<Vec<Song>> {
        let state = self.state.read().map_err(|_| Self::poisoned())?;
        Ok(state.songs.values().cloned().collect())
    }

    fn find_by_id(&self, id: SongId) -> SongResult<Option<Song>> {
        let state = self.state.read().map_err(|_| Self::poisoned())?;
        Ok(state.songs.get(&id).cloned())
    }

    fn exists_by_title(&self, title: &str) -> SongResult<bool> {
        let state = self.state.read().map_err(|_| Self::poisoned())?;
        Ok(state.songs.values().any(|s| s.title == title))
    }

    fn insert(&self, song: NewSong) -> SongResult<Song> {
        let mut state = self.state.write().map_err(|_| Self::poisoned())?;

        // Same guarantee as the UNIQUE column in SQLite
        if state.songs.values().any(|s| s.title == song.title) {
            return Err(BusinessError::TitleAlreadyExists(song.title).into());
        }

        let id = state.next_id;
        state.next_id += 1;
        let song = song.with_id(id);
        state.songs.insert(id, song.clone());
        Ok(song)
    }

    fn save(&self, song: &Song) -> SongResult<Song> {
        let mut state = self.state.write().map_err(|_| Self::poisoned())?;

        if state
            .songs
            .values()
            .any(|s| s.id != song.id && s.title == song.title)
        {
            return Err(BusinessError::TitleAlreadyExists(song.title.clone()).into());
        }

        match state.songs.get_mut(&song.id) {
            Some(existing) => {
                *existing = song.clone();
                Ok(song.clone())
            }
            None => Err(SongError::NotFound(song.id)),
        }
    }

    fn delete(&self, id: SongId) -> SongResult<()> {
        let mut state = self.state.write().map_err(|_| Self::poisoned())?;
        state
            .songs
            .remove(&id)
            .map(|_| ())
            .ok_or(SongError::NotFound(id))
    }
}
