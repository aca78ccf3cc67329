//! SQLite-backed song repository.
//!
//! A single connection guarded by a mutex; every repository call runs
//! under the lock and is therefore atomic with respect to other calls.
//!
//! # Tables
//!
//! * `songs` - one row per song, `title` unique.
//!
//! The `songs` entry in `sqlite_sequence` starts at the reserved id, so
//! AUTOINCREMENT never hands it out even before the system record is
//! seeded.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{ffi, params, Connection, OptionalExtension, Row};

use super::errors::{BusinessError, SongError, SongResult};
use super::model::{NewSong, Song, SongId, RESERVED_SONG_ID};
use super::repository::SongRepository;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS songs (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL UNIQUE,
        artist TEXT NOT NULL,
        duration TEXT
    );
";

/// Song repository over a SQLite database
pub struct SqliteSongRepository {
    conn: Mutex<Connection>,
}

impl SqliteSongRepository {
    /// Opens (or creates) the database file and ensures the schema exists.
    ///
    /// File databases are switched to WAL journaling.
    pub fn open(path: impl AsRef<Path>) -> SongResult<Self> {
        let conn = Connection::open(path)?;

        let journal_mode: String =
            conn.query_row("PRAGMA journal_mode = WAL", [], |r| r.get(0))?;
        if journal_mode != "wal" {
            return Err(SongError::Storage(format!(
                "Failed to switch to WAL mode. Current mode: {}",
                journal_mode
            )));
        }
        conn.execute_batch("PRAGMA synchronous = NORMAL;")?;

        Self::with_connection(conn)
    }

    /// Private in-memory database, mainly for tests
    pub fn open_in_memory() -> SongResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> SongResult<Self> {
        conn.execute_batch(SCHEMA)?;
        conn.execute(
            "INSERT INTO sqlite_sequence (name, seq)
             SELECT 'songs', ?1
             WHERE NOT EXISTS (SELECT 1 FROM sqlite_sequence WHERE name = 'songs')",
            [RESERVED_SONG_ID],
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Write the protected system record if it is not there yet.
    ///
    /// Returns true when a row was inserted.
    pub fn seed_reserved_song(&self) -> SongResult<bool> {
        let reserved = Song::reserved();
        let conn = self.lock()?;
        let inserted = conn.execute(
            "INSERT OR IGNORE INTO songs (id, title, artist, duration) VALUES (?1, ?2, ?3, ?4)",
            params![reserved.id, reserved.title, reserved.artist, reserved.duration],
        )?;
        Ok(inserted == 1)
    }

    fn lock(&self) -> SongResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| SongError::Storage("Connection lock poisoned".to_string()))
    }

    fn from_row(row: &Row) -> rusqlite::Result<Song> {
        Ok(Song {
            id: row.get(0)?,
            title: row.get(1)?,
            artist: row.get(2)?,
            duration: row.get(3)?,
        })
    }
}

/// Map a UNIQUE violation on `title` to the business error; any other
/// constraint failure stays a storage error
fn title_conflict(err: rusqlite::Error, title: &str) -> SongError {
    match &err {
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            BusinessError::TitleAlreadyExists(title.to_string()).into()
        }
        _ => err.into(),
    }
}

impl SongRepository for SqliteSongRepository {
    fn find_all(&self) -> SongResult<Vec<Song>> {
        let conn = self.lock()?;
        let mut stmt =
            conn.prepare_cached("SELECT id, title, artist, duration FROM songs ORDER BY id")?;
        let rows = stmt.query_map([], Self::from_row)?;

        let mut songs = Vec::new();
        for row in rows {
            songs.push(row?);
        }
        Ok(songs)
    }

    fn find_by_id(&self, id: SongId) -> SongResult<Option<Song>> {
        let conn = self.lock()?;
        let mut stmt =
            conn.prepare_cached("SELECT id, title, artist, duration FROM songs WHERE id = ?1")?;
        Ok(stmt.query_row([id], Self::from_row).optional()?)
    }

    fn exists_by_title(&self, title: &str) -> SongResult<bool> {
        let conn = self.lock()?;
        let mut stmt =
            conn.prepare_cached("SELECT EXISTS(SELECT 1 FROM songs WHERE title = ?1)")?;
        Ok(stmt.query_row([title], |r| r.get::<_, bool>(0))?)
    }

    fn insert(&self, song: NewSong) -> SongResult<Song> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO songs (title, artist, duration) VALUES (?1, ?2, ?3)",
            params![song.title, song.artist, song.duration],
        )
        .map_err(|e| title_conflict(e, &song.title))?;

        let id = conn.last_insert_rowid();
        Ok(song.with_id(id))
    }

    fn save(&self, song: &Song) -> SongResult<Song> {
        let conn = self.lock()?;
        let changed = conn
            .execute(
                "UPDATE songs SET title = ?1, artist = ?2, duration = ?3 WHERE id = ?4",
                params![song.title, song.artist, song.duration, song.id],
            )
            .map_err(|e| title_conflict(e, &song.title))?;

        if changed == 0 {
            return Err(SongError::NotFound(song.id));
        }
        Ok(song.clone())
    }

    fn delete(&self, id: SongId) -> SongResult<()> {
        let conn = self.lock()?;
        let changed = conn.execute("DELETE FROM songs WHERE id = ?1", [id])?;
        if changed == 0 {
            return Err(SongError::NotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_song(title: &str) -> NewSong {
        NewSong {
            title: title.to_string(),
            artist: "Lennon".to_string(),
            duration: Some("3:03".to_string()),
        }
    }

    #[test]
    fn test_insert_and_find() {
        let repo = SqliteSongRepository::open_in_memory().unwrap();
        let song = repo.insert(new_song("Imagine")).unwrap();

        assert_eq!(repo.find_by_id(song.id).unwrap(), Some(song.clone()));
        assert_eq!(repo.find_all().unwrap(), vec![song]);
    }

    #[test]
    fn test_unseeded_database_never_assigns_reserved_id() {
        let repo = SqliteSongRepository::open_in_memory().unwrap();
        let song = repo.insert(new_song("Imagine")).unwrap();

        assert_eq!(song.id, RESERVED_SONG_ID + 1);
        assert_eq!(repo.find_by_id(RESERVED_SONG_ID).unwrap(), None);

        // Seeding afterwards still lands on the reserved id
        assert!(repo.seed_reserved_song().unwrap());
        assert_eq!(repo.find_by_id(RESERVED_SONG_ID).unwrap(), Some(Song::reserved()));
    }

    #[test]
    fn test_reopen_keeps_sequence() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("songs.db");

        let first = SqliteSongRepository::open(&path)
            .unwrap()
            .insert(new_song("Imagine"))
            .unwrap();
        let second = SqliteSongRepository::open(&path)
            .unwrap()
            .insert(new_song("Mother"))
            .unwrap();

        assert_eq!(first.id, 2);
        assert_eq!(second.id, 3);
    }

    #[test]
    fn test_find_missing_is_none() {
        let repo = SqliteSongRepository::open_in_memory().unwrap();
        assert_eq!(repo.find_by_id(999).unwrap(), None);
    }

    #[test]
    fn test_unique_title_violation_is_business_error() {
        let repo = SqliteSongRepository::open_in_memory().unwrap();
        repo.insert(new_song("Imagine")).unwrap();

        let err = repo.insert(new_song("Imagine")).unwrap_err();
        assert_eq!(
            err,
            SongError::Business(BusinessError::TitleAlreadyExists("Imagine".to_string()))
        );
    }

    #[test]
    fn test_other_constraint_failures_are_storage_errors() {
        let repo = SqliteSongRepository::open_in_memory().unwrap();
        let err = repo
            .lock()
            .unwrap()
            .execute("INSERT INTO songs (title, artist) VALUES ('Imagine', NULL)", [])
            .unwrap_err();

        assert!(matches!(title_conflict(err, "Imagine"), SongError::Storage(_)));
    }

    #[test]
    fn test_seed_reserved_song_is_idempotent() {
        let repo = SqliteSongRepository::open_in_memory().unwrap();
        assert!(repo.seed_reserved_song().unwrap());
        assert!(!repo.seed_reserved_song().unwrap());

        let next = repo.insert(new_song("Imagine")).unwrap();
        assert_eq!(next.id, 2);
    }

    #[test]
    fn test_null_duration_round_trips() {
        let repo = SqliteSongRepository::open_in_memory().unwrap();
        let mut song = new_song("Imagine");
        song.duration = None;

        let stored = repo.insert(song).unwrap();
        assert_eq!(repo.find_by_id(stored.id).unwrap().unwrap().duration, None);
    }

    #[test]
    fn test_save_and_delete_missing() {
        let repo = SqliteSongRepository::open_in_memory().unwrap();
        let ghost = new_song("Ghost").with_id(77);

        assert_eq!(repo.save(&ghost).unwrap_err(), SongError::NotFound(77));
        assert_eq!(repo.delete(77).unwrap_err(), SongError::NotFound(77));
    }
}
