//! # Song Service
//!
//! Business rules for song records:
//!
//! - the reserved system record (id 1) is never created, updated or deleted
//! - title and artist are required
//! - titles are unique
//! - an update payload must carry the same id as the path

use std::sync::Arc;

use crate::observability::{Event, Logger, MetricsRegistry};

use super::errors::{BusinessError, Operation, SongError, SongResult};
use super::model::{NewSong, Song, SongDraft, SongId, RESERVED_SONG_ID};
use super::repository::SongRepository;

/// Reject any mutation that targets the reserved system record
pub fn ensure_changeable(id: SongId, operation: Operation) -> Result<(), BusinessError> {
    if id == RESERVED_SONG_ID {
        return Err(BusinessError::ReservedId { id, operation });
    }
    Ok(())
}

/// Song service over any [`SongRepository`]
pub struct SongService<R: SongRepository> {
    repository: Arc<R>,
    metrics: Arc<MetricsRegistry>,
}

impl<R: SongRepository> SongService<R> {
    pub fn new(repository: R) -> Self {
        Self::with_metrics(repository, Arc::new(MetricsRegistry::new()))
    }

    /// Service that reports into a shared metrics registry
    pub fn with_metrics(repository: R, metrics: Arc<MetricsRegistry>) -> Self {
        Self {
            repository: Arc::new(repository),
            metrics,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn metrics(&self) -> &Arc<MetricsRegistry> {
        &self.metrics
    }

    /// All songs in store order
    pub fn find_all(&self) -> SongResult<Vec<Song>> {
        self.repository
            .find_all()
            .inspect_err(|e| self.record_failure("find_all", e))
    }

    /// The song with `id`, or `NotFound`
    pub fn find_by_id(&self, id: SongId) -> SongResult<Song> {
        self.repository
            .find_by_id(id)
            .inspect_err(|e| self.record_failure("find_by_id", e))?
            .ok_or(SongError::NotFound(id))
    }

    /// Validate a draft and store it as a new song.
    ///
    /// Any client-supplied id other than the reserved one is ignored; the
    /// store assigns the id.
    pub fn create(&self, draft: Option<SongDraft>) -> SongResult<Song> {
        let result = self.try_create(draft);
        match &result {
            Ok(song) => {
                self.metrics.increment_songs_created();
                let id = song.id.to_string();
                Logger::info(
                    Event::SongCreated.as_str(),
                    &[("id", id.as_str()), ("title", song.title.as_str())],
                );
            }
            Err(e) => self.record_failure(Operation::Create.as_str(), e),
        }
        result
    }

    fn try_create(&self, draft: Option<SongDraft>) -> SongResult<Song> {
        let draft = draft.ok_or(BusinessError::MissingSong)?;
        let title = draft.title.ok_or(BusinessError::MissingTitle)?;
        let artist = draft.artist.ok_or(BusinessError::MissingArtist)?;

        if let Some(id) = draft.id {
            ensure_changeable(id, Operation::Create)?;
        }
        if self.repository.exists_by_title(&title)? {
            return Err(BusinessError::TitleAlreadyExists(title).into());
        }

        self.repository.insert(NewSong {
            title,
            artist,
            duration: draft.duration,
        })
    }

    /// Overwrite title, artist and duration of the song at `id`
    pub fn update(&self, id: SongId, draft: SongDraft) -> SongResult<Song> {
        let result = self.try_update(id, draft);
        match &result {
            Ok(song) => {
                self.metrics.increment_songs_updated();
                let id = song.id.to_string();
                Logger::info(
                    Event::SongUpdated.as_str(),
                    &[("id", id.as_str()), ("title", song.title.as_str())],
                );
            }
            Err(e) => self.record_failure(Operation::Update.as_str(), e),
        }
        result
    }

    fn try_update(&self, id: SongId, draft: SongDraft) -> SongResult<Song> {
        ensure_changeable(id, Operation::Update)?;
        let mut song = self
            .repository
            .find_by_id(id)?
            .ok_or(SongError::NotFound(id))?;

        if draft.id != Some(song.id) {
            return Err(BusinessError::IdMismatch {
                path: id,
                payload: draft.id,
            }
            .into());
        }

        let title = draft.title.ok_or(BusinessError::MissingTitle)?;
        let artist = draft.artist.ok_or(BusinessError::MissingArtist)?;
        if title != song.title && self.repository.exists_by_title(&title)? {
            return Err(BusinessError::TitleAlreadyExists(title).into());
        }

        song.title = title;
        song.artist = artist;
        song.duration = draft.duration;

        self.repository.save(&song)
    }

    /// Remove the song at `id`
    pub fn delete(&self, id: SongId) -> SongResult<()> {
        let result = self.try_delete(id);
        match &result {
            Ok(()) => {
                self.metrics.increment_songs_deleted();
                let id = id.to_string();
                Logger::info(Event::SongDeleted.as_str(), &[("id", id.as_str())]);
            }
            Err(e) => self.record_failure(Operation::Delete.as_str(), e),
        }
        result
    }

    fn try_delete(&self, id: SongId) -> SongResult<()> {
        ensure_changeable(id, Operation::Delete)?;
        let song = self
            .repository
            .find_by_id(id)?
            .ok_or(SongError::NotFound(id))?;
        self.repository.delete(song.id)
    }

    fn record_failure(&self, operation: &str, err: &SongError) {
        let message = err.to_string();
        match err {
            SongError::Business(_) => {
                self.metrics.increment_business_rejections();
                Logger::warn(
                    Event::SongRejected.as_str(),
                    &[("operation", operation), ("reason", message.as_str())],
                );
            }
            SongError::NotFound(_) => {}
            SongError::Storage(_) => {
                Logger::error(
                    Event::StorageFailed.as_str(),
                    &[("operation", operation), ("error", message.as_str())],
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::song::InMemorySongRepository;

    fn service() -> SongService<InMemorySongRepository> {
        SongService::new(InMemorySongRepository::with_reserved_song())
    }

    #[test]
    fn test_guard_only_rejects_reserved_id() {
        assert!(ensure_changeable(2, Operation::Update).is_ok());
        assert_eq!(
            ensure_changeable(RESERVED_SONG_ID, Operation::Delete),
            Err(BusinessError::ReservedId {
                id: RESERVED_SONG_ID,
                operation: Operation::Delete,
            })
        );
    }

    #[test]
    fn test_create_ignores_client_id() {
        let service = service();
        let song = service
            .create(Some(SongDraft::new("Imagine", "Lennon").with_id(500)))
            .unwrap();
        assert_eq!(song.id, 2);
    }

    #[test]
    fn test_create_checks_fields_before_reserved_id() {
        let service = service();
        let draft = SongDraft {
            id: Some(RESERVED_SONG_ID),
            title: None,
            artist: Some("Lennon".to_string()),
            duration: None,
        };
        assert_eq!(
            service.create(Some(draft)).unwrap_err(),
            SongError::Business(BusinessError::MissingTitle)
        );
    }

    #[test]
    fn test_update_keeping_own_title_is_allowed() {
        let service = service();
        let song = service
            .create(Some(SongDraft::new("Imagine", "Lennon")))
            .unwrap();

        let updated = service
            .update(
                song.id,
                SongDraft::new("Imagine", "John Lennon")
                    .with_id(song.id)
                    .with_duration("3:04"),
            )
            .unwrap();
        assert_eq!(updated.artist, "John Lennon");
        assert_eq!(updated.duration.as_deref(), Some("3:04"));
    }

    #[test]
    fn test_metrics_track_outcomes() {
        let service = service();
        let song = service
            .create(Some(SongDraft::new("Imagine", "Lennon")))
            .unwrap();
        let _ = service.create(Some(SongDraft::new("Imagine", "Lennon")));
        service.delete(song.id).unwrap();

        let snapshot = service.metrics().snapshot();
        assert_eq!(snapshot.songs_created, 1);
        assert_eq!(snapshot.songs_deleted, 1);
        assert_eq!(snapshot.business_rejections, 1);
    }
}
