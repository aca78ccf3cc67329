//! Song Service Rule Tests
//!
//! Business rules enforced by the song service:
//! - title and artist are required on create
//! - titles are unique
//! - the reserved record (id 1) is never created, updated or deleted
//! - missing records surface as NotFound
//! - update payload id must equal the path id

use songbook::song::{
    BusinessError, InMemorySongRepository, Operation, SongDraft, SongError, SongRepository,
    SongService, RESERVED_SONG_ID,
};

// =============================================================================
// Helpers
// =============================================================================

fn seeded_service() -> SongService<InMemorySongRepository> {
    SongService::new(InMemorySongRepository::with_reserved_song())
}

fn imagine() -> SongDraft {
    SongDraft::new("Imagine", "Lennon").with_duration("3:03")
}

fn reserved(operation: Operation) -> SongError {
    SongError::Business(BusinessError::ReservedId {
        id: RESERVED_SONG_ID,
        operation,
    })
}

// =============================================================================
// Create
// =============================================================================

/// Valid songs are stored and get a store-assigned id.
#[test]
fn test_create_assigns_id() {
    let service = seeded_service();
    let titles = ["Imagine", "Jealous Guy", "Oh Yoko!", "Crippled Inside"];

    for title in titles {
        let song = service.create(Some(SongDraft::new(title, "Lennon"))).unwrap();
        assert!(song.id > RESERVED_SONG_ID);
        assert_eq!(song.title, title);
        assert_eq!(service.find_by_id(song.id).unwrap(), song);
    }

    assert_eq!(service.find_all().unwrap().len(), titles.len() + 1);
}

/// A duplicate title is a business error and nothing is stored.
#[test]
fn test_create_duplicate_title_rejected() {
    let service = seeded_service();
    service.create(Some(imagine())).unwrap();

    let err = service.create(Some(imagine())).unwrap_err();
    assert_eq!(
        err,
        SongError::Business(BusinessError::TitleAlreadyExists("Imagine".to_string()))
    );
    assert_eq!(service.find_all().unwrap().len(), 2);
}

/// Each missing piece is reported by name.
#[test]
fn test_create_missing_fields() {
    let service = seeded_service();

    assert_eq!(
        service.create(None).unwrap_err(),
        SongError::Business(BusinessError::MissingSong)
    );

    let mut no_title = imagine();
    no_title.title = None;
    assert_eq!(
        service.create(Some(no_title)).unwrap_err(),
        SongError::Business(BusinessError::MissingTitle)
    );

    let mut no_artist = imagine();
    no_artist.artist = None;
    assert_eq!(
        service.create(Some(no_artist)).unwrap_err(),
        SongError::Business(BusinessError::MissingArtist)
    );
}

/// Duration is optional and free-form.
#[test]
fn test_create_without_duration() {
    let service = seeded_service();
    let song = service
        .create(Some(SongDraft::new("Working Class Hero", "Lennon")))
        .unwrap();
    assert_eq!(song.duration, None);
}

// =============================================================================
// Reserved record
// =============================================================================

/// Create, update and delete all refuse id 1 whatever the payload.
#[test]
fn test_reserved_id_is_immutable() {
    let service = seeded_service();

    assert_eq!(
        service.create(Some(imagine().with_id(RESERVED_SONG_ID))).unwrap_err(),
        reserved(Operation::Create)
    );
    assert_eq!(
        service
            .update(RESERVED_SONG_ID, imagine().with_id(RESERVED_SONG_ID))
            .unwrap_err(),
        reserved(Operation::Update)
    );
    assert_eq!(
        service.update(RESERVED_SONG_ID, SongDraft::default()).unwrap_err(),
        reserved(Operation::Update)
    );
    assert_eq!(
        service.delete(RESERVED_SONG_ID).unwrap_err(),
        reserved(Operation::Delete)
    );

    // Still there, untouched
    assert_eq!(
        service.find_by_id(RESERVED_SONG_ID).unwrap().title,
        "Songbook System Record"
    );
}

/// The guard fires before the existence check, even on an empty store.
#[test]
fn test_reserved_id_checked_before_existence() {
    let service = SongService::new(InMemorySongRepository::new());
    assert_eq!(
        service.delete(RESERVED_SONG_ID).unwrap_err(),
        reserved(Operation::Delete)
    );
}

// =============================================================================
// Read
// =============================================================================

#[test]
fn test_find_missing_is_not_found() {
    let service = seeded_service();
    assert_eq!(service.find_by_id(999).unwrap_err(), SongError::NotFound(999));
}

#[test]
fn test_find_all_in_id_order() {
    let service = seeded_service();
    service.create(Some(SongDraft::new("B", "x"))).unwrap();
    service.create(Some(SongDraft::new("A", "x"))).unwrap();

    let ids: Vec<_> = service.find_all().unwrap().iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

// =============================================================================
// Update
// =============================================================================

/// Title, artist and duration are overwritten; the id stays.
#[test]
fn test_update_overwrites_fields() {
    let service = seeded_service();
    let song = service.create(Some(imagine())).unwrap();

    let updated = service
        .update(
            song.id,
            SongDraft::new("Imagine (Remastered)", "John Lennon").with_id(song.id),
        )
        .unwrap();

    assert_eq!(updated.id, song.id);
    assert_eq!(updated.title, "Imagine (Remastered)");
    assert_eq!(updated.artist, "John Lennon");
    assert_eq!(updated.duration, None);
    assert_eq!(service.find_by_id(song.id).unwrap(), updated);
}

#[test]
fn test_update_missing_is_not_found() {
    let service = seeded_service();
    assert_eq!(
        service.update(42, imagine().with_id(42)).unwrap_err(),
        SongError::NotFound(42)
    );
}

/// Payload id must match the path id; an absent payload id does not match.
#[test]
fn test_update_id_mismatch() {
    let service = seeded_service();
    let song = service.create(Some(imagine())).unwrap();

    let err = service.update(song.id, imagine().with_id(song.id + 1)).unwrap_err();
    assert_eq!(
        err,
        SongError::Business(BusinessError::IdMismatch {
            path: song.id,
            payload: Some(song.id + 1),
        })
    );

    let err = service.update(song.id, imagine()).unwrap_err();
    assert!(matches!(
        err,
        SongError::Business(BusinessError::IdMismatch { payload: None, .. })
    ));
}

#[test]
fn test_update_requires_title_and_artist() {
    let service = seeded_service();
    let song = service.create(Some(imagine())).unwrap();

    let mut draft = imagine().with_id(song.id);
    draft.artist = None;
    assert_eq!(
        service.update(song.id, draft).unwrap_err(),
        SongError::Business(BusinessError::MissingArtist)
    );
}

/// Renaming onto another song's title is rejected.
#[test]
fn test_update_cannot_steal_title() {
    let service = seeded_service();
    service.create(Some(imagine())).unwrap();
    let other = service
        .create(Some(SongDraft::new("Mother", "Lennon")))
        .unwrap();

    let err = service
        .update(other.id, SongDraft::new("Imagine", "Lennon").with_id(other.id))
        .unwrap_err();
    assert_eq!(
        err,
        SongError::Business(BusinessError::TitleAlreadyExists("Imagine".to_string()))
    );
}

// =============================================================================
// Delete
// =============================================================================

#[test]
fn test_delete_then_not_found() {
    let service = seeded_service();
    let song = service.create(Some(imagine())).unwrap();

    service.delete(song.id).unwrap();
    assert_eq!(service.find_by_id(song.id).unwrap_err(), SongError::NotFound(song.id));
    assert_eq!(service.delete(song.id).unwrap_err(), SongError::NotFound(song.id));
    assert!(!service.repository().exists_by_title("Imagine").unwrap());
}

/// Without the seeded record, the first created song still avoids id 1.
#[test]
fn test_unseeded_store_skips_reserved_id() {
    let service = SongService::new(InMemorySongRepository::new());

    let song = service.create(Some(imagine())).unwrap();
    assert_ne!(song.id, RESERVED_SONG_ID);
    service.delete(song.id).unwrap();
}
