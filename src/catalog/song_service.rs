//! Song queries and mutations over the catalog store.

use crate::catalog_store::{Album, Database, Filter, Song, SongInclude, SortKey, StoreError};
use std::sync::Arc;

pub struct SongService {
    database: Arc<Database>,
}

impl SongService {
    pub fn new(database: Arc<Database>) -> Self {
        SongService { database }
    }

    /// Create a new song. Copies the allowed fields from the input, ignoring
    /// any client-supplied id, and returns the entity with its assigned id.
    pub fn create_song(&self, song: Song) -> Result<Song, StoreError> {
        let mut unit = self.database.unit_of_work();
        let staged = unit.songs.add(Song {
            id: 0,
            name: song.name,
            duration: song.duration,
            album_id: song.album_id,
            album: None,
        });
        unit.save()?;
        unit.songs.created(staged)
    }

    /// All songs. With `references_loaded` the album navigation is fetched
    /// in the same query and results are ordered by id; without it the plain
    /// set comes back in store order.
    pub fn get_songs(&self, references_loaded: bool) -> Result<Vec<Song>, StoreError> {
        let unit = self.database.unit_of_work();
        if references_loaded {
            unit.songs
                .get_all(None, Some(SortKey::IdAscending), Some(SongInclude::Album))
        } else {
            unit.songs.get_all(None, None, None)
        }
    }

    /// Songs with exactly this duration.
    pub fn get_songs_by_duration(&self, duration: f64) -> Result<Vec<Song>, StoreError> {
        let unit = self.database.unit_of_work();
        unit.songs.get_all(
            Some(Filter::Eq(Song::DURATION, duration.into())),
            Some(SortKey::IdAscending),
            Some(SongInclude::Album),
        )
    }

    /// Songs with a duration within the range, inclusive on both bounds.
    pub fn get_songs_by_duration_range(
        &self,
        initial_duration: f64,
        max_duration: f64,
    ) -> Result<Vec<Song>, StoreError> {
        let unit = self.database.unit_of_work();
        unit.songs.get_all(
            Some(Filter::Between(
                Song::DURATION,
                initial_duration.into(),
                max_duration.into(),
            )),
            Some(SortKey::IdAscending),
            Some(SongInclude::Album),
        )
    }

    /// Songs released on the album with this name.
    pub fn get_songs_by_album(&self, album: &str) -> Result<Vec<Song>, StoreError> {
        let unit = self.database.unit_of_work();
        unit.songs.get_all(
            Some(Filter::ParentEq(Album::NAME, album.into())),
            Some(SortKey::IdAscending),
            Some(SongInclude::Album),
        )
    }

    pub fn get_song_by_id(&self, id: i64) -> Result<Option<Song>, StoreError> {
        let unit = self.database.unit_of_work();
        unit.songs.find(id)
    }

    /// Full-row replace keyed by the song's id. Returns the input entity;
    /// callers wanting server-computed state should re-fetch.
    pub fn update_song(&self, song: Song) -> Result<Song, StoreError> {
        let mut unit = self.database.unit_of_work();
        unit.songs.update(song.clone());
        unit.save()?;
        Ok(song)
    }
}
