//! Catalog entity records and their storage mappings.
//!
//! Wire field names are camelCase, preserving the JSON contract of the
//! original API. Navigation references (`album`, `artist`) serialize as
//! `null` unless eagerly loaded.

use super::error::StoreError;
use super::repository::{parents_by_id, Entity, Navigation};
use rusqlite::types::Value;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    #[serde(default)]
    pub id: i64,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    #[serde(default)]
    pub id: i64,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    pub duration: f64,
    pub album_id: i64,
    /// Loaded only when the query asked for references.
    #[serde(default)]
    pub album: Option<Album>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tour {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    pub city: String,
    /// Expected `YYYY-MM-DD`; not validated at this layer.
    pub date: String,
    pub is_sold: bool,
    pub artist_id: i64,
    /// Loaded only when the query asked for references.
    #[serde(default)]
    pub artist: Option<Artist>,
}

/// Navigations that can be eagerly loaded for a `Song`.
#[derive(Clone, Copy, Debug)]
pub enum SongInclude {
    Album,
}

/// Navigations that can be eagerly loaded for a `Tour`.
#[derive(Clone, Copy, Debug)]
pub enum TourInclude {
    Artist,
}

/// Entities without navigations cannot request an include.
#[derive(Clone, Copy, Debug)]
pub enum NoInclude {}

impl Artist {
    pub const NAME: &'static str = "name";
}

impl Album {
    pub const NAME: &'static str = "name";
}

impl Song {
    pub const NAME: &'static str = "name";
    pub const DURATION: &'static str = "duration";
    pub const ALBUM_ID: &'static str = "album_id";
}

impl Tour {
    pub const NAME: &'static str = "name";
    pub const CITY: &'static str = "city";
    pub const DATE: &'static str = "date";
    pub const IS_SOLD: &'static str = "is_sold";
    pub const ARTIST_ID: &'static str = "artist_id";
}

impl Entity for Artist {
    const TABLE: &'static str = "artists";
    const FIELDS: &'static [&'static str] = &["name"];
    const PARENT: Option<Navigation> = None;
    type Include = NoInclude;

    fn id(&self) -> i64 {
        self.id
    }

    fn assign_id(&mut self, id: i64) {
        self.id = id;
    }

    fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Artist {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    }

    fn field_values(&self) -> Vec<Value> {
        vec![Value::Text(self.name.clone())]
    }

    fn load_navigation(
        _conn: &Connection,
        _items: &mut [Self],
        include: NoInclude,
    ) -> Result<(), StoreError> {
        match include {}
    }
}

impl Entity for Album {
    const TABLE: &'static str = "albums";
    const FIELDS: &'static [&'static str] = &["name"];
    const PARENT: Option<Navigation> = None;
    type Include = NoInclude;

    fn id(&self) -> i64 {
        self.id
    }

    fn assign_id(&mut self, id: i64) {
        self.id = id;
    }

    fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Album {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    }

    fn field_values(&self) -> Vec<Value> {
        vec![Value::Text(self.name.clone())]
    }

    fn load_navigation(
        _conn: &Connection,
        _items: &mut [Self],
        include: NoInclude,
    ) -> Result<(), StoreError> {
        match include {}
    }
}

impl Entity for Song {
    const TABLE: &'static str = "songs";
    const FIELDS: &'static [&'static str] = &["name", "duration", "album_id"];
    const PARENT: Option<Navigation> = Some(Navigation {
        table: "albums",
        fk_column: "album_id",
    });
    type Include = SongInclude;

    fn id(&self) -> i64 {
        self.id
    }

    fn assign_id(&mut self, id: i64) {
        self.id = id;
    }

    fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Song {
            id: row.get(0)?,
            name: row.get(1)?,
            duration: row.get(2)?,
            album_id: row.get(3)?,
            album: None,
        })
    }

    fn field_values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.name.clone()),
            Value::Real(self.duration),
            Value::Integer(self.album_id),
        ]
    }

    fn load_navigation(
        conn: &Connection,
        items: &mut [Self],
        include: SongInclude,
    ) -> Result<(), StoreError> {
        match include {
            SongInclude::Album => {
                let album_ids = items.iter().map(|song| song.album_id).collect();
                let albums = parents_by_id::<Album>(conn, album_ids)?;
                for song in items.iter_mut() {
                    song.album = albums.get(&song.album_id).cloned();
                }
            }
        }
        Ok(())
    }
}

impl Entity for Tour {
    const TABLE: &'static str = "tours";
    const FIELDS: &'static [&'static str] = &["name", "city", "date", "is_sold", "artist_id"];
    const PARENT: Option<Navigation> = Some(Navigation {
        table: "artists",
        fk_column: "artist_id",
    });
    type Include = TourInclude;

    fn id(&self) -> i64 {
        self.id
    }

    fn assign_id(&mut self, id: i64) {
        self.id = id;
    }

    fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Tour {
            id: row.get(0)?,
            name: row.get(1)?,
            city: row.get(2)?,
            date: row.get(3)?,
            is_sold: row.get::<_, i64>(4)? != 0,
            artist_id: row.get(5)?,
            artist: None,
        })
    }

    fn field_values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.name.clone()),
            Value::Text(self.city.clone()),
            Value::Text(self.date.clone()),
            Value::Integer(self.is_sold as i64),
            Value::Integer(self.artist_id),
        ]
    }

    fn load_navigation(
        conn: &Connection,
        items: &mut [Self],
        include: TourInclude,
    ) -> Result<(), StoreError> {
        match include {
            TourInclude::Artist => {
                let artist_ids = items.iter().map(|tour| tour.artist_id).collect();
                let artists = parents_by_id::<Artist>(conn, artist_ids)?;
                for tour in items.iter_mut() {
                    tour.artist = artists.get(&tour.artist_id).cloned();
                }
            }
        }
        Ok(())
    }
}
