//! SQLite schema for the catalog database.
//!
//! Integer primary keys double as the public entity ids. Referential
//! integrity between songs/albums and tours/artists is enforced by the
//! database itself, not by application checks.

use rusqlite::Connection;

pub const SCHEMA_VERSION: i64 = 1;

const CREATE_STATEMENTS: &[&str] = &[
    "CREATE TABLE artists (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL
    );",
    "CREATE TABLE albums (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL
    );",
    "CREATE TABLE songs (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        duration REAL NOT NULL,
        album_id INTEGER NOT NULL REFERENCES albums(id)
    );",
    "CREATE TABLE tours (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        city TEXT NOT NULL,
        date TEXT NOT NULL,
        is_sold INTEGER NOT NULL,
        artist_id INTEGER NOT NULL REFERENCES artists(id)
    );",
    "CREATE INDEX idx_songs_album ON songs(album_id);",
    "CREATE INDEX idx_songs_duration ON songs(duration);",
    "CREATE INDEX idx_tours_artist ON tours(artist_id);",
    "CREATE INDEX idx_tours_city ON tours(city);",
];

pub(super) fn create_schema(conn: &Connection) -> rusqlite::Result<()> {
    for statement in CREATE_STATEMENTS {
        conn.execute(statement, [])?;
    }
    conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    Ok(())
}
