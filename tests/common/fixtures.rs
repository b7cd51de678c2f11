//! Test fixture creation for the catalog database
//!
//! Each test server gets its own temporary database with a known set of
//! parent rows (artists and albums) inserted with fixed ids, so tests can
//! reference them when creating songs and tours over the API.

use super::constants::*;
use anyhow::Result;
use discoteque_server::catalog_store::Database;
use rusqlite::{params, Connection};
use std::path::PathBuf;
use tempfile::TempDir;

/// Creates a temporary catalog database with 2 artists and 2 albums.
/// Returns (temp_dir, db_path).
pub fn create_test_database() -> Result<(TempDir, PathBuf)> {
    let dir = TempDir::new()?;
    let db_path = dir.path().join("catalog.db");

    // Opening creates the schema.
    let database = Database::open(&db_path)?;
    drop(database);

    // Insert parent rows with fixed ids via direct SQL.
    let conn = Connection::open(&db_path)?;
    conn.execute(
        "INSERT INTO artists (id, name) VALUES (?1, ?2)",
        params![ARTIST_1_ID, ARTIST_1_NAME],
    )?;
    conn.execute(
        "INSERT INTO artists (id, name) VALUES (?1, ?2)",
        params![ARTIST_2_ID, ARTIST_2_NAME],
    )?;
    conn.execute(
        "INSERT INTO albums (id, name) VALUES (?1, ?2)",
        params![ALBUM_1_ID, ALBUM_1_NAME],
    )?;
    conn.execute(
        "INSERT INTO albums (id, name) VALUES (?1, ?2)",
        params![ALBUM_2_ID, ALBUM_2_NAME],
    )?;

    Ok((dir, db_path))
}
