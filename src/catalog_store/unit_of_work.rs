//! Unit of work: one repository per entity type, one atomic save.

use super::error::StoreError;
use super::models::{Album, Artist, Song, Tour};
use super::repository::Repository;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

/// Coordination point for a single logical operation.
///
/// Every repository shares the same connection handle, and every staged
/// `add`/`update` since the last save commits in one SQLite transaction:
/// all of them persist or none do. A unit of work is scoped to one request
/// and never shared across concurrent operations; dropping it releases
/// everything it staged.
pub struct UnitOfWork {
    conn: Arc<Mutex<Connection>>,
    pub artists: Repository<Artist>,
    pub albums: Repository<Album>,
    pub songs: Repository<Song>,
    pub tours: Repository<Tour>,
}

impl UnitOfWork {
    pub(super) fn new(conn: Arc<Mutex<Connection>>) -> Self {
        UnitOfWork {
            artists: Repository::new(conn.clone()),
            albums: Repository::new(conn.clone()),
            songs: Repository::new(conn.clone()),
            tours: Repository::new(conn.clone()),
            conn,
        }
    }

    /// Commit every staged operation across all repositories atomically.
    /// Any failure rolls the whole batch back.
    pub fn save(&mut self) -> Result<(), StoreError> {
        let mut guard = self.conn.lock().unwrap();
        let tx = guard.transaction()?;
        self.artists.apply_pending(&tx)?;
        self.albums.apply_pending(&tx)?;
        self.songs.apply_pending(&tx)?;
        self.tours.apply_pending(&tx)?;
        tx.commit()?;
        Ok(())
    }
}
