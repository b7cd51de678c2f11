//! Initial catalog data for a fresh database.
//!
//! The create endpoints require existing parent rows, so an empty database
//! is unusable until artists and albums exist. Seeding is idempotent: it
//! only runs when both tables are empty.

use crate::catalog_store::{Album, Artist, Database, StoreError};

const INITIAL_ARTISTS: &[&str] = &["Karol G", "Juanes", "Shakira", "Aterciopelados"];

const INITIAL_ALBUMS: &[&str] = &[
    "Mañana Será Bonito",
    "Mis Planes Son Amarte",
    "Pies Descalzos",
    "El Dorado",
];

/// Populate an empty database with the initial artists and albums.
/// Returns whether anything was inserted.
pub fn seed_initial_catalog(database: &Database) -> Result<bool, StoreError> {
    if database.count::<Artist>()? > 0 || database.count::<Album>()? > 0 {
        return Ok(false);
    }

    let mut unit = database.unit_of_work();
    for name in INITIAL_ARTISTS {
        unit.artists.add(Artist {
            id: 0,
            name: (*name).to_owned(),
        });
    }
    for name in INITIAL_ALBUMS {
        unit.albums.add(Album {
            id: 0,
            name: (*name).to_owned(),
        });
    }
    unit.save()?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_is_idempotent() {
        let database = Database::in_memory().unwrap();

        assert!(seed_initial_catalog(&database).unwrap());
        let artists = database.count::<Artist>().unwrap();
        let albums = database.count::<Album>().unwrap();
        assert_eq!(artists, INITIAL_ARTISTS.len() as i64);
        assert_eq!(albums, INITIAL_ALBUMS.len() as i64);

        // A second run must not duplicate anything.
        assert!(!seed_initial_catalog(&database).unwrap());
        assert_eq!(database.count::<Artist>().unwrap(), artists);
        assert_eq!(database.count::<Album>().unwrap(), albums);
    }
}
