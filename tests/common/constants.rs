//! Shared constants for end-to-end tests

pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 20;
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

// Rows inserted by the test fixtures, with fixed ids.
pub const ARTIST_1_ID: i64 = 1;
pub const ARTIST_1_NAME: &str = "Karol G";
pub const ARTIST_2_ID: i64 = 2;
pub const ARTIST_2_NAME: &str = "Juanes";

pub const ALBUM_1_ID: i64 = 1;
pub const ALBUM_1_NAME: &str = "Mañana Será Bonito";
pub const ALBUM_2_ID: i64 = 2;
pub const ALBUM_2_NAME: &str = "Un Día Normal";
