//! HTTP client for end-to-end tests
//!
//! This module provides a high-level HTTP client that wraps reqwest
//! and provides methods for all catalog endpoints.
//!
//! When API routes or request formats change, update only this file.

use super::constants::*;
use reqwest::Response;
use serde_json::Value;
use std::time::Duration;

pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    // ========================================================================
    // Song Endpoints
    // ========================================================================

    /// GET /api/Song/GetSongs
    pub async fn get_songs(&self, are_references_loaded: bool) -> Response {
        self.client
            .get(format!("{}/api/Song/GetSongs", self.base_url))
            .query(&[("areReferencesLoaded", are_references_loaded)])
            .send()
            .await
            .expect("Request failed")
    }

    /// GET /api/Song/GetSongById
    pub async fn get_song_by_id(&self, id: i64) -> Response {
        self.client
            .get(format!("{}/api/Song/GetSongById", self.base_url))
            .query(&[("id", id)])
            .send()
            .await
            .expect("Request failed")
    }

    /// GET /api/Song/GetSongsByDuration
    pub async fn get_songs_by_duration(&self, duration: f64) -> Response {
        self.client
            .get(format!("{}/api/Song/GetSongsByDuration", self.base_url))
            .query(&[("duration", duration)])
            .send()
            .await
            .expect("Request failed")
    }

    /// GET /api/Song/GetSongsByDurationRange
    pub async fn get_songs_by_duration_range(
        &self,
        initial_duration: f64,
        duration_range: f64,
    ) -> Response {
        self.client
            .get(format!(
                "{}/api/Song/GetSongsByDurationRange",
                self.base_url
            ))
            .query(&[
                ("initialDuration", initial_duration),
                ("durationRange", duration_range),
            ])
            .send()
            .await
            .expect("Request failed")
    }

    /// GET /api/Song/GetSongsByAlbum
    pub async fn get_songs_by_album(&self, album: &str) -> Response {
        self.client
            .get(format!("{}/api/Song/GetSongsByAlbum", self.base_url))
            .query(&[("album", album)])
            .send()
            .await
            .expect("Request failed")
    }

    /// POST /api/Song/CreateSong
    pub async fn create_song(&self, body: &Value) -> Response {
        self.client
            .post(format!("{}/api/Song/CreateSong", self.base_url))
            .json(body)
            .send()
            .await
            .expect("Request failed")
    }

    /// PUT /api/Song/UpdateSong
    pub async fn update_song(&self, body: &Value) -> Response {
        self.client
            .put(format!("{}/api/Song/UpdateSong", self.base_url))
            .json(body)
            .send()
            .await
            .expect("Request failed")
    }

    // ========================================================================
    // Tour Endpoints
    // ========================================================================

    /// GET /api/Tour/GetTours
    pub async fn get_tours(&self, are_references_loaded: bool) -> Response {
        self.client
            .get(format!("{}/api/Tour/GetTours", self.base_url))
            .query(&[("areReferencesLoaded", are_references_loaded)])
            .send()
            .await
            .expect("Request failed")
    }

    /// GET /api/Tour/GetTourById
    pub async fn get_tour_by_id(&self, id: i64) -> Response {
        self.client
            .get(format!("{}/api/Tour/GetTourById", self.base_url))
            .query(&[("id", id)])
            .send()
            .await
            .expect("Request failed")
    }

    /// GET /api/Tour/GetToursByCity
    pub async fn get_tours_by_city(&self, city: &str) -> Response {
        self.client
            .get(format!("{}/api/Tour/GetToursByCity", self.base_url))
            .query(&[("city", city)])
            .send()
            .await
            .expect("Request failed")
    }

    /// GET /api/Tour/GetToursByDate
    pub async fn get_tours_by_date(&self, date: &str) -> Response {
        self.client
            .get(format!("{}/api/Tour/GetToursByDate", self.base_url))
            .query(&[("date", date)])
            .send()
            .await
            .expect("Request failed")
    }

    /// GET /api/Tour/GetToursBySolds
    pub async fn get_tours_by_solds(&self, is_sold: bool) -> Response {
        self.client
            .get(format!("{}/api/Tour/GetToursBySolds", self.base_url))
            .query(&[("isSold", is_sold)])
            .send()
            .await
            .expect("Request failed")
    }

    /// GET /api/Tour/GetToursByArtist
    pub async fn get_tours_by_artist(&self, artist: &str) -> Response {
        self.client
            .get(format!("{}/api/Tour/GetToursByArtist", self.base_url))
            .query(&[("artist", artist)])
            .send()
            .await
            .expect("Request failed")
    }

    /// POST /api/Tour/CreateTour
    pub async fn create_tour(&self, body: &Value) -> Response {
        self.client
            .post(format!("{}/api/Tour/CreateTour", self.base_url))
            .json(body)
            .send()
            .await
            .expect("Request failed")
    }

    /// PUT /api/Tour/UpdateTour
    pub async fn update_tour(&self, body: &Value) -> Response {
        self.client
            .put(format!("{}/api/Tour/UpdateTour", self.base_url))
            .json(body)
            .send()
            .await
            .expect("Request failed")
    }
}
