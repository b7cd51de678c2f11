use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;

use tracing::error;

use crate::catalog_store::{Database, Song, StoreError, Tour};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::{log_requests, state::*, ServerConfig};

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub version: &'static str,
    pub songs: i64,
    pub tours: i64,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ReferencesLoadedParams {
    #[serde(default)]
    are_references_loaded: bool,
}

#[derive(Deserialize, Debug)]
struct IdParam {
    id: i64,
}

#[derive(Deserialize, Debug)]
struct DurationParam {
    duration: f64,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct DurationRangeParams {
    initial_duration: f64,
    duration_range: f64,
}

#[derive(Deserialize, Debug)]
struct AlbumParam {
    album: String,
}

#[derive(Deserialize, Debug)]
struct CityParam {
    city: String,
}

#[derive(Deserialize, Debug)]
struct DateParam {
    date: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct IsSoldParam {
    is_sold: bool,
}

#[derive(Deserialize, Debug)]
struct ArtistParam {
    artist: String,
}

/// Empty filtered lists surface as 404 with a short message; everything the
/// store cannot answer is a plain 500.
fn list_or_not_found<T: Serialize>(items: Vec<T>, empty_message: &'static str) -> Response {
    if items.is_empty() {
        (StatusCode::NOT_FOUND, empty_message).into_response()
    } else {
        Json(items).into_response()
    }
}

fn store_fault(err: StoreError) -> Response {
    match err {
        StoreError::RowNotFound { .. } => {
            (StatusCode::NOT_FOUND, format!("{}", err)).into_response()
        }
        other => {
            error!("Catalog store fault: {}", other);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        version: env!("CARGO_PKG_VERSION"),
        songs: state.database.count::<Song>().unwrap_or(0),
        tours: state.database.count::<Tour>().unwrap_or(0),
    };
    Json(stats)
}

// =============================================================================
// Song Routes
// =============================================================================

async fn get_songs(
    State(songs): State<GuardedSongService>,
    Query(params): Query<ReferencesLoadedParams>,
) -> Response {
    match songs.get_songs(params.are_references_loaded) {
        Ok(list) => Json(list).into_response(),
        Err(err) => store_fault(err),
    }
}

async fn get_song_by_id(
    State(songs): State<GuardedSongService>,
    Query(params): Query<IdParam>,
) -> Response {
    match songs.get_song_by_id(params.id) {
        Ok(Some(song)) => Json(song).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(err) => store_fault(err),
    }
}

async fn get_songs_by_duration(
    State(songs): State<GuardedSongService>,
    Query(params): Query<DurationParam>,
) -> Response {
    match songs.get_songs_by_duration(params.duration) {
        Ok(list) => list_or_not_found(list, "There were no songs found with this duration"),
        Err(err) => store_fault(err),
    }
}

async fn get_songs_by_duration_range(
    State(songs): State<GuardedSongService>,
    Query(params): Query<DurationRangeParams>,
) -> Response {
    match songs.get_songs_by_duration_range(params.initial_duration, params.duration_range) {
        Ok(list) => list_or_not_found(list, "There were no songs found in this duration range"),
        Err(err) => store_fault(err),
    }
}

async fn get_songs_by_album(
    State(songs): State<GuardedSongService>,
    Query(params): Query<AlbumParam>,
) -> Response {
    match songs.get_songs_by_album(&params.album) {
        Ok(list) => list_or_not_found(list, "There were no songs found by this album"),
        Err(err) => store_fault(err),
    }
}

async fn create_song(
    State(songs): State<GuardedSongService>,
    Json(body): Json<Song>,
) -> Response {
    match songs.create_song(body) {
        Ok(created) => Json(created).into_response(),
        Err(err) => store_fault(err),
    }
}

async fn update_song(
    State(songs): State<GuardedSongService>,
    Json(body): Json<Song>,
) -> Response {
    match songs.update_song(body) {
        Ok(updated) => Json(updated).into_response(),
        Err(err) => store_fault(err),
    }
}

// =============================================================================
// Tour Routes
// =============================================================================

async fn get_tours(
    State(tours): State<GuardedTourService>,
    Query(params): Query<ReferencesLoadedParams>,
) -> Response {
    match tours.get_tours(params.are_references_loaded) {
        Ok(list) => Json(list).into_response(),
        Err(err) => store_fault(err),
    }
}

async fn get_tour_by_id(
    State(tours): State<GuardedTourService>,
    Query(params): Query<IdParam>,
) -> Response {
    match tours.get_tour_by_id(params.id) {
        Ok(Some(tour)) => Json(tour).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(err) => store_fault(err),
    }
}

async fn get_tours_by_city(
    State(tours): State<GuardedTourService>,
    Query(params): Query<CityParam>,
) -> Response {
    match tours.get_tours_by_city(&params.city) {
        Ok(list) => list_or_not_found(list, "There were no tours found in this city"),
        Err(err) => store_fault(err),
    }
}

async fn get_tours_by_date(
    State(tours): State<GuardedTourService>,
    Query(params): Query<DateParam>,
) -> Response {
    match tours.get_tours_by_date(&params.date) {
        Ok(list) => list_or_not_found(list, "There were no tours found on this date"),
        Err(err) => store_fault(err),
    }
}

async fn get_tours_by_solds(
    State(tours): State<GuardedTourService>,
    Query(params): Query<IsSoldParam>,
) -> Response {
    match tours.get_tours_by_sold(params.is_sold) {
        Ok(list) => list_or_not_found(list, "There were no tours found"),
        Err(err) => store_fault(err),
    }
}

async fn get_tours_by_artist(
    State(tours): State<GuardedTourService>,
    Query(params): Query<ArtistParam>,
) -> Response {
    match tours.get_tours_by_artist(&params.artist) {
        Ok(list) => list_or_not_found(list, "There were no tours found by this artist"),
        Err(err) => store_fault(err),
    }
}

async fn create_tour(
    State(tours): State<GuardedTourService>,
    Json(body): Json<Tour>,
) -> Response {
    match tours.create_tour(body) {
        Ok(created) => Json(created).into_response(),
        Err(err) => store_fault(err),
    }
}

async fn update_tour(
    State(tours): State<GuardedTourService>,
    Json(body): Json<Tour>,
) -> Response {
    match tours.update_tour(body) {
        Ok(updated) => Json(updated).into_response(),
        Err(err) => store_fault(err),
    }
}

pub fn make_app(config: ServerConfig, database: Arc<Database>) -> Router {
    let state = ServerState::new(config, database);

    let song_routes: Router = Router::new()
        .route("/GetSongs", get(get_songs))
        .route("/GetSongById", get(get_song_by_id))
        .route("/GetSongsByDuration", get(get_songs_by_duration))
        .route("/GetSongsByDurationRange", get(get_songs_by_duration_range))
        .route("/GetSongsByAlbum", get(get_songs_by_album))
        .route("/CreateSong", post(create_song))
        .route("/UpdateSong", put(update_song))
        .with_state(state.clone());

    let tour_routes: Router = Router::new()
        .route("/GetTours", get(get_tours))
        .route("/GetTourById", get(get_tour_by_id))
        .route("/GetToursByCity", get(get_tours_by_city))
        .route("/GetToursByDate", get(get_tours_by_date))
        .route("/GetToursBySolds", get(get_tours_by_solds))
        .route("/GetToursByArtist", get(get_tours_by_artist))
        .route("/CreateTour", post(create_tour))
        .route("/UpdateTour", put(update_tour))
        .with_state(state.clone());

    Router::new()
        .route("/", get(home))
        .with_state(state.clone())
        .nest("/api/Song", song_routes)
        .nest("/api/Tour", tour_routes)
        .layer(middleware::from_fn_with_state(state, log_requests))
}

pub async fn run_server(config: ServerConfig, database: Arc<Database>) -> Result<()> {
    let port = config.port;
    let app = make_app(config, database);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;

    Ok(axum::serve(listener, app).await?)
}
