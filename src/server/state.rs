use axum::extract::FromRef;

use crate::catalog::{SongService, TourService};
use crate::catalog_store::Database;
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;

pub type GuardedSongService = Arc<SongService>;
pub type GuardedTourService = Arc<TourService>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub database: Arc<Database>,
    pub song_service: GuardedSongService,
    pub tour_service: GuardedTourService,
}

impl ServerState {
    pub fn new(config: ServerConfig, database: Arc<Database>) -> ServerState {
        ServerState {
            config,
            start_time: Instant::now(),
            song_service: Arc::new(SongService::new(database.clone())),
            tour_service: Arc::new(TourService::new(database.clone())),
            database,
        }
    }
}

impl FromRef<ServerState> for GuardedSongService {
    fn from_ref(input: &ServerState) -> Self {
        input.song_service.clone()
    }
}

impl FromRef<ServerState> for GuardedTourService {
    fn from_ref(input: &ServerState) -> Self {
        input.tour_service.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
