mod seed;
mod song_service;
mod tour_service;

pub use seed::seed_initial_catalog;
pub use song_service::SongService;
pub use tour_service::TourService;
