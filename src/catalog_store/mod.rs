mod database;
mod error;
mod models;
mod repository;
mod schema;
mod unit_of_work;

pub use database::Database;
pub use error::StoreError;
pub use models::{Album, Artist, NoInclude, Song, SongInclude, Tour, TourInclude};
pub use repository::{Entity, FieldValue, Filter, Navigation, Repository, SortKey, StagedInsert};
pub use schema::SCHEMA_VERSION;
pub use unit_of_work::UnitOfWork;
