//! Discoteque Catalog Server Library
//!
//! This library exposes the internal modules for testing and potential reuse.

pub mod catalog;
pub mod catalog_store;
pub mod config;
pub mod server;

// Re-export commonly used types for convenience
pub use catalog::{seed_initial_catalog, SongService, TourService};
pub use catalog_store::{Database, StoreError, UnitOfWork};
pub use server::{make_app, run_server, RequestsLoggingLevel, ServerConfig};
