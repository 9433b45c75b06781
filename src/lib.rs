//! Book Catalog - a book catalog HTTP service
//!
//! Serves book records from a document store, with a read-through cache in
//! front of paginated listings that writes invalidate.

pub mod api;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod listing;
pub mod models;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_cleanup_task;
