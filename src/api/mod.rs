//! API Module
//!
//! HTTP handlers and routing for the catalog REST API.
//!
//! # Endpoints
//! - `GET /books` - List books (`?page=&limit=` for a page)
//! - `POST /books/list` - List books, pagination in the JSON body
//! - `POST /books` - Create a book
//! - `GET|PATCH|DELETE /books/:id` - Read, update or delete a book
//! - `GET /books/slug/:slug` - Read a book by slug
//! - `GET /books/search?q=` - Search books
//! - `GET /books/fields` - Distinct authors, genres and years
//! - `GET /books/random` - A random book
//! - `GET /books/most-viewed?detail=summary|full` - Most viewed books
//! - `GET /books/:id/related` - Books sharing a genre
//! - `GET /books/:id/more-by-author` - Other books by the same author
//! - `GET /stats` - Listing cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
