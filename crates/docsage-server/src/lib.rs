//! DocSage HTTP surface.
//!
//! Handlers are thin: they decode the request, call into the ingest and
//! resolve crates, and map `docsage_core::Error` onto status codes.

pub mod error;
pub mod routes;
pub mod state;

pub use routes::build_router;
pub use state::AppState;
