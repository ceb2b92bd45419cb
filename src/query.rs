//! Query builders and pagination.
//!
//! The in-memory backend is always available; the SQLite backend requires
//! the `sqlite` feature.

pub use tablekit_query::*;
