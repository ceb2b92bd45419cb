//! # Tablekit Query
//!
//! The query-builder collaborator a table drives: a backend-neutral
//! [`Condition`] tree, the [`QueryBuilder`] trait the table pipeline threads
//! through filters, sorting and search, and the length-aware [`Page`] that
//! pagination produces.
//!
//! ## Backends
//!
//! - [`MemoryQuery`]: records held in process as JSON maps, evaluated with
//!   SQLite-like comparison and `LIKE` semantics
//! - `SqlQuery` (feature `sqlite`): conditions rendered with `sea-query` and
//!   executed against a `rusqlite` connection
//!
//! ## Example
//!
//! ```rust
//! use serde_json::json;
//! use tablekit_query::{Condition, MemoryQuery, QueryBuilder, SortDirection};
//!
//! let query = MemoryQuery::from_values(vec![
//!     json!({"name": "John Doe", "status": "active"}),
//!     json!({"name": "Jane Smith", "status": "inactive"}),
//!     json!({"name": "Bob Johnson", "status": "active"}),
//! ])
//! .unwrap();
//!
//! let page = query
//!     .where_eq("status", "active")
//!     .filter(Condition::any().add(Condition::contains("name", "o")))
//!     .order_by("name", SortDirection::Ascending)
//!     .paginate(10, "page", 1)
//!     .unwrap();
//!
//! assert_eq!(page.total(), 2);
//! assert_eq!(page.items()[0]["name"], "Bob Johnson");
//! ```

pub mod builder;
pub mod condition;
pub mod error;
pub mod memory;
pub mod pagination;
pub mod sorting;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use builder::QueryBuilder;
pub use condition::{Condition, Operator};
pub use error::{QueryError, Result};
pub use memory::MemoryQuery;
pub use pagination::Page;
pub use sorting::SortDirection;
#[cfg(feature = "sqlite")]
pub use sqlite::SqlQuery;

/// A single row as produced by the bundled backends
pub type Record = serde_json::Map<String, serde_json::Value>;
