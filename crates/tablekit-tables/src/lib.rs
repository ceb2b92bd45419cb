//! # Tablekit Tables
//!
//! Server-side table definitions. A [`Table`] declares its columns, filters
//! and actions, takes a base query, and turns request parameters into a
//! serializable payload holding one page of records.
//!
//! ## Pipeline
//!
//! 1. The effective state is resolved from the request, merged with
//!    persisted state when state preservation is enabled
//! 2. Filter values are applied in request order
//! 3. Sorting is applied when the column is sortable
//! 4. A search term becomes an OR group over the searchable columns
//! 5. The query is paginated
//!
//! ## Example
//!
//! ```
//! use serde_json::json;
//! use tablekit_query::MemoryQuery;
//! use tablekit_tables::column::{ColumnBuilder, TextColumn};
//! use tablekit_tables::filter::SelectFilter;
//! use tablekit_tables::{RequestParams, Table};
//!
//! let query = MemoryQuery::from_values(vec![
//!     json!({"id": 1, "name": "John Doe", "status": "active"}),
//!     json!({"id": 2, "name": "Jane Smith", "status": "inactive"}),
//! ])
//! .unwrap();
//!
//! let table = Table::make("users")
//!     .columns([TextColumn::make("name").sortable(true).searchable(true)])
//!     .filters([SelectFilter::make("status").option("active", "Active")])
//!     .query(query);
//!
//! let request = RequestParams::from_query("/users?filters[status]=active");
//! let payload = table.render(&request, None).unwrap();
//!
//! assert_eq!(payload["records"]["total"], 1);
//! assert_eq!(payload["records"]["data"][0]["name"], "John Doe");
//! assert_eq!(payload["columns"][0]["label"], "Name");
//! ```

pub mod action;
pub mod column;
pub mod error;
pub mod filter;
pub mod payload;
pub mod request;
pub mod state;
pub mod table;
pub mod utils;

pub use action::{Action, ActionBuilder, ButtonAction};
pub use column::{BadgeColumn, BadgeStyle, Column, ColumnBuilder, DateColumn, TextColumn};
pub use error::{Result, TableError};
pub use filter::{Filter, SelectFilter};
pub use payload::{SharedData, TablePayload};
pub use request::RequestParams;
pub use state::TableState;
pub use table::Table;
