//! # Tablekit
//!
//! Server-side table builder. A table declares columns, filters and actions
//! over a query; each request is turned into a sorted, filtered, searched and
//! paginated payload the client renders from.
//!
//! ## Crates
//!
//! - [`conf`] - settings (`TableSettings`)
//! - [`query`] - query builders (`MemoryQuery`, `SqlQuery`) and `Page`
//! - [`state`] - state stores (`SessionStateStore`, `DatabaseStateStore`)
//! - [`tables`] - columns, filters, actions and the `Table` pipeline
//!
//! ## Feature Flags
//!
//! - `sqlite` (default) - SQLite query backend and the durable `table_state` store
//!
//! ## Quick Example
//!
//! ```rust
//! use serde_json::json;
//! use tablekit::prelude::*;
//!
//! let users = MemoryQuery::from_values(vec![
//!     json!({"name": "John Doe", "status": "active"}),
//!     json!({"name": "Jane Smith", "status": "inactive"}),
//!     json!({"name": "Bob Johnson", "status": "active"}),
//! ])
//! .unwrap();
//!
//! let table = Table::make("users")
//!     .columns([
//!         TextColumn::make("name").sortable(true).searchable(true),
//!         TextColumn::make("status"),
//!     ])
//!     .filters([SelectFilter::make("status").option("active", "Active")])
//!     .preserve_state(true)
//!     .query(users);
//!
//! let store = SessionStateStore::new();
//! let request = RequestParams::from_query("/users?sort=-name&filters[status]=active");
//! let payload = table.render(&request, Some(&store)).unwrap();
//!
//! assert_eq!(payload["records"]["total"], 2);
//! assert_eq!(payload["records"]["data"][0]["name"], "John Doe");
//! assert!(store.contains("tables.users"));
//! ```

pub mod conf;
pub mod query;
pub mod state;
pub mod tables;

pub use tablekit_conf::{SettingsError, TableSettings};
pub use tablekit_query::{QueryError, QueryBuilder};
pub use tablekit_state::{StateStore, StateStoreError};
pub use tablekit_tables::{Table, TableError};

/// Commonly used types
pub mod prelude {
	pub use tablekit_conf::TableSettings;
	pub use tablekit_query::{
		Condition, MemoryQuery, Operator, Page, QueryBuilder, Record, SortDirection,
	};
	#[cfg(feature = "sqlite")]
	pub use tablekit_query::SqlQuery;
	#[cfg(feature = "sqlite")]
	pub use tablekit_state::DatabaseStateStore;
	pub use tablekit_state::{SessionStateStore, StateMap, StateStore, store_from_settings};
	pub use tablekit_tables::{
		Action, ActionBuilder, BadgeColumn, BadgeStyle, ButtonAction, Column, ColumnBuilder,
		DateColumn, Filter, RequestParams, SelectFilter, SharedData, Table, TableError,
		TablePayload, TextColumn,
	};
}
