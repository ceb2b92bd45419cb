//! # Tablekit State
//!
//! Storage for table state (sort, filters, search, page) that survives
//! across requests.
//!
//! ## Backends
//!
//! - [`SessionStateStore`]: in-memory map scoped to one user session
//! - `DatabaseStateStore` (feature `sqlite`): rows of the durable
//!   `table_state` table, optionally scoped to a user
//!
//! ## Example
//!
//! ```rust
//! use serde_json::{Map, Value, json};
//! use tablekit_state::{SessionStateStore, StateStore};
//!
//! let store = SessionStateStore::new();
//!
//! let mut state = Map::new();
//! state.insert("sort".to_string(), json!("-name"));
//! store.put("tables.users", &state).unwrap();
//!
//! let loaded = store.get_or("tables.users", Map::new()).unwrap();
//! assert_eq!(loaded.get("sort"), Some(&Value::from("-name")));
//! ```

pub mod backends;
pub mod error;
pub mod store;

#[cfg(feature = "sqlite")]
pub use backends::DatabaseStateStore;
pub use backends::{SessionStateStore, store_from_settings};
pub use error::{Result, StateStoreError};
pub use store::{StateMap, StateStore};
