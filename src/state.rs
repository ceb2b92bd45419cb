//! Persisted table state.
//!
//! # Examples
//!
//! ```rust
//! use tablekit::state::{SessionStateStore, StateMap, StateStore};
//!
//! let store = SessionStateStore::new();
//! store.put("tables.users", &StateMap::new()).unwrap();
//! assert!(store.get("tables.users").unwrap().is_some());
//! ```

pub use tablekit_state::*;
