//! Session-scoped in-memory state store

use crate::error::Result;
use crate::store::{StateMap, StateStore};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// In-memory state store
///
/// Clones share the same map, so one instance can be handed to every
/// request of a session. State is lost when the process restarts.
#[derive(Debug, Clone, Default)]
pub struct SessionStateStore {
	entries: Arc<RwLock<HashMap<String, StateMap>>>,
}

impl SessionStateStore {
	/// Create an empty store
	pub fn new() -> Self {
		Self::default()
	}

	/// Remove the state stored under `key`
	pub fn forget(&self, key: &str) -> Option<StateMap> {
		self.entries.write().remove(key)
	}

	pub fn contains(&self, key: &str) -> bool {
		self.entries.read().contains_key(key)
	}

	pub fn len(&self) -> usize {
		self.entries.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.read().is_empty()
	}
}

impl StateStore for SessionStateStore {
	fn get(&self, key: &str) -> Result<Option<StateMap>> {
		Ok(self.entries.read().get(key).cloned())
	}

	fn put(&self, key: &str, state: &StateMap) -> Result<()> {
		self.entries.write().insert(key.to_string(), state.clone());
		Ok(())
	}
}
