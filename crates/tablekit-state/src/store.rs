//! The state store contract

use crate::error::Result;

/// Persisted state of one table
pub type StateMap = serde_json::Map<String, serde_json::Value>;

/// Key/value storage for table state
///
/// Implementations are shared between requests, so they must be usable
/// behind a shared reference. Concurrent writers to the same key race;
/// the last write wins.
pub trait StateStore: Send + Sync {
	/// Load the state stored under `key`
	fn get(&self, key: &str) -> Result<Option<StateMap>>;

	/// Store `state` under `key`, replacing what was there
	fn put(&self, key: &str, state: &StateMap) -> Result<()>;

	/// Load the state stored under `key`, or `default` when nothing is stored
	fn get_or(&self, key: &str, default: StateMap) -> Result<StateMap> {
		Ok(self.get(key)?.unwrap_or(default))
	}
}

impl<S: StateStore + ?Sized> StateStore for &S {
	fn get(&self, key: &str) -> Result<Option<StateMap>> {
		(**self).get(key)
	}

	fn put(&self, key: &str, state: &StateMap) -> Result<()> {
		(**self).put(key, state)
	}
}

impl<S: StateStore + ?Sized> StateStore for Box<S> {
	fn get(&self, key: &str) -> Result<Option<StateMap>> {
		(**self).get(key)
	}

	fn put(&self, key: &str, state: &StateMap) -> Result<()> {
		(**self).put(key, state)
	}
}
