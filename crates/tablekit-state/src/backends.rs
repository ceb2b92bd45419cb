//! State store backends

#[cfg(feature = "sqlite")]
pub mod database;
pub mod memory;

#[cfg(feature = "sqlite")]
pub use database::DatabaseStateStore;
pub use memory::SessionStateStore;

use crate::error::{Result, StateStoreError};
use crate::store::StateStore;
use tablekit_conf::{StateDriver, TableSettings};

/// Builds the store selected by `settings.state_store`
///
/// The database driver opens (and if needed creates) the `table_state`
/// table in the configured SQLite file.
pub fn store_from_settings(settings: &TableSettings) -> Result<Box<dyn StateStore>> {
	match settings.state_store.driver {
		StateDriver::Session => Ok(Box::new(SessionStateStore::new())),
		StateDriver::Database => database_store(settings),
	}
}

#[cfg(feature = "sqlite")]
fn database_store(settings: &TableSettings) -> Result<Box<dyn StateStore>> {
	let path = settings.state_store.database_path.as_ref().ok_or_else(|| {
		StateStoreError::Unavailable("state_store.database_path is not set".to_string())
	})?;
	let store = DatabaseStateStore::open(path)?;
	store.create_table()?;
	Ok(Box::new(store))
}

#[cfg(not(feature = "sqlite"))]
fn database_store(_settings: &TableSettings) -> Result<Box<dyn StateStore>> {
	Err(StateStoreError::Unavailable(
		"the database driver requires the `sqlite` feature".to_string(),
	))
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::{Map, json};

	#[test]
	fn test_session_driver() {
		let store = store_from_settings(&TableSettings::default()).unwrap();
		let mut state = Map::new();
		state.insert("search".to_string(), json!("jane"));
		store.put("tables.users", &state).unwrap();
		assert_eq!(store.get("tables.users").unwrap(), Some(state));
	}

	#[test]
	fn test_database_driver_requires_path() {
		let mut settings = TableSettings::default();
		settings.state_store.driver = StateDriver::Database;
		assert!(matches!(
			store_from_settings(&settings),
			Err(StateStoreError::Unavailable(_))
		));
	}
}
