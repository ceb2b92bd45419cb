#![cfg(feature = "sqlite")]

use serde_json::{Map, json};
use tablekit_conf::{StateDriver, TableSettings};
use tablekit_state::{DatabaseStateStore, StateStore, store_from_settings};

#[test]
fn test_state_survives_reopen() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("state.sqlite");

	let mut state = Map::new();
	state.insert("sort".to_string(), json!("-created_at"));
	state.insert("filters".to_string(), json!({"status": "active"}));

	{
		let store = DatabaseStateStore::open(&path).unwrap();
		store.create_table().unwrap();
		store.for_user(42).put("tables.orders", &state).unwrap();
	}

	let reopened = DatabaseStateStore::open(&path).unwrap();
	assert_eq!(
		reopened.for_user(42).get("tables.orders").unwrap(),
		Some(state)
	);
	assert_eq!(reopened.for_user(43).get("tables.orders").unwrap(), None);
}

#[test]
fn test_store_from_database_settings() {
	let dir = tempfile::tempdir().unwrap();
	let mut settings = TableSettings::default();
	settings.state_store.driver = StateDriver::Database;
	settings.state_store.database_path = Some(dir.path().join("tables.db"));
	settings.validate().unwrap();

	let store = store_from_settings(&settings).unwrap();
	let mut state = Map::new();
	state.insert("search".to_string(), json!("jane"));
	store.put(&settings.state_key("users"), &state).unwrap();

	assert_eq!(store.get("tables.users").unwrap(), Some(state));
}
