//! Durable state store backed by the `table_state` table
//!
//! ## Schema
//!
//! | column | type |
//! |---|---|
//! | `id` | integer primary key |
//! | `table_name` | string, the persistence key |
//! | `user_id` | nullable big integer |
//! | `state` | JSON text |
//! | `created_at`, `updated_at` | RFC 3339 timestamps |
//!
//! with an index on `(table_name, user_id)`.
//!
//! ## Example
//!
//! ```rust
//! use serde_json::{Map, json};
//! use tablekit_state::{DatabaseStateStore, StateStore};
//!
//! let store = DatabaseStateStore::open_in_memory().unwrap();
//! store.create_table().unwrap();
//!
//! let alice = store.for_user(1);
//! let mut state = Map::new();
//! state.insert("sort".to_string(), json!("name"));
//! alice.put("tables.users", &state).unwrap();
//!
//! assert_eq!(alice.get("tables.users").unwrap(), Some(state));
//! // Other users and guests do not see it
//! assert_eq!(store.for_user(2).get("tables.users").unwrap(), None);
//! assert_eq!(store.get("tables.users").unwrap(), None);
//! ```

use crate::error::{Result, StateStoreError};
use crate::store::{StateMap, StateStore};
use chrono::Utc;
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension};
use sea_query::{
	Alias, ColumnDef, Expr, ExprTrait, Index, Order, Query, SqliteQueryBuilder, Table,
};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;

const TABLE: &str = "table_state";

/// State store persisting to SQLite
///
/// Clones and [`for_user`](Self::for_user) views share one connection.
#[derive(Debug, Clone)]
pub struct DatabaseStateStore {
	connection: Arc<Mutex<Connection>>,
	user_id: Option<i64>,
}

impl DatabaseStateStore {
	/// Open (or create) the SQLite database at `path`
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		Ok(Self::from_connection(Connection::open(path)?))
	}

	/// Open a private in-memory database
	pub fn open_in_memory() -> Result<Self> {
		Ok(Self::from_connection(Connection::open_in_memory()?))
	}

	pub fn from_connection(connection: Connection) -> Self {
		Self {
			connection: Arc::new(Mutex::new(connection)),
			user_id: None,
		}
	}

	/// View of the same database scoped to `user_id`
	pub fn for_user(&self, user_id: i64) -> Self {
		Self {
			connection: Arc::clone(&self.connection),
			user_id: Some(user_id),
		}
	}

	/// User this view is scoped to; `None` for guests
	pub fn user_id(&self) -> Option<i64> {
		self.user_id
	}

	/// Create the `table_state` table and its index
	pub fn create_table(&self) -> Result<()> {
		let stmt = Table::create()
			.table(Alias::new(TABLE))
			.if_not_exists()
			.col(
				ColumnDef::new(Alias::new("id"))
					.integer()
					.not_null()
					.auto_increment()
					.primary_key(),
			)
			.col(
				ColumnDef::new(Alias::new("table_name"))
					.string_len(255)
					.not_null(),
			)
			.col(ColumnDef::new(Alias::new("user_id")).big_integer().null())
			.col(ColumnDef::new(Alias::new("state")).text().not_null())
			.col(ColumnDef::new(Alias::new("created_at")).timestamp().not_null())
			.col(ColumnDef::new(Alias::new("updated_at")).timestamp().not_null())
			.to_owned();
		let sql = stmt.to_string(SqliteQueryBuilder);

		let connection = self.connection.lock();
		connection.execute(&sql, [])?;

		let idx = Index::create()
			.if_not_exists()
			.name("idx_table_state_table_name_user_id")
			.table(Alias::new(TABLE))
			.col(Alias::new("table_name"))
			.col(Alias::new("user_id"))
			.to_owned();
		let sql = idx.to_string(SqliteQueryBuilder);
		connection.execute(&sql, [])?;

		tracing::debug!(table = TABLE, "Created state table");
		Ok(())
	}

	/// Drop the `table_state` table
	pub fn drop_table(&self) -> Result<()> {
		let stmt = Table::drop()
			.table(Alias::new(TABLE))
			.if_exists()
			.to_owned();
		let sql = stmt.to_string(SqliteQueryBuilder);

		self.connection.lock().execute(&sql, [])?;
		Ok(())
	}

	fn user_condition(&self) -> Expr {
		let column = Expr::col(Alias::new("user_id"));
		match self.user_id {
			Some(id) => column.eq(id),
			None => column.is_null(),
		}
	}

	fn latest_row(&self, connection: &Connection, key: &str) -> Result<Option<(i64, String)>> {
		let stmt = Query::select()
			.columns([Alias::new("id"), Alias::new("state")])
			.from(Alias::new(TABLE))
			.and_where(Expr::col(Alias::new("table_name")).eq(key))
			.and_where(self.user_condition())
			.order_by(Alias::new("updated_at"), Order::Desc)
			.order_by(Alias::new("id"), Order::Desc)
			.limit(1)
			.to_owned();
		let sql = stmt.to_string(SqliteQueryBuilder);

		let row = connection
			.query_row(&sql, [], |row| Ok((row.get(0)?, row.get(1)?)))
			.optional()?;
		Ok(row)
	}
}

impl StateStore for DatabaseStateStore {
	fn get(&self, key: &str) -> Result<Option<StateMap>> {
		let connection = self.connection.lock();
		let Some((_, raw)) = self.latest_row(&connection, key)? else {
			return Ok(None);
		};

		match serde_json::from_str::<Value>(&raw)? {
			Value::Object(state) => Ok(Some(state)),
			other => Err(StateStoreError::Backend(format!(
				"Stored state for {} is not an object: {}",
				key, other
			))),
		}
	}

	fn put(&self, key: &str, state: &StateMap) -> Result<()> {
		let raw = serde_json::to_string(state)?;
		let now = Utc::now().to_rfc3339();

		let connection = self.connection.lock();
		let sql = match self.latest_row(&connection, key)? {
			Some((id, _)) => Query::update()
				.table(Alias::new(TABLE))
				.value(Alias::new("state"), Expr::val(raw))
				.value(Alias::new("updated_at"), Expr::val(now))
				.and_where(Expr::col(Alias::new("id")).eq(id))
				.to_owned()
				.to_string(SqliteQueryBuilder),
			None => Query::insert()
				.into_table(Alias::new(TABLE))
				.columns([
					Alias::new("table_name"),
					Alias::new("user_id"),
					Alias::new("state"),
					Alias::new("created_at"),
					Alias::new("updated_at"),
				])
				.values(
					[
						Expr::val(key),
						Expr::val(self.user_id),
						Expr::val(raw),
						Expr::val(now.clone()),
						Expr::val(now),
					]
					.into_iter()
					.collect::<Vec<Expr>>(),
				)
				.map_err(|e| StateStoreError::Backend(format!("Failed to build insert: {}", e)))?
				.to_owned()
				.to_string(SqliteQueryBuilder),
		};

		connection.execute(&sql, [])?;
		tracing::debug!(key, user_id = ?self.user_id, "Persisted table state");
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::{fixture, rstest};
	use serde_json::{Map, json};

	#[fixture]
	fn store() -> DatabaseStateStore {
		let store = DatabaseStateStore::open_in_memory().unwrap();
		store.create_table().unwrap();
		store
	}

	fn state(pairs: &[(&str, Value)]) -> StateMap {
		pairs
			.iter()
			.map(|(k, v)| (k.to_string(), v.clone()))
			.collect::<Map<_, _>>()
	}

	fn row_count(store: &DatabaseStateStore) -> i64 {
		store
			.connection
			.lock()
			.query_row("SELECT COUNT(*) FROM table_state", [], |row| row.get(0))
			.unwrap()
	}

	#[rstest]
	fn test_missing_key(store: DatabaseStateStore) {
		assert_eq!(store.get("tables.users").unwrap(), None);
		assert_eq!(
			store.get_or("tables.users", state(&[("page", json!(1))])).unwrap(),
			state(&[("page", json!(1))])
		);
	}

	#[rstest]
	fn test_put_updates_existing_row(store: DatabaseStateStore) {
		store.put("tables.users", &state(&[("sort", json!("name"))])).unwrap();
		store
			.put(
				"tables.users",
				&state(&[("sort", json!("-name")), ("search", json!("o'neil"))]),
			)
			.unwrap();

		assert_eq!(row_count(&store), 1);
		assert_eq!(
			store.get("tables.users").unwrap(),
			Some(state(&[("sort", json!("-name")), ("search", json!("o'neil"))]))
		);
	}

	#[rstest]
	fn test_users_are_isolated(store: DatabaseStateStore) {
		store.for_user(7).put("tables.users", &state(&[("page", json!(3))])).unwrap();
		store.put("tables.users", &state(&[("page", json!(1))])).unwrap();

		assert_eq!(row_count(&store), 2);
		assert_eq!(
			store.for_user(7).get("tables.users").unwrap(),
			Some(state(&[("page", json!(3))]))
		);
		assert_eq!(
			store.get("tables.users").unwrap(),
			Some(state(&[("page", json!(1))]))
		);
	}

	#[rstest]
	fn test_nested_state_survives(store: DatabaseStateStore) {
		let nested = state(&[("filters", json!({"status": "active", "tags": ["a", "b"]}))]);
		store.put("tables.posts", &nested).unwrap();
		assert_eq!(store.get("tables.posts").unwrap(), Some(nested));
	}

	#[rstest]
	fn test_drop_table(store: DatabaseStateStore) {
		store.drop_table().unwrap();
		assert!(matches!(
			store.get("tables.users"),
			Err(StateStoreError::Database(_))
		));
		store.create_table().unwrap();
		assert_eq!(store.get("tables.users").unwrap(), None);
	}
}
