//! The payload handed to the client

use crate::action::Action;
use crate::column::Column;
use crate::error::Result;
use crate::filter::Filter;
use serde::Serialize;
use serde_json::{Map, Value};
use tablekit_query::{Page, QueryBuilder};

/// Everything the client needs to render one table
///
/// Serializes to
/// `{name, columns, actions, filters, records, sortable, searchable, preserveState}`
/// where `records` is the paginated result.
#[derive(Serialize)]
#[serde(rename_all = "camelCase", bound(serialize = "Q::Row: Serialize"))]
pub struct TablePayload<'t, Q: QueryBuilder> {
	pub name: &'t str,
	pub columns: &'t [Column],
	pub actions: &'t [Action],
	pub filters: &'t [Filter<Q>],
	pub records: Page<Q::Row>,
	pub sortable: &'t [String],
	pub searchable: &'t [String],
	pub preserve_state: bool,
}

impl<Q> TablePayload<'_, Q>
where
	Q: QueryBuilder,
	Q::Row: Serialize,
{
	pub fn to_value(&self) -> Result<Value> {
		Ok(serde_json::to_value(self)?)
	}
}

/// Receiver of data shared with the presentation layer
pub trait SharedData {
	/// Makes `value` available to the view under `key`
	fn share(&mut self, key: &str, value: Value);
}

impl SharedData for Map<String, Value> {
	fn share(&mut self, key: &str, value: Value) {
		self.insert(key.to_string(), value);
	}
}
