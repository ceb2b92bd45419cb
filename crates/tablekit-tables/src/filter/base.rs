//! Fields and query behavior shared by every filter type

use crate::utils::headline;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tablekit_query::QueryBuilder;

/// Custom predicate of a filter: receives the query and the selected value
/// and returns the narrowed query
pub type FilterQuery<Q> = Arc<dyn Fn(Q, &Value) -> Q + Send + Sync>;

/// Shared filter fields
#[derive(Serialize)]
#[serde(bound(serialize = ""))]
pub struct FilterBase<Q> {
	name: String,
	label: String,
	default: Value,
	#[serde(skip)]
	query: Option<FilterQuery<Q>>,
}

impl<Q> FilterBase<Q> {
	pub fn new(name: impl Into<String>) -> Self {
		let name = name.into();
		Self {
			label: headline(&name),
			name,
			default: Value::Null,
			query: None,
		}
	}

	/// Request key this filter answers to
	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn label(&self) -> &str {
		&self.label
	}

	pub fn default_value(&self) -> &Value {
		&self.default
	}

	pub fn has_custom_query(&self) -> bool {
		self.query.is_some()
	}

	pub(crate) fn set_label(&mut self, label: String) {
		self.label = label;
	}

	pub(crate) fn set_default(&mut self, value: Value) {
		self.default = value;
	}

	pub(crate) fn set_query(&mut self, query: FilterQuery<Q>) {
		self.query = Some(query);
	}
}

impl<Q: QueryBuilder> FilterBase<Q> {
	/// Narrows `query` by `value`
	///
	/// Runs the custom predicate when one is set. Otherwise a list value
	/// becomes `name IN (..)` and anything else `name = value`.
	pub fn apply(&self, query: Q, value: &Value) -> Q {
		if let Some(custom) = &self.query {
			return custom(query, value);
		}
		match value {
			Value::Array(values) => query.where_in(&self.name, values.iter().cloned()),
			value => query.where_eq(&self.name, value.clone()),
		}
	}
}

impl<Q> Clone for FilterBase<Q> {
	fn clone(&self) -> Self {
		Self {
			name: self.name.clone(),
			label: self.label.clone(),
			default: self.default.clone(),
			query: self.query.clone(),
		}
	}
}

impl<Q> fmt::Debug for FilterBase<Q> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FilterBase")
			.field("name", &self.name)
			.field("label", &self.label)
			.field("default", &self.default)
			.field("query", &self.query.as_ref().map(|_| "<fn>"))
			.finish()
	}
}
