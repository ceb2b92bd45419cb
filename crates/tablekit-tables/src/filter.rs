//! Filter definitions
//!
//! A filter is a named, user-controlled predicate. Incoming filter values
//! are matched to filters by name; each filter then narrows the query it is
//! handed, either with its own predicate or by equality on its name.

pub mod base;
pub mod select;

pub use base::{FilterBase, FilterQuery};
pub use select::SelectFilter;

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use tablekit_query::QueryBuilder;

/// A filter of one of the supported types, over queries of type `Q`
#[non_exhaustive]
#[derive(Serialize)]
#[serde(tag = "type", rename_all = "lowercase", bound(serialize = ""))]
pub enum Filter<Q> {
	Select(SelectFilter<Q>),
}

impl<Q> Filter<Q> {
	pub fn base(&self) -> &FilterBase<Q> {
		match self {
			Self::Select(filter) => filter.base(),
		}
	}

	pub fn name(&self) -> &str {
		self.base().name()
	}

	pub fn label(&self) -> &str {
		self.base().label()
	}

	pub fn filter_type(&self) -> &'static str {
		match self {
			Self::Select(_) => "select",
		}
	}
}

impl<Q: QueryBuilder> Filter<Q> {
	pub fn apply(&self, query: Q, value: &Value) -> Q {
		self.base().apply(query, value)
	}
}

impl<Q> From<SelectFilter<Q>> for Filter<Q> {
	fn from(filter: SelectFilter<Q>) -> Self {
		Self::Select(filter)
	}
}

impl<Q> Clone for Filter<Q> {
	fn clone(&self) -> Self {
		match self {
			Self::Select(filter) => Self::Select(filter.clone()),
		}
	}
}

impl<Q> fmt::Debug for Filter<Q> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Select(filter) => f.debug_tuple("Select").field(filter).finish(),
		}
	}
}
