//! Select filter type

use super::base::FilterBase;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Filter offering a fixed list of options
///
/// # Examples
///
/// ```
/// use tablekit_query::MemoryQuery;
/// use tablekit_tables::filter::SelectFilter;
///
/// let filter: SelectFilter<MemoryQuery> = SelectFilter::make("status")
///     .options([("active", "Active"), ("inactive", "Inactive")])
///     .default("active");
///
/// assert_eq!(filter.base().label(), "Status");
/// assert_eq!(filter.option_label("inactive"), Some("Inactive"));
/// ```
#[derive(Serialize)]
#[serde(bound(serialize = ""))]
pub struct SelectFilter<Q> {
	#[serde(flatten)]
	base: FilterBase<Q>,
	options: IndexMap<String, String>,
	multiple: bool,
}

impl<Q> SelectFilter<Q> {
	pub fn make(name: impl Into<String>) -> Self {
		Self {
			base: FilterBase::new(name),
			options: IndexMap::new(),
			multiple: false,
		}
	}

	pub fn base(&self) -> &FilterBase<Q> {
		&self.base
	}

	pub fn label(mut self, label: impl Into<String>) -> Self {
		self.base.set_label(label.into());
		self
	}

	/// Value preselected on the client
	pub fn default(mut self, value: impl Into<Value>) -> Self {
		self.base.set_default(value.into());
		self
	}

	/// Replaces the default equality predicate
	pub fn query<F>(mut self, query: F) -> Self
	where
		F: Fn(Q, &Value) -> Q + Send + Sync + 'static,
	{
		self.base.set_query(Arc::new(query));
		self
	}

	/// Replaces the options, keyed by value, in display order
	pub fn options<I, K, V>(mut self, options: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		self.options = options
			.into_iter()
			.map(|(value, label)| (value.into(), label.into()))
			.collect();
		self
	}

	/// Appends one option
	pub fn option(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
		self.options.insert(value.into(), label.into());
		self
	}

	/// Allows selecting several options at once
	pub fn multiple(mut self, multiple: bool) -> Self {
		self.multiple = multiple;
		self
	}

	pub fn is_multiple(&self) -> bool {
		self.multiple
	}

	pub fn option_label(&self, value: &str) -> Option<&str> {
		self.options.get(value).map(String::as_str)
	}
}

impl<Q> Clone for SelectFilter<Q> {
	fn clone(&self) -> Self {
		Self {
			base: self.base.clone(),
			options: self.options.clone(),
			multiple: self.multiple,
		}
	}
}

impl<Q> fmt::Debug for SelectFilter<Q> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SelectFilter")
			.field("base", &self.base)
			.field("options", &self.options)
			.field("multiple", &self.multiple)
			.finish()
	}
}
