//! The query-builder contract the table pipeline threads through

use crate::condition::{Condition, Operator};
use crate::error::Result;
use crate::pagination::Page;
use crate::sorting::SortDirection;
use serde_json::Value;

/// A mutable query handle
///
/// Every step takes the builder by value and returns the (possibly new)
/// builder, so filters, sorting and search compose by threading one value
/// through the pipeline rather than collecting independent conditions.
///
/// # Examples
///
/// ```rust
/// use serde_json::json;
/// use tablekit_query::{MemoryQuery, Operator, QueryBuilder, SortDirection};
///
/// let query = MemoryQuery::from_values(vec![
///     json!({"name": "a", "age": 30}),
///     json!({"name": "b", "age": 20}),
///     json!({"name": "c", "age": 40}),
/// ])
/// .unwrap();
///
/// let page = query
///     .where_op("age", Operator::Gte, 30)
///     .order_by("age", SortDirection::Descending)
///     .paginate(15, "page", 1)
///     .unwrap();
///
/// assert_eq!(page.items().len(), 2);
/// assert_eq!(page.items()[0]["name"], "c");
/// ```
pub trait QueryBuilder: Sized {
	/// Row type produced by pagination
	type Row;

	/// Adds a condition AND-ed with every condition already present
	fn filter(self, condition: Condition) -> Self;

	/// Adds a condition OR-ed with the conditions already present
	fn or_filter(self, condition: Condition) -> Self;

	/// Appends an ordering clause
	fn order_by(self, column: &str, direction: SortDirection) -> Self;

	/// Executes the query and returns one page of rows
	///
	/// `page` is 1-indexed; `page_name` is the query-string key page links
	/// are generated with.
	fn paginate(self, per_page: u64, page_name: &str, page: u64) -> Result<Page<Self::Row>>;

	/// Requires `column = value`
	fn where_eq(self, column: &str, value: impl Into<Value>) -> Self {
		self.filter(Condition::eq(column, value))
	}

	/// Requires `column <operator> value`
	fn where_op(self, column: &str, operator: Operator, value: impl Into<Value>) -> Self {
		self.filter(Condition::compare(column, operator, value))
	}

	/// Requires `column` to be one of `values`
	fn where_in<I, V>(self, column: &str, values: I) -> Self
	where
		I: IntoIterator<Item = V>,
		V: Into<Value>,
	{
		self.filter(Condition::is_in(column, values))
	}

	/// Adds a parenthesized OR group
	///
	/// The closure fills an OR group that is AND-ed onto the query as a
	/// whole. A group left empty has no effect.
	fn where_group<F>(self, build: F) -> Self
	where
		F: FnOnce(Condition) -> Condition,
	{
		let group = build(Condition::any());
		if group.is_empty() {
			return self;
		}
		self.filter(group)
	}

	/// Adds `column <operator> value` as an alternative
	fn or_where_op(self, column: &str, operator: Operator, value: impl Into<Value>) -> Self {
		self.or_filter(Condition::compare(column, operator, value))
	}
}
