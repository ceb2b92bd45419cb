//! SQLite query backend
//!
//! Condition trees are rendered through `sea-query` and executed on a
//! borrowed `rusqlite` connection. Values are inlined by the SQLite query
//! builder, which quotes and escapes them.

use crate::builder::QueryBuilder;
use crate::condition::{Condition, Operator, or_branch};
use crate::error::{QueryError, Result};
use crate::pagination::Page;
use crate::sorting::SortDirection;
use crate::Record;
use rusqlite::Connection;
use rusqlite::types::ValueRef;
use sea_query::{
	Alias, Asterisk, Cond, Expr, ExprTrait, Func, Order, Query, SelectStatement,
	SqliteQueryBuilder,
};
use serde_json::Value;

/// A query against one SQLite table
///
/// # Examples
///
/// ```
/// use rusqlite::Connection;
/// use tablekit_query::{QueryBuilder, SortDirection, SqlQuery};
///
/// let connection = Connection::open_in_memory().unwrap();
/// connection
///     .execute_batch(
///         "CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT);
///          INSERT INTO users (name) VALUES ('Zed'), ('Amy');",
///     )
///     .unwrap();
///
/// let page = SqlQuery::new(&connection, "users")
///     .order_by("name", SortDirection::Ascending)
///     .paginate(10, "page", 1)
///     .unwrap();
///
/// assert_eq!(page.items()[0]["name"], "Amy");
/// ```
#[derive(Debug, Clone)]
pub struct SqlQuery<'c> {
	connection: &'c Connection,
	table: String,
	conditions: Vec<Condition>,
	orders: Vec<(String, SortDirection)>,
}

impl<'c> SqlQuery<'c> {
	pub fn new(connection: &'c Connection, table: impl Into<String>) -> Self {
		Self {
			connection,
			table: table.into(),
			conditions: Vec::new(),
			orders: Vec::new(),
		}
	}

	pub fn table(&self) -> &str {
		&self.table
	}

	pub fn conditions(&self) -> &[Condition] {
		&self.conditions
	}

	/// Renders the unpaginated `SELECT`
	pub fn to_sql(&self) -> String {
		self.select().to_string(SqliteQueryBuilder)
	}

	/// Counts matching rows
	pub fn count(&self) -> Result<u64> {
		let mut stmt = Query::select();
		stmt.expr(Func::count(Expr::col(Asterisk)))
			.from(Alias::new(self.table.clone()))
			.cond_where(self.where_clause());
		let sql = stmt.to_string(SqliteQueryBuilder);

		tracing::debug!(sql = %sql, "Counting rows");
		let count: i64 = self.connection.query_row(&sql, [], |row| row.get(0))?;
		Ok(u64::try_from(count).unwrap_or_default())
	}

	/// Fetches every matching row
	pub fn get(&self) -> Result<Vec<Record>> {
		self.fetch(self.select())
	}

	fn select(&self) -> SelectStatement {
		let mut stmt = Query::select();
		stmt.column(Asterisk)
			.from(Alias::new(self.table.clone()))
			.cond_where(self.where_clause());
		for (column, direction) in &self.orders {
			let order = match direction {
				SortDirection::Ascending => Order::Asc,
				SortDirection::Descending => Order::Desc,
			};
			stmt.order_by(Alias::new(column.clone()), order);
		}
		stmt
	}

	fn where_clause(&self) -> Cond {
		self.conditions
			.iter()
			.filter_map(to_cond)
			.fold(Cond::all(), |cond, child| cond.add(child))
	}

	fn fetch(&self, stmt: SelectStatement) -> Result<Vec<Record>> {
		let sql = stmt.to_string(SqliteQueryBuilder);
		tracing::debug!(sql = %sql, "Fetching rows");

		let mut prepared = self.connection.prepare(&sql)?;
		let columns: Vec<String> = prepared
			.column_names()
			.into_iter()
			.map(str::to_string)
			.collect();
		let rows = prepared.query_map([], |row| {
			let mut record = Record::new();
			for (index, name) in columns.iter().enumerate() {
				record.insert(name.clone(), from_sql(row.get_ref(index)?));
			}
			Ok(record)
		})?;
		rows.collect::<std::result::Result<Vec<_>, _>>()
			.map_err(QueryError::from)
	}
}

impl QueryBuilder for SqlQuery<'_> {
	type Row = Record;

	fn filter(mut self, condition: Condition) -> Self {
		self.conditions.push(condition);
		self
	}

	fn or_filter(mut self, condition: Condition) -> Self {
		or_branch(&mut self.conditions, condition);
		self
	}

	fn order_by(mut self, column: &str, direction: SortDirection) -> Self {
		self.orders.push((column.to_string(), direction));
		self
	}

	fn paginate(self, per_page: u64, page_name: &str, page: u64) -> Result<Page<Record>> {
		if per_page == 0 {
			return Err(QueryError::InvalidPagination(
				"per_page must be at least 1".to_string(),
			));
		}
		let page = Ord::max(page, 1);
		let total = self.count()?;

		// Offsets past the last row never reach SQLite, which only takes i64.
		let offset = (page - 1).saturating_mul(per_page);
		let items = if offset >= total {
			Vec::new()
		} else {
			let mut stmt = self.select();
			stmt.limit(Ord::min(per_page, i64::MAX as u64)).offset(offset);
			self.fetch(stmt)?
		};

		Ok(Page::new(items, total, per_page, page, page_name))
	}
}

/// Translates a condition tree; empty groups translate to nothing
fn to_cond(condition: &Condition) -> Option<Cond> {
	match condition {
		Condition::Compare {
			column,
			operator,
			value,
		} => {
			let col = Expr::col(Alias::new(column.clone()));
			let expr = match (operator, value) {
				(Operator::Eq, Value::Null) => col.is_null(),
				(Operator::Ne, Value::Null) => col.is_not_null(),
				(Operator::Like, value) => col.like(like_pattern(value)),
				(Operator::Eq, value) => col.eq(sql_value(value)),
				(Operator::Ne, value) => col.ne(sql_value(value)),
				(Operator::Lt, value) => col.lt(sql_value(value)),
				(Operator::Lte, value) => col.lte(sql_value(value)),
				(Operator::Gt, value) => col.gt(sql_value(value)),
				(Operator::Gte, value) => col.gte(sql_value(value)),
			};
			Some(Cond::all().add(expr))
		}
		Condition::In { column, values } => Some(
			Cond::all().add(
				Expr::col(Alias::new(column.clone()))
					.is_in(values.iter().map(sql_value).collect::<Vec<_>>()),
			),
		),
		Condition::Any(children) => group(Cond::any(), children),
		Condition::All(children) => group(Cond::all(), children),
	}
}

fn group(cond: Cond, children: &[Condition]) -> Option<Cond> {
	let children: Vec<Cond> = children.iter().filter_map(to_cond).collect();
	if children.is_empty() {
		return None;
	}
	Some(children.into_iter().fold(cond, |cond, child| cond.add(child)))
}

fn like_pattern(value: &Value) -> String {
	match value {
		Value::String(text) => text.clone(),
		other => other.to_string(),
	}
}

fn sql_value(value: &Value) -> sea_query::Value {
	match value {
		Value::Null => Option::<String>::None.into(),
		Value::Bool(flag) => (*flag).into(),
		Value::Number(number) => {
			if let Some(n) = number.as_i64() {
				n.into()
			} else if let Some(n) = number.as_u64() {
				n.into()
			} else {
				number.as_f64().unwrap_or_default().into()
			}
		}
		Value::String(text) => text.clone().into(),
		other => other.to_string().into(),
	}
}

fn from_sql(value: ValueRef<'_>) -> Value {
	match value {
		ValueRef::Null => Value::Null,
		ValueRef::Integer(n) => Value::from(n),
		ValueRef::Real(n) => Value::from(n),
		ValueRef::Text(bytes) => Value::String(String::from_utf8_lossy(bytes).into_owned()),
		ValueRef::Blob(bytes) => Value::Array(bytes.iter().map(|b| Value::from(*b)).collect()),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::{fixture, rstest};
	use serde_json::json;

	#[fixture]
	fn connection() -> Connection {
		let connection = Connection::open_in_memory().unwrap();
		connection
			.execute_batch(
				"CREATE TABLE users (
					id INTEGER PRIMARY KEY,
					name TEXT NOT NULL,
					email TEXT,
					status TEXT
				);
				INSERT INTO users (name, email, status) VALUES
					('John Doe', 'john@example.com', 'active'),
					('Jane Smith', 'jane@example.com', 'inactive'),
					('Bob Johnson', NULL, 'active');",
			)
			.unwrap();
		connection
	}

	#[rstest]
	fn test_where_eq_and_order(connection: Connection) {
		let rows = SqlQuery::new(&connection, "users")
			.where_eq("status", "active")
			.order_by("name", SortDirection::Descending)
			.get()
			.unwrap();
		let names: Vec<_> = rows.iter().map(|r| r["name"].clone()).collect();
		assert_eq!(names, vec![json!("John Doe"), json!("Bob Johnson")]);
	}

	#[rstest]
	fn test_search_group(connection: Connection) {
		let query = SqlQuery::new(&connection, "users").filter(
			Condition::any()
				.add(Condition::contains("name", "JANE"))
				.add(Condition::contains("email", "JANE")),
		);
		assert!(query.to_sql().contains("LIKE '%JANE%'"));
		assert_eq!(query.count().unwrap(), 1);
	}

	#[rstest]
	fn test_null_comparison(connection: Connection) {
		let query = SqlQuery::new(&connection, "users").where_eq("email", Value::Null);
		assert_eq!(query.count().unwrap(), 1);
		assert!(query.to_sql().contains("IS NULL"));
	}

	#[rstest]
	fn test_where_in_and_empty_group(connection: Connection) {
		let query = SqlQuery::new(&connection, "users")
			.where_in("id", [1, 2])
			.filter(Condition::any());
		assert_eq!(query.count().unwrap(), 2);
	}

	#[rstest]
	fn test_quotes_are_escaped(connection: Connection) {
		let query = SqlQuery::new(&connection, "users").where_eq("name", "O'Brien");
		assert_eq!(query.count().unwrap(), 0);
	}

	#[rstest]
	fn test_paginate(connection: Connection) {
		let page = SqlQuery::new(&connection, "users")
			.order_by("id", SortDirection::Ascending)
			.paginate(2, "page", 2)
			.unwrap();
		assert_eq!(page.total(), 3);
		assert_eq!(page.last_page(), 2);
		assert_eq!(page.items().len(), 1);
		assert_eq!(page.items()[0]["id"], json!(3));
		assert_eq!(page.items()[0]["email"], Value::Null);
	}

	#[rstest]
	#[case(4)]
	#[case(700_000_000_000_000_000)]
	#[case(u64::MAX)]
	fn test_paginate_past_last_page(connection: Connection, #[case] page: u64) {
		let page = SqlQuery::new(&connection, "users")
			.paginate(15, "page", page)
			.unwrap();
		assert!(page.items().is_empty());
		assert_eq!(page.total(), 3);
		assert_eq!(page.from(), None);
	}

	#[rstest]
	fn test_paginate_huge_page_size(connection: Connection) {
		let page = SqlQuery::new(&connection, "users")
			.paginate(u64::MAX, "page", 1)
			.unwrap();
		assert_eq!(page.items().len(), 3);
		assert_eq!(page.last_page(), 1);
	}
}
