//! Backend-neutral condition trees
//!
//! Conditions are built the same way `sea-query`'s `Cond` is: leaves for
//! column comparisons, and `any`/`all` groups that collect children with
//! [`Condition::add`]. Every backend translates the same tree, so a filter
//! written once runs in memory and in SQL.

use serde::Serialize;
use serde_json::Value;

/// Comparison operator of a leaf condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Operator {
	#[serde(rename = "=")]
	Eq,
	#[serde(rename = "!=")]
	Ne,
	#[serde(rename = "<")]
	Lt,
	#[serde(rename = "<=")]
	Lte,
	#[serde(rename = ">")]
	Gt,
	#[serde(rename = ">=")]
	Gte,
	/// Pattern match with `%` and `_` wildcards
	#[serde(rename = "like")]
	Like,
}

/// A predicate over one record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
	/// `column <operator> value`
	Compare {
		column: String,
		operator: Operator,
		value: Value,
	},
	/// `column IN (values...)`
	In { column: String, values: Vec<Value> },
	/// OR group; an empty group matches everything
	Any(Vec<Condition>),
	/// AND group; an empty group matches everything
	All(Vec<Condition>),
}

impl Condition {
	/// Creates a leaf comparison
	pub fn compare(column: impl Into<String>, operator: Operator, value: impl Into<Value>) -> Self {
		Self::Compare {
			column: column.into(),
			operator,
			value: value.into(),
		}
	}

	/// `column = value`
	pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
		Self::compare(column, Operator::Eq, value)
	}

	/// `column LIKE pattern`
	pub fn like(column: impl Into<String>, pattern: impl Into<String>) -> Self {
		Self::compare(column, Operator::Like, Value::String(pattern.into()))
	}

	/// `column LIKE '%needle%'`
	///
	/// The needle is not escaped: `%` and `_` inside it keep their wildcard
	/// meaning.
	pub fn contains(column: impl Into<String>, needle: &str) -> Self {
		Self::like(column, format!("%{}%", needle))
	}

	/// `column IN (values...)`
	pub fn is_in<I, V>(column: impl Into<String>, values: I) -> Self
	where
		I: IntoIterator<Item = V>,
		V: Into<Value>,
	{
		Self::In {
			column: column.into(),
			values: values.into_iter().map(Into::into).collect(),
		}
	}

	/// Empty OR group
	pub fn any() -> Self {
		Self::Any(Vec::new())
	}

	/// Empty AND group
	pub fn all() -> Self {
		Self::All(Vec::new())
	}

	/// Adds a child to a group
	///
	/// Adding to a leaf wraps both into an AND group.
	pub fn add(self, condition: Condition) -> Self {
		match self {
			Self::Any(mut children) => {
				children.push(condition);
				Self::Any(children)
			}
			Self::All(mut children) => {
				children.push(condition);
				Self::All(children)
			}
			leaf => Self::All(vec![leaf, condition]),
		}
	}

	/// Returns true for groups without children
	pub fn is_empty(&self) -> bool {
		match self {
			Self::Any(children) | Self::All(children) => children.is_empty(),
			_ => false,
		}
	}
}

/// Combines already collected conditions with an OR branch
///
/// Mirrors builder `or_where` semantics: `(existing...) OR condition`. With no
/// existing conditions the branch simply becomes the only condition.
pub(crate) fn or_branch(existing: &mut Vec<Condition>, condition: Condition) {
	if existing.is_empty() {
		existing.push(condition);
		return;
	}
	let current = Condition::All(std::mem::take(existing));
	existing.push(Condition::Any(vec![current, condition]));
}
