//! In-memory query backend
//!
//! Evaluates condition trees over JSON records with SQLite-flavoured
//! semantics. Equality against `null` means `IS NULL`, any other comparison
//! involving `NULL` fails. `LIKE` is ASCII case-insensitive. Sorting places
//! nulls before numbers before text.

use crate::builder::QueryBuilder;
use crate::condition::{Condition, Operator, or_branch};
use crate::error::{QueryError, Result};
use crate::pagination::Page;
use crate::sorting::SortDirection;
use crate::Record;
use serde_json::Value;
use std::borrow::Cow;
use std::cmp::Ordering;

/// A query over a vector of JSON records
#[derive(Debug, Clone, Default)]
pub struct MemoryQuery {
	records: Vec<Record>,
	conditions: Vec<Condition>,
	orders: Vec<(String, SortDirection)>,
}

impl MemoryQuery {
	pub fn new(records: Vec<Record>) -> Self {
		Self {
			records,
			conditions: Vec::new(),
			orders: Vec::new(),
		}
	}

	/// Builds a query from arbitrary JSON values
	///
	/// Every value must be a JSON object.
	pub fn from_values<I>(values: I) -> Result<Self>
	where
		I: IntoIterator<Item = Value>,
	{
		let records = values
			.into_iter()
			.enumerate()
			.map(|(index, value)| match value {
				Value::Object(map) => Ok(map),
				other => Err(QueryError::InvalidRecord(format!(
					"record {} is not an object: {}",
					index, other
				))),
			})
			.collect::<Result<Vec<_>>>()?;
		Ok(Self::new(records))
	}

	/// Conditions collected so far
	pub fn conditions(&self) -> &[Condition] {
		&self.conditions
	}

	/// Orderings collected so far
	pub fn orders(&self) -> &[(String, SortDirection)] {
		&self.orders
	}

	/// Returns every matching record in order
	pub fn get(&self) -> Vec<Record> {
		let mut rows: Vec<&Record> = self.matching().collect();
		self.sort(&mut rows);
		rows.into_iter().cloned().collect()
	}

	/// Number of matching records
	pub fn count(&self) -> usize {
		self.matching().count()
	}

	fn matching(&self) -> impl Iterator<Item = &Record> {
		self.records
			.iter()
			.filter(|record| self.conditions.iter().all(|c| evaluate(c, record)))
	}

	fn sort(&self, rows: &mut [&Record]) {
		if self.orders.is_empty() {
			return;
		}
		rows.sort_by(|a, b| {
			for (column, direction) in &self.orders {
				let ordering = compare_keys(
					&SortKey::of(a.get(column)),
					&SortKey::of(b.get(column)),
				);
				let ordering = match direction {
					SortDirection::Ascending => ordering,
					SortDirection::Descending => ordering.reverse(),
				};
				if ordering != Ordering::Equal {
					return ordering;
				}
			}
			Ordering::Equal
		});
	}
}

impl QueryBuilder for MemoryQuery {
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
		let page = page.max(1);
		let rows = self.get();
		let total = rows.len() as u64;
		let offset = (page - 1).saturating_mul(per_page);
		let items: Vec<Record> = rows
			.into_iter()
			.skip(usize::try_from(offset).unwrap_or(usize::MAX))
			.take(usize::try_from(per_page).unwrap_or(usize::MAX))
			.collect();

		tracing::debug!(total, page, per_page, "Paginated in-memory query");
		Ok(Page::new(items, total, per_page, page, page_name))
	}
}

fn evaluate(condition: &Condition, record: &Record) -> bool {
	match condition {
		Condition::Compare {
			column,
			operator,
			value,
		} => compare(record.get(column), *operator, value),
		Condition::In { column, values } => values
			.iter()
			.any(|value| compare(record.get(column), Operator::Eq, value)),
		Condition::Any(children) => {
			children.is_empty() || children.iter().any(|child| evaluate(child, record))
		}
		Condition::All(children) => children.iter().all(|child| evaluate(child, record)),
	}
}

fn compare(actual: Option<&Value>, operator: Operator, expected: &Value) -> bool {
	let left = SortKey::of(actual);
	let right = SortKey::of(Some(expected));
	match (operator, &left, &right) {
		(Operator::Eq, _, SortKey::Null) => return matches!(left, SortKey::Null),
		(Operator::Ne, _, SortKey::Null) => return !matches!(left, SortKey::Null),
		(_, SortKey::Null, _) | (_, _, SortKey::Null) => return false,
		_ => {}
	}
	let ordering = || loose_cmp(&left, &right);
	match operator {
		Operator::Eq => ordering() == Ordering::Equal,
		Operator::Ne => ordering() != Ordering::Equal,
		Operator::Lt => ordering() == Ordering::Less,
		Operator::Lte => ordering() != Ordering::Greater,
		Operator::Gt => ordering() == Ordering::Greater,
		Operator::Gte => ordering() != Ordering::Less,
		Operator::Like => like(&left.as_text(), &right.as_text()),
	}
}

#[derive(Debug)]
enum SortKey<'a> {
	Null,
	Number(f64),
	Text(Cow<'a, str>),
}

impl<'a> SortKey<'a> {
	fn of(value: Option<&'a Value>) -> Self {
		match value {
			None | Some(Value::Null) => Self::Null,
			Some(Value::Bool(flag)) => Self::Number(if *flag { 1.0 } else { 0.0 }),
			Some(Value::Number(number)) => number
				.as_f64()
				.map(Self::Number)
				.unwrap_or_else(|| Self::Text(Cow::Owned(number.to_string()))),
			Some(Value::String(text)) => Self::Text(Cow::Borrowed(text.as_str())),
			Some(other) => Self::Text(Cow::Owned(other.to_string())),
		}
	}

	fn as_text(&self) -> Cow<'_, str> {
		match self {
			Self::Null => Cow::Borrowed(""),
			Self::Number(number) if number.fract() == 0.0 && number.abs() < 1e15 => {
				Cow::Owned(format!("{}", *number as i64))
			}
			Self::Number(number) => Cow::Owned(number.to_string()),
			Self::Text(text) => Cow::Borrowed(text.as_ref()),
		}
	}
}

/// Storage-class ordering used for sorting
fn compare_keys(left: &SortKey<'_>, right: &SortKey<'_>) -> Ordering {
	match (left, right) {
		(SortKey::Null, SortKey::Null) => Ordering::Equal,
		(SortKey::Null, _) => Ordering::Less,
		(_, SortKey::Null) => Ordering::Greater,
		(SortKey::Number(a), SortKey::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
		(SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
		(SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
		(SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
	}
}

/// Comparison used by predicates: numeric text compares as a number
fn loose_cmp(left: &SortKey<'_>, right: &SortKey<'_>) -> Ordering {
	match (left, right) {
		(SortKey::Number(a), SortKey::Text(b)) => match b.trim().parse::<f64>() {
			Ok(b) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
			Err(_) => Ordering::Less,
		},
		(SortKey::Text(a), SortKey::Number(b)) => match a.trim().parse::<f64>() {
			Ok(a) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
			Err(_) => Ordering::Greater,
		},
		_ => compare_keys(left, right),
	}
}

/// ASCII case-insensitive `LIKE` with `%` and `_` wildcards
fn like(text: &str, pattern: &str) -> bool {
	let text: Vec<char> = text.chars().map(|c| c.to_ascii_lowercase()).collect();
	let pattern: Vec<char> = pattern.chars().map(|c| c.to_ascii_lowercase()).collect();

	let (mut t, mut p) = (0, 0);
	let mut backtrack: Option<(usize, usize)> = None;
	while t < text.len() {
		if p < pattern.len() && (pattern[p] == '_' || pattern[p] == text[t]) {
			t += 1;
			p += 1;
		} else if p < pattern.len() && pattern[p] == '%' {
			backtrack = Some((p, t));
			p += 1;
		} else if let Some((star, matched)) = backtrack {
			p = star + 1;
			t = matched + 1;
			backtrack = Some((star, matched + 1));
		} else {
			return false;
		}
	}
	pattern[p..].iter().all(|c| *c == '%')
}
